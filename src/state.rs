use super::*;

pub(crate) struct State {
  epoch: u64,
  help: HelpView,
  history: History,
  list_height: usize,
  mode: Mode,
  pending_effects: Vec<Effect>,
  refresh: Option<RefreshTimer>,
  status: StatusLine,
  stories: Option<StoriesView>,
}

impl State {
  pub(crate) fn current_route(&self) -> &Route {
    self.history.current()
  }

  pub(crate) fn dispatch_command(&mut self, command: Command) -> CommandDispatch {
    let mut should_exit = false;

    match command {
      Command::Back => {
        if !self.go_back() {
          should_exit = true;
        }
      }
      Command::CollapseComment => {
        if let Mode::Story(view) = &mut self.mode {
          view.comments.collapse_selected();
        }
      }
      Command::ExpandComment => self.expand_comment(false),
      Command::Forward => self.go_forward(),
      Command::HideHelp => self.help.hide(&mut self.status),
      Command::None => {}
      Command::OpenLink => self.open_link(),
      Command::OpenProfile => self.open_profile(),
      Command::OpenStory => self.open_story(),
      Command::PageDown => self.page_down(),
      Command::PageUp => self.page_up(),
      Command::Quit => should_exit = true,
      Command::SelectFirst => self.select_first(),
      Command::SelectLast => self.select_last(),
      Command::SelectNext => self.select_next(),
      Command::SelectPrevious => self.select_previous(),
      Command::ShowHelp => self.help.show(&mut self.status),
      Command::SwitchFeedLeft => self.switch_feed(false),
      Command::SwitchFeedRight => self.switch_feed(true),
      Command::ToggleComment => self.expand_comment(true),
    }

    CommandDispatch {
      effects: std::mem::take(&mut self.pending_effects),
      should_exit,
    }
  }

  fn expand_comment(&mut self, toggle: bool) {
    if let Mode::Story(view) = &mut self.mode {
      let request = if toggle {
        view.comments.toggle_selected()
      } else {
        view.comments.expand_selected()
      };

      if let Some((node, ids)) = request {
        self.pending_effects.push(Effect::FetchReplies {
          epoch: self.epoch,
          ids,
          node,
        });
      }
    }
  }

  fn go_back(&mut self) -> bool {
    let Some(route) = self.history.back() else {
      return false;
    };

    self.stash_stories();
    self.load_route(&route);

    true
  }

  fn go_forward(&mut self) {
    if let Some(route) = self.history.forward() {
      self.stash_stories();
      self.load_route(&route);
    }
  }

  pub(crate) fn handle_event(&mut self, event: Event) -> Vec<Effect> {
    if event.epoch() != self.epoch {
      return Vec::new();
    }

    match event {
      Event::CommentBatch { result, .. } => {
        if let Mode::Story(view) = &mut self.mode {
          match result {
            Ok(comments) => view.comments.apply_batch(comments),
            Err(error) => {
              view.comments.abort_batch();
              self.notify(format!("Could not load comments: {error}"));
            }
          }
        }
      }
      Event::Replies { node, result, .. } => {
        if let Mode::Story(view) = &mut self.mode {
          match result {
            Ok(comments) => view.comments.apply_replies(node, comments),
            Err(error) => {
              view.comments.abort_replies(node);
              self.notify(format!("Could not load replies: {error}"));
            }
          }
        }
      }
      Event::StoryDetail { result, .. } => {
        if let Mode::Story(view) = &mut self.mode {
          match result {
            Ok(story) => {
              let batch = view.apply_story(story);

              if let Some(ids) = batch {
                self.pending_effects.push(Effect::FetchCommentBatch {
                  epoch: self.epoch,
                  ids,
                });
              }

              self.set_status(DETAIL_STATUS);
            }
            Err(error) => {
              view.failed = true;
              self.notify(format!("Could not load story: {error}"));
            }
          }
        }
      }
      Event::StoryIds { result, .. } => {
        if let Mode::Stories(view) = &mut self.mode {
          match result {
            Ok(ids) => {
              if let Some(page) = view.apply_ids(ids) {
                self.pending_effects.push(Effect::FetchStoryPage {
                  epoch: self.epoch,
                  ids: page,
                });
              } else {
                self.set_status(STORIES_STATUS);
              }
            }
            Err(error) => {
              view.clear_loading();
              self.notify(format!("Could not load stories: {error}"));
            }
          }
        }
      }
      Event::StoryPage { result, .. } => {
        if let Mode::Stories(view) = &mut self.mode {
          match result {
            Ok(stories) => {
              view.apply_page(stories);
              self.set_status(STORIES_STATUS);
            }
            Err(error) => {
              view.clear_loading();
              self.notify(format!("Could not load more stories: {error}"));
            }
          }
        }
      }
      Event::StoryRefreshed { result, .. } => {
        if let (Mode::Story(view), Ok(story)) = (&mut self.mode, result) {
          view.apply_refresh(story);
        }
      }
      Event::UserLoaded { result, .. } => {
        if let Mode::User(view) = &mut self.mode {
          match result {
            Ok(user) => {
              view.user = Some(user);
              self.set_status(PROFILE_STATUS);
            }
            Err(error) => {
              view.failed = true;
              self.notify(format!("Could not load profile: {error}"));
            }
          }
        }
      }
      Event::UserRefreshed { result, .. } => {
        if let (Mode::User(view), Ok(user)) = (&mut self.mode, result) {
          view.apply_refresh(user);
        }
      }
    }

    std::mem::take(&mut self.pending_effects)
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn help_is_visible(&self) -> bool {
    self.help.is_visible()
  }

  fn load_route(&mut self, route: &Route) {
    self.epoch = self.epoch.wrapping_add(1);
    self.refresh = None;

    match route {
      Route::Stories(feed) => {
        let restored = self
          .stories
          .take()
          .filter(|view| view.feed == *feed && !view.entries.is_empty());

        match restored {
          Some(mut view) => {
            view.clear_loading();
            self.mode = Mode::Stories(view);
            self.set_status(STORIES_STATUS);
          }
          None => {
            self.mode = Mode::Stories(StoriesView::new(*feed));
            self.set_status(LOADING_STORIES_STATUS);
            self.pending_effects.push(Effect::FetchStoryIds {
              epoch: self.epoch,
              feed: *feed,
            });
          }
        }
      }
      Route::Story(id) => {
        self.mode = Mode::Story(DetailView::new(*id));
        self.refresh = Some(RefreshTimer::new(REFRESH_INTERVAL));
        self.set_status(LOADING_STORY_STATUS);
        self.pending_effects.push(Effect::FetchStoryDetail {
          epoch: self.epoch,
          id: *id,
        });
      }
      Route::User(username) => {
        self.mode = Mode::User(UserView::new(username.clone()));
        self.refresh = Some(RefreshTimer::new(REFRESH_INTERVAL));
        self.set_status(LOADING_PROFILE_STATUS);
        self.pending_effects.push(Effect::FetchUser {
          epoch: self.epoch,
          username: username.clone(),
        });
      }
    }
  }

  pub(crate) fn message(&self) -> &str {
    self.status.message()
  }

  pub(crate) fn mode(&self) -> &Mode {
    &self.mode
  }

  pub(crate) fn mode_mut(&mut self) -> &mut Mode {
    &mut self.mode
  }

  fn navigate(&mut self, route: Route) {
    self.stash_stories();
    self.history.push(route.clone());
    self.load_route(&route);
  }

  pub(crate) fn new(initial: Route) -> Self {
    let mut state = Self {
      epoch: 0,
      help: HelpView::new(),
      history: History::new(initial.clone()),
      list_height: 0,
      mode: Mode::Stories(StoriesView::new(Feed::Top)),
      pending_effects: Vec::new(),
      refresh: None,
      status: StatusLine::new(),
      stories: None,
    };

    state.load_route(&initial);

    state
  }

  pub(crate) fn notify(&mut self, message: String) {
    if !self.help.is_visible() {
      self.status.notify(message);
    }
  }

  fn open_link(&mut self) {
    let url = match &self.mode {
      Mode::Stories(view) => view.selected_entry().map(StoryEntry::resolved_url),
      Mode::Story(view) => Some(
        view
          .comments
          .selected_entry()
          .map_or_else(|| view.story_url(), CommentNode::permalink),
      ),
      Mode::User(_) => None,
    };

    if let Some(url) = url {
      self.pending_effects.push(Effect::OpenUrl { url });
    }
  }

  fn open_profile(&mut self) {
    let username = match &self.mode {
      Mode::Stories(view) => {
        view.selected_entry().and_then(|entry| entry.author.clone())
      }
      Mode::Story(view) => view
        .comments
        .selected_entry()
        .and_then(|entry| entry.author.clone())
        .or_else(|| view.story.as_ref().and_then(|story| story.by.clone())),
      Mode::User(_) => None,
    };

    if let Some(username) = username {
      self.navigate(Route::User(username));
    }
  }

  fn open_story(&mut self) {
    if let Mode::Stories(view) = &self.mode
      && let Some(entry) = view.selected_entry()
    {
      let id = entry.id;
      self.navigate(Route::Story(id));
    }
  }

  fn page_down(&mut self) {
    let jump = self.page_jump();

    let target = match &mut self.mode {
      Mode::Stories(view) => Some(view.selected_raw().saturating_add(jump)),
      Mode::Story(view) => {
        view.comments.page_down(jump);
        None
      }
      Mode::User(_) => None,
    };

    if let Some(target) = target {
      self.select_story_index(target);
    }
  }

  fn page_jump(&self) -> usize {
    self.list_height.saturating_sub(1).max(1)
  }

  fn page_up(&mut self) {
    let jump = self.page_jump();

    let target = match &mut self.mode {
      Mode::Stories(view) => Some(view.selected_raw().saturating_sub(jump)),
      Mode::Story(view) => {
        view.comments.page_up(jump);
        None
      }
      Mode::User(_) => None,
    };

    if let Some(target) = target {
      self.select_story_index(target);
    }
  }

  fn select_first(&mut self) {
    match &mut self.mode {
      Mode::Stories(view) => view.set_selected(0),
      Mode::Story(view) => view.comments.select_index_at(0),
      Mode::User(view) => view.scroll = 0,
    }
  }

  fn select_last(&mut self) {
    match &mut self.mode {
      Mode::Stories(view) => {
        let last = view.entries.len().saturating_sub(1);
        view.set_selected(last);
      }
      Mode::Story(view) => {
        let (visible, _) = view.comments.visible_with_selection();

        if !visible.is_empty() {
          view.comments.select_index_at(visible.len().saturating_sub(1));
        }
      }
      Mode::User(_) => {}
    }
  }

  fn select_next(&mut self) {
    let target = match &mut self.mode {
      Mode::Stories(view) => Some(view.selected_raw().saturating_add(1)),
      Mode::Story(view) => {
        view.comments.select_next();
        None
      }
      Mode::User(_) => None,
    };

    if let Some(target) = target {
      self.select_story_index(target);
    }
  }

  fn select_previous(&mut self) {
    let target = match &mut self.mode {
      Mode::Stories(view) => Some(view.selected_raw().saturating_sub(1)),
      Mode::Story(view) => {
        view.comments.select_previous();
        None
      }
      Mode::User(_) => None,
    };

    if let Some(target) = target {
      self.select_story_index(target);
    }
  }

  fn select_story_index(&mut self, target: usize) {
    let request = if let Mode::Stories(view) = &mut self.mode {
      if target < view.entries.len() {
        view.set_selected(target);
        None
      } else {
        view.request_past_end(target)
      }
    } else {
      None
    };

    if let Some(ids) = request {
      self.set_status(LOADING_MORE_STORIES_STATUS);

      self.pending_effects.push(Effect::FetchStoryPage {
        epoch: self.epoch,
        ids,
      });
    }
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  fn set_status(&mut self, text: &str) {
    if !self.help.is_visible() {
      self.status.set(text);
    }
  }

  fn stash_stories(&mut self) {
    if let Mode::Stories(view) = &mut self.mode {
      let feed = view.feed;
      self.stories = Some(std::mem::replace(view, StoriesView::new(feed)));
    }
  }

  fn switch_feed(&mut self, forward: bool) {
    if let Mode::Stories(view) = &self.mode {
      let feed = if forward {
        view.feed.next()
      } else {
        view.feed.previous()
      };

      self.navigate(Route::Stories(feed));
    }
  }

  pub(crate) fn take_effects(&mut self) -> Vec<Effect> {
    std::mem::take(&mut self.pending_effects)
  }

  pub(crate) fn tick(&mut self, now: Instant) -> Vec<Effect> {
    self.status.tick(now);

    let refresh_due = self.refresh.as_mut().is_some_and(|timer| timer.poll(now));

    if refresh_due {
      match &self.mode {
        Mode::Story(view) => self.pending_effects.push(Effect::RefreshStory {
          epoch: self.epoch,
          id: view.id,
        }),
        Mode::User(view) => self.pending_effects.push(Effect::RefreshUser {
          epoch: self.epoch,
          username: view.username.clone(),
        }),
        Mode::Stories(_) => {}
      }
    }

    let batch = if let Mode::Story(view) = &mut self.mode {
      if view.comments.should_load_more(self.list_height) {
        view.comments.next_batch()
      } else {
        None
      }
    } else {
      None
    };

    if let Some(ids) = batch {
      self.pending_effects.push(Effect::FetchCommentBatch {
        epoch: self.epoch,
        ids,
      });
    }

    std::mem::take(&mut self.pending_effects)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_story(id: u64, kids: Vec<u64>) -> Story {
    Story {
      by: Some("dhouston".to_string()),
      descendants: Some(u64::try_from(kids.len()).unwrap_or(0)),
      id,
      kids: Some(kids),
      score: Some(104),
      text: None,
      time: Some(1175714200),
      title: Some(format!("Story {id}")),
      url: None,
    }
  }

  fn loaded_state() -> State {
    let mut state = State::new(Route::Stories(Feed::Top));

    let initial = state.take_effects();
    assert_eq!(initial.len(), 1);

    let effects = state.handle_event(Event::StoryIds {
      epoch: state.epoch,
      result: Ok((1..=30).collect()),
    });

    let Some(Effect::FetchStoryPage { ids, .. }) = effects.first() else {
      panic!("expected a page fetch");
    };

    let stories = ids.iter().map(|&id| sample_story(id, Vec::new())).collect();

    state.handle_event(Event::StoryPage {
      epoch: state.epoch,
      result: Ok(stories),
    });

    state
  }

  #[test]
  fn opening_a_story_arms_the_refresh_timer() {
    let mut state = loaded_state();

    let dispatch = state.dispatch_command(Command::OpenStory);

    assert!(!dispatch.should_exit);
    assert!(matches!(state.mode, Mode::Story(_)));
    assert!(state.refresh.is_some());
    assert_eq!(state.current_route(), &Route::Story(1));

    assert!(matches!(
      dispatch.effects.first(),
      Some(Effect::FetchStoryDetail { id: 1, .. })
    ));
  }

  #[test]
  fn going_back_clears_the_refresh_timer_and_restores_the_list() {
    let mut state = loaded_state();

    state.dispatch_command(Command::OpenStory);
    assert!(state.refresh.is_some());

    let dispatch = state.dispatch_command(Command::Back);

    assert!(!dispatch.should_exit);
    assert!(dispatch.effects.is_empty());
    assert!(state.refresh.is_none());

    let Mode::Stories(view) = &state.mode else {
      panic!("expected the story list");
    };

    assert_eq!(view.entries.len(), 10);
  }

  #[test]
  fn going_back_past_the_first_view_exits() {
    let mut state = loaded_state();

    let dispatch = state.dispatch_command(Command::Back);

    assert!(dispatch.should_exit);
  }

  #[test]
  fn story_detail_requests_the_first_comment_batch() {
    let mut state = loaded_state();

    state.dispatch_command(Command::OpenStory);

    let effects = state.handle_event(Event::StoryDetail {
      epoch: state.epoch,
      result: Ok(sample_story(1, vec![10, 11, 12, 13, 14, 15, 16])),
    });

    assert!(matches!(
      effects.first(),
      Some(Effect::FetchCommentBatch { ids, .. }) if ids == &vec![10, 11, 12, 13, 14]
    ));
  }

  #[test]
  fn stale_events_are_discarded() {
    let mut state = loaded_state();

    state.dispatch_command(Command::OpenStory);

    let stale = state.epoch.wrapping_sub(1);

    let effects = state.handle_event(Event::StoryDetail {
      epoch: stale,
      result: Ok(sample_story(1, vec![10])),
    });

    assert!(effects.is_empty());

    let Mode::Story(view) = &state.mode else {
      panic!("expected the story view");
    };

    assert!(view.story.is_none());
  }

  #[test]
  fn switching_feeds_resets_and_refetches() {
    let mut state = loaded_state();

    let dispatch = state.dispatch_command(Command::SwitchFeedRight);

    assert!(matches!(
      dispatch.effects.first(),
      Some(Effect::FetchStoryIds { feed: Feed::Best, .. })
    ));

    let Mode::Stories(view) = &state.mode else {
      panic!("expected the story list");
    };

    assert!(view.entries.is_empty());
    assert_eq!(view.feed, Feed::Best);
  }

  #[test]
  fn selecting_past_the_end_requests_the_next_page() {
    let mut state = loaded_state();

    state.dispatch_command(Command::SelectLast);

    let dispatch = state.dispatch_command(Command::SelectNext);

    assert!(matches!(
      dispatch.effects.first(),
      Some(Effect::FetchStoryPage { ids, .. }) if ids == &(11..=20).collect::<Vec<u64>>()
    ));
  }

  #[test]
  fn the_tick_sentinel_requests_the_next_comment_batch() {
    let mut state = loaded_state();

    state.dispatch_command(Command::OpenStory);

    state.handle_event(Event::StoryDetail {
      epoch: state.epoch,
      result: Ok(sample_story(1, (10..=20).collect())),
    });

    let Mode::Story(view) = &mut state.mode else {
      panic!("expected the story view");
    };

    let comments = (10..=14)
      .map(|id| Comment {
        author: Some("alice".to_string()),
        dead: false,
        deleted: false,
        id,
        parent: None,
        pending: Vec::new(),
        text: Some("hi".to_string()),
        time: None,
      })
      .collect();

    view.comments.apply_batch(comments);

    state.set_list_height(40);

    let effects = state.tick(Instant::now());

    assert!(matches!(
      effects.first(),
      Some(Effect::FetchCommentBatch { ids, .. }) if ids == &(15..=19).collect::<Vec<u64>>()
    ));
  }

  #[test]
  fn the_refresh_tick_refetches_the_active_subject() {
    let mut state = loaded_state();

    state.dispatch_command(Command::OpenStory);

    assert!(state.tick(Instant::now()).is_empty());

    let effects = state.tick(Instant::now() + REFRESH_INTERVAL);

    assert!(matches!(
      effects.first(),
      Some(Effect::RefreshStory { id: 1, .. })
    ));
  }

  #[test]
  fn opening_a_profile_navigates_and_arms_the_refresh_timer() {
    let mut state = loaded_state();

    let dispatch = state.dispatch_command(Command::OpenProfile);

    assert!(matches!(
      dispatch.effects.first(),
      Some(Effect::FetchUser { username, .. }) if username == "dhouston"
    ));

    assert!(state.refresh.is_some());
    assert_eq!(state.current_route(), &Route::User("dhouston".to_string()));
  }
}
