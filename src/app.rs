use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  fn comment_item(
    entry: &CommentNode,
    available_width: u16,
    now: DateTime<Utc>,
  ) -> ListItem {
    let depth_indent = "  ".repeat(entry.depth);
    let indent = format!("{BASE_INDENT}{depth_indent}");

    if entry.removed {
      return ListItem::new(vec![
        Line::from(vec![
          Span::raw(indent.clone()),
          Span::styled(
            "[deleted]".to_string(),
            Style::default().fg(Color::DarkGray),
          ),
        ]),
        Line::from(Span::raw(indent)),
      ]);
    }

    let toggle = entry.has_children().then_some(if entry.expanded {
      "[-]"
    } else {
      "[+]"
    });

    let mut header = vec![Span::raw(indent.clone())];

    if let Some(symbol) = toggle {
      header.push(Span::raw(symbol));
      header.push(Span::raw(" "));
    }

    header.push(Span::styled(
      entry.header(now),
      Style::default().fg(Color::White),
    ));

    let mut lines = vec![Line::from(header)];

    if !entry.body.is_empty() {
      let prefix_width = indent.chars().count();

      let max_width = usize::from(available_width);
      let wrap_width = max_width.saturating_sub(prefix_width).max(1);

      for line in wrap_text(&entry.body, wrap_width) {
        lines.push(Line::from(vec![
          Span::raw(indent.clone()),
          Span::styled(line, Style::default().fg(Color::DarkGray)),
        ]));
      }
    }

    if !entry.pending.is_empty() {
      let label = if entry.requested {
        "loading replies...".to_string()
      } else {
        format!("▸ {}", entry.pending_label())
      };

      lines.push(Line::from(vec![
        Span::raw(indent.clone()),
        Span::styled(label, Style::default().fg(Color::Cyan)),
      ]));
    }

    lines.push(Line::from(Span::raw(indent.clone())));

    ListItem::new(lines)
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.state.set_list_height(usize::from(layout[1].height));

    self.draw_header(frame, layout[0]);

    match self.state.mode_mut() {
      Mode::Stories(view) => Self::draw_stories(frame, layout[1], view),
      Mode::Story(view) => Self::draw_story(frame, layout[1], view),
      Mode::User(view) => Self::draw_user(frame, layout[1], view),
    }

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[2]);

    self.state.help().draw(frame);
  }

  fn draw_header(&self, frame: &mut Frame, area: Rect) {
    let path = self.state.current_route().path();

    let path_width = u16::try_from(path.chars().count())
      .unwrap_or(u16::MAX)
      .min(area.width);

    let columns = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Min(0), Constraint::Length(path_width)])
      .split(area);

    match self.state.mode() {
      Mode::Stories(view) => {
        let titles: Vec<Line> = Feed::all()
          .iter()
          .map(|feed| Line::from(feed.label().to_uppercase()))
          .collect();

        let selected = Feed::all()
          .iter()
          .position(|feed| *feed == view.feed)
          .unwrap_or(0);

        let tabs = Tabs::new(titles)
          .select(selected)
          .style(Style::default().fg(Color::DarkGray))
          .highlight_style(
            Style::default()
              .fg(Color::Cyan)
              .add_modifier(Modifier::BOLD),
          )
          .divider(Span::raw(" "));

        frame.render_widget(tabs, columns[0]);
      }
      Mode::Story(view) => {
        let title = view
          .story
          .as_ref()
          .and_then(|story| story.title.clone())
          .unwrap_or_else(|| "Story".to_string());

        let header = Paragraph::new(Line::from(Span::styled(
          title,
          Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        )));

        frame.render_widget(header, columns[0]);
      }
      Mode::User(view) => {
        let header = Paragraph::new(Line::from(Span::styled(
          view.username.clone(),
          Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        )));

        frame.render_widget(header, columns[0]);
      }
    }

    let path_widget = Paragraph::new(Line::from(Span::styled(
      path,
      Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(path_widget, columns[1]);
  }

  fn draw_stories(frame: &mut Frame, area: Rect, view: &mut StoriesView) {
    let now = Utc::now();

    let mut items: Vec<ListItem> = Vec::new();

    if view.entries.is_empty() {
      let text = if view.is_loading() {
        LOADING_STORIES_STATUS
      } else {
        "Nothing to show. Try another feed."
      };

      items.push(ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::raw(text),
      ])));
    } else {
      for (rank, entry) in view.entries.iter().enumerate() {
        let lines = vec![
          Line::from(vec![
            Span::raw(BASE_INDENT),
            Span::styled(
              format!("{}. ", rank + 1),
              Style::default().fg(Color::DarkGray),
            ),
            Span::styled(entry.title.clone(), Style::default().fg(Color::White)),
          ]),
          Line::from(vec![
            Span::raw(BASE_INDENT),
            Span::styled(entry.meta(now), Style::default().fg(Color::DarkGray)),
          ]),
          Line::from(Span::raw(BASE_INDENT)),
        ];

        items.push(ListItem::new(lines));
      }

      if view.is_loading() {
        items.push(ListItem::new(Line::from(vec![
          Span::raw(BASE_INDENT),
          Span::styled(
            LOADING_MORE_STORIES_STATUS,
            Style::default().fg(Color::DarkGray),
          ),
        ])));
      } else if view.exhausted() {
        items.push(ListItem::new(Line::from(vec![
          Span::raw(BASE_INDENT),
          Span::styled(END_OF_LIST_TEXT, Style::default().fg(Color::DarkGray)),
        ])));
      }
    }

    let mut list_state = ListState::default()
      .with_selected(view.selected_index())
      .with_offset(view.offset());

    let list = List::new(items)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("");

    frame.render_stateful_widget(list, area, &mut list_state);

    view.set_offset(list_state.offset());
  }

  fn draw_story(frame: &mut Frame, area: Rect, view: &mut DetailView) {
    let now = Utc::now();

    let width = usize::from(area.width.saturating_sub(2).max(1));

    let mut header_lines: Vec<Line> = Vec::new();

    match &view.story {
      Some(story) => {
        let mut meta_parts = vec![format_points(story.score.unwrap_or(0))];

        if let Some(by) = &story.by {
          meta_parts.push(format!("by {by}"));
        }

        if let Some(time) = story.time {
          meta_parts.push(relative_time(time, now));
        }

        meta_parts.push(format_comments(story.descendants.unwrap_or(0)));

        header_lines.push(Line::from(vec![
          Span::raw(BASE_INDENT),
          Span::styled(
            meta_parts.join(" • "),
            Style::default().fg(Color::DarkGray),
          ),
        ]));

        if let Some(url) = &story.url
          && !url.is_empty()
        {
          header_lines.push(Line::from(vec![
            Span::raw(BASE_INDENT),
            Span::styled(
              truncate(url, width),
              Style::default().fg(Color::DarkGray),
            ),
          ]));
        }

        if let Some(text) = &story.text {
          for line in wrap_text(&strip_tags(text), width) {
            header_lines.push(Line::from(vec![
              Span::raw(BASE_INDENT),
              Span::raw(line),
            ]));
          }
        }

        header_lines.push(Line::from(Span::raw(BASE_INDENT)));
      }
      None => {
        let text = if view.failed {
          "Could not load this story."
        } else {
          LOADING_STORY_STATUS
        };

        header_lines.push(Line::from(vec![
          Span::raw(BASE_INDENT),
          Span::raw(text),
        ]));
      }
    }

    let header_height = u16::try_from(header_lines.len())
      .unwrap_or(u16::MAX)
      .min(area.height / 2)
      .max(1);

    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(header_height), Constraint::Min(0)])
      .split(area);

    frame.render_widget(Paragraph::new(header_lines), rows[0]);

    let loaded = view.story.is_some();

    let tree = &mut view.comments;

    let (visible, selected_pos) = tree.visible_with_selection();

    let mut items: Vec<ListItem> = if visible.is_empty() {
      let text = if tree.is_loading() {
        LOADING_COMMENTS_STATUS
      } else if loaded && tree.root_count() == 0 {
        "No comments yet."
      } else {
        ""
      };

      if text.is_empty() {
        Vec::new()
      } else {
        vec![ListItem::new(Line::from(vec![
          Span::raw(BASE_INDENT),
          Span::raw(text),
        ]))]
      }
    } else {
      visible
        .iter()
        .map(|&idx| Self::comment_item(&tree.entries[idx], rows[1].width, now))
        .collect()
    };

    if !visible.is_empty() && (tree.is_loading() || tree.has_more()) {
      items.push(ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(
          LOADING_MORE_COMMENTS_TEXT,
          Style::default().fg(Color::DarkGray),
        ),
      ])));
    }

    let offset = tree.offset.min(selected_pos.unwrap_or(0));

    let mut list_state = ListState::default()
      .with_selected(selected_pos)
      .with_offset(offset);

    let list = List::new(items)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("");

    frame.render_stateful_widget(list, rows[1], &mut list_state);

    tree.offset = list_state.offset();
  }

  fn draw_user(frame: &mut Frame, area: Rect, view: &UserView) {
    let width = usize::from(area.width.saturating_sub(2).max(1));

    let mut lines: Vec<Line> = Vec::new();

    match &view.user {
      Some(user) => {
        if let Some(karma) = user.karma {
          lines.push(Line::from(vec![
            Span::raw(BASE_INDENT),
            Span::styled(
              format!("karma: {karma}"),
              Style::default().fg(Color::White),
            ),
          ]));
        }

        if let Some(created) = user.created {
          lines.push(Line::from(vec![
            Span::raw(BASE_INDENT),
            Span::styled(
              format!("joined: {}", format_date(created)),
              Style::default().fg(Color::DarkGray),
            ),
          ]));
        }

        if let Some(about) = &user.about {
          lines.push(Line::from(Span::raw(BASE_INDENT)));

          for line in wrap_text(&html_to_text(about), width) {
            lines.push(Line::from(vec![Span::raw(BASE_INDENT), Span::raw(line)]));
          }
        }
      }
      None => {
        let text = if view.failed {
          "Could not load this profile."
        } else {
          LOADING_PROFILE_STATUS
        };

        lines.push(Line::from(vec![Span::raw(BASE_INDENT), Span::raw(text)]));
      }
    }

    let paragraph = Paragraph::new(lines).scroll((view.scroll, 0));

    frame.render_widget(paragraph, area);
  }

  fn execute_effect(&mut self, effect: Effect) {
    match effect {
      Effect::FetchCommentBatch { epoch, ids } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        let handle = self.handle.clone();

        handle.spawn(async move {
          let _ = sender.send(Event::CommentBatch {
            epoch,
            result: client.fetch_forest(&ids, MAX_INITIAL_DEPTH).await,
          });
        });
      }
      Effect::FetchReplies { epoch, ids, node } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        let handle = self.handle.clone();

        handle.spawn(async move {
          let _ = sender.send(Event::Replies {
            epoch,
            node,
            result: client.fetch_forest(&ids, 0).await,
          });
        });
      }
      Effect::FetchStoryDetail { epoch, id } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        let handle = self.handle.clone();

        handle.spawn(async move {
          let _ = sender.send(Event::StoryDetail {
            epoch,
            result: client.fetch_story(id).await,
          });
        });
      }
      Effect::FetchStoryIds { epoch, feed } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        let handle = self.handle.clone();

        handle.spawn(async move {
          let _ = sender.send(Event::StoryIds {
            epoch,
            result: client.fetch_ids(feed).await,
          });
        });
      }
      Effect::FetchStoryPage { epoch, ids } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        let handle = self.handle.clone();

        handle.spawn(async move {
          let _ = sender.send(Event::StoryPage {
            epoch,
            result: client.fetch_page(&ids).await,
          });
        });
      }
      Effect::FetchUser { epoch, username } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        let handle = self.handle.clone();

        handle.spawn(async move {
          let _ = sender.send(Event::UserLoaded {
            epoch,
            result: client.fetch_user(&username).await,
          });
        });
      }
      Effect::OpenUrl { url } => match webbrowser::open(&url) {
        Ok(()) => {
          self
            .state
            .notify(format!("Opened in browser: {}", truncate(&url, 80)));
        }
        Err(error) => {
          self
            .state
            .notify(format!("Could not open link: {error}"));
        }
      },
      Effect::RefreshStory { epoch, id } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        let handle = self.handle.clone();

        handle.spawn(async move {
          let _ = sender.send(Event::StoryRefreshed {
            epoch,
            result: client.fetch_story(id).await,
          });
        });
      }
      Effect::RefreshUser { epoch, username } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        let handle = self.handle.clone();

        handle.spawn(async move {
          let _ = sender.send(Event::UserRefreshed {
            epoch,
            result: client.fetch_user(&username).await,
          });
        });
      }
    }
  }

  pub(crate) fn new(client: Client, initial: Route) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let state = State::new(initial);

    let mut app = Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state,
    };

    for effect in app.state.take_effects() {
      app.execute_effect(effect);
    }

    app
  }

  fn process_pending_events(&mut self) {
    for effect in self.state.tick(Instant::now()) {
      self.execute_effect(effect);
    }

    while let Ok(event) = self.event_rx.try_recv() {
      for effect in self.state.handle_event(event) {
        self.execute_effect(effect);
      }
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        self.process_pending_events();
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        self.process_pending_events();
        continue;
      };

      if key.kind != KeyEventKind::Press {
        self.process_pending_events();
        continue;
      }

      let command = if self.state.help_is_visible() {
        HelpView::handle_key(key)
      } else {
        self.state.mode_mut().handle_key(key)
      };

      let dispatch = self.state.dispatch_command(command);

      for effect in dispatch.effects {
        self.execute_effect(effect);
      }

      if dispatch.should_exit {
        break;
      }

      self.process_pending_events();
    }

    Ok(())
  }
}
