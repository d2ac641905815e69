use super::*;

pub(crate) struct StoriesView {
  cursor: usize,
  pub(crate) entries: Vec<StoryEntry>,
  pub(crate) feed: Feed,
  ids: Vec<u64>,
  loading: bool,
  offset: usize,
  pending_target: Option<usize>,
  selected: usize,
}

impl StoriesView {
  pub(crate) fn apply_ids(&mut self, mut ids: Vec<u64>) -> Option<Vec<u64>> {
    ids.truncate(MAX_STORIES);

    self.ids = ids;
    self.loading = false;

    self.next_page()
  }

  pub(crate) fn apply_page(&mut self, stories: Vec<Story>) {
    self.loading = false;

    self.cursor = self
      .cursor
      .saturating_add(stories.len())
      .min(self.ids.len());

    self.entries.extend(stories.into_iter().map(StoryEntry::from));

    if let Some(target) = self.pending_target.take()
      && !self.entries.is_empty()
    {
      self.selected = target.min(self.entries.len().saturating_sub(1));
    }
  }

  pub(crate) fn clear_loading(&mut self) {
    self.loading = false;
    self.pending_target = None;
  }

  pub(crate) fn exhausted(&self) -> bool {
    self.cursor >= self.ids.len()
  }

  pub(crate) fn has_more(&self) -> bool {
    self.cursor < self.ids.len()
  }

  pub(crate) fn is_loading(&self) -> bool {
    self.loading
  }

  pub(crate) fn new(feed: Feed) -> Self {
    Self {
      cursor: 0,
      entries: Vec::new(),
      feed,
      ids: Vec::new(),
      loading: true,
      offset: 0,
      pending_target: None,
      selected: 0,
    }
  }

  pub(crate) fn next_page(&mut self) -> Option<Vec<u64>> {
    if self.loading || !self.has_more() {
      return None;
    }

    let end = self
      .cursor
      .saturating_add(STORIES_PER_PAGE)
      .min(self.ids.len());

    let ids = self.ids.get(self.cursor..end)?.to_vec();

    self.loading = true;

    Some(ids)
  }

  pub(crate) fn offset(&self) -> usize {
    if self.entries.is_empty() {
      0
    } else {
      self.offset.min(self.selected_index().unwrap_or(0))
    }
  }

  pub(crate) fn request_past_end(&mut self, target: usize) -> Option<Vec<u64>> {
    if !self.has_more() {
      return None;
    }

    self.pending_target = Some(target);

    self.next_page()
  }

  pub(crate) fn selected_entry(&self) -> Option<&StoryEntry> {
    self
      .selected_index()
      .and_then(|index| self.entries.get(index))
  }

  pub(crate) fn selected_index(&self) -> Option<usize> {
    if self.entries.is_empty() {
      None
    } else {
      Some(self.selected.min(self.entries.len().saturating_sub(1)))
    }
  }

  pub(crate) fn selected_raw(&self) -> usize {
    self.selected
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    if self.entries.is_empty() {
      self.offset = 0;
    } else {
      let max_offset = self.entries.len().saturating_sub(1);
      self.offset = offset.min(max_offset);
    }
  }

  pub(crate) fn set_selected(&mut self, index: usize) {
    if self.entries.is_empty() {
      self.selected = 0;
    } else {
      self.selected = index.min(self.entries.len().saturating_sub(1));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn story(id: u64) -> Story {
    Story {
      by: Some(format!("user{id}")),
      descendants: Some(0),
      id,
      kids: None,
      score: Some(1),
      text: None,
      time: None,
      title: Some(format!("Story {id}")),
      url: None,
    }
  }

  fn stories(ids: &[u64]) -> Vec<Story> {
    ids.iter().copied().map(story).collect()
  }

  #[test]
  fn apply_ids_caps_the_list_and_requests_the_first_page() {
    let mut view = StoriesView::new(Feed::Top);

    let ids = (0..600).collect::<Vec<u64>>();

    let page = view.apply_ids(ids).unwrap();

    assert_eq!(page.len(), STORIES_PER_PAGE);
    assert_eq!(page, (0..10).collect::<Vec<u64>>());
    assert_eq!(view.ids.len(), MAX_STORIES);
  }

  #[test]
  fn pages_never_exceed_the_page_size_and_end_at_the_cap() {
    let mut view = StoriesView::new(Feed::Top);

    let page = view.apply_ids((0..23).collect()).unwrap();
    view.apply_page(stories(&page));

    let mut served = page.len();

    while view.has_more() {
      let page = view.next_page().unwrap();
      assert!(page.len() <= STORIES_PER_PAGE);
      served += page.len();
      view.apply_page(stories(&page));
    }

    assert_eq!(served, 23);
    assert!(view.exhausted());
    assert_eq!(view.next_page(), None);
  }

  #[test]
  fn next_page_waits_for_the_in_flight_page() {
    let mut view = StoriesView::new(Feed::Top);

    assert!(view.apply_ids((0..30).collect()).is_some());
    assert!(view.is_loading());
    assert_eq!(view.next_page(), None);
  }

  #[test]
  fn request_past_end_selects_the_target_once_the_page_lands() {
    let mut view = StoriesView::new(Feed::Top);

    let page = view.apply_ids((0..30).collect()).unwrap();
    view.apply_page(stories(&page));

    view.set_selected(9);

    let page = view.request_past_end(10).unwrap();
    assert_eq!(page, (10..20).collect::<Vec<u64>>());

    view.apply_page(stories(&page));

    assert_eq!(view.selected_index(), Some(10));
  }

  #[test]
  fn clear_loading_allows_a_later_retry() {
    let mut view = StoriesView::new(Feed::Top);

    view.apply_ids((0..30).collect()).unwrap();
    view.clear_loading();

    assert!(!view.is_loading());
    assert!(view.next_page().is_some());
  }

  #[test]
  fn selection_and_offset_are_clamped_to_bounds() {
    let mut view = StoriesView::new(Feed::Top);

    let page = view.apply_ids((0..10).collect()).unwrap();
    view.apply_page(stories(&page));

    view.set_selected(50);
    assert_eq!(view.selected_index(), Some(9));

    view.set_offset(50);
    assert_eq!(view.offset(), 9);
  }
}
