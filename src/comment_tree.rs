use super::*;

pub(crate) struct CommentTree {
  pub(crate) entries: Vec<CommentNode>,
  index: HashMap<u64, usize>,
  loading: bool,
  pub(crate) offset: usize,
  root_nodes: Vec<usize>,
  roots: Vec<u64>,
  selected: Option<usize>,
  served: usize,
}

impl CommentTree {
  pub(crate) fn abort_batch(&mut self) {
    self.loading = false;
  }

  pub(crate) fn abort_replies(&mut self, node: usize) {
    if let Some(entry) = self.entries.get_mut(node) {
      entry.requested = false;
    }
  }

  pub(crate) fn apply_batch(&mut self, comments: Vec<Comment>) {
    self.loading = false;

    for comment in comments {
      self.insert(comment, None);
    }

    if self.selected.is_none() {
      self.selected = self.root_nodes.first().copied();
    }
  }

  pub(crate) fn apply_replies(&mut self, node: usize, comments: Vec<Comment>) {
    if let Some(entry) = self.entries.get_mut(node) {
      entry.expanded = true;
      entry.pending.clear();
      entry.requested = false;
    }

    for comment in comments {
      self.insert(comment, Some(node));
    }
  }

  pub(crate) fn collapse_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.expanded && !entry.children.is_empty() {
        entry.expanded = false;
      } else if let Some(parent) = entry.parent {
        self.selected = Some(parent);
      }
    }

    self.ensure_selection_visible();
  }

  pub(crate) fn ensure_selection_visible(&mut self) {
    let mut current = self.selected;

    while let Some(idx) = current {
      if self.is_visible(idx) {
        self.selected = Some(idx);
        return;
      }

      current = self.entries.get(idx).and_then(|entry| entry.parent);
    }

    self.selected = self.visible_indexes().first().copied();
  }

  pub(crate) fn expand_selected(&mut self) -> Option<(usize, Vec<u64>)> {
    let mut request = None;

    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.has_children() {
        if entry.expanded {
          if let Some(child) = entry.children.first().copied() {
            self.selected = Some(child);
          }
        } else {
          entry.expanded = true;
        }
      } else if !entry.pending.is_empty() && !entry.requested {
        entry.requested = true;
        request = Some((selected, entry.pending.clone()));
      }
    }

    self.ensure_selection_visible();

    request
  }

  pub(crate) fn has_more(&self) -> bool {
    self.served < self.roots.len()
  }

  fn insert(&mut self, comment: Comment, fallback_parent: Option<usize>) {
    if self.index.contains_key(&comment.id) {
      return;
    }

    let parent = match comment.parent {
      Some(parent_id) => self.index.get(&parent_id).copied(),
      None => fallback_parent,
    };

    let depth = parent
      .and_then(|idx| self.entries.get(idx))
      .map_or(0, |entry| entry.depth.saturating_add(1));

    let idx = self.entries.len();

    let node = CommentNode::new(comment, depth, parent);

    self.index.insert(node.id, idx);
    self.entries.push(node);

    match parent {
      Some(parent_idx) => {
        if let Some(entry) = self.entries.get_mut(parent_idx) {
          entry.children.push(idx);
        }
      }
      None => self.root_nodes.push(idx),
    }
  }

  pub(crate) fn is_loading(&self) -> bool {
    self.loading
  }

  pub(crate) fn is_visible(&self, idx: usize) -> bool {
    let mut current = Some(idx);

    while let Some(i) = current {
      if let Some(parent) = self.entries.get(i).and_then(|entry| entry.parent) {
        if let Some(parent_entry) = self.entries.get(parent)
          && !parent_entry.expanded
        {
          return false;
        }

        current = Some(parent);
      } else {
        break;
      }
    }

    true
  }

  pub(crate) fn move_by(&mut self, delta: isize) {
    let (visible, selected_pos) = self.visible_with_selection();

    if visible.is_empty() {
      self.selected = None;
      return;
    }

    let current = selected_pos.unwrap_or(0);
    let max_index = visible.len().saturating_sub(1);

    let target = if delta >= 0 {
      let delta_usize = usize::try_from(delta).unwrap_or(usize::MAX);
      current.saturating_add(delta_usize).min(max_index)
    } else {
      let magnitude = delta
        .checked_abs()
        .and_then(|value| usize::try_from(value).ok())
        .unwrap_or(usize::MAX);

      current.saturating_sub(magnitude)
    };

    self.selected = Some(visible[target]);
  }

  pub(crate) fn new(roots: Vec<u64>) -> Self {
    Self {
      entries: Vec::new(),
      index: HashMap::new(),
      loading: false,
      offset: 0,
      root_nodes: Vec::new(),
      roots,
      selected: None,
      served: 0,
    }
  }

  pub(crate) fn next_batch(&mut self) -> Option<Vec<u64>> {
    if self.loading || self.served >= self.roots.len() {
      return None;
    }

    let end = self
      .served
      .saturating_add(COMMENTS_PER_BATCH)
      .min(self.roots.len());

    let ids = self.roots.get(self.served..end)?.to_vec();

    self.served = end;
    self.loading = true;

    Some(ids)
  }

  pub(crate) fn page_down(&mut self, amount: usize) {
    let step = amount.saturating_sub(1).max(1);
    let delta = isize::try_from(step).unwrap_or(isize::MAX);
    self.move_by(delta);
  }

  pub(crate) fn page_up(&mut self, amount: usize) {
    let step = amount.saturating_sub(1).max(1);
    let delta = isize::try_from(step).unwrap_or(isize::MAX);
    self.move_by(-delta);
  }

  pub(crate) fn root_count(&self) -> usize {
    self.roots.len()
  }

  pub(crate) fn select_index_at(&mut self, pos: usize) {
    let (visible, _) = self.visible_with_selection();

    if visible.is_empty() {
      self.selected = None;
      return;
    }

    let index = pos.min(visible.len().saturating_sub(1));

    self.selected = Some(visible[index]);
  }

  pub(crate) fn select_next(&mut self) {
    self.move_by(1);
  }

  pub(crate) fn select_previous(&mut self) {
    self.move_by(-1);
  }

  pub(crate) fn selected_entry(&self) -> Option<&CommentNode> {
    self.selected.and_then(|idx| self.entries.get(idx))
  }

  pub(crate) fn should_load_more(&self, height: usize) -> bool {
    if self.loading || height == 0 || !self.has_more() {
      return false;
    }

    self.offset.saturating_add(height) > self.visible_indexes().len()
  }

  pub(crate) fn toggle_selected(&mut self) -> Option<(usize, Vec<u64>)> {
    let mut request = None;

    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.has_children() {
        entry.expanded = !entry.expanded;
      } else if !entry.pending.is_empty() && !entry.requested {
        entry.requested = true;
        request = Some((selected, entry.pending.clone()));
      }
    }

    self.ensure_selection_visible();

    request
  }

  pub(crate) fn visible_indexes(&self) -> Vec<usize> {
    let mut stack = self.root_nodes.iter().rev().copied().collect::<Vec<_>>();
    let mut visible = Vec::new();

    while let Some(idx) = stack.pop() {
      visible.push(idx);

      if let Some(entry) = self.entries.get(idx)
        && entry.expanded
      {
        for &child in entry.children.iter().rev() {
          stack.push(child);
        }
      }
    }

    visible
  }

  pub(crate) fn visible_with_selection(&self) -> (Vec<usize>, Option<usize>) {
    let visible = self.visible_indexes();

    let selected_pos = self
      .selected
      .and_then(|selected| visible.iter().position(|&idx| idx == selected));

    (visible, selected_pos)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn comment(id: u64, parent: Option<u64>, pending: Vec<u64>) -> Comment {
    Comment {
      author: Some(format!("user{id}")),
      dead: false,
      deleted: false,
      id,
      parent,
      pending,
      text: Some(format!("comment {id}")),
      time: None,
    }
  }

  fn sample_tree() -> CommentTree {
    let mut tree = CommentTree::new(vec![1, 4, 5, 6, 7, 8, 9]);

    let batch = tree.next_batch().unwrap();
    assert_eq!(batch, vec![1, 4, 5, 6, 7]);

    tree.apply_batch(vec![
      comment(1, None, Vec::new()),
      comment(4, None, Vec::new()),
      comment(5, None, Vec::new()),
      comment(6, None, Vec::new()),
      comment(7, None, Vec::new()),
      comment(2, Some(1), Vec::new()),
      comment(3, Some(2), vec![10, 11, 12]),
    ]);

    tree
  }

  #[test]
  fn apply_batch_places_replies_under_their_parents() {
    let tree = sample_tree();

    let visible = tree.visible_indexes();
    let ids: Vec<u64> = visible.iter().map(|&idx| tree.entries[idx].id).collect();

    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);

    let depths: Vec<usize> =
      visible.iter().map(|&idx| tree.entries[idx].depth).collect();

    assert_eq!(depths, vec![0, 1, 2, 0, 0, 0, 0]);
  }

  #[test]
  fn next_batch_serves_at_most_the_batch_size_until_exhausted() {
    let mut tree = sample_tree();

    assert!(tree.has_more());

    tree.abort_batch();

    let batch = tree.next_batch().unwrap();
    assert_eq!(batch, vec![8, 9]);

    tree.apply_batch(vec![comment(8, None, Vec::new())]);

    assert!(!tree.has_more());
    assert_eq!(tree.next_batch(), None);
  }

  #[test]
  fn next_batch_waits_for_the_in_flight_batch() {
    let mut tree = CommentTree::new(vec![1, 2, 3, 4, 5, 6]);

    assert!(tree.next_batch().is_some());
    assert!(tree.is_loading());
    assert_eq!(tree.next_batch(), None);
  }

  #[test]
  fn deferred_replies_expand_on_demand_exactly_once() {
    let mut tree = sample_tree();

    tree.select_index_at(2);
    assert_eq!(tree.selected_entry().map(|entry| entry.id), Some(3));

    let (node, ids) = tree.expand_selected().unwrap();
    assert_eq!(ids, vec![10, 11, 12]);

    assert_eq!(tree.expand_selected(), None);

    tree.apply_replies(node, vec![
      comment(10, None, Vec::new()),
      comment(11, None, Vec::new()),
      comment(12, None, vec![13]),
    ]);

    let visible = tree.visible_indexes();
    let ids: Vec<u64> = visible.iter().map(|&idx| tree.entries[idx].id).collect();

    assert_eq!(ids, vec![1, 2, 3, 10, 11, 12, 4, 5, 6, 7]);

    let replies: Vec<usize> =
      visible.iter().map(|&idx| tree.entries[idx].depth).collect();

    assert_eq!(replies, vec![0, 1, 2, 3, 3, 3, 0, 0, 0, 0]);
  }

  #[test]
  fn abort_replies_allows_requesting_the_same_subtree_again() {
    let mut tree = sample_tree();

    tree.select_index_at(2);

    let (node, _) = tree.expand_selected().unwrap();

    tree.abort_replies(node);

    assert!(tree.expand_selected().is_some());
  }

  #[test]
  fn removed_comments_never_request_their_replies() {
    let mut tree = CommentTree::new(vec![1]);

    tree.next_batch();

    tree.apply_batch(vec![Comment {
      deleted: true,
      ..comment(1, None, vec![2, 3])
    }]);

    tree.select_index_at(0);

    assert_eq!(tree.expand_selected(), None);
    assert_eq!(tree.toggle_selected(), None);
    assert!(tree.entries[0].pending.is_empty());
  }

  #[test]
  fn collapse_hides_the_subtree_and_moves_to_the_parent() {
    let mut tree = sample_tree();

    tree.select_index_at(2);
    tree.collapse_selected();
    assert_eq!(tree.selected_entry().map(|entry| entry.id), Some(2));

    tree.collapse_selected();
    assert_eq!(tree.selected_entry().map(|entry| entry.id), Some(2));

    let visible = tree.visible_indexes();
    let ids: Vec<u64> = visible.iter().map(|&idx| tree.entries[idx].id).collect();

    assert_eq!(ids, vec![1, 2, 4, 5, 6, 7]);
  }

  #[test]
  fn should_load_more_requires_the_marker_in_view() {
    let mut tree = sample_tree();

    assert!(!tree.should_load_more(0));
    assert!(!tree.should_load_more(3));
    assert!(tree.should_load_more(8));

    tree.offset = 5;
    assert!(tree.should_load_more(3));

    tree.next_batch();
    assert!(!tree.should_load_more(8));
  }
}
