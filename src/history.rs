use super::*;

pub(crate) struct History {
  entries: Vec<Route>,
  position: usize,
}

impl History {
  pub(crate) fn back(&mut self) -> Option<Route> {
    if self.position == 0 {
      return None;
    }

    self.position -= 1;

    self.entries.get(self.position).cloned()
  }

  pub(crate) fn current(&self) -> &Route {
    &self.entries[self.position.min(self.entries.len().saturating_sub(1))]
  }

  pub(crate) fn forward(&mut self) -> Option<Route> {
    if self.position.saturating_add(1) >= self.entries.len() {
      return None;
    }

    self.position += 1;

    self.entries.get(self.position).cloned()
  }

  pub(crate) fn new(initial: Route) -> Self {
    Self {
      entries: vec![initial],
      position: 0,
    }
  }

  pub(crate) fn push(&mut self, route: Route) {
    self.entries.truncate(self.position.saturating_add(1));
    self.entries.push(route);
    self.position = self.entries.len().saturating_sub(1);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn back_and_forward_move_without_adding_entries() {
    let mut history = History::new(Route::Stories(Feed::Top));

    history.push(Route::Story(1));
    history.push(Route::User("pg".to_string()));

    assert_eq!(history.back(), Some(Route::Story(1)));
    assert_eq!(history.back(), Some(Route::Stories(Feed::Top)));
    assert_eq!(history.back(), None);

    assert_eq!(history.forward(), Some(Route::Story(1)));
    assert_eq!(history.forward(), Some(Route::User("pg".to_string())));
    assert_eq!(history.forward(), None);

    assert_eq!(history.entries.len(), 3);
  }

  #[test]
  fn push_truncates_the_forward_entries() {
    let mut history = History::new(Route::Stories(Feed::Top));

    history.push(Route::Story(1));
    history.push(Route::Story(2));

    history.back();
    history.back();

    history.push(Route::User("dang".to_string()));

    assert_eq!(history.forward(), None);
    assert_eq!(history.current(), &Route::User("dang".to_string()));
    assert_eq!(history.entries.len(), 2);
  }
}
