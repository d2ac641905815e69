use super::*;

pub(crate) struct UserView {
  pub(crate) failed: bool,
  pub(crate) scroll: u16,
  pub(crate) user: Option<User>,
  pub(crate) username: String,
}

impl UserView {
  pub(crate) fn apply_refresh(&mut self, fresh: User) {
    if let Some(user) = self.user.as_mut() {
      user.karma = fresh.karma;
    }
  }

  pub(crate) fn new(username: String) -> Self {
    Self {
      failed: false,
      scroll: 0,
      user: None,
      username,
    }
  }

  pub(crate) fn scroll_down(&mut self) {
    self.scroll = self.scroll.saturating_add(1);
  }

  pub(crate) fn scroll_up(&mut self) {
    self.scroll = self.scroll.saturating_sub(1);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn apply_refresh_patches_karma_only() {
    let mut view = UserView::new("jl".to_string());

    view.user = Some(User {
      about: Some("bio".to_string()),
      created: Some(1173923446),
      id: "jl".to_string(),
      karma: Some(2937),
    });

    view.apply_refresh(User {
      about: None,
      created: None,
      id: "jl".to_string(),
      karma: Some(3000),
    });

    let user = view.user.as_ref().unwrap();

    assert_eq!(user.karma, Some(3000));
    assert_eq!(user.about.as_deref(), Some("bio"));
    assert_eq!(user.created, Some(1173923446));
  }

  #[test]
  fn scroll_saturates_at_zero() {
    let mut view = UserView::new("jl".to_string());

    view.scroll_up();
    assert_eq!(view.scroll, 0);

    view.scroll_down();
    view.scroll_down();
    view.scroll_up();
    assert_eq!(view.scroll, 1);
  }
}
