use super::*;

pub(crate) enum Mode {
  Stories(StoriesView),
  Story(DetailView),
  User(UserView),
}

impl Mode {
  pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Command {
    let modifiers = key.modifiers;

    match self {
      Mode::Stories(_) => match key.code {
        KeyCode::Char('q' | 'Q') => Command::Quit,
        KeyCode::Esc | KeyCode::Backspace => Command::Back,
        KeyCode::Char('?') => Command::ShowHelp,
        KeyCode::Left | KeyCode::Char('h') => Command::SwitchFeedLeft,
        KeyCode::Right | KeyCode::Char('l') => Command::SwitchFeedRight,
        KeyCode::Down | KeyCode::Char('j') => Command::SelectNext,
        KeyCode::Up | KeyCode::Char('k') => Command::SelectPrevious,
        KeyCode::PageDown => Command::PageDown,
        KeyCode::PageUp => Command::PageUp,
        KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
          Command::PageDown
        }
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
          Command::PageUp
        }
        KeyCode::Home => Command::SelectFirst,
        KeyCode::End => Command::SelectLast,
        KeyCode::Enter => Command::OpenStory,
        KeyCode::Char('o' | 'O') => Command::OpenLink,
        KeyCode::Char('u' | 'U') => Command::OpenProfile,
        KeyCode::Char('f' | 'F') => Command::Forward,
        _ => Command::None,
      },
      Mode::Story(_) => match key.code {
        KeyCode::Char('q' | 'Q') => Command::Quit,
        KeyCode::Esc | KeyCode::Backspace => Command::Back,
        KeyCode::Char('?') => Command::ShowHelp,
        KeyCode::Down | KeyCode::Char('j') => Command::SelectNext,
        KeyCode::Up | KeyCode::Char('k') => Command::SelectPrevious,
        KeyCode::PageDown => Command::PageDown,
        KeyCode::PageUp => Command::PageUp,
        KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
          Command::PageDown
        }
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
          Command::PageUp
        }
        KeyCode::Left | KeyCode::Char('h') => Command::CollapseComment,
        KeyCode::Right | KeyCode::Char('l') => Command::ExpandComment,
        KeyCode::Enter | KeyCode::Char(' ') => Command::ToggleComment,
        KeyCode::Home => Command::SelectFirst,
        KeyCode::End => Command::SelectLast,
        KeyCode::Char('o' | 'O') => Command::OpenLink,
        KeyCode::Char('u' | 'U') => Command::OpenProfile,
        KeyCode::Char('f' | 'F') => Command::Forward,
        _ => Command::None,
      },
      Mode::User(view) => match key.code {
        KeyCode::Char('q' | 'Q') => Command::Quit,
        KeyCode::Esc | KeyCode::Backspace => Command::Back,
        KeyCode::Char('?') => Command::ShowHelp,
        KeyCode::Down | KeyCode::Char('j') => {
          view.scroll_down();
          Command::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
          view.scroll_up();
          Command::None
        }
        KeyCode::Char('f' | 'F') => Command::Forward,
        _ => Command::None,
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  #[test]
  fn list_keys_map_to_navigation_commands() {
    let mut mode = Mode::Stories(StoriesView::new(Feed::Top));

    assert_eq!(mode.handle_key(key(KeyCode::Enter)), Command::OpenStory);
    assert_eq!(mode.handle_key(key(KeyCode::Char('h'))), Command::SwitchFeedLeft);
    assert_eq!(mode.handle_key(key(KeyCode::Char('u'))), Command::OpenProfile);
    assert_eq!(
      mode.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)),
      Command::PageUp
    );
    assert_eq!(mode.handle_key(key(KeyCode::Esc)), Command::Back);
  }

  #[test]
  fn comment_keys_map_to_tree_commands() {
    let mut mode = Mode::Story(DetailView::new(1));

    assert_eq!(mode.handle_key(key(KeyCode::Char('h'))), Command::CollapseComment);
    assert_eq!(mode.handle_key(key(KeyCode::Char('l'))), Command::ExpandComment);
    assert_eq!(mode.handle_key(key(KeyCode::Enter)), Command::ToggleComment);
    assert_eq!(mode.handle_key(key(KeyCode::Char(' '))), Command::ToggleComment);
  }

  #[test]
  fn profile_scrolling_is_handled_in_place() {
    let mut mode = Mode::User(UserView::new("pg".to_string()));

    assert_eq!(mode.handle_key(key(KeyCode::Char('j'))), Command::None);

    let Mode::User(view) = &mode else {
      panic!("unexpected mode");
    };

    assert_eq!(view.scroll, 1);
  }
}
