use super::*;

pub(crate) struct HelpView {
  hint_backup: Option<String>,
  visible: bool,
}

impl HelpView {
  pub(crate) fn draw(&self, frame: &mut Frame) {
    if !self.visible {
      return;
    }

    let area = Self::help_area(frame.area());

    frame.render_widget(Clear, area);

    let help = Paragraph::new(HELP_TEXT)
      .block(Block::default().title(HELP_TITLE).borders(Borders::ALL))
      .wrap(Wrap { trim: true });

    frame.render_widget(help, area);
  }

  pub(crate) fn handle_key(key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Char('?') | KeyCode::Esc => Command::HideHelp,
      KeyCode::Char('q' | 'Q') => Command::Quit,
      _ => Command::None,
    }
  }

  fn help_area(area: Rect) -> Rect {
    let line_count = HELP_TEXT.lines().count();

    let max_line_width = HELP_TEXT
      .lines()
      .map(|line| line.chars().count())
      .max()
      .unwrap_or(0);

    let desired_width =
      u16::try_from(max_line_width.saturating_add(2)).unwrap_or(u16::MAX);

    let desired_height =
      u16::try_from(line_count.saturating_add(2)).unwrap_or(u16::MAX);

    let width = desired_width
      .clamp(1, area.width.saturating_sub(2).max(1))
      .min(area.width);

    let height = desired_height
      .clamp(1, area.height.saturating_sub(2).max(1))
      .min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width, height)
  }

  pub(crate) fn hide(&mut self, status: &mut StatusLine) {
    if !self.visible {
      return;
    }

    if let Some(backup) = self.hint_backup.take() {
      status.set(&backup);
    }

    self.visible = false;
  }

  pub(crate) fn is_visible(&self) -> bool {
    self.visible
  }

  pub(crate) fn new() -> Self {
    Self {
      hint_backup: None,
      visible: false,
    }
  }

  pub(crate) fn show(&mut self, status: &mut StatusLine) {
    if self.visible {
      return;
    }

    self.hint_backup = Some(status.hint().to_string());

    status.set(HELP_STATUS);

    self.visible = true;
  }
}
