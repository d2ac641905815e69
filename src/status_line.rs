use super::*;

pub(crate) struct StatusLine {
  hint: String,
  transient: Option<(String, Instant)>,
}

impl StatusLine {
  const TRANSIENT_TTL: Duration = Duration::from_secs(3);

  pub(crate) fn hint(&self) -> &str {
    &self.hint
  }

  pub(crate) fn message(&self) -> &str {
    match &self.transient {
      Some((text, _)) => text,
      None => &self.hint,
    }
  }

  pub(crate) fn new() -> Self {
    Self {
      hint: String::new(),
      transient: None,
    }
  }

  pub(crate) fn notify(&mut self, text: String) {
    self.transient = Some((text, Instant::now() + Self::TRANSIENT_TTL));
  }

  pub(crate) fn set(&mut self, text: &str) {
    self.hint = text.to_string();
    self.transient = None;
  }

  pub(crate) fn tick(&mut self, now: Instant) {
    if let Some((_, expires_at)) = &self.transient
      && now >= *expires_at
    {
      self.transient = None;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn notify_overlays_the_hint_until_it_expires() {
    let mut status = StatusLine::new();

    status.set("hint");
    status.notify("boom".to_string());

    assert_eq!(status.message(), "boom");

    status.tick(Instant::now());
    assert_eq!(status.message(), "boom");

    status.tick(Instant::now() + Duration::from_secs(4));
    assert_eq!(status.message(), "hint");
  }

  #[test]
  fn set_replaces_the_hint_and_clears_any_transient() {
    let mut status = StatusLine::new();

    status.notify("stale".to_string());
    status.set("fresh");

    assert_eq!(status.message(), "fresh");
    assert_eq!(status.hint(), "fresh");
  }
}
