use super::*;

pub(crate) struct RefreshTimer {
  interval: Duration,
  last: Instant,
}

impl RefreshTimer {
  pub(crate) fn new(interval: Duration) -> Self {
    Self {
      interval,
      last: Instant::now(),
    }
  }

  pub(crate) fn poll(&mut self, now: Instant) -> bool {
    if now.duration_since(self.last) < self.interval {
      return false;
    }

    self.last = now;

    true
  }
}
