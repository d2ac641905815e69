#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Feed {
  Best,
  New,
  Top,
}

impl Feed {
  pub(crate) fn all() -> &'static [Feed] {
    &[Feed::Top, Feed::Best, Feed::New]
  }

  pub(crate) fn endpoint(self) -> &'static str {
    match self {
      Feed::Best => "beststories",
      Feed::New => "newstories",
      Feed::Top => "topstories",
    }
  }

  pub(crate) fn from_endpoint(endpoint: &str) -> Option<Feed> {
    Feed::all()
      .iter()
      .copied()
      .find(|feed| feed.endpoint() == endpoint)
  }

  pub(crate) fn label(self) -> &'static str {
    match self {
      Feed::Best => "best",
      Feed::New => "new",
      Feed::Top => "top",
    }
  }

  pub(crate) fn next(self) -> Feed {
    let all = Feed::all();

    let position = all.iter().position(|feed| *feed == self).unwrap_or(0);

    all[(position + 1) % all.len()]
  }

  pub(crate) fn previous(self) -> Feed {
    let all = Feed::all();

    let position = all.iter().position(|feed| *feed == self).unwrap_or(0);

    all[(position + all.len() - 1) % all.len()]
  }
}
