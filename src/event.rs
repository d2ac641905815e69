use super::*;

pub(crate) enum Event {
  CommentBatch {
    epoch: u64,
    result: Result<Vec<Comment>>,
  },
  Replies {
    epoch: u64,
    node: usize,
    result: Result<Vec<Comment>>,
  },
  StoryDetail {
    epoch: u64,
    result: Result<Story>,
  },
  StoryIds {
    epoch: u64,
    result: Result<Vec<u64>>,
  },
  StoryPage {
    epoch: u64,
    result: Result<Vec<Story>>,
  },
  StoryRefreshed {
    epoch: u64,
    result: Result<Story>,
  },
  UserLoaded {
    epoch: u64,
    result: Result<User>,
  },
  UserRefreshed {
    epoch: u64,
    result: Result<User>,
  },
}

impl Event {
  pub(crate) fn epoch(&self) -> u64 {
    match self {
      Event::CommentBatch { epoch, .. }
      | Event::Replies { epoch, .. }
      | Event::StoryDetail { epoch, .. }
      | Event::StoryIds { epoch, .. }
      | Event::StoryPage { epoch, .. }
      | Event::StoryRefreshed { epoch, .. }
      | Event::UserLoaded { epoch, .. }
      | Event::UserRefreshed { epoch, .. } => *epoch,
    }
  }
}
