use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
  FetchCommentBatch { epoch: u64, ids: Vec<u64> },
  FetchReplies { epoch: u64, ids: Vec<u64>, node: usize },
  FetchStoryDetail { epoch: u64, id: u64 },
  FetchStoryIds { epoch: u64, feed: Feed },
  FetchStoryPage { epoch: u64, ids: Vec<u64> },
  FetchUser { epoch: u64, username: String },
  OpenUrl { url: String },
  RefreshStory { epoch: u64, id: u64 },
  RefreshUser { epoch: u64, username: String },
}
