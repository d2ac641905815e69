#[derive(Clone, Debug)]
pub(crate) struct Comment {
  pub(crate) author: Option<String>,
  pub(crate) dead: bool,
  pub(crate) deleted: bool,
  pub(crate) id: u64,
  pub(crate) parent: Option<u64>,
  pub(crate) pending: Vec<u64>,
  pub(crate) text: Option<String>,
  pub(crate) time: Option<u64>,
}

impl Comment {
  pub(crate) fn is_removed(&self) -> bool {
    self.dead || self.deleted
  }

  pub(crate) fn removed(id: u64, parent: Option<u64>) -> Self {
    Self {
      author: None,
      dead: false,
      deleted: true,
      id,
      parent,
      pending: Vec::new(),
      text: None,
      time: None,
    }
  }
}
