use super::*;

pub(crate) struct CommentNode {
  pub(crate) author: Option<String>,
  pub(crate) body: String,
  pub(crate) children: Vec<usize>,
  pub(crate) depth: usize,
  pub(crate) expanded: bool,
  pub(crate) id: u64,
  pub(crate) parent: Option<usize>,
  pub(crate) pending: Vec<u64>,
  pub(crate) removed: bool,
  pub(crate) requested: bool,
  pub(crate) time: Option<u64>,
}

impl CommentNode {
  pub(crate) fn has_children(&self) -> bool {
    !self.children.is_empty()
  }

  pub(crate) fn header(&self, now: DateTime<Utc>) -> String {
    let author = self.author.as_deref().unwrap_or("unknown");

    match self.time {
      Some(time) => format!("{author} • {}", relative_time(time, now)),
      None => author.to_string(),
    }
  }

  pub(crate) fn new(comment: Comment, depth: usize, parent: Option<usize>) -> Self {
    let removed = comment.is_removed();

    let body = if removed {
      String::new()
    } else {
      comment.text.as_deref().map(html_to_text).unwrap_or_default()
    };

    let pending = if removed { Vec::new() } else { comment.pending };

    Self {
      author: comment.author,
      body,
      children: Vec::new(),
      depth,
      expanded: true,
      id: comment.id,
      parent,
      pending,
      removed,
      requested: false,
      time: comment.time,
    }
  }

  pub(crate) fn pending_label(&self) -> String {
    match self.pending.len() {
      1 => "1 reply".to_string(),
      count => format!("{count} replies"),
    }
  }

  pub(crate) fn permalink(&self) -> String {
    format!("https://news.ycombinator.com/item?id={}", self.id)
  }
}
