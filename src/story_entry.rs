use super::*;

#[derive(Clone, Debug)]
pub(crate) struct StoryEntry {
  pub(crate) author: Option<String>,
  pub(crate) comments: u64,
  pub(crate) id: u64,
  pub(crate) score: u64,
  pub(crate) time: Option<u64>,
  pub(crate) title: String,
  pub(crate) url: Option<String>,
}

impl From<Story> for StoryEntry {
  fn from(story: Story) -> Self {
    Self {
      author: story.by,
      comments: story.descendants.unwrap_or(0),
      id: story.id,
      score: story.score.unwrap_or(0),
      time: story.time,
      title: story.title.unwrap_or_else(|| "Untitled".to_string()),
      url: story.url,
    }
  }
}

impl StoryEntry {
  pub(crate) fn meta(&self, now: DateTime<Utc>) -> String {
    let mut parts = vec![format_points(self.score)];

    if let Some(author) = &self.author {
      parts.push(format!("by {author}"));
    }

    if let Some(time) = self.time {
      parts.push(relative_time(time, now));
    }

    parts.push(format_comments(self.comments));

    parts.join(" • ")
  }

  pub(crate) fn resolved_url(&self) -> String {
    self
      .url
      .clone()
      .filter(|url| !url.is_empty())
      .unwrap_or_else(|| {
        format!("https://news.ycombinator.com/item?id={}", self.id)
      })
  }
}
