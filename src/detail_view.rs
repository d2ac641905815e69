use super::*;

pub(crate) struct DetailView {
  pub(crate) comments: CommentTree,
  pub(crate) failed: bool,
  pub(crate) id: u64,
  pub(crate) story: Option<Story>,
}

impl DetailView {
  pub(crate) fn apply_refresh(&mut self, fresh: Story) {
    if let Some(story) = self.story.as_mut() {
      story.descendants = fresh.descendants;
      story.score = fresh.score;
    }
  }

  pub(crate) fn apply_story(&mut self, story: Story) -> Option<Vec<u64>> {
    self.comments = CommentTree::new(story.kids.clone().unwrap_or_default());
    self.story = Some(story);
    self.comments.next_batch()
  }

  pub(crate) fn new(id: u64) -> Self {
    Self {
      comments: CommentTree::new(Vec::new()),
      failed: false,
      id,
      story: None,
    }
  }

  pub(crate) fn story_url(&self) -> String {
    self
      .story
      .as_ref()
      .and_then(|story| story.url.clone())
      .filter(|url| !url.is_empty())
      .unwrap_or_else(|| {
        format!("https://news.ycombinator.com/item?id={}", self.id)
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_story(kids: Vec<u64>) -> Story {
    Story {
      by: Some("dhouston".to_string()),
      descendants: Some(71),
      id: 8863,
      kids: Some(kids),
      score: Some(104),
      text: None,
      time: Some(1175714200),
      title: Some("My YC app: Dropbox".to_string()),
      url: None,
    }
  }

  #[test]
  fn apply_story_requests_the_first_comment_batch() {
    let mut view = DetailView::new(8863);

    let batch = view.apply_story(sample_story(vec![1, 2, 3, 4, 5, 6, 7]));

    assert_eq!(batch, Some(vec![1, 2, 3, 4, 5]));
    assert!(view.comments.has_more());
  }

  #[test]
  fn apply_refresh_patches_score_and_comment_count_in_place() {
    let mut view = DetailView::new(8863);

    view.apply_story(sample_story(Vec::new()));

    let mut fresh = sample_story(Vec::new());
    fresh.descendants = Some(80);
    fresh.score = Some(120);
    fresh.title = Some("changed".to_string());

    view.apply_refresh(fresh);

    let story = view.story.as_ref().unwrap();

    assert_eq!(story.score, Some(120));
    assert_eq!(story.descendants, Some(80));
    assert_eq!(story.title.as_deref(), Some("My YC app: Dropbox"));
  }

  #[test]
  fn story_url_falls_back_to_the_item_page() {
    let mut view = DetailView::new(8863);

    assert_eq!(
      view.story_url(),
      "https://news.ycombinator.com/item?id=8863"
    );

    let mut story = sample_story(Vec::new());
    story.url = Some("https://example.com".to_string());

    view.apply_story(story);

    assert_eq!(view.story_url(), "https://example.com");
  }
}
