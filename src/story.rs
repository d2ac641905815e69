use super::*;

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Story {
  pub(crate) by: Option<String>,
  pub(crate) descendants: Option<u64>,
  pub(crate) id: u64,
  pub(crate) kids: Option<Vec<u64>>,
  pub(crate) score: Option<u64>,
  pub(crate) text: Option<String>,
  pub(crate) time: Option<u64>,
  pub(crate) title: Option<String>,
  pub(crate) url: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn story_deserializes_from_an_item_response() {
    let story = serde_json::from_str::<Story>(
      r#"{
        "by": "dhouston",
        "descendants": 71,
        "id": 8863,
        "kids": [9224, 8917],
        "score": 104,
        "time": 1175714200,
        "title": "My YC app: Dropbox",
        "type": "story",
        "url": "http://www.getdropbox.com/u/2/screencast.html"
      }"#,
    )
    .unwrap();

    assert_eq!(story.id, 8863);
    assert_eq!(story.score, Some(104));
    assert_eq!(story.descendants, Some(71));
    assert_eq!(story.kids, Some(vec![9224, 8917]));
    assert_eq!(story.text, None);
  }
}
