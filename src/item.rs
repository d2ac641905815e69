use super::*;

#[derive(Debug, Deserialize)]
pub(crate) struct Item {
  pub(crate) by: Option<String>,
  pub(crate) dead: Option<bool>,
  pub(crate) deleted: Option<bool>,
  pub(crate) id: u64,
  pub(crate) kids: Option<Vec<u64>>,
  pub(crate) text: Option<String>,
  pub(crate) time: Option<u64>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn item_deserializes_deleted_comments_without_an_author() {
    let item = serde_json::from_str::<Item>(
      r#"{"deleted": true, "id": 9225, "parent": 8863, "type": "comment"}"#,
    )
    .unwrap();

    assert_eq!(item.id, 9225);
    assert_eq!(item.deleted, Some(true));
    assert_eq!(item.by, None);
    assert_eq!(item.kids, None);
  }
}
