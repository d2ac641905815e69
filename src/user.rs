use super::*;

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct User {
  pub(crate) about: Option<String>,
  pub(crate) created: Option<u64>,
  pub(crate) id: String,
  pub(crate) karma: Option<i64>,
}
