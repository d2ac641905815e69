use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Route {
  Stories(Feed),
  Story(u64),
  User(String),
}

impl Route {
  pub(crate) fn parse(path: &str) -> Self {
    let trimmed = path.trim_start_matches('/');

    if trimmed.is_empty() {
      return Self::Stories(Feed::Top);
    }

    if let Some(id) = trimmed.strip_prefix("story/") {
      return match id.parse::<u64>() {
        Ok(id) => Self::Story(id),
        Err(_) => Self::Stories(Feed::Top),
      };
    }

    if let Some(username) = trimmed.strip_prefix("user/") {
      if username.is_empty() {
        return Self::Stories(Feed::Top);
      }

      return Self::User(username.to_string());
    }

    match Feed::from_endpoint(trimmed) {
      Some(feed) => Self::Stories(feed),
      None => Self::Stories(Feed::Top),
    }
  }

  pub(crate) fn path(&self) -> String {
    match self {
      Self::Stories(feed) => format!("/{}", feed.endpoint()),
      Self::Story(id) => format!("/story/{id}"),
      Self::User(username) => format!("/user/{username}"),
    }
  }
}
