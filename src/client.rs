use {super::*, anyhow::Context};

#[derive(Clone)]
pub(crate) struct Client {
  client: reqwest::Client,
}

impl Default for Client {
  fn default() -> Self {
    Self {
      client: reqwest::Client::new(),
    }
  }
}

impl Client {
  const API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

  pub(crate) async fn fetch_forest(
    &self,
    ids: &[u64],
    auto_depth: usize,
  ) -> Result<Vec<Comment>> {
    let mut frontier = ids
      .iter()
      .map(|&id| (id, 0usize, None))
      .collect::<VecDeque<(u64, usize, Option<u64>)>>();

    let mut fetched = Vec::new();

    while let Some((id, depth, parent)) = frontier.pop_front() {
      let item = self
        .client
        .get(format!("{}/item/{id}.json", Self::API_BASE_URL))
        .send()
        .await?
        .json::<Option<Item>>()
        .await
        .with_context(|| format!("malformed comment {id}"))?;

      let Some(item) = item else {
        fetched.push(Comment::removed(id, parent));
        continue;
      };

      let dead = item.dead.unwrap_or(false);
      let deleted = item.deleted.unwrap_or(false);

      let kids = item.kids.unwrap_or_default();

      let mut pending = Vec::new();

      if dead || deleted {
        // replies of removed comments are neither fetched nor deferred
      } else if depth < auto_depth {
        for kid in kids {
          frontier.push_back((kid, depth.saturating_add(1), Some(id)));
        }
      } else {
        pending = kids;
      }

      fetched.push(Comment {
        author: item.by,
        dead,
        deleted,
        id: item.id,
        parent,
        pending,
        text: item.text,
        time: item.time,
      });
    }

    Ok(fetched)
  }

  pub(crate) async fn fetch_ids(&self, feed: Feed) -> Result<Vec<u64>> {
    Ok(
      self
        .client
        .get(format!("{}/{}.json", Self::API_BASE_URL, feed.endpoint()))
        .send()
        .await?
        .json::<Vec<u64>>()
        .await?,
    )
  }

  pub(crate) async fn fetch_page(&self, ids: &[u64]) -> Result<Vec<Story>> {
    let responses = stream::iter(ids.iter().copied().map(|id| {
      let client = self.clone();

      async move {
        client
          .client
          .get(format!("{}/item/{id}.json", Self::API_BASE_URL))
          .send()
          .await?
          .json::<Story>()
          .await
      }
    }))
    .buffered(STORIES_PER_PAGE.max(1))
    .collect::<Vec<_>>()
    .await;

    let mut stories = Vec::with_capacity(responses.len());

    for story in responses {
      stories.push(story?);
    }

    Ok(stories)
  }

  pub(crate) async fn fetch_story(&self, id: u64) -> Result<Story> {
    self
      .client
      .get(format!("{}/item/{id}.json", Self::API_BASE_URL))
      .send()
      .await?
      .json::<Option<Story>>()
      .await?
      .with_context(|| format!("story {id} does not exist"))
  }

  pub(crate) async fn fetch_user(&self, username: &str) -> Result<User> {
    self
      .client
      .get(format!("{}/user/{username}.json", Self::API_BASE_URL))
      .send()
      .await?
      .json::<Option<User>>()
      .await?
      .with_context(|| format!("user {username} does not exist"))
  }
}
