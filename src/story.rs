use super::*;

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct StoryId(String);

impl StoryId {
  pub(crate) fn as_str(&self) -> &str {
    &self.0
  }
}

impl Display for StoryId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for StoryId {
  fn from(id: &str) -> Self {
    Self(id.to_string())
  }
}

impl From<String> for StoryId {
  fn from(id: String) -> Self {
    Self(id)
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Story {
  pub(crate) author: String,
  pub(crate) created_at: DateTime<Utc>,
  pub(crate) story_id: StoryId,
  pub(crate) title: String,
  pub(crate) url: String,
  pub(crate) username: String,
}

impl Story {
  pub(crate) fn hostname(&self) -> Result<String, ApiError> {
    let url = Url::parse(&self.url)
      .map_err(|error| ApiError::malformed_url(&self.url, error))?;

    url
      .host_str()
      .map(str::to_string)
      .ok_or_else(|| ApiError::malformed_url(&self.url, "missing host"))
  }

  pub(crate) fn posted_at(&self) -> String {
    self.created_at.format("%Y-%m-%d").to_string()
  }
}

/// Draft sent when posting a story; the server fills in the rest.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct NewStory {
  pub(crate) author: String,
  pub(crate) title: String,
  pub(crate) url: String,
}

#[cfg(test)]
pub(crate) fn sample_story(id: &str, url: &str) -> Story {
  Story {
    author: "Ada".to_string(),
    created_at: DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
      .unwrap()
      .with_timezone(&Utc),
    story_id: StoryId::from(id),
    title: format!("Story {id}"),
    url: url.to_string(),
    username: "ada".to_string(),
  }
}
