use super::*;

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
  pub(crate) token: String,
  pub(crate) user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
  pub(crate) error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
  pub(crate) message: Option<String>,
  pub(crate) title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageResponse {
  pub(crate) message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StoriesResponse {
  pub(crate) stories: Vec<Story>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StoryResponse {
  pub(crate) story: Story,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserResponse {
  pub(crate) user: UserProfile,
}

/// User record as the API embeds it; own stories arrive under `stories`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserProfile {
  pub(crate) created_at: DateTime<Utc>,
  #[serde(default)]
  pub(crate) favorites: Vec<Story>,
  pub(crate) name: String,
  #[serde(default, rename = "stories")]
  pub(crate) own_stories: Vec<Story>,
  pub(crate) username: String,
}
