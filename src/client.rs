use super::*;

#[derive(Clone)]
pub(crate) struct Client {
  base_url: Url,
  client: reqwest::Client,
}

impl Client {
  const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

  pub(crate) async fn add_favorite(
    &self,
    session: &Session,
    story_id: &StoryId,
  ) -> Result<String, ApiError> {
    let url = self.endpoint(&[
      "users",
      &session.username,
      "favorites",
      story_id.as_str(),
    ])?;

    debug!(%url, "adding favorite");

    let response = self
      .client
      .post(url)
      .query(&[("token", &session.token)])
      .send()
      .await?;

    Ok(Self::decode::<MessageResponse>(response).await?.message)
  }

  pub(crate) async fn create_story(
    &self,
    session: &Session,
    draft: &NewStory,
  ) -> Result<Story, ApiError> {
    let url = self.endpoint(&["stories"])?;

    debug!(%url, title = %draft.title, "creating story");

    let response = self
      .client
      .post(url)
      .json(&json!({ "token": session.token, "story": draft }))
      .send()
      .await?;

    Ok(Self::decode::<StoryResponse>(response).await?.story)
  }

  async fn decode<T: DeserializeOwned>(
    response: Response,
  ) -> Result<T, ApiError> {
    let status = response.status();

    if status.is_success() {
      return Ok(response.json::<T>().await?);
    }

    let fallback = status
      .canonical_reason()
      .unwrap_or("request failed")
      .to_string();

    let message = match response.json::<ErrorResponse>().await {
      Ok(body) => body.error.message.or(body.error.title).unwrap_or(fallback),
      Err(_) => fallback,
    };

    Err(ApiError::from_status(status, message))
  }

  pub(crate) async fn delete_story(
    &self,
    session: &Session,
    story_id: &StoryId,
  ) -> Result<String, ApiError> {
    let url = self.endpoint(&["stories", story_id.as_str()])?;

    debug!(%url, "deleting story");

    let response = self
      .client
      .delete(url)
      .query(&[("token", &session.token)])
      .send()
      .await?;

    Ok(Self::decode::<MessageResponse>(response).await?.message)
  }

  fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = self.base_url.clone();

    url
      .path_segments_mut()
      .map_err(|()| {
        ApiError::malformed_url(self.base_url.as_str(), "cannot be a base")
      })?
      .pop_if_empty()
      .extend(segments);

    Ok(url)
  }

  pub(crate) async fn fetch_stories(&self) -> Result<Vec<Story>, ApiError> {
    let url = self.endpoint(&["stories"])?;

    debug!(%url, "fetching stories");

    let response = self.client.get(url).send().await?;

    Ok(Self::decode::<StoriesResponse>(response).await?.stories)
  }

  pub(crate) async fn fetch_user(
    &self,
    session: &Session,
  ) -> Result<UserProfile, ApiError> {
    let url = self.endpoint(&["users", &session.username])?;

    debug!(%url, "fetching user");

    let response = self
      .client
      .get(url)
      .query(&[("token", &session.token)])
      .send()
      .await?;

    Ok(Self::decode::<UserResponse>(response).await?.user)
  }

  pub(crate) async fn login(
    &self,
    username: &str,
    password: &str,
  ) -> Result<AuthResponse, ApiError> {
    let url = self.endpoint(&["login"])?;

    debug!(%url, username, "logging in");

    let response = self
      .client
      .post(url)
      .json(&json!({ "user": { "username": username, "password": password } }))
      .send()
      .await?;

    Self::decode::<AuthResponse>(response).await
  }

  pub(crate) fn new(base_url: Url) -> Result<Self, ApiError> {
    if base_url.cannot_be_a_base() {
      return Err(ApiError::malformed_url(base_url.as_str(), "cannot be a base"));
    }

    Ok(Self {
      base_url,
      client: reqwest::Client::builder()
        .timeout(Self::REQUEST_TIMEOUT)
        .build()?,
    })
  }

  pub(crate) async fn remove_favorite(
    &self,
    session: &Session,
    story_id: &StoryId,
  ) -> Result<String, ApiError> {
    let url = self.endpoint(&[
      "users",
      &session.username,
      "favorites",
      story_id.as_str(),
    ])?;

    debug!(%url, "removing favorite");

    let response = self
      .client
      .delete(url)
      .query(&[("token", &session.token)])
      .send()
      .await?;

    Ok(Self::decode::<MessageResponse>(response).await?.message)
  }

  pub(crate) async fn signup(
    &self,
    username: &str,
    password: &str,
    name: &str,
  ) -> Result<AuthResponse, ApiError> {
    let url = self.endpoint(&["signup"])?;

    debug!(%url, username, "signing up");

    let response = self
      .client
      .post(url)
      .json(&json!({
        "user": { "username": username, "password": password, "name": name }
      }))
      .send()
      .await?;

    Self::decode::<AuthResponse>(response).await
  }
}
