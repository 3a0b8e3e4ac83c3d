use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Favorite {
  Added,
  Removed,
}

/// The signed-in user together with their favorites and posted stories.
#[derive(Clone, Debug)]
pub(crate) struct User {
  pub(crate) created_at: DateTime<Utc>,
  pub(crate) favorites: StoryList,
  pub(crate) name: String,
  pub(crate) own_stories: StoryList,
  session: Session,
}

impl User {
  pub(crate) async fn favorite_story(
    &mut self,
    client: &Client,
    story: &Story,
  ) -> Result<(), ApiError> {
    match client.add_favorite(&self.session, &story.story_id).await {
      Ok(message) => {
        info!(story_id = %story.story_id, response = %message, "favorite added");
        self.favorites.push(story.clone());
        Ok(())
      }
      Err(error) => {
        warn!(story_id = %story.story_id, %error, "could not add favorite");
        Err(error)
      }
    }
  }

  /// Drops a story that no longer exists from both personal collections.
  pub(crate) fn forget_story(&mut self, id: &StoryId) {
    self.favorites.remove(id);
    self.own_stories.remove(id);
  }

  fn from_profile(profile: UserProfile, token: String) -> Self {
    Self {
      created_at: profile.created_at,
      favorites: StoryList::new(profile.favorites),
      name: profile.name,
      own_stories: StoryList::new(profile.own_stories),
      session: Session::new(profile.username, token),
    }
  }

  pub(crate) fn is_favorite(&self, id: &StoryId) -> bool {
    self.favorites.contains(id)
  }

  pub(crate) async fn login(
    client: &Client,
    username: &str,
    password: &str,
  ) -> Result<Self, ApiError> {
    let response = client.login(username, password).await?;

    info!(username = %response.user.username, "logged in");

    Ok(Self::from_profile(response.user, response.token))
  }

  pub(crate) fn record_own_story(&mut self, story: Story) {
    self.own_stories.push(story);
  }

  /// Rebuilds the user from stored credentials, or `None` if the server
  /// will not accept them.
  pub(crate) async fn restore_session(
    client: &Client,
    session: &Session,
  ) -> Option<Self> {
    match client.fetch_user(session).await {
      Ok(profile) => {
        info!(username = %profile.username, "session restored");
        Some(Self::from_profile(profile, session.token.clone()))
      }
      Err(error) => {
        warn!(username = %session.username, %error, "could not restore session");
        None
      }
    }
  }

  pub(crate) fn session(&self) -> &Session {
    &self.session
  }

  pub(crate) async fn signup(
    client: &Client,
    username: &str,
    password: &str,
    name: &str,
  ) -> Result<Self, ApiError> {
    let response = client.signup(username, password, name).await?;

    info!(username = %response.user.username, "signed up");

    Ok(Self::from_profile(response.user, response.token))
  }

  pub(crate) async fn toggle_favorite(
    &mut self,
    client: &Client,
    story: &Story,
  ) -> Result<Favorite, ApiError> {
    if self.is_favorite(&story.story_id) {
      self
        .unfavorite_story(client, &story.story_id)
        .await
        .map(|_| Favorite::Removed)
    } else {
      self
        .favorite_story(client, story)
        .await
        .map(|()| Favorite::Added)
    }
  }

  pub(crate) async fn unfavorite_story(
    &mut self,
    client: &Client,
    id: &StoryId,
  ) -> Result<Option<Story>, ApiError> {
    match client.remove_favorite(&self.session, id).await {
      Ok(message) => {
        info!(story_id = %id, response = %message, "favorite removed");
        Ok(self.favorites.remove(id))
      }
      Err(error) => {
        warn!(story_id = %id, %error, "could not remove favorite");
        Err(error)
      }
    }
  }

  pub(crate) fn username(&self) -> &str {
    &self.session.username
  }
}

#[cfg(test)]
pub(crate) fn sample_user(favorites: Vec<Story>) -> User {
  User::from_profile(
    UserProfile {
      created_at: Utc::now(),
      favorites,
      name: "Ada".into(),
      own_stories: Vec::new(),
      username: "ada".into(),
    },
    "token".into(),
  )
}
