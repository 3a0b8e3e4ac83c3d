use super::*;

/// Ordered stories as the server last reported them, keyed by id for
/// lookups and removals.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct StoryList {
  stories: Vec<Story>,
}

impl StoryList {
  /// Posts `draft` as `session`'s user and appends the created story.
  pub(crate) async fn add_story(
    &mut self,
    client: &Client,
    session: &Session,
    draft: &NewStory,
  ) -> Result<Story, ApiError> {
    let story = client.create_story(session, draft).await?;

    info!(story_id = %story.story_id, "story created");

    self.push(story.clone());

    Ok(story)
  }

  pub(crate) fn contains(&self, id: &StoryId) -> bool {
    self.position(id).is_some()
  }

  pub(crate) async fn fetch(client: &Client) -> Result<Self, ApiError> {
    let stories = client.fetch_stories().await?;

    debug!(count = stories.len(), "stories fetched");

    Ok(Self::new(stories))
  }

  pub(crate) fn get(&self, id: &StoryId) -> Option<&Story> {
    self.stories.iter().find(|story| &story.story_id == id)
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.stories.is_empty()
  }

  pub(crate) fn len(&self) -> usize {
    self.stories.len()
  }

  pub(crate) fn new(stories: Vec<Story>) -> Self {
    Self { stories }
  }

  fn position(&self, id: &StoryId) -> Option<usize> {
    self.stories.iter().position(|story| &story.story_id == id)
  }

  /// Appends `story` unless an entry with the same id is already present.
  pub(crate) fn push(&mut self, story: Story) -> bool {
    if self.contains(&story.story_id) {
      return false;
    }

    self.stories.push(story);

    true
  }

  pub(crate) fn remove(&mut self, id: &StoryId) -> Option<Story> {
    self.position(id).map(|index| self.stories.remove(index))
  }

  /// Deletes the story on the server, then drops it locally.
  ///
  /// Without a session nothing is sent and `Ok(None)` comes back. A failed
  /// request leaves the list untouched.
  pub(crate) async fn remove_story(
    &mut self,
    client: &Client,
    session: Option<&Session>,
    id: &StoryId,
  ) -> Result<Option<Story>, ApiError> {
    let Some(session) = session else {
      return Ok(None);
    };

    match client.delete_story(session, id).await {
      Ok(message) => {
        info!(story_id = %id, response = %message, "story deleted");
        Ok(self.remove(id))
      }
      Err(error) => {
        warn!(story_id = %id, %error, "could not delete story");
        Err(error)
      }
    }
  }

  pub(crate) fn stories(&self) -> &[Story] {
    &self.stories
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    crate::{story::sample_story, test_server::TestServer},
  };

  fn draft(title: &str) -> NewStory {
    NewStory {
      author: "Ada".to_string(),
      title: title.to_string(),
      url: "https://example.com/new".to_string(),
    }
  }

  #[test]
  fn push_ignores_duplicate_ids() {
    let mut list = StoryList::default();

    assert!(list.push(sample_story("1", "https://a.example")));
    assert!(!list.push(sample_story("1", "https://b.example")));

    assert_eq!(list.len(), 1);
    assert_eq!(list.stories()[0].url, "https://a.example");
  }

  #[test]
  fn remove_drops_only_the_matching_id() {
    let mut list = StoryList::new(vec![
      sample_story("1", "https://a.example"),
      sample_story("2", "https://b.example"),
      sample_story("3", "https://c.example"),
    ]);

    let removed = list.remove(&StoryId::from("2")).unwrap();

    assert_eq!(removed.story_id.as_str(), "2");

    assert_eq!(
      list
        .stories()
        .iter()
        .map(|story| story.story_id.as_str())
        .collect::<Vec<_>>(),
      ["1", "3"]
    );

    assert!(list.remove(&StoryId::from("2")).is_none());
  }

  #[tokio::test]
  async fn fetch_preserves_server_order_and_count() {
    let server = TestServer::spawn().await;

    let titles = ["zebra", "apple", "mango", "kiwi"];

    for title in titles {
      server.seed_story(title, "https://example.com", "ada");
    }

    let list = StoryList::fetch(&server.client).await.unwrap();

    assert_eq!(list.len(), titles.len());

    assert_eq!(
      list
        .stories()
        .iter()
        .map(|story| story.title.as_str())
        .collect::<Vec<_>>(),
      titles
    );
  }

  #[tokio::test]
  async fn add_story_appends_server_assigned_story() {
    let server = TestServer::spawn().await;

    server.seed_story("existing", "https://example.com", "grace");

    let user = server.sign_up("ada").await;

    let mut list = StoryList::fetch(&server.client).await.unwrap();

    let before = list.len();

    let story = list
      .add_story(&server.client, user.session(), &draft("fresh"))
      .await
      .unwrap();

    assert_eq!(list.len(), before + 1);
    assert_eq!(list.stories().last(), Some(&story));
    assert!(server.has_story(&story.story_id));
    assert_eq!(story.username, "ada");
  }

  #[tokio::test]
  async fn add_story_failure_leaves_list_unchanged() {
    let server = TestServer::spawn().await;

    let mut list = StoryList::default();

    let result = list
      .add_story(
        &server.client,
        &Session::new("ada", "bogus"),
        &draft("fresh"),
      )
      .await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert!(list.is_empty());
  }

  #[tokio::test]
  async fn remove_story_drops_exactly_one_entry() {
    let server = TestServer::spawn().await;

    let user = server.sign_up("ada").await;

    let target = server.seed_story("mine", "https://example.com", "ada");
    server.seed_story("other", "https://example.com", "ada");

    let mut list = StoryList::fetch(&server.client).await.unwrap();

    let removed = list
      .remove_story(&server.client, Some(user.session()), &target.story_id)
      .await
      .unwrap();

    assert_eq!(removed.map(|story| story.story_id), Some(target.story_id.clone()));
    assert_eq!(list.len(), 1);
    assert!(!list.contains(&target.story_id));
  }

  #[tokio::test]
  async fn remove_story_failure_leaves_list_unchanged() {
    let server = TestServer::spawn().await;

    let user = server.sign_up("ada").await;

    let target = server.seed_story("theirs", "https://example.com", "grace");

    let mut list = StoryList::fetch(&server.client).await.unwrap();

    let snapshot = list.clone();

    let result = list
      .remove_story(&server.client, Some(user.session()), &target.story_id)
      .await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert_eq!(list, snapshot);
  }

  #[tokio::test]
  async fn remove_story_without_session_is_a_no_op() {
    let server = TestServer::spawn().await;

    let target = server.seed_story("story", "https://example.com", "grace");

    let mut list = StoryList::fetch(&server.client).await.unwrap();

    let result = list
      .remove_story(&server.client, None, &target.story_id)
      .await
      .unwrap();

    assert!(result.is_none());
    assert_eq!(list.len(), 1);
    assert!(server.has_story(&target.story_id));
  }
}
