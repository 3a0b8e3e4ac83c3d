use super::*;

/// One rendered row, built from a story and whether it is a favorite.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ListEntry {
  pub(crate) byline: String,
  pub(crate) detail: String,
  pub(crate) favorite: bool,
  pub(crate) id: StoryId,
  pub(crate) title: String,
  pub(crate) url: String,
}

impl ListEntry {
  pub(crate) fn new(story: &Story, favorite: bool) -> Self {
    let host = story
      .hostname()
      .unwrap_or_else(|_| "unknown host".to_string());

    Self {
      byline: format!("({host}) by {}", story.author),
      detail: format!("posted by {} on {}", story.username, story.posted_at()),
      favorite,
      id: story.story_id.clone(),
      title: story.title.clone(),
      url: story.url.clone(),
    }
  }
}
