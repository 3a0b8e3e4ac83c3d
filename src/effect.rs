use super::*;

/// Work the app performs off the input loop. Model objects travel with the
/// effect and come back in the matching [`Event`], so nothing else can
/// mutate them while a request is in flight.
pub(crate) enum Effect {
  AddStory {
    draft: NewStory,
    stories: StoryList,
    user: User,
  },
  FetchStories {
    previous: StoryList,
  },
  Login {
    password: String,
    previous: Option<User>,
    username: String,
  },
  OpenUrl {
    url: String,
  },
  RemoveStory {
    stories: StoryList,
    story_id: StoryId,
    user: User,
  },
  Signup {
    name: String,
    password: String,
    previous: Option<User>,
    username: String,
  },
  ToggleFavorite {
    story: Story,
    user: User,
  },
}
