use super::*;

pub(crate) enum Event {
  FavoriteToggled {
    result: Result<Favorite, ApiError>,
    title: String,
    user: User,
  },
  SignedIn {
    previous: Option<User>,
    result: Result<User, ApiError>,
  },
  StoriesFetched {
    previous: StoryList,
    result: Result<StoryList, ApiError>,
  },
  StoryAdded {
    result: Result<Story, ApiError>,
    stories: StoryList,
    user: User,
  },
  StoryRemoved {
    result: Result<Option<Story>, ApiError>,
    stories: StoryList,
    story_id: StoryId,
    user: User,
  },
}
