#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tab {
  Favorites,
  Mine,
  Stories,
}

impl Tab {
  pub(crate) const ALL: [Tab; 3] = [Tab::Stories, Tab::Favorites, Tab::Mine];

  pub(crate) fn empty_text(self, signed_in: bool) -> &'static str {
    match (self, signed_in) {
      (Tab::Stories, _) => "No stories yet. Press n to post one.",
      (Tab::Favorites, true) => "No favorites yet. Press f on a story.",
      (Tab::Mine, true) => "You have not posted any stories.",
      (Tab::Favorites | Tab::Mine, false) => {
        "Log in (L) or sign up (S) to see your stories."
      }
    }
  }

  pub(crate) fn index(self) -> usize {
    match self {
      Tab::Stories => 0,
      Tab::Favorites => 1,
      Tab::Mine => 2,
    }
  }

  pub(crate) fn label(self) -> &'static str {
    match self {
      Tab::Stories => "stories",
      Tab::Favorites => "favorites",
      Tab::Mine => "mine",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn index_matches_position_in_all() {
    for (position, tab) in Tab::ALL.iter().enumerate() {
      assert_eq!(tab.index(), position);
    }
  }
}
