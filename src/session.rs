use super::*;

/// Credentials for the signed-in user, passed to every authenticated call.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct Session {
  pub(crate) token: String,
  pub(crate) username: String,
}

impl Session {
  pub(crate) fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
    Self {
      token: token.into(),
      username: username.into(),
    }
  }
}
