use super::*;

/// Status text that reverts to `original` once it has been shown long
/// enough.
#[derive(Clone)]
pub(crate) struct TransientMessage {
  current: String,
  expires_at: Instant,
  original: String,
}

impl TransientMessage {
  const TTL: Duration = Duration::from_secs(3);

  pub(crate) fn current(&self) -> &str {
    &self.current
  }

  pub(crate) fn is_expired(&self) -> bool {
    self.is_expired_at(Instant::now())
  }

  fn is_expired_at(&self, now: Instant) -> bool {
    now >= self.expires_at
  }

  pub(crate) fn new(current: String, original: String) -> Self {
    Self {
      expires_at: Instant::now() + Self::TTL,
      current,
      original,
    }
  }

  pub(crate) fn original(&self) -> &str {
    &self.original
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn expires_after_ttl() {
    let message = TransientMessage::new("saved".into(), "idle".into());

    assert!(!message.is_expired());
    assert!(message.is_expired_at(Instant::now() + TransientMessage::TTL));
    assert_eq!(message.original(), "idle");
  }
}
