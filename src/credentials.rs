use super::*;

/// Remembers the signed-in session on disk so the next launch can restore it.
#[derive(Debug)]
pub(crate) struct CredentialStore {
  path: PathBuf,
}

impl CredentialStore {
  pub(crate) fn clear(&self) -> Result {
    match fs::remove_file(&self.path) {
      Ok(()) => Ok(()),
      Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(error) => Err(error).with_context(|| {
        format!("could not remove {}", self.path.display())
      }),
    }
  }

  fn ensure_parent_dir(path: &Path) -> Result {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }

    Ok(())
  }

  pub(crate) fn load(&self) -> Result<Option<Session>> {
    if !self.path.exists() {
      return Ok(None);
    }

    let data = fs::read(&self.path)
      .with_context(|| format!("could not read {}", self.path.display()))?;

    if data.is_empty() {
      return Ok(None);
    }

    Ok(Some(serde_json::from_slice::<Session>(&data).with_context(
      || format!("could not parse {}", self.path.display()),
    )?))
  }

  pub(crate) fn new(path: PathBuf) -> Self {
    Self { path }
  }

  pub(crate) fn save(&self, session: &Session) -> Result {
    Self::ensure_parent_dir(&self.path)?;

    let serialized = serde_json::to_vec_pretty(session)?;

    fs::write(&self.path, serialized)
      .with_context(|| format!("could not write {}", self.path.display()))?;

    debug!(path = %self.path.display(), "credentials saved");

    Ok(())
  }
}

#[cfg(test)]
pub(crate) fn temp_store() -> CredentialStore {
  use std::sync::atomic::{AtomicUsize, Ordering};

  static COUNTER: AtomicUsize = AtomicUsize::new(0);

  let unique = COUNTER.fetch_add(1, Ordering::Relaxed);

  CredentialStore::new(env::temp_dir().join(format!(
    "snooze_credentials_test_{}_{unique}/credentials.json",
    process::id()
  )))
}
