use super::*;

/// Startup configuration, read once from the environment.
///
/// Every variable is optional. Values that are present but unusable fail
/// startup instead of silently falling back.
#[derive(Clone, Debug)]
pub(crate) struct Config {
  /// Root of the story API. `SNOOZE_API_URL`.
  pub(crate) api_url: Url,

  /// Where the signed-in session is remembered. `SNOOZE_CREDENTIALS_FILE`.
  pub(crate) credentials_path: PathBuf,

  /// Log output, since the terminal belongs to the UI. `SNOOZE_LOG_FILE`.
  pub(crate) log_path: PathBuf,
}

impl Config {
  const DEFAULT_API_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";

  fn config_dir() -> Result<PathBuf> {
    let base_dir = if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
      PathBuf::from(dir)
    } else if let Ok(home) = env::var("HOME") {
      PathBuf::from(home).join(".config")
    } else {
      env::current_dir()?.join(".config")
    };

    Ok(base_dir.join("snooze"))
  }

  pub(crate) fn from_env() -> Result<Self> {
    let api_url = Self::parse_api_url(
      &env::var("SNOOZE_API_URL")
        .unwrap_or_else(|_| Self::DEFAULT_API_URL.to_string()),
    )?;

    let credentials_path = match env::var("SNOOZE_CREDENTIALS_FILE") {
      Ok(path) => PathBuf::from(path),
      Err(_) => Self::config_dir()?.join("credentials.json"),
    };

    let log_path = match env::var("SNOOZE_LOG_FILE") {
      Ok(path) => PathBuf::from(path),
      Err(_) => credentials_path
        .parent()
        .map_or_else(|| PathBuf::from("snooze.log"), |dir| dir.join("snooze.log")),
    };

    Ok(Self {
      api_url,
      credentials_path,
      log_path,
    })
  }

  fn parse_api_url(value: &str) -> Result<Url> {
    let url = Url::parse(value)
      .with_context(|| format!("invalid SNOOZE_API_URL `{value}`"))?;

    ensure!(
      matches!(url.scheme(), "http" | "https"),
      "SNOOZE_API_URL must be an http or https url, got `{value}`"
    );

    Ok(url)
  }
}
