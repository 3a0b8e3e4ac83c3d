use super::*;

/// Failures from talking to the story API, classified so callers can decide
/// whether to retry, prompt for a login, or just report.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
  #[error("malformed url `{url}`: {reason}")]
  MalformedUrl { reason: String, url: String },
  #[error("not found: {message}")]
  NotFound { message: String },
  #[error("server responded with {status}: {message}")]
  Server { message: String, status: StatusCode },
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("not authorized: {message}")]
  Unauthorized { message: String },
}

impl ApiError {
  pub(crate) fn from_status(status: StatusCode, message: String) -> Self {
    match status {
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
        Self::Unauthorized { message }
      }
      StatusCode::NOT_FOUND => Self::NotFound { message },
      _ => Self::Server { message, status },
    }
  }

  pub(crate) fn malformed_url(url: &str, reason: impl ToString) -> Self {
    Self::MalformedUrl {
      reason: reason.to_string(),
      url: url.to_string(),
    }
  }
}
