//! Error type for `exchange-client`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
  /// The backend answered with a non-success status.
  #[error("{message} (HTTP {})", .status.as_u16())]
  Request { status: StatusCode, message: String },

  /// No response arrived: connection refused, timeout, a request that could
  /// not be built, or a body that could not be read.
  #[error("network error: {0}")]
  Network(#[source] reqwest::Error),

  /// A success response whose body does not match the expected type.
  #[error("failed to decode response body: {0}")]
  Decode(#[source] serde_json::Error),

  #[error("failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),

  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),
}

impl ClientError {
  /// The HTTP status, present only for [`ClientError::Request`].
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Self::Request { status, .. } => Some(*status),
      _ => None,
    }
  }

  /// The backend's message for a rejected request.
  pub fn message(&self) -> Option<&str> {
    match self {
      Self::Request { message, .. } => Some(message),
      _ => None,
    }
  }

  pub fn is_network(&self) -> bool { matches!(self, Self::Network(_)) }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
