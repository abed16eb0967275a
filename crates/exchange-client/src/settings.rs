//! Client configuration.
//!
//! Layers, lowest precedence first: built-in defaults, an optional TOML file,
//! then `EXCHANGE_*` environment variables (`EXCHANGE_BASE_URL`,
//! `EXCHANGE_TOKEN`, `EXCHANGE_TIMEOUT_SECS`, `EXCHANGE_LISTING`).

use std::{path::Path, time::Duration};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::Result;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where project listings come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Listing {
  /// The bundled sample catalogue, filtered locally.
  #[default]
  Static,
  /// `GET /projects` on the backend.
  Remote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  pub base_url:     String,
  #[serde(default)]
  pub token:        Option<String>,
  pub timeout_secs: u64,
  pub listing:      Listing,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      base_url:     DEFAULT_BASE_URL.to_string(),
      token:        None,
      timeout_secs: DEFAULT_TIMEOUT_SECS,
      listing:      Listing::Static,
    }
  }
}

impl Settings {
  /// Load settings from `file` (if given and present) and the process
  /// environment.
  pub fn load(file: Option<&Path>) -> Result<Self> {
    Self::load_with(file, Environment::with_prefix("EXCHANGE"))
  }

  pub(crate) fn load_with(file: Option<&Path>, env: Environment) -> Result<Self> {
    let mut builder = Config::builder()
      .set_default("base_url", DEFAULT_BASE_URL)?
      .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
      .set_default("listing", "static")?;

    if let Some(path) = file {
      builder = builder.add_source(File::from(path).required(false));
    }

    let settings = builder
      .add_source(env.try_parsing(true))
      .build()?
      .try_deserialize()?;
    Ok(settings)
  }

  pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn env(vars: &[(&str, &str)]) -> Environment {
    let map = vars
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    Environment::with_prefix("EXCHANGE").source(Some(map))
  }

  #[test]
  fn defaults_apply_without_file_or_env() {
    let settings = Settings::load_with(None, env(&[])).unwrap();
    assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(settings.listing, Listing::Static);
    assert_eq!(settings.token, None);
  }

  #[test]
  fn environment_overrides_file() {
    let path = std::env::temp_dir()
      .join(format!("exchange-settings-{}.toml", std::process::id()));
    std::fs::write(
      &path,
      "base_url = \"http://file.example/api\"\ntimeout_secs = 5\n",
    )
    .unwrap();

    let settings = Settings::load_with(
      Some(&path),
      env(&[
        ("EXCHANGE_BASE_URL", "http://env.example/api"),
        ("EXCHANGE_LISTING", "remote"),
        ("EXCHANGE_TOKEN", "secret"),
      ]),
    )
    .unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(settings.base_url, "http://env.example/api");
    assert_eq!(settings.timeout(), Duration::from_secs(5));
    assert_eq!(settings.listing, Listing::Remote);
    assert_eq!(settings.token.as_deref(), Some("secret"));
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let path = Path::new("/nonexistent/exchange.toml");
    let settings = Settings::load_with(Some(path), env(&[])).unwrap();
    assert_eq!(settings.base_url, DEFAULT_BASE_URL);
  }
}
