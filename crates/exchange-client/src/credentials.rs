//! Where the client gets its bearer token.
//!
//! The token is read from the source on every request, so a [`Session`]
//! updated after login is picked up by the next call.

use std::sync::{Arc, RwLock};

/// Supplies the bearer token for outgoing requests, if there is one.
pub trait CredentialSource: Send + Sync {
  fn bearer_token(&self) -> Option<String>;
}

/// Sends every request unauthenticated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl CredentialSource for Anonymous {
  fn bearer_token(&self) -> Option<String> { None }
}

impl CredentialSource for Option<String> {
  fn bearer_token(&self) -> Option<String> { self.clone() }
}

impl CredentialSource for String {
  fn bearer_token(&self) -> Option<String> { Some(self.clone()) }
}

/// A shared, mutable token slot. Clones share the slot.
#[derive(Debug, Clone, Default)]
pub struct Session {
  token: Arc<RwLock<Option<String>>>,
}

impl Session {
  pub fn new() -> Self { Self::default() }

  pub fn with_token(token: impl Into<String>) -> Self {
    let session = Self::default();
    session.set(token);
    session
  }

  pub fn set(&self, token: impl Into<String>) {
    let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
    *slot = Some(token.into());
  }

  pub fn clear(&self) {
    let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
    *slot = None;
  }

  pub fn token(&self) -> Option<String> {
    self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
  }

  pub fn is_authenticated(&self) -> bool { self.token().is_some() }
}

impl CredentialSource for Session {
  fn bearer_token(&self) -> Option<String> { self.token() }
}
