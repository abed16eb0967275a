//! Async HTTP client for the project exchange JSON API.
//!
//! [`ApiClient`] exposes one method per backend action. Each call issues
//! exactly one request, attaches a bearer token when the configured
//! [`CredentialSource`] has one, and resolves to the decoded body or a
//! [`ClientError`]. Nothing is cached and nothing is retried.

mod client;

pub mod credentials;
pub mod error;
pub mod settings;

pub use client::ApiClient;
pub use credentials::{Anonymous, CredentialSource, Session};
pub use error::{ClientError, Result};
pub use settings::{Listing, Settings};
