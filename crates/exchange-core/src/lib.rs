//! Core types for the project exchange client.
//!
//! Domain records (users, projects, memberships, messages), the project
//! filter that narrows a listing, and the [`source::ProjectSource`]
//! capability that serves listings. This crate does no I/O; the HTTP client
//! lives in `exchange-client`.

pub mod error;
pub mod project;
pub mod query;
pub mod source;
pub mod user;

pub use error::{Error, Result};
