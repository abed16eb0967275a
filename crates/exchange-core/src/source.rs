//! The `ProjectSource` trait and the in-memory catalogue.
//!
//! Listing views depend on this abstraction rather than on a transport.
//! [`StaticSource`] filters a fixed catalogue locally; the HTTP client in
//! `exchange-client` implements the same trait by forwarding the filter to
//! the backend.

use std::{convert::Infallible, future::Future};

use crate::{
  Result,
  project::Project,
  query::{ProjectFilter, filter_projects},
};

const SAMPLE_CATALOGUE: &str = include_str!("../data/sample_projects.json");

/// Abstraction over something that can list projects matching a filter.
pub trait ProjectSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Projects satisfying every predicate set in `filter`.
  fn list_projects<'a>(
    &'a self,
    filter: &'a ProjectFilter,
  ) -> impl Future<Output = Result<Vec<Project>, Self::Error>> + Send + 'a;
}

/// A fixed, in-memory catalogue of projects.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
  projects: Vec<Project>,
}

impl StaticSource {
  pub fn new(projects: Vec<Project>) -> Self { Self { projects } }

  /// The bundled 30-project sample catalogue.
  pub fn sample() -> Result<Self> {
    let projects = serde_json::from_str(SAMPLE_CATALOGUE)?;
    Ok(Self { projects })
  }

  pub fn projects(&self) -> &[Project] { &self.projects }

  pub fn into_projects(self) -> Vec<Project> { self.projects }
}

impl ProjectSource for StaticSource {
  type Error = Infallible;

  fn list_projects<'a>(
    &'a self,
    filter: &'a ProjectFilter,
  ) -> impl Future<Output = Result<Vec<Project>, Self::Error>> + Send + 'a {
    std::future::ready(Ok(filter_projects(&self.projects, filter)))
  }
}
