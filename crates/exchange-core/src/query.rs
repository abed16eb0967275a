//! Project filtering.
//!
//! A [`ProjectFilter`] holds six independent, optional predicates. A project
//! is selected when it satisfies every predicate that is set; unset
//! predicates match everything. Selection never reorders its input.
//!
//! String predicates compare exactly and case-sensitively. A string predicate
//! holding `""` counts as unset, so an untouched form field means "any".

use serde::{Deserialize, Serialize};

use crate::project::{Level, Project};

/// Parameters for [`filter_projects`] and
/// [`ProjectSource::list_projects`](crate::source::ProjectSource::list_projects).
///
/// Serialises to the query string of `GET /projects`, omitting unset fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFilter {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub level:       Option<Level>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub methodology: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub duration:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub involvement: Option<String>,
  /// Keep projects whose KPI score is at least this value.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_kpi:     Option<u8>,
}

fn text_matches(wanted: Option<&str>, actual: &str) -> bool {
  match wanted {
    None | Some("") => true,
    Some(w) => w == actual,
  }
}

impl ProjectFilter {
  /// True when no predicate constrains the selection.
  pub fn is_empty(&self) -> bool {
    let unset = |f: &Option<String>| f.as_deref().is_none_or(str::is_empty);
    unset(&self.category)
      && self.level.is_none()
      && unset(&self.methodology)
      && unset(&self.duration)
      && unset(&self.involvement)
      && self.min_kpi.is_none()
  }

  /// Whether `project` satisfies every set predicate.
  pub fn matches(&self, project: &Project) -> bool {
    text_matches(self.category.as_deref(), &project.category)
      && self.level.is_none_or(|l| l == project.level)
      && text_matches(self.methodology.as_deref(), &project.methodology)
      && text_matches(self.duration.as_deref(), &project.duration)
      && text_matches(self.involvement.as_deref(), &project.involvement)
      && self.min_kpi.is_none_or(|min| project.kpi_score.get() >= min)
  }

  /// Borrowing selection over `projects`, in input order.
  pub fn select<'a>(
    &'a self,
    projects: &'a [Project],
  ) -> impl Iterator<Item = &'a Project> + 'a {
    projects.iter().filter(move |p| self.matches(p))
  }

  pub fn with_category(mut self, category: impl Into<String>) -> Self {
    self.category = Some(category.into());
    self
  }

  pub fn with_level(mut self, level: Level) -> Self {
    self.level = Some(level);
    self
  }

  pub fn with_methodology(mut self, methodology: impl Into<String>) -> Self {
    self.methodology = Some(methodology.into());
    self
  }

  pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
    self.duration = Some(duration.into());
    self
  }

  pub fn with_involvement(mut self, involvement: impl Into<String>) -> Self {
    self.involvement = Some(involvement.into());
    self
  }

  pub fn with_min_kpi(mut self, min_kpi: u8) -> Self {
    self.min_kpi = Some(min_kpi);
    self
  }
}

/// The ordered subsequence of `projects` that satisfies `filter`.
pub fn filter_projects(projects: &[Project], filter: &ProjectFilter) -> Vec<Project> {
  filter.select(projects).cloned().collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::source::StaticSource;

  fn sample() -> Vec<Project> { StaticSource::sample().unwrap().into_projects() }

  fn ids(projects: &[Project]) -> Vec<u64> { projects.iter().map(|p| p.id).collect() }

  #[test]
  fn empty_filter_returns_input_unchanged() {
    let projects = sample();
    let filter = ProjectFilter::default();
    assert!(filter.is_empty());
    assert_eq!(filter_projects(&projects, &filter), projects);
  }

  #[test]
  fn empty_strings_count_as_unset() {
    let projects = sample();
    let filter = ProjectFilter::default().with_category("").with_duration("");
    assert!(filter.is_empty());
    assert_eq!(filter_projects(&projects, &filter).len(), projects.len());
  }

  #[test]
  fn category_and_min_kpi_compose_with_and() {
    let projects = sample();
    let filter = ProjectFilter::default()
      .with_category("Веб-разработка")
      .with_min_kpi(85);

    let selected = filter_projects(&projects, &filter);
    assert_eq!(ids(&selected), vec![1, 10, 12, 15, 17]);
    assert!(
      selected
        .iter()
        .all(|p| p.category == "Веб-разработка" && p.kpi_score.get() >= 85)
    );

    // Every project satisfying both predicates was selected.
    let expected = projects
      .iter()
      .filter(|p| p.category == "Веб-разработка" && p.kpi_score.get() >= 85)
      .count();
    assert_eq!(selected.len(), expected);
  }

  #[test]
  fn all_six_predicates_together() {
    let projects = sample();
    let filter = ProjectFilter::default()
      .with_category("Мобильная разработка")
      .with_level(Level::Middle)
      .with_methodology("Scrum")
      .with_duration("4-6 месяцев")
      .with_involvement("Полная занятость")
      .with_min_kpi(80);

    assert_eq!(ids(&filter_projects(&projects, &filter)), vec![9]);
  }

  #[test]
  fn min_kpi_boundary_is_inclusive() {
    let projects = sample();
    let first = &projects[0];
    let kpi = first.kpi_score.get();

    let at = ProjectFilter::default().with_min_kpi(kpi);
    assert!(at.matches(first));

    let above = ProjectFilter::default().with_min_kpi(kpi + 1);
    assert!(!above.matches(first));
  }

  #[test]
  fn min_kpi_above_every_score_selects_nothing() {
    let projects = sample();
    let filter = ProjectFilter::default().with_min_kpi(101);
    assert!(filter_projects(&projects, &filter).is_empty());
  }

  #[test]
  fn unknown_category_yields_empty_list() {
    let projects = sample();
    let filter = ProjectFilter::default().with_category("Астрономия");
    assert!(filter_projects(&projects, &filter).is_empty());
  }

  #[test]
  fn string_matching_is_case_sensitive() {
    let projects = sample();
    let filter = ProjectFilter::default().with_methodology("agile");
    assert!(filter_projects(&projects, &filter).is_empty());

    let filter = ProjectFilter::default().with_methodology("Agile");
    assert!(!filter_projects(&projects, &filter).is_empty());
  }

  #[test]
  fn filtering_is_idempotent_and_order_stable() {
    let projects = sample();
    let filter = ProjectFilter::default().with_level(Level::Expert);

    let once = filter_projects(&projects, &filter);
    let twice = filter_projects(&projects, &filter);
    assert_eq!(once, twice);
    assert_eq!(filter_projects(&once, &filter), once);

    let ids = ids(&once);
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted, "sample data is id-ordered; output must be too");
  }

  #[test]
  fn serialises_only_set_fields() {
    let filter = ProjectFilter::default()
      .with_level(Level::Beginner)
      .with_min_kpi(60);
    assert_eq!(
      serde_json::to_value(&filter).unwrap(),
      serde_json::json!({ "level": "beginner", "min_kpi": 60 })
    );
  }
}
