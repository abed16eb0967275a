//! Projects, their memberships, and their message threads.
//!
//! A project has exactly one owner. The owner is implicitly a member and is
//! never represented as a [`ProjectMember`] row; every other participant joins
//! by applying, which creates a `pending` membership that the owner accepts
//! or rejects once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{Error, Result, user::User};

// ─── Level ───────────────────────────────────────────────────────────────────

/// Experience level a project asks of its participants.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Level {
  Beginner,
  Middle,
  Expert,
}

// ─── KPI ─────────────────────────────────────────────────────────────────────

/// Derived quality rating of a project, always within `0..=100`.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(try_from = "u64", into = "u8")]
pub struct KpiScore(u8);

impl KpiScore {
  pub const MAX: u8 = 100;

  pub fn new(value: u8) -> Result<Self> { Self::try_from(u64::from(value)) }

  pub fn get(self) -> u8 { self.0 }
}

impl TryFrom<u64> for KpiScore {
  type Error = Error;

  fn try_from(value: u64) -> Result<Self> {
    match u8::try_from(value) {
      Ok(v) if v <= Self::MAX => Ok(Self(v)),
      _ => Err(Error::KpiOutOfRange(value)),
    }
  }
}

impl From<KpiScore> for u8 {
  fn from(score: KpiScore) -> Self { score.0 }
}

// ─── Membership ──────────────────────────────────────────────────────────────

/// Approval state of an application to join a project.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MemberStatus {
  Pending,
  Accepted,
  Rejected,
}

impl MemberStatus {
  /// Move to `next`. Only `pending -> accepted` and `pending -> rejected`
  /// are legal; a decided membership never changes again.
  pub fn transition(self, next: MemberStatus) -> Result<MemberStatus> {
    match (self, next) {
      (Self::Pending, Self::Accepted | Self::Rejected) => Ok(next),
      (from, to) => Err(Error::InvalidTransition { from, to }),
    }
  }

  pub fn is_decided(self) -> bool { !matches!(self, Self::Pending) }
}

/// A user's application to a project and its approval state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
  pub id:         u64,
  pub project_id: u64,
  pub user_id:    u64,
  /// Populated when the backend preloads the applicant.
  #[serde(default)]
  pub user:       Option<User>,
  pub status:     MemberStatus,
  pub created_at: DateTime<Utc>,
}

// ─── Messages ────────────────────────────────────────────────────────────────

/// A single append-only entry in a project's discussion thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
  pub id:         u64,
  pub project_id: u64,
  pub user_id:    u64,
  #[serde(default)]
  pub user:       Option<User>,
  pub content:    String,
  pub created_at: DateTime<Utc>,
}

/// Body of `POST /projects/{id}/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
  pub content: String,
}

// ─── Project ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
  pub id:          u64,
  pub owner_id:    u64,
  #[serde(default)]
  pub owner:       Option<User>,
  pub title:       String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub category:    String,
  pub level:       Level,
  #[serde(default)]
  pub methodology: String,
  /// Free-text range, e.g. `"3-6 месяцев"`.
  #[serde(default)]
  pub duration:    String,
  #[serde(default)]
  pub involvement: String,
  #[serde(default)]
  pub kpi_score:   KpiScore,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
  #[serde(default)]
  pub members:     Vec<ProjectMember>,
  #[serde(default)]
  pub messages:    Vec<Message>,
}

impl Project {
  /// The membership row for `user_id`, if that user has applied.
  pub fn membership(&self, user_id: u64) -> Option<&ProjectMember> {
    self.members.iter().find(|m| m.user_id == user_id)
  }

  /// Whether `user_id` participates in the project: the owner always does,
  /// anyone else only once accepted.
  pub fn is_member(&self, user_id: u64) -> bool {
    user_id == self.owner_id
      || self
        .membership(user_id)
        .is_some_and(|m| m.status == MemberStatus::Accepted)
  }

  /// Messages in display order (oldest first). Equal timestamps keep their
  /// original relative order.
  pub fn messages_chronological(&self) -> Vec<&Message> {
    let mut messages: Vec<&Message> = self.messages.iter().collect();
    messages.sort_by_key(|m| m.created_at);
    messages
  }
}

/// Body of `POST /projects`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
  pub title:       String,
  pub description: String,
  pub category:    String,
  pub level:       Level,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub methodology: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub duration:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub involvement: Option<String>,
}

/// Body of `PUT /projects/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
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
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use serde_json::json;

  use super::*;

  fn project_json() -> serde_json::Value {
    json!({
      "id": 7,
      "owner_id": 3,
      "title": "AI-чатбот",
      "category": "Искусственный интеллект",
      "level": "expert",
      "created_at": "2024-01-13T09:15:00Z",
      "updated_at": "2024-01-13T09:15:00Z",
      "members": [
        { "id": 1, "project_id": 7, "user_id": 4, "status": "accepted",
          "created_at": "2024-01-14T09:00:00Z" },
        { "id": 2, "project_id": 7, "user_id": 5, "status": "pending",
          "created_at": "2024-01-14T10:00:00Z" }
      ],
      "messages": [
        { "id": 11, "project_id": 7, "user_id": 4, "content": "second",
          "created_at": "2024-01-15T12:00:00Z" },
        { "id": 10, "project_id": 7, "user_id": 3, "content": "first",
          "created_at": "2024-01-15T11:00:00Z" }
      ]
    })
  }

  #[test]
  fn kpi_score_rejects_values_above_100() {
    assert_eq!(KpiScore::new(100).unwrap().get(), 100);
    assert!(matches!(KpiScore::new(101), Err(Error::KpiOutOfRange(101))));

    let err = serde_json::from_value::<KpiScore>(json!(250)).unwrap_err();
    assert!(err.to_string().contains("250"), "{err}");
  }

  #[test]
  fn project_defaults_fields_the_backend_omits() {
    let project: Project = serde_json::from_value(project_json()).unwrap();
    assert_eq!(project.kpi_score, KpiScore::default());
    assert_eq!(project.methodology, "");
    assert!(project.owner.is_none());
    assert_eq!(project.level, Level::Expert);
  }

  #[test]
  fn owner_and_accepted_members_are_members() {
    let project: Project = serde_json::from_value(project_json()).unwrap();
    assert!(project.is_member(3), "owner is implicitly a member");
    assert!(project.is_member(4));
    assert!(!project.is_member(5), "pending applicant is not yet a member");
    assert!(!project.is_member(99));
    assert!(project.membership(3).is_none());
  }

  #[test]
  fn messages_sorted_oldest_first() {
    let project: Project = serde_json::from_value(project_json()).unwrap();
    let ids: Vec<u64> =
      project.messages_chronological().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![10, 11]);
  }

  #[test]
  fn membership_transitions_only_from_pending() {
    use MemberStatus::*;

    assert_eq!(Pending.transition(Accepted).unwrap(), Accepted);
    assert_eq!(Pending.transition(Rejected).unwrap(), Rejected);
    assert!(Accepted.transition(Rejected).is_err());
    assert!(Rejected.transition(Accepted).is_err());
    assert!(Pending.transition(Pending).is_err());
    assert!(Accepted.is_decided());
  }

  #[test]
  fn level_string_forms_match_the_wire() {
    assert_eq!(Level::Middle.to_string(), "middle");
    assert_eq!(Level::from_str("beginner").unwrap(), Level::Beginner);
    assert!(Level::from_str("Expert").is_err());
    assert_eq!(serde_json::to_value(Level::Expert).unwrap(), json!("expert"));
  }

  #[test]
  fn patch_serialises_only_present_fields() {
    let patch = ProjectPatch {
      title: Some("New title".into()),
      level: Some(Level::Beginner),
      ..Default::default()
    };
    assert_eq!(
      serde_json::to_value(&patch).unwrap(),
      json!({ "title": "New title", "level": "beginner" })
    );
  }
}
