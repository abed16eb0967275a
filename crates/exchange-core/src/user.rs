//! Users and the authentication payloads that create or identify them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── User ────────────────────────────────────────────────────────────────────

/// A registered user. `email` doubles as the login handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:         u64,
  pub name:       String,
  pub email:      String,
  /// Comma-delimited free text, e.g. `"React, Node.js, PostgreSQL"`.
  #[serde(default)]
  pub skills:     String,
  #[serde(default)]
  pub bio:        String,
  /// Avatar URL, if the user has set one.
  #[serde(default)]
  pub avatar:     Option<String>,
  pub created_at: DateTime<Utc>,
}

impl User {
  /// The individual skill tokens, trimmed, with empty entries dropped.
  pub fn skill_list(&self) -> Vec<&str> {
    self
      .skills
      .split(',')
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .collect()
  }
}

/// Body of `PUT /users/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub skills: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bio:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub avatar: Option<String>,
}

impl UserPatch {
  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.skills.is_none()
      && self.bio.is_none()
      && self.avatar.is_none()
  }
}

// ─── Authentication ──────────────────────────────────────────────────────────

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
  pub name:     String,
  pub email:    String,
  pub password: String,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
  pub email:    String,
  pub password: String,
}

/// Returned by both register and login: a bearer token plus the user it
/// belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
  pub token: String,
  pub user:  User,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn skill_list_trims_and_drops_empty_tokens() {
    let user: User = serde_json::from_value(serde_json::json!({
      "id": 1,
      "name": "Алексей Петров",
      "email": "alexey@example.com",
      "skills": " React,  Node.js ,,PostgreSQL, ",
      "bio": "",
      "created_at": "2024-01-01T00:00:00Z"
    }))
    .unwrap();

    assert_eq!(user.skill_list(), vec!["React", "Node.js", "PostgreSQL"]);
    assert_eq!(user.avatar, None);
  }

  #[test]
  fn patch_omits_absent_fields() {
    let patch = UserPatch {
      bio: Some("Mobile developer".into()),
      ..Default::default()
    };
    let json = serde_json::to_value(&patch).unwrap();
    assert_eq!(json, serde_json::json!({ "bio": "Mobile developer" }));
    assert!(!patch.is_empty());
    assert!(UserPatch::default().is_empty());
  }
}
