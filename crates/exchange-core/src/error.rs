//! Error types for `exchange-core`.

use thiserror::Error;

use crate::project::MemberStatus;

#[derive(Debug, Error)]
pub enum Error {
  #[error("kpi score {0} is outside 0..=100")]
  KpiOutOfRange(u64),

  #[error("membership cannot move from {from} to {to}")]
  InvalidTransition { from: MemberStatus, to: MemberStatus },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
