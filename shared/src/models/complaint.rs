//! Complaint Model

use serde::{Deserialize, Serialize};

/// Complaint status
///
/// `Accepted` is the status the auto-sweep assigns once a complaint has
/// waited past the dwell threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum ComplaintStatus {
    #[default]
    Pending,
    Accepted,
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Complaint entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Complaint {
    pub id: i64,
    pub account_id: i64,
    /// e.g. Plumbing, Electrical, Cleaning
    #[serde(rename = "type")]
    pub complaint_type: String,
    pub description: String,
    pub status: ComplaintStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create complaint payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintCreate {
    #[serde(rename = "type")]
    pub complaint_type: String,
    pub description: String,
}

/// Administrative status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintStatusUpdate {
    pub status: ComplaintStatus,
}
