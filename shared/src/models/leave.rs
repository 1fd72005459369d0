//! Leave Request Model

use serde::{Deserialize, Serialize};

/// Leave request status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum LeaveStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Leave request entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Leave {
    pub id: i64,
    pub account_id: i64,
    pub from_date: String,
    pub from_time: String,
    pub to_date: String,
    pub to_time: String,
    pub no_of_days: String,
    pub reason: String,
    pub status: LeaveStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create leave payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveCreate {
    pub from_date: String,
    pub from_time: String,
    pub to_date: String,
    pub to_time: String,
    pub no_of_days: String,
    pub reason: String,
}

/// Administrative status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveStatusUpdate {
    pub status: LeaveStatus,
}
