//! Room Model

use serde::{Deserialize, Serialize};

/// Hostel name given to rooms created without one
pub const DEFAULT_HOSTEL_NAME: &str = "PSG MAIN";
/// Beds in a newly created room
pub const DEFAULT_MAX_OCCUPANCY: i64 = 3;

/// Room entity. `occupancy` is derived from the current members.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Room {
    pub id: i64,
    pub hostel_name: String,
    pub block: String,
    pub floor: String,
    pub room_no: String,
    /// e.g. "New 3 In 1 Room"
    pub room_type: String,
    pub occupancy: i64,
    pub max_occupancy: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Room {
    pub fn is_full(&self) -> bool {
        self.occupancy >= self.max_occupancy
    }
}

/// The room an account is allocated to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RoomAllocation {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub room: Room,
    /// YYYY-MM-DD
    pub joining_date: String,
}

/// Assign (or move) the caller to the room identified by `block` + `room_no`.
///
/// The room is created on first use; `floor` and `room_type` overwrite the
/// stored values of an existing room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomAssign {
    pub block: String,
    pub floor: String,
    pub room_no: String,
    pub room_type: String,
    pub joining_date: String,
}

/// Administrative capacity change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCapacityUpdate {
    pub max_occupancy: i64,
}
