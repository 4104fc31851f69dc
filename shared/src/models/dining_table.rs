//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Physical availability of a table, independent of bookings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Available,
    Unavailable,
    Blocked,
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub seats: i32,
    /// Seating environment (zone)
    pub zone_id: Option<i64>,
    #[serde(default)]
    pub status: TableStatus,
    pub is_active: bool,
    /// Position on the floor plan, breaks ties between equal seat counts
    #[serde(default)]
    pub display_order: i32,
}

impl DiningTable {
    /// Only active tables with `Available` status can ever be allocated
    pub fn is_eligible(&self) -> bool {
        self.is_active && self.status == TableStatus::Available
    }
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub name: String,
    pub seats: Option<i32>,
    pub zone_id: Option<i64>,
    pub display_order: Option<i32>,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    pub name: Option<String>,
    pub seats: Option<i32>,
    pub zone_id: Option<i64>,
    pub status: Option<TableStatus>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}
