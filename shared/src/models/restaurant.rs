//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity with its booking policy
///
/// Every engine call takes the restaurant explicitly; there is no
/// process-wide "current restaurant".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    /// IANA timezone name (e.g. "Europe/Lisbon"), used to evaluate the booking cutoff
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Minimum lead time (hours) between now and a slot for new bookings/changes
    #[serde(default)]
    pub booking_cutoff_hours: i32,
    /// Largest party accepted on any surface
    #[serde(default = "default_max_party_size")]
    pub max_party_size: i32,
    /// Largest party accepted from the public booking surface
    #[serde(default = "default_max_online_party_size")]
    pub max_online_party_size: i32,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_max_party_size() -> i32 {
    20
}

fn default_max_online_party_size() -> i32 {
    8
}

/// Create restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub timezone: Option<String>,
    pub booking_cutoff_hours: Option<i32>,
    pub max_party_size: Option<i32>,
    pub max_online_party_size: Option<i32>,
}

impl RestaurantCreate {
    /// Resolve defaults into a full record
    pub fn into_restaurant(self, id: i64, now: i64) -> Restaurant {
        Restaurant {
            id,
            name: self.name,
            timezone: self.timezone.unwrap_or_else(default_timezone),
            booking_cutoff_hours: self.booking_cutoff_hours.unwrap_or(0),
            max_party_size: self.max_party_size.unwrap_or_else(default_max_party_size),
            max_online_party_size: self
                .max_online_party_size
                .unwrap_or_else(default_max_online_party_size),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}
