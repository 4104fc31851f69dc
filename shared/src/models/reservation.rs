//! Reservation Model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reservation lifecycle status
///
/// Canonical wire form is lowercase snake case. Parsing is case-insensitive
/// so clients sending `PENDING` or `Pending` are accepted at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    NoShow,
    Completed,
    Altered,
}

impl ReservationStatus {
    /// Only pending and confirmed reservations hold seats
    pub fn occupies_seats(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
            Self::Completed => "completed",
            Self::Altered => "altered",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised status string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reservation status: {0}")]
pub struct InvalidReservationStatus(pub String);

impl FromStr for ReservationStatus {
    type Err = InvalidReservationStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            "no_show" | "noshow" => Ok(Self::NoShow),
            "completed" => Ok(Self::Completed),
            "altered" => Ok(Self::Altered),
            _ => Err(InvalidReservationStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for ReservationStatus {
    type Error = InvalidReservationStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReservationStatus> for &'static str {
    fn from(status: ReservationStatus) -> Self {
        status.as_str()
    }
}

/// Surface a booking request came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingChannel {
    /// Public booking wizard / guest self-service
    Public,
    /// Staff dialogs and the table map
    #[default]
    Staff,
}

/// Reservation entity
///
/// `linked_tables` is always non-empty and starts with `table_id`; the
/// ingestion adapter normalizes this before the record reaches the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub restaurant_id: i64,
    pub date: NaiveDate,
    pub shift_id: i64,
    /// Seating time (HH:MM)
    pub slot_time: String,
    pub party_size: i32,
    /// Primary table
    pub table_id: i64,
    #[serde(default)]
    pub linked_tables: Vec<i64>,
    pub status: ReservationStatus,
    pub zone_id: Option<i64>,
    pub guest_name: String,
    pub guest_phone: Option<String>,
    pub note: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Reservation {
    /// Ensure `linked_tables` is non-empty, starts with `table_id` and has no duplicates
    pub fn normalize_linked_tables(&mut self) {
        let mut linked = Vec::with_capacity(self.linked_tables.len() + 1);
        linked.push(self.table_id);
        for id in self.linked_tables.drain(..) {
            if !linked.contains(&id) {
                linked.push(id);
            }
        }
        self.linked_tables = linked;
    }
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub date: NaiveDate,
    pub shift_id: i64,
    pub slot_time: String,
    pub party_size: i32,
    pub zone_id: Option<i64>,
    pub guest_name: String,
    pub guest_phone: Option<String>,
    pub note: Option<String>,
    #[serde(default)]
    pub channel: BookingChannel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("PENDING".parse(), Ok(ReservationStatus::Pending));
        assert_eq!("Confirmed".parse(), Ok(ReservationStatus::Confirmed));
        assert_eq!("no-show".parse(), Ok(ReservationStatus::NoShow));
        assert!("seated".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_status_serde_canonical_form() {
        let json = serde_json::to_string(&ReservationStatus::NoShow).unwrap();
        assert_eq!(json, "\"no_show\"");

        let status: ReservationStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, ReservationStatus::Cancelled);
    }

    #[test]
    fn test_only_pending_and_confirmed_occupy_seats() {
        assert!(ReservationStatus::Pending.occupies_seats());
        assert!(ReservationStatus::Confirmed.occupies_seats());
        assert!(!ReservationStatus::Cancelled.occupies_seats());
        assert!(!ReservationStatus::NoShow.occupies_seats());
        assert!(!ReservationStatus::Completed.occupies_seats());
        assert!(!ReservationStatus::Altered.occupies_seats());
    }

    #[test]
    fn test_normalize_linked_tables() {
        let mut r = Reservation {
            id: 1,
            restaurant_id: 1,
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            shift_id: 1,
            slot_time: "20:00".to_string(),
            party_size: 6,
            table_id: 2,
            linked_tables: vec![],
            status: ReservationStatus::Confirmed,
            zone_id: None,
            guest_name: "Ana".to_string(),
            guest_phone: None,
            note: None,
            created_at: None,
            updated_at: None,
        };
        r.normalize_linked_tables();
        assert_eq!(r.linked_tables, vec![2]);

        r.linked_tables = vec![3, 2, 3];
        r.normalize_linked_tables();
        assert_eq!(r.linked_tables, vec![2, 3]);
    }
}
