//! Booking policy layers
//!
//! Hard rejects applied before any slot is generated (party size caps,
//! opening day) and per slot (cutoff). Each yields its own [`Rejection`].

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use shared::models::{BookingChannel, Restaurant, Shift};

use super::error::Rejection;
use super::interval::{Minutes, format_hhmm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    pub cutoff_hours: i32,
    pub max_party_size: i32,
    pub max_online_party_size: i32,
}

impl From<&Restaurant> for BookingPolicy {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            cutoff_hours: restaurant.booking_cutoff_hours.max(0),
            max_party_size: restaurant.max_party_size,
            max_online_party_size: restaurant.max_online_party_size,
        }
    }
}

/// 0 = Sunday .. 6 = Saturday
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

impl BookingPolicy {
    pub fn check_party_size(
        &self,
        party_size: i32,
        channel: BookingChannel,
    ) -> Result<(), Rejection> {
        if party_size < 1 {
            return Err(Rejection::InvalidPartySize { party_size });
        }
        if party_size > self.max_party_size {
            return Err(Rejection::PartySizeExceeded {
                party_size,
                max: self.max_party_size,
            });
        }
        // Online cap is stricter and only binds the public surface
        if channel == BookingChannel::Public && party_size > self.max_online_party_size {
            return Err(Rejection::OnlinePartySizeExceeded {
                party_size,
                max: self.max_online_party_size,
            });
        }
        Ok(())
    }

    /// Closed when no active shift serves the weekday at all; otherwise the
    /// requested shift itself must serve it
    pub fn check_opening_day(
        &self,
        date: NaiveDate,
        shift: &Shift,
        all_shifts: &[Shift],
    ) -> Result<(), Rejection> {
        let weekday = weekday_index(date);
        if !all_shifts.iter().any(|s| s.runs_on(weekday)) {
            return Err(Rejection::ClosedDay { weekday });
        }
        if !shift.runs_on(weekday) {
            return Err(Rejection::ShiftNotServing {
                shift: shift.name.clone(),
                weekday,
            });
        }
        Ok(())
    }

    /// `(date + slot) - now` must be at least the cutoff. `now` is the
    /// restaurant's local wall-clock time.
    pub fn check_cutoff(
        &self,
        date: NaiveDate,
        slot: Minutes,
        now: NaiveDateTime,
    ) -> Result<(), Rejection> {
        let slot_at = date.and_time(NaiveTime::MIN) + Duration::minutes(slot as i64);
        if slot_at - now < Duration::hours(self.cutoff_hours as i64) {
            return Err(Rejection::BookingCutoff {
                slot: format_hhmm(slot),
                cutoff_hours: self.cutoff_hours,
            });
        }
        Ok(())
    }

    /// Request-level checks shared by the slot list and submit-time validation
    pub fn check_request(
        &self,
        party_size: i32,
        channel: BookingChannel,
        date: NaiveDate,
        shift: &Shift,
        all_shifts: &[Shift],
    ) -> Result<(), Rejection> {
        self.check_party_size(party_size, channel)?;
        self.check_opening_day(date, shift, all_shifts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> BookingPolicy {
        BookingPolicy {
            cutoff_hours: 2,
            max_party_size: 12,
            max_online_party_size: 6,
        }
    }

    fn shift(id: i64, days: &[u8]) -> Shift {
        Shift {
            id,
            restaurant_id: 1,
            name: format!("Shift {}", id),
            start_time: "18:00".to_string(),
            end_time: "22:00".to_string(),
            slot_interval_minutes: 30,
            default_dwell_minutes: 90,
            default_buffer_minutes: 0,
            max_capacity: None,
            days_of_week: days.to_vec(),
            is_active: true,
        }
    }

    #[test]
    fn test_weekday_index_starts_on_sunday() {
        // 2026-03-15 is a Sunday
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()), 0);
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()), 6);
    }

    #[test]
    fn test_online_cap_only_for_public_channel() {
        let p = policy();
        assert!(p.check_party_size(8, BookingChannel::Staff).is_ok());
        assert_eq!(
            p.check_party_size(8, BookingChannel::Public),
            Err(Rejection::OnlinePartySizeExceeded {
                party_size: 8,
                max: 6
            })
        );
        assert_eq!(
            p.check_party_size(13, BookingChannel::Staff),
            Err(Rejection::PartySizeExceeded {
                party_size: 13,
                max: 12
            })
        );
        assert_eq!(
            p.check_party_size(0, BookingChannel::Staff),
            Err(Rejection::InvalidPartySize { party_size: 0 })
        );
    }

    #[test]
    fn test_cutoff_two_hours_at_1905() {
        let p = policy();
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let now = date.and_hms_opt(19, 5, 0).unwrap();

        assert_eq!(
            p.check_cutoff(date, 20 * 60, now),
            Err(Rejection::BookingCutoff {
                slot: "20:00".to_string(),
                cutoff_hours: 2
            })
        );
        assert!(p.check_cutoff(date, 21 * 60 + 30, now).is_ok());
        // Exactly two hours ahead is still bookable
        assert!(p.check_cutoff(date, 21 * 60 + 5, now).is_ok());
    }

    #[test]
    fn test_cutoff_spans_days() {
        let p = policy();
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let now = today.and_hms_opt(23, 30, 0).unwrap();
        let tomorrow = today.succ_opt().unwrap();
        assert!(p.check_cutoff(tomorrow, 60, now).is_err());
        assert!(p.check_cutoff(tomorrow, 90, now).is_ok());
        assert!(p.check_cutoff(today.pred_opt().unwrap(), 1200, now).is_err());
    }

    #[test]
    fn test_opening_day() {
        let p = policy();
        let saturday = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let lunch = shift(1, &[1, 2, 3, 4, 5]);
        let dinner = shift(2, &[5, 6]);
        let all = vec![lunch.clone(), dinner.clone()];

        assert!(p.check_opening_day(saturday, &dinner, &all).is_ok());
        assert_eq!(
            p.check_opening_day(saturday, &lunch, &all),
            Err(Rejection::ShiftNotServing {
                shift: "Shift 1".to_string(),
                weekday: 6
            })
        );

        let sunday = saturday.succ_opt().unwrap();
        assert_eq!(
            p.check_opening_day(sunday, &dinner, &all),
            Err(Rejection::ClosedDay { weekday: 0 })
        );
    }

    #[test]
    fn test_inactive_shift_does_not_open_a_day() {
        let p = policy();
        let saturday = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let mut dinner = shift(2, &[6]);
        dinner.is_active = false;
        assert_eq!(
            p.check_opening_day(saturday, &dinner, std::slice::from_ref(&dinner)),
            Err(Rejection::ClosedDay { weekday: 6 })
        );
    }
}
