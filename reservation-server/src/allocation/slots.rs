//! Slot Generator
//!
//! Slots run from the shift start in `interval` steps. The last slot leaves
//! one full interval before closing: a shift 18:00-22:00 every 30 minutes
//! offers 18:00 .. 21:30, never 22:00.

use super::interval::Minutes;
use super::timing::ShiftTiming;

/// Ascending, finite slot sequence. Clone it to restart.
#[derive(Debug, Clone)]
pub struct SlotIter {
    next: Minutes,
    last: Minutes,
    step: Minutes,
}

impl Iterator for SlotIter {
    type Item = Minutes;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step <= 0 || self.next > self.last {
            return None;
        }
        let slot = self.next;
        self.next += self.step;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.step <= 0 || self.next > self.last {
            return (0, Some(0));
        }
        let n = ((self.last - self.next) / self.step + 1) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SlotIter {}

pub fn generate_slots(timing: &ShiftTiming) -> SlotIter {
    SlotIter {
        next: timing.start,
        last: timing.end - timing.interval,
        step: timing.interval,
    }
}

/// Whether `slot` is one of the values [`generate_slots`] yields
pub fn is_offered(timing: &ShiftTiming, slot: Minutes) -> bool {
    timing.interval > 0
        && slot >= timing.start
        && slot <= timing.end - timing.interval
        && (slot - timing.start) % timing.interval == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::interval::format_hhmm;

    #[test]
    fn test_last_slot_leaves_one_interval() {
        let timing = ShiftTiming::for_tests(1080, 1320, 30, 90, 0);
        let slots: Vec<String> = generate_slots(&timing).map(format_hhmm).collect();
        assert_eq!(slots.first().map(String::as_str), Some("18:00"));
        assert_eq!(slots.last().map(String::as_str), Some("21:30"));
        assert_eq!(slots.len(), 8);
    }

    #[test]
    fn test_uneven_window() {
        // 12:00-14:45 every 60 → 12:00, 13:00 (14:00 would leave only 45 minutes)
        let timing = ShiftTiming::for_tests(720, 885, 60, 60, 0);
        let slots: Vec<Minutes> = generate_slots(&timing).collect();
        assert_eq!(slots, vec![720, 780]);
    }

    #[test]
    fn test_window_shorter_than_interval_is_empty() {
        let timing = ShiftTiming::for_tests(720, 740, 30, 60, 0);
        assert_eq!(generate_slots(&timing).count(), 0);
    }

    #[test]
    fn test_iterator_is_restartable() {
        let timing = ShiftTiming::for_tests(1080, 1320, 30, 90, 0);
        let iter = generate_slots(&timing);
        let first: Vec<Minutes> = iter.clone().collect();
        let second: Vec<Minutes> = iter.collect();
        assert_eq!(first, second);
        assert_eq!(generate_slots(&timing).len(), 8);
    }

    #[test]
    fn test_is_offered() {
        let timing = ShiftTiming::for_tests(1080, 1320, 30, 90, 0);
        assert!(is_offered(&timing, 1080));
        assert!(is_offered(&timing, 1290));
        assert!(!is_offered(&timing, 1320));
        assert!(!is_offered(&timing, 1095));
        assert!(!is_offered(&timing, 1050));
    }
}
