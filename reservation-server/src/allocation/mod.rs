//! Table & Time-Slot Allocation Engine
//!
//! Pure, synchronous computation over a snapshot of shifts, tables and
//! reservations. No I/O, no clock reads ("now" is passed in), no state kept
//! between calls. The caller reads the snapshot and writes the result inside
//! one transaction.
//!
//! ```text
//! interval ─┬─ slots ─────────┐
//!           ├─ occupancy ─────┼─ availability
//! pool ─────┴─ packer ────────┼─ reallocation
//!                             └─ drop_check
//! ```

pub mod availability;
pub mod drop_check;
pub mod error;
pub mod interval;
pub mod occupancy;
pub mod packer;
pub mod policy;
pub mod pool;
pub mod reallocation;
pub mod slots;
pub mod timing;

pub use availability::{SlotOption, available_slots, check_slot};
pub use drop_check::{DropCheck, can_drop};
pub use error::{AllocationError, Rejection};
pub use interval::{Minutes, OccupiedInterval, format_hhmm, overlaps, parse_hhmm};
pub use occupancy::{OccupancyIndex, OccupiedEntry};
pub use packer::{Infeasible, Packing, TableRef, pack, pack_anchored};
pub use policy::{BookingPolicy, weekday_index};
pub use pool::eligible_tables;
pub use reallocation::{ReallocationOutcome, revalidate};
pub use slots::{SlotIter, generate_slots, is_offered};
pub use timing::ShiftTiming;
