//! Data models
//!
//! Shared between reservation-server and its clients (via API).
//! All IDs are `i64` (snowflake, see [`crate::util::snowflake_id`]).

pub mod dining_table;
pub mod reservation;
pub mod restaurant;
pub mod serde_helpers;
pub mod shift;
pub mod zone;

// Re-exports
pub use dining_table::*;
pub use reservation::*;
pub use restaurant::*;
pub use shift::*;
pub use zone::*;
