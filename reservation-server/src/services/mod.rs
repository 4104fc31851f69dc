//! 服务层 - 预订业务服务
//!
//! # 服务列表
//!
//! - [`BookingService`] - 可订时段、预订校验、桌台重新分配 (事务包装分配引擎)

pub mod booking;

pub use booking::{AppliedReallocation, AvailableSlot, BookingService, SlotRequest, ValidationResult};
