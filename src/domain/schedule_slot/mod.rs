//! Schedule slot aggregate
//!
//! Contains the ScheduleSlot entity, its list filter, and repository interface.

pub mod model;
pub mod repository;

pub use model::{validate_window, ScheduleSlot, SlotFilter, SlotStatus};
pub use repository::ScheduleSlotRepository;
