//! Domain layer: aggregates and the repository ports they are stored through.

pub mod clinic_room;
pub mod repositories;
pub mod schedule_slot;

pub use clinic_room::{ClinicRoom, ClinicRoomRepository, RoomFilter, RoomType};
pub use repositories::{DomainResult, RepositoryProvider};
pub use schedule_slot::{ScheduleSlot, ScheduleSlotRepository, SlotFilter, SlotStatus};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
