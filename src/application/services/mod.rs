//! Application services

mod clinic_room;
mod schedule_slot;

pub use clinic_room::{ClinicRoomService, NewRoom, RoomChanges};
pub use schedule_slot::{NewSlot, ScheduleSlotService, SlotChanges, SlotListError};
