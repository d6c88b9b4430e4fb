//! Application layer: use cases over the repositories

pub mod services;

pub use services::{
    ClinicRoomService, NewRoom, NewSlot, RoomChanges, ScheduleSlotService, SlotChanges,
    SlotListError,
};
