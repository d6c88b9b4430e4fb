//! Database entities module

pub mod clinic_room;
pub mod schedule_slot;

pub use clinic_room::Entity as ClinicRoom;
pub use schedule_slot::Entity as ScheduleSlot;
