//! HTTP endpoint modules

use std::sync::Arc;

use crate::application::{ClinicRoomService, ScheduleSlotService};

pub mod clinic_rooms;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod schedule_slots;

/// State shared by the clinic room and schedule slot handlers
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<ClinicRoomService>,
    pub slots: Arc<ScheduleSlotService>,
}
