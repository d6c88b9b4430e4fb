//! Clinic room aggregate
//!
//! Contains the ClinicRoom entity, its list filter, and repository interface.

pub mod model;
pub mod repository;

pub use model::{ClinicRoom, RoomFilter, RoomType};
pub use repository::ClinicRoomRepository;
