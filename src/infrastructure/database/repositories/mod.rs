//! Database repository implementations
//!
//! Per-collection SeaORM repositories + unified RepositoryProvider.

pub mod clinic_room_repository;
mod query_support;
pub mod repository_provider;
pub mod schedule_slot_repository;

pub use clinic_room_repository::SeaOrmClinicRoomRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use schedule_slot_repository::SeaOrmScheduleSlotRepository;
