//! In-memory storage for development and testing

mod memory;

pub use memory::{InMemoryRepositoryProvider, InMemoryRoomRepository, InMemorySlotRepository};
