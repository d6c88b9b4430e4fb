//! Clinic room repository interface

use async_trait::async_trait;

use super::model::{ClinicRoom, RoomFilter};
use crate::domain::DomainResult;
use crate::shared::{Document, QueryableCollection};

/// Room storage.
///
/// Listing goes through the [`QueryableCollection`] half (documents,
/// filtered by [`RoomFilter`]); single-record access is typed.
#[async_trait]
pub trait ClinicRoomRepository:
    QueryableCollection<Record = Document, Filter = RoomFilter>
{
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ClinicRoom>>;

    async fn find_by_room_number(&self, room_number: &str) -> DomainResult<Option<ClinicRoom>>;

    /// Insert a new room
    async fn save(&self, room: ClinicRoom) -> DomainResult<ClinicRoom>;

    /// Replace an existing room; `NotFound` if it does not exist
    async fn update(&self, room: ClinicRoom) -> DomainResult<ClinicRoom>;

    async fn delete(&self, id: &str) -> DomainResult<()>;
}
