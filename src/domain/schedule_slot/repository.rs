//! Schedule slot repository interface

use async_trait::async_trait;

use super::model::{ScheduleSlot, SlotFilter};
use crate::domain::DomainResult;
use crate::shared::{Document, QueryableCollection};

/// Slot storage. Documents expose `roomId`; populating `room` embeds the
/// referenced room document under that key.
#[async_trait]
pub trait ScheduleSlotRepository:
    QueryableCollection<Record = Document, Filter = SlotFilter>
{
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ScheduleSlot>>;

    async fn save(&self, slot: ScheduleSlot) -> DomainResult<ScheduleSlot>;

    async fn update(&self, slot: ScheduleSlot) -> DomainResult<ScheduleSlot>;

    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// Remove every slot of a room, returning how many were removed
    async fn delete_for_room(&self, room_id: &str) -> DomainResult<u64>;
}
