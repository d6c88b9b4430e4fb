//! Schedule slot business logic service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::domain::schedule_slot::{validate_window, ScheduleSlot, SlotFilter, SlotStatus};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::{paginate, Document, PageResult, PaginationError, PaginationOptions};

/// Fields for a new slot
#[derive(Debug, Clone)]
pub struct NewSlot {
    pub room_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub practitioner: Option<String>,
    pub status: Option<SlotStatus>,
    pub notes: Option<String>,
}

/// Partial slot update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct SlotChanges {
    pub room_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub practitioner: Option<String>,
    pub status: Option<SlotStatus>,
    pub notes: Option<String>,
}

/// Listing the slots of one room fails either on the room lookup or on
/// the paginated read.
#[derive(Debug, Error)]
pub enum SlotListError {
    #[error(transparent)]
    Room(#[from] DomainError),
    #[error(transparent)]
    Page(#[from] PaginationError),
}

/// Service for schedule slot operations
pub struct ScheduleSlotService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ScheduleSlotService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list_slots(
        &self,
        filter: &SlotFilter,
        options: PaginationOptions,
    ) -> Result<PageResult<Document>, PaginationError> {
        paginate(self.repos.slots(), filter, options).await
    }

    /// Slots of one room. The room itself must exist.
    pub async fn list_slots_for_room(
        &self,
        room_id: &str,
        mut filter: SlotFilter,
        options: PaginationOptions,
    ) -> Result<PageResult<Document>, SlotListError> {
        self.ensure_room_exists(room_id).await?;
        filter.room_id = Some(room_id.to_string());
        Ok(self.list_slots(&filter, options).await?)
    }

    pub async fn get_slot(&self, id: &str) -> DomainResult<ScheduleSlot> {
        self.repos
            .slots()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("ScheduleSlot", id))
    }

    pub async fn create_slot(&self, input: NewSlot) -> DomainResult<ScheduleSlot> {
        self.ensure_room_exists(&input.room_id).await?;

        let mut slot = ScheduleSlot::new(input.room_id, input.start_time, input.end_time)?;
        slot.practitioner = input.practitioner;
        slot.notes = input.notes;
        if let Some(status) = input.status {
            slot.status = status;
        }

        let slot = self.repos.slots().save(slot).await?;
        info!(slot_id = %slot.id, room_id = %slot.room_id, "Schedule slot created");
        Ok(slot)
    }

    pub async fn update_slot(&self, id: &str, changes: SlotChanges) -> DomainResult<ScheduleSlot> {
        let mut slot = self.get_slot(id).await?;

        if let Some(room_id) = changes.room_id {
            if room_id != slot.room_id {
                self.ensure_room_exists(&room_id).await?;
                slot.room_id = room_id;
            }
        }
        if let Some(start) = changes.start_time {
            slot.start_time = start;
        }
        if let Some(end) = changes.end_time {
            slot.end_time = end;
        }
        validate_window(slot.start_time, slot.end_time)?;

        if changes.practitioner.is_some() {
            slot.practitioner = changes.practitioner;
        }
        if let Some(status) = changes.status {
            slot.status = status;
        }
        if changes.notes.is_some() {
            slot.notes = changes.notes;
        }

        self.repos.slots().update(slot).await
    }

    /// Mark an open slot as booked. Fails with `Conflict` otherwise.
    pub async fn book_slot(
        &self,
        id: &str,
        practitioner: Option<String>,
    ) -> DomainResult<ScheduleSlot> {
        let mut slot = self.get_slot(id).await?;
        slot.book()?;
        if practitioner.is_some() {
            slot.practitioner = practitioner;
        }
        let slot = self.repos.slots().update(slot).await?;
        info!(slot_id = %slot.id, "Schedule slot booked");
        Ok(slot)
    }

    pub async fn delete_slot(&self, id: &str) -> DomainResult<()> {
        self.repos.slots().delete(id).await?;
        info!(slot_id = %id, "Schedule slot deleted");
        Ok(())
    }

    async fn ensure_room_exists(&self, room_id: &str) -> DomainResult<()> {
        match self.repos.rooms().find_by_id(room_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("ClinicRoom", room_id)),
        }
    }
}
