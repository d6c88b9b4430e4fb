//! In-memory repositories
//!
//! DashMap-backed collections with the same query semantics as the
//! SeaORM ones. Storage can be switched off to exercise failure paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;

use crate::domain::clinic_room::{ClinicRoom, ClinicRoomRepository, RoomFilter};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::schedule_slot::{ScheduleSlot, ScheduleSlotRepository, SlotFilter};
use crate::domain::{DomainError, DomainResult};
use crate::shared::{
    apply_projection, sort_documents, to_document, Document, FindQuery, Projection,
    QueryableCollection,
};

const ROOM_PATH: &str = "room";

#[derive(Clone, Default)]
struct Availability(Arc<AtomicBool>);

impl Availability {
    fn check(&self) -> DomainResult<()> {
        if self.0.load(Ordering::SeqCst) {
            return Err(DomainError::Storage("storage unavailable".into()));
        }
        Ok(())
    }

    fn set_down(&self, down: bool) {
        self.0.store(down, Ordering::SeqCst);
    }
}

/// Sort, window, then project a set of full documents.
fn window_documents<F>(
    mut docs: Vec<Document>,
    query: &FindQuery<'_, F>,
) -> Vec<Document> {
    sort_documents(&mut docs, &query.sort.clone().unwrap_or_default());
    let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
    let take = query
        .limit
        .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
        .unwrap_or(usize::MAX);
    docs.into_iter().skip(skip).take(take).collect()
}

// ── Rooms ───────────────────────────────────────────────────────

pub struct InMemoryRoomRepository {
    rooms: Arc<DashMap<String, ClinicRoom>>,
    availability: Availability,
}

#[async_trait]
impl QueryableCollection for InMemoryRoomRepository {
    type Record = Document;
    type Filter = RoomFilter;

    async fn find(&self, query: FindQuery<'_, RoomFilter>) -> DomainResult<Vec<Document>> {
        self.availability.check()?;
        let docs = self
            .rooms
            .iter()
            .filter(|r| query.filter.matches(r.value()))
            .map(|r| to_document(r.value()))
            .collect::<DomainResult<Vec<_>>>()?;

        let mut page = window_documents(docs, &query);
        if let Some(ref select) = query.select {
            page.iter_mut().for_each(|d| apply_projection(d, select));
        }
        Ok(page)
    }

    async fn count(&self, filter: &RoomFilter) -> DomainResult<u64> {
        self.availability.check()?;
        Ok(self.rooms.iter().filter(|r| filter.matches(r.value())).count() as u64)
    }
}

#[async_trait]
impl ClinicRoomRepository for InMemoryRoomRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ClinicRoom>> {
        self.availability.check()?;
        Ok(self.rooms.get(id).map(|r| r.clone()))
    }

    async fn find_by_room_number(&self, room_number: &str) -> DomainResult<Option<ClinicRoom>> {
        self.availability.check()?;
        Ok(self
            .rooms
            .iter()
            .find(|r| r.room_number == room_number)
            .map(|r| r.clone()))
    }

    async fn save(&self, room: ClinicRoom) -> DomainResult<ClinicRoom> {
        self.availability.check()?;
        if self.rooms.contains_key(&room.id) {
            return Err(DomainError::Conflict(format!("ClinicRoom {}", room.id)));
        }
        if self.rooms.iter().any(|r| r.room_number == room.room_number) {
            return Err(DomainError::Conflict(format!(
                "ClinicRoom with roomNumber {}",
                room.room_number
            )));
        }
        self.rooms.insert(room.id.clone(), room.clone());
        Ok(room)
    }

    async fn update(&self, mut room: ClinicRoom) -> DomainResult<ClinicRoom> {
        self.availability.check()?;
        let mut entry = self
            .rooms
            .get_mut(&room.id)
            .ok_or_else(|| DomainError::not_found("ClinicRoom", room.id.clone()))?;
        room.created_at = entry.created_at;
        room.updated_at = Utc::now();
        *entry = room.clone();
        Ok(room)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.availability.check()?;
        self.rooms
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("ClinicRoom", id))
    }
}

// ── Slots ───────────────────────────────────────────────────────

pub struct InMemorySlotRepository {
    slots: DashMap<String, ScheduleSlot>,
    rooms: Arc<DashMap<String, ClinicRoom>>,
    availability: Availability,
}

impl InMemorySlotRepository {
    fn room_value(&self, room_id: &str, select: Option<&Projection>) -> DomainResult<Value> {
        let Some(room) = self.rooms.get(room_id) else {
            return Ok(Value::Null);
        };
        let mut doc = to_document(room.value())?;
        if let Some(select) = select {
            apply_projection(&mut doc, select);
        }
        Ok(Value::Object(doc))
    }
}

#[async_trait]
impl QueryableCollection for InMemorySlotRepository {
    type Record = Document;
    type Filter = SlotFilter;

    async fn find(&self, query: FindQuery<'_, SlotFilter>) -> DomainResult<Vec<Document>> {
        self.availability.check()?;
        let docs = self
            .slots
            .iter()
            .filter(|s| query.filter.matches(s.value()))
            .map(|s| to_document(s.value()))
            .collect::<DomainResult<Vec<_>>>()?;

        let room_spec = query.populate.as_ref().and_then(|p| p.get(ROOM_PATH));
        window_documents(docs, &query)
            .into_iter()
            .map(|mut doc| -> DomainResult<Document> {
                let room_id = doc
                    .get("roomId")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                if let Some(ref select) = query.select {
                    apply_projection(&mut doc, select);
                }
                if let Some(ref spec) = room_spec {
                    let room = match room_id {
                        Some(id) => self.room_value(&id, spec.select.as_ref())?,
                        None => Value::Null,
                    };
                    doc.insert(ROOM_PATH.to_string(), room);
                }
                Ok(doc)
            })
            .collect()
    }

    async fn count(&self, filter: &SlotFilter) -> DomainResult<u64> {
        self.availability.check()?;
        Ok(self.slots.iter().filter(|s| filter.matches(s.value())).count() as u64)
    }
}

#[async_trait]
impl ScheduleSlotRepository for InMemorySlotRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ScheduleSlot>> {
        self.availability.check()?;
        Ok(self.slots.get(id).map(|s| s.clone()))
    }

    async fn save(&self, slot: ScheduleSlot) -> DomainResult<ScheduleSlot> {
        self.availability.check()?;
        if self.slots.contains_key(&slot.id) {
            return Err(DomainError::Conflict(format!("ScheduleSlot {}", slot.id)));
        }
        self.slots.insert(slot.id.clone(), slot.clone());
        Ok(slot)
    }

    async fn update(&self, mut slot: ScheduleSlot) -> DomainResult<ScheduleSlot> {
        self.availability.check()?;
        let mut entry = self
            .slots
            .get_mut(&slot.id)
            .ok_or_else(|| DomainError::not_found("ScheduleSlot", slot.id.clone()))?;
        slot.created_at = entry.created_at;
        slot.updated_at = Utc::now();
        *entry = slot.clone();
        Ok(slot)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.availability.check()?;
        self.slots
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("ScheduleSlot", id))
    }

    async fn delete_for_room(&self, room_id: &str) -> DomainResult<u64> {
        self.availability.check()?;
        let before = self.slots.len();
        self.slots.retain(|_, s| s.room_id != room_id);
        Ok((before - self.slots.len()) as u64)
    }
}

// ── Provider ────────────────────────────────────────────────────

/// In-memory repository provider for development and testing
pub struct InMemoryRepositoryProvider {
    rooms: InMemoryRoomRepository,
    slots: InMemorySlotRepository,
    availability: Availability,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let rooms = Arc::new(DashMap::new());
        let availability = Availability::default();
        Self {
            rooms: InMemoryRoomRepository {
                rooms: rooms.clone(),
                availability: availability.clone(),
            },
            slots: InMemorySlotRepository {
                slots: DashMap::new(),
                rooms,
                availability: availability.clone(),
            },
            availability,
        }
    }

    /// Make every subsequent operation fail with a storage error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.availability.set_down(unavailable);
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryRepositoryProvider {
    fn rooms(&self) -> &dyn ClinicRoomRepository {
        &self.rooms
    }

    fn slots(&self) -> &dyn ScheduleSlotRepository {
        &self.slots
    }

    async fn ping(&self) -> DomainResult<()> {
        self.availability.check()
    }
}
