//! SeaORM implementation of ScheduleSlotRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use serde_json::Value;

use super::clinic_room_repository;
use super::query_support::apply_window;
use crate::domain::schedule_slot::{ScheduleSlot, ScheduleSlotRepository, SlotFilter, SlotStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{clinic_room, schedule_slot};
use crate::shared::{
    apply_projection, to_document, Document, FindQuery, PopulateSpec, QueryableCollection,
};

/// Reference path that expands `roomId` into the room document.
pub const ROOM_PATH: &str = "room";

// ── Conversion helpers ──────────────────────────────────────────

fn entity_to_domain(m: schedule_slot::Model) -> ScheduleSlot {
    ScheduleSlot {
        id: m.id,
        room_id: m.room_id,
        practitioner: m.practitioner,
        start_time: m.start_time,
        end_time: m.end_time,
        status: SlotStatus::parse(&m.status).unwrap_or(SlotStatus::Blocked),
        notes: m.notes,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(s: &ScheduleSlot) -> schedule_slot::ActiveModel {
    schedule_slot::ActiveModel {
        id: Set(s.id.clone()),
        room_id: Set(s.room_id.clone()),
        practitioner: Set(s.practitioner.clone()),
        start_time: Set(s.start_time),
        end_time: Set(s.end_time),
        status: Set(s.status.as_str().to_string()),
        notes: Set(s.notes.clone()),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    }
}

fn filter_condition(filter: &SlotFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(ref room_id) = filter.room_id {
        cond = cond.add(schedule_slot::Column::RoomId.eq(room_id.as_str()));
    }
    if let Some(status) = filter.status {
        cond = cond.add(schedule_slot::Column::Status.eq(status.as_str()));
    }
    if let Some(ref who) = filter.practitioner {
        cond = cond.add(schedule_slot::Column::Practitioner.eq(who.as_str()));
    }
    if let Some(from) = filter.from {
        cond = cond.add(schedule_slot::Column::StartTime.gte(from));
    }
    if let Some(to) = filter.to {
        cond = cond.add(schedule_slot::Column::EndTime.lte(to));
    }
    cond
}

// ── SeaOrmScheduleSlotRepository ────────────────────────────────

pub struct SeaOrmScheduleSlotRepository {
    db: DatabaseConnection,
}

impl SeaOrmScheduleSlotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Room documents keyed by id, shaped by the expansion's own selection.
    async fn load_rooms(
        &self,
        room_ids: Vec<String>,
        spec: &PopulateSpec,
    ) -> DomainResult<HashMap<String, Document>> {
        let models = clinic_room::Entity::find()
            .filter(clinic_room::Column::Id.is_in(room_ids))
            .all(&self.db)
            .await
            ?;

        let mut rooms = HashMap::with_capacity(models.len());
        for model in models {
            let id = model.id.clone();
            let mut doc = to_document(&clinic_room_repository::entity_to_domain(model))?;
            if let Some(ref select) = spec.select {
                apply_projection(&mut doc, select);
            }
            rooms.insert(id, doc);
        }
        Ok(rooms)
    }
}

#[async_trait]
impl QueryableCollection for SeaOrmScheduleSlotRepository {
    type Record = Document;
    type Filter = SlotFilter;

    async fn find(&self, query: FindQuery<'_, SlotFilter>) -> DomainResult<Vec<Document>> {
        let select = schedule_slot::Entity::find().filter(filter_condition(query.filter));
        let slots: Vec<ScheduleSlot> = apply_window(select, &query)
            .all(&self.db)
            .await
            ?
            .into_iter()
            .map(entity_to_domain)
            .collect();

        let room_spec = query.populate.as_ref().and_then(|p| p.get(ROOM_PATH));
        let rooms = match room_spec {
            Some(ref spec) => {
                let mut ids: Vec<String> = slots.iter().map(|s| s.room_id.clone()).collect();
                ids.sort();
                ids.dedup();
                Some(self.load_rooms(ids, spec).await?)
            }
            None => None,
        };

        slots
            .iter()
            .map(|slot| -> DomainResult<Document> {
                let mut doc = to_document(slot)?;
                if let Some(ref select) = query.select {
                    apply_projection(&mut doc, select);
                }
                if let Some(ref rooms) = rooms {
                    let room = rooms.get(&slot.room_id).cloned().map(Value::Object);
                    doc.insert(ROOM_PATH.to_string(), room.unwrap_or(Value::Null));
                }
                Ok(doc)
            })
            .collect()
    }

    async fn count(&self, filter: &SlotFilter) -> DomainResult<u64> {
        schedule_slot::Entity::find()
            .filter(filter_condition(filter))
            .count(&self.db)
            .await
            .map_err(DomainError::from)
    }
}

#[async_trait]
impl ScheduleSlotRepository for SeaOrmScheduleSlotRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ScheduleSlot>> {
        let model = schedule_slot::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            ?;
        Ok(model.map(entity_to_domain))
    }

    async fn save(&self, slot: ScheduleSlot) -> DomainResult<ScheduleSlot> {
        let result = domain_to_active(&slot)
            .insert(&self.db)
            .await
            ?;
        info!(
            "Schedule slot saved: {} in room {} ({} - {})",
            result.id, result.room_id, result.start_time, result.end_time
        );
        Ok(entity_to_domain(result))
    }

    async fn update(&self, slot: ScheduleSlot) -> DomainResult<ScheduleSlot> {
        let existing = schedule_slot::Entity::find_by_id(slot.id.clone())
            .one(&self.db)
            .await
            ?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("ScheduleSlot", slot.id));
        };

        let mut model = domain_to_active(&slot);
        model.created_at = Set(existing.created_at);
        model.updated_at = Set(Utc::now());
        let result = model.update(&self.db).await?;
        Ok(entity_to_domain(result))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = schedule_slot::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            ?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("ScheduleSlot", id));
        }
        Ok(())
    }

    async fn delete_for_room(&self, room_id: &str) -> DomainResult<u64> {
        let result = schedule_slot::Entity::delete_many()
            .filter(schedule_slot::Column::RoomId.eq(room_id))
            .exec(&self.db)
            .await
            ?;
        if result.rows_affected > 0 {
            info!("Removed {} slot(s) of room {}", result.rows_affected, room_id);
        }
        Ok(result.rows_affected)
    }
}
