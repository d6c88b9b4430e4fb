//! SeaORM implementation of ClinicRoomRepository

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};

use super::query_support::apply_window;
use crate::domain::clinic_room::{ClinicRoom, ClinicRoomRepository, RoomFilter, RoomType};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::clinic_room;
use crate::shared::{apply_projection, to_document, Document, FindQuery, QueryableCollection};

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn entity_to_domain(m: clinic_room::Model) -> ClinicRoom {
    ClinicRoom {
        id: m.id,
        name: m.name,
        room_number: m.room_number,
        floor: m.floor,
        room_type: RoomType::parse(&m.room_type).unwrap_or(RoomType::Other),
        capacity: m.capacity,
        equipment: serde_json::from_value(m.equipment).unwrap_or_default(),
        is_active: m.is_active,
        notes: m.notes,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(r: &ClinicRoom) -> clinic_room::ActiveModel {
    clinic_room::ActiveModel {
        id: Set(r.id.clone()),
        name: Set(r.name.clone()),
        room_number: Set(r.room_number.clone()),
        floor: Set(r.floor),
        room_type: Set(r.room_type.as_str().to_string()),
        capacity: Set(r.capacity),
        equipment: Set(serde_json::json!(r.equipment)),
        is_active: Set(r.is_active),
        notes: Set(r.notes.clone()),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    }
}

fn filter_condition(filter: &RoomFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(ref search) = filter.search {
        cond = cond.add(
            Condition::any()
                .add(clinic_room::Column::Name.contains(search.as_str()))
                .add(clinic_room::Column::RoomNumber.contains(search.as_str())),
        );
    }
    if let Some(room_type) = filter.room_type {
        cond = cond.add(clinic_room::Column::RoomType.eq(room_type.as_str()));
    }
    if let Some(floor) = filter.floor {
        cond = cond.add(clinic_room::Column::Floor.eq(floor));
    }
    if let Some(active) = filter.is_active {
        cond = cond.add(clinic_room::Column::IsActive.eq(active));
    }
    cond
}

// ── SeaOrmClinicRoomRepository ──────────────────────────────────

pub struct SeaOrmClinicRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmClinicRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl QueryableCollection for SeaOrmClinicRoomRepository {
    type Record = Document;
    type Filter = RoomFilter;

    async fn find(&self, query: FindQuery<'_, RoomFilter>) -> DomainResult<Vec<Document>> {
        let select = clinic_room::Entity::find().filter(filter_condition(query.filter));
        let models = apply_window(select, &query)
            .all(&self.db)
            .await
            ?;

        models
            .into_iter()
            .map(|m| -> DomainResult<Document> {
                let mut doc = to_document(&entity_to_domain(m))?;
                if let Some(ref select) = query.select {
                    apply_projection(&mut doc, select);
                }
                Ok(doc)
            })
            .collect()
    }

    async fn count(&self, filter: &RoomFilter) -> DomainResult<u64> {
        clinic_room::Entity::find()
            .filter(filter_condition(filter))
            .count(&self.db)
            .await
            .map_err(DomainError::from)
    }
}

#[async_trait]
impl ClinicRoomRepository for SeaOrmClinicRoomRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ClinicRoom>> {
        let model = clinic_room::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            ?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_by_room_number(&self, room_number: &str) -> DomainResult<Option<ClinicRoom>> {
        let model = clinic_room::Entity::find()
            .filter(clinic_room::Column::RoomNumber.eq(room_number))
            .one(&self.db)
            .await
            ?;
        Ok(model.map(entity_to_domain))
    }

    async fn save(&self, room: ClinicRoom) -> DomainResult<ClinicRoom> {
        let result = domain_to_active(&room)
            .insert(&self.db)
            .await
            ?;
        info!("Clinic room saved: {} ({})", result.room_number, result.id);
        Ok(entity_to_domain(result))
    }

    async fn update(&self, room: ClinicRoom) -> DomainResult<ClinicRoom> {
        let existing = clinic_room::Entity::find_by_id(room.id.clone())
            .one(&self.db)
            .await
            ?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("ClinicRoom", room.id));
        };

        let mut model = domain_to_active(&room);
        model.created_at = Set(existing.created_at);
        model.updated_at = Set(Utc::now());
        let result = model.update(&self.db).await?;
        Ok(entity_to_domain(result))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = clinic_room::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            ?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("ClinicRoom", id));
        }
        info!("Clinic room deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::memory_db;
    use crate::shared::{
        extract_params, paginate, PaginationOptions, RawPaginationQuery, SortDirection, SortSpec,
    };

    async fn seeded() -> SeaOrmClinicRoomRepository {
        let repo = SeaOrmClinicRoomRepository::new(memory_db().await);
        for (i, (name, number, kind)) in [
            ("Cardiology", "C-101", RoomType::Consultation),
            ("X-Ray", "R-201", RoomType::Imaging),
            ("Blood Lab", "L-202", RoomType::Laboratory),
            ("Cardio Echo", "C-102", RoomType::Imaging),
        ]
        .into_iter()
        .enumerate()
        {
            let mut room = ClinicRoom::new(name, number, kind);
            room.floor = if number.contains("-1") { 1 } else { 2 };
            room.created_at += chrono::Duration::seconds(i as i64);
            room.updated_at = room.created_at;
            repo.save(room).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn save_and_find_roundtrip() {
        let repo = SeaOrmClinicRoomRepository::new(memory_db().await);
        let mut room = ClinicRoom::new("Minor Surgery", "P-1", RoomType::Procedure);
        room.equipment = vec!["lamp".into(), "table".into()];
        let saved = repo.save(room.clone()).await.unwrap();
        assert_eq!(saved.equipment, room.equipment);

        let found = repo.find_by_id(&room.id).await.unwrap().unwrap();
        assert_eq!(found.room_type, RoomType::Procedure);
        assert_eq!(found.room_number, "P-1");
        assert!(repo.find_by_room_number("P-1").await.unwrap().is_some());
        assert!(repo.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_room_number_is_rejected() {
        let repo = SeaOrmClinicRoomRepository::new(memory_db().await);
        repo.save(ClinicRoom::new("A", "X-1", RoomType::Other))
            .await
            .unwrap();
        let dup = repo.save(ClinicRoom::new("B", "X-1", RoomType::Other)).await;
        assert!(matches!(dup, Err(DomainError::Storage(_))));
    }

    #[tokio::test]
    async fn update_missing_room_is_not_found() {
        let repo = SeaOrmClinicRoomRepository::new(memory_db().await);
        let result = repo
            .update(ClinicRoom::new("Ghost", "G-0", RoomType::Other))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert!(matches!(
            repo.delete("nope").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn update_keeps_created_at() {
        let repo = seeded().await;
        let mut room = repo.find_by_room_number("R-201").await.unwrap().unwrap();
        let created = room.created_at;
        room.capacity = 4;
        let updated = repo.update(room).await.unwrap();
        assert_eq!(updated.capacity, 4);
        assert_eq!(updated.created_at, created);
    }

    #[tokio::test]
    async fn filters_by_search_and_type() {
        let repo = seeded().await;
        let search = RoomFilter {
            search: Some("cardio".into()),
            ..Default::default()
        };
        assert_eq!(repo.count(&search).await.unwrap(), 2);

        let imaging_upstairs = RoomFilter {
            room_type: Some(RoomType::Imaging),
            floor: Some(2),
            ..Default::default()
        };
        let docs = repo.find(FindQuery::new(&imaging_upstairs)).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["roomNumber"], "R-201");
    }

    #[tokio::test]
    async fn paginates_newest_first_by_default() {
        let repo = seeded().await;
        let filter = RoomFilter::default();
        let page = paginate(&repo, &filter, PaginationOptions::new().with_limit(3))
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 4);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.data.len(), 3);
        assert_eq!(page.data[0]["roomNumber"], "C-102");

        let last = paginate(
            &repo,
            &filter,
            PaginationOptions::new().with_page(2).with_limit(3),
        )
        .await
        .unwrap();
        assert_eq!(last.data.len(), 1);
        assert_eq!(last.data[0]["roomNumber"], "C-101");
    }

    #[tokio::test]
    async fn page_far_past_the_end_is_empty() {
        let repo = seeded().await;
        let options = extract_params(&RawPaginationQuery {
            page: Some("1000000000000000000".into()),
            limit: Some("10".into()),
            ..Default::default()
        });
        let page = paginate(&repo, &RoomFilter::default(), options)
            .await
            .unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 4);
        assert_eq!(page.pagination.total_pages, 1);
        assert!(!page.pagination.has_next_page);
    }

    #[tokio::test]
    async fn sorts_by_requested_field_and_projects() {
        let repo = seeded().await;
        let filter = RoomFilter::default();
        let query = FindQuery::new(&filter)
            .sort(SortSpec::by("roomNumber", SortDirection::Ascending))
            .select("roomNumber".into());
        let docs = repo.find(query).await.unwrap();
        let numbers: Vec<_> = docs.iter().map(|d| d["roomNumber"].clone()).collect();
        assert_eq!(numbers, vec!["C-101", "C-102", "L-202", "R-201"]);
        assert!(docs[0].contains_key("id"));
        assert!(!docs[0].contains_key("name"));
    }

    #[tokio::test]
    async fn unknown_sort_field_is_ignored() {
        let repo = seeded().await;
        let filter = RoomFilter::default();
        let query = FindQuery::new(&filter).sort(SortSpec::by("shoeSize", SortDirection::Descending));
        assert_eq!(repo.find(query).await.unwrap().len(), 4);
    }
}
