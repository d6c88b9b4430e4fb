//! Clinic room business logic service

use std::sync::Arc;

use tracing::info;

use crate::domain::clinic_room::{ClinicRoom, RoomFilter, RoomType};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::{paginate, Document, PageResult, PaginationError, PaginationOptions};

/// Fields for a new room
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub name: String,
    pub room_number: String,
    pub room_type: RoomType,
    pub floor: Option<i32>,
    pub capacity: Option<i32>,
    pub equipment: Vec<String>,
    pub notes: Option<String>,
}

/// Partial room update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct RoomChanges {
    pub name: Option<String>,
    pub room_number: Option<String>,
    pub room_type: Option<RoomType>,
    pub floor: Option<i32>,
    pub capacity: Option<i32>,
    pub equipment: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

/// Service for clinic room operations
pub struct ClinicRoomService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ClinicRoomService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list_rooms(
        &self,
        filter: &RoomFilter,
        options: PaginationOptions,
    ) -> Result<PageResult<Document>, PaginationError> {
        paginate(self.repos.rooms(), filter, options).await
    }

    pub async fn get_room(&self, id: &str) -> DomainResult<ClinicRoom> {
        self.repos
            .rooms()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("ClinicRoom", id))
    }

    pub async fn create_room(&self, input: NewRoom) -> DomainResult<ClinicRoom> {
        self.ensure_room_number_free(&input.room_number, None).await?;

        let mut room = ClinicRoom::new(input.name, input.room_number, input.room_type);
        if let Some(floor) = input.floor {
            room.floor = floor;
        }
        if let Some(capacity) = input.capacity {
            room.capacity = capacity;
        }
        room.equipment = input.equipment;
        room.notes = input.notes;

        let room = self.repos.rooms().save(room).await?;
        info!(room_id = %room.id, room_number = %room.room_number, "Clinic room created");
        Ok(room)
    }

    pub async fn update_room(&self, id: &str, changes: RoomChanges) -> DomainResult<ClinicRoom> {
        let mut room = self.get_room(id).await?;

        if let Some(ref number) = changes.room_number {
            if *number != room.room_number {
                self.ensure_room_number_free(number, Some(id)).await?;
            }
        }

        if let Some(name) = changes.name {
            room.name = name;
        }
        if let Some(number) = changes.room_number {
            room.room_number = number;
        }
        if let Some(room_type) = changes.room_type {
            room.room_type = room_type;
        }
        if let Some(floor) = changes.floor {
            room.floor = floor;
        }
        if let Some(capacity) = changes.capacity {
            room.capacity = capacity;
        }
        if let Some(equipment) = changes.equipment {
            room.equipment = equipment;
        }
        if let Some(active) = changes.is_active {
            room.is_active = active;
        }
        if changes.notes.is_some() {
            room.notes = changes.notes;
        }
        room.touch();

        self.repos.rooms().update(room).await
    }

    /// Delete a room together with its slots.
    pub async fn delete_room(&self, id: &str) -> DomainResult<()> {
        self.get_room(id).await?;
        let removed = self.repos.slots().delete_for_room(id).await?;
        self.repos.rooms().delete(id).await?;
        info!(room_id = %id, slots_removed = removed, "Clinic room deleted");
        Ok(())
    }

    async fn ensure_room_number_free(
        &self,
        room_number: &str,
        except_id: Option<&str>,
    ) -> DomainResult<()> {
        match self.repos.rooms().find_by_room_number(room_number).await? {
            Some(existing) if Some(existing.id.as_str()) != except_id => Err(
                DomainError::Conflict(format!("ClinicRoom with roomNumber {}", room_number)),
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule_slot::{ScheduleSlot, SlotFilter};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn new_room(number: &str) -> NewRoom {
        NewRoom {
            name: format!("Room {}", number),
            room_number: number.to_string(),
            room_type: RoomType::Consultation,
            floor: Some(2),
            capacity: None,
            equipment: vec!["stethoscope".into()],
            notes: None,
        }
    }

    fn service() -> (ClinicRoomService, Arc<InMemoryRepositoryProvider>) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        (ClinicRoomService::new(repos.clone()), repos)
    }

    #[tokio::test]
    async fn create_applies_defaults_and_input() {
        let (svc, _) = service();
        let room = svc.create_room(new_room("C-1")).await.unwrap();
        assert_eq!(room.floor, 2);
        assert_eq!(room.capacity, 1);
        assert!(room.is_active);
        assert_eq!(svc.get_room(&room.id).await.unwrap().room_number, "C-1");
    }

    #[tokio::test]
    async fn create_rejects_duplicate_room_number() {
        let (svc, _) = service();
        svc.create_room(new_room("C-1")).await.unwrap();
        let err = svc.create_room(new_room("C-1")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let (svc, _) = service();
        let room = svc.create_room(new_room("C-1")).await.unwrap();
        let changes = RoomChanges {
            capacity: Some(3),
            is_active: Some(false),
            ..Default::default()
        };
        let updated = svc.update_room(&room.id, changes).await.unwrap();
        assert_eq!(updated.capacity, 3);
        assert!(!updated.is_active);
        assert_eq!(updated.name, room.name);
        assert_eq!(updated.equipment, room.equipment);
    }

    #[tokio::test]
    async fn update_to_taken_number_conflicts() {
        let (svc, _) = service();
        let a = svc.create_room(new_room("C-1")).await.unwrap();
        svc.create_room(new_room("C-2")).await.unwrap();

        let same = RoomChanges {
            room_number: Some("C-1".into()),
            ..Default::default()
        };
        assert!(svc.update_room(&a.id, same).await.is_ok());

        let taken = RoomChanges {
            room_number: Some("C-2".into()),
            ..Default::default()
        };
        assert!(matches!(
            svc.update_room(&a.id, taken).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn missing_room_is_not_found() {
        let (svc, _) = service();
        assert!(matches!(
            svc.get_room("nope").await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            svc.update_room("nope", RoomChanges::default()).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            svc.delete_room("nope").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn delete_cascades_to_slots() {
        let (svc, repos) = service();
        let room = svc.create_room(new_room("C-1")).await.unwrap();
        let start = chrono::Utc::now();
        repos
            .slots()
            .save(ScheduleSlot::new(room.id.clone(), start, start + chrono::Duration::minutes(30)).unwrap())
            .await
            .unwrap();

        svc.delete_room(&room.id).await.unwrap();
        assert_eq!(repos.slots().count(&SlotFilter::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_filters_and_paginates() {
        let (svc, _) = service();
        for i in 0..12 {
            svc.create_room(new_room(&format!("C-{}", i))).await.unwrap();
        }
        let page = svc
            .list_rooms(&RoomFilter::default(), PaginationOptions::new().with_page(2))
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 12);
        assert_eq!(page.data.len(), 2);

        let filter = RoomFilter {
            search: Some("c-11".into()),
            ..Default::default()
        };
        let page = svc.list_rooms(&filter, PaginationOptions::new()).await.unwrap();
        assert_eq!(page.pagination.total, 1);
    }

    #[tokio::test]
    async fn list_surfaces_storage_failure_as_pagination_error() {
        let (svc, repos) = service();
        repos.set_unavailable(true);
        let err = svc
            .list_rooms(&RoomFilter::default(), PaginationOptions::new())
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Pagination error:"));
    }
}
