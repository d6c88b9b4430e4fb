//! SeaORM implementation of RepositoryProvider

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use crate::domain::clinic_room::ClinicRoomRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::schedule_slot::ScheduleSlotRepository;
use crate::domain::DomainResult;

use super::clinic_room_repository::SeaOrmClinicRoomRepository;
use super::schedule_slot_repository::SeaOrmScheduleSlotRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-collection repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let room = repos.rooms().find_by_room_number("C-101").await?;
/// let freed = repos.slots().delete_for_room(&room_id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    rooms: SeaOrmClinicRoomRepository,
    slots: SeaOrmScheduleSlotRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            rooms: SeaOrmClinicRoomRepository::new(db.clone()),
            slots: SeaOrmScheduleSlotRepository::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn rooms(&self) -> &dyn ClinicRoomRepository {
        &self.rooms
    }

    fn slots(&self) -> &dyn ScheduleSlotRepository {
        &self.slots
    }

    async fn ping(&self) -> DomainResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clinic_room::{ClinicRoom, RoomType};
    use crate::domain::schedule_slot::ScheduleSlot;
    use crate::infrastructure::database::memory_db;

    #[tokio::test]
    async fn ping_succeeds_on_open_database() {
        let repos = SeaOrmRepositoryProvider::new(memory_db().await);
        assert!(repos.ping().await.is_ok());
    }

    #[tokio::test]
    async fn deleting_a_room_cascades_to_its_slots() {
        let repos = SeaOrmRepositoryProvider::new(memory_db().await);
        let room = repos
            .rooms()
            .save(ClinicRoom::new("Lab", "L-1", RoomType::Laboratory))
            .await
            .unwrap();
        let start = chrono::Utc::now();
        let slot = ScheduleSlot::new(room.id.clone(), start, start + chrono::Duration::hours(1))
            .unwrap();
        let slot = repos.slots().save(slot).await.unwrap();

        repos.rooms().delete(&room.id).await.unwrap();
        assert!(repos.slots().find_by_id(&slot.id).await.unwrap().is_none());
    }
}
