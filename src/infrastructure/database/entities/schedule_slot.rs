//! Schedule slot entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schedule_slots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub room_id: String,

    #[sea_orm(nullable)]
    pub practitioner: Option<String>,

    pub start_time: DateTimeUtc,
    pub end_time: DateTimeUtc,

    /// Slot status: Available, Booked, Blocked, Cancelled
    pub status: String,

    #[sea_orm(nullable)]
    pub notes: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clinic_room::Entity",
        from = "Column::RoomId",
        to = "super::clinic_room::Column::Id"
    )]
    ClinicRoom,
}

impl Related<super::clinic_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClinicRoom.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
