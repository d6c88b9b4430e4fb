//! Create schedule_slots table
//!
//! Slots reference their room and are removed with it.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_clinic_rooms::ClinicRooms;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScheduleSlots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduleSlots::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScheduleSlots::RoomId).string().not_null())
                    .col(ColumnDef::new(ScheduleSlots::Practitioner).string())
                    .col(
                        ColumnDef::new(ScheduleSlots::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduleSlots::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduleSlots::Status)
                            .string()
                            .not_null()
                            .default("Available"),
                    )
                    .col(ColumnDef::new(ScheduleSlots::Notes).string())
                    .col(
                        ColumnDef::new(ScheduleSlots::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduleSlots::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedule_slots_room")
                            .from(ScheduleSlots::Table, ScheduleSlots::RoomId)
                            .to(ClinicRooms::Table, ClinicRooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedule_slots_room")
                    .table(ScheduleSlots::Table)
                    .col(ScheduleSlots::RoomId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedule_slots_start_time")
                    .table(ScheduleSlots::Table)
                    .col(ScheduleSlots::StartTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduleSlots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ScheduleSlots {
    Table,
    Id,
    RoomId,
    Practitioner,
    StartTime,
    EndTime,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}
