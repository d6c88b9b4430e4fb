//! Create clinic_rooms table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClinicRooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClinicRooms::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClinicRooms::Name).string().not_null())
                    .col(
                        ColumnDef::new(ClinicRooms::RoomNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ClinicRooms::Floor)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ClinicRooms::RoomType)
                            .string()
                            .not_null()
                            .default("Consultation"),
                    )
                    .col(
                        ColumnDef::new(ClinicRooms::Capacity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(ClinicRooms::Equipment).json().not_null())
                    .col(
                        ColumnDef::new(ClinicRooms::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(ClinicRooms::Notes).string())
                    .col(
                        ColumnDef::new(ClinicRooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClinicRooms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_clinic_rooms_created_at")
                    .table(ClinicRooms::Table)
                    .col(ClinicRooms::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClinicRooms::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ClinicRooms {
    Table,
    Id,
    Name,
    RoomNumber,
    Floor,
    RoomType,
    Capacity,
    Equipment,
    IsActive,
    Notes,
    CreatedAt,
    UpdatedAt,
}
