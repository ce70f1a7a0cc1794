use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum GameRooms {
    Table,
    Id,
    Status,
    GameState,
    LockVersion,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameRooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameRooms::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(GameRooms::Status)
                            .string_len(16)
                            .not_null()
                            .default("waiting"),
                    )
                    .col(ColumnDef::new(GameRooms::GameState).json().not_null())
                    .col(
                        ColumnDef::new(GameRooms::LockVersion)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(GameRooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameRooms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lobby listing filters by status
        manager
            .create_index(
                Index::create()
                    .name("idx_game_rooms_status")
                    .table(GameRooms::Table)
                    .col(GameRooms::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_game_rooms_status")
                    .table(GameRooms::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(GameRooms::Table).to_owned())
            .await
    }
}
