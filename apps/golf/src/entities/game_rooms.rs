use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::PhaseKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum RoomStatus {
    #[sea_orm(string_value = "waiting")]
    Waiting,
    #[sea_orm(string_value = "playing")]
    Playing,
    #[sea_orm(string_value = "finished")]
    Finished,
}

impl From<PhaseKind> for RoomStatus {
    fn from(phase: PhaseKind) -> Self {
        match phase {
            PhaseKind::Lobby => RoomStatus::Waiting,
            PhaseKind::GameOver => RoomStatus::Finished,
            PhaseKind::InitialFlip | PhaseKind::ActivePlay | PhaseKind::FinalRound => {
                RoomStatus::Playing
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub status: RoomStatus,
    #[sea_orm(column_name = "game_state", column_type = "Json")]
    pub game_state: Json,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
