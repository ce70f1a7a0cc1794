//! Database adapters. Functions here return `sea_orm::DbErr`; the store layer
//! maps errors to `DomainError` via `infra::db_errors`.

pub mod game_rooms_sea;
