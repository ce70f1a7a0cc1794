//! SeaORM adapter for game rooms - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use crate::entities::game_rooms::{self, RoomStatus};
use crate::infra::db_errors::{game_not_found_err, optimistic_lock_err};

pub mod dto;

pub use dto::{RoomCreate, RoomOverwrite, RoomUpdate};

/// Apply an update guarded by `lock_version`, then refetch.
///
/// Bumps `lock_version` and `updated_at`, filters by id and the expected
/// version, and uses `rows_affected` to tell a missing room from a stale write.
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    expected_version: i64,
    configure_update: F,
) -> Result<game_rooms::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<game_rooms::Entity>) -> sea_orm::UpdateMany<game_rooms::Entity>,
{
    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(game_rooms::Entity::update_many())
        .col_expr(game_rooms::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            game_rooms::Column::LockVersion,
            Expr::col(game_rooms::Column::LockVersion).add(1),
        )
        .filter(game_rooms::Column::Id.eq(id))
        .filter(game_rooms::Column::LockVersion.eq(expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, id).await? {
            Some(room) => Err(optimistic_lock_err(
                expected_version.max(0) as u64,
                room.lock_version.max(0) as u64,
            )),
            None => Err(game_not_found_err(id)),
        };
    }

    require_room(conn, id).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<game_rooms::Model>, sea_orm::DbErr> {
    game_rooms::Entity::find_by_id(id).one(conn).await
}

/// Find room by id or fail with a structured not-found error.
pub async fn require_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<game_rooms::Model, sea_orm::DbErr> {
    find_by_id(conn, id)
        .await?
        .ok_or_else(|| game_not_found_err(id))
}

/// Rooms with the given status, oldest first.
pub async fn list_by_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    status: RoomStatus,
) -> Result<Vec<game_rooms::Model>, sea_orm::DbErr> {
    game_rooms::Entity::find()
        .filter(game_rooms::Column::Status.eq(status))
        .order_by_asc(game_rooms::Column::Id)
        .all(conn)
        .await
}

pub async fn create_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomCreate,
) -> Result<game_rooms::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let room = game_rooms::ActiveModel {
        id: NotSet,
        status: Set(dto.status),
        game_state: Set(dto.game_state),
        lock_version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };
    room.insert(conn).await
}

pub async fn update_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomUpdate,
) -> Result<game_rooms::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, dto.id, dto.expected_version, |update| {
        update
            .col_expr(game_rooms::Column::Status, Expr::val(dto.status).into())
            .col_expr(game_rooms::Column::GameState, Expr::val(dto.game_state).into())
    })
    .await
}

/// Last-write-wins replacement, kept for reproducing unguarded peers.
pub async fn overwrite_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomOverwrite,
) -> Result<game_rooms::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = game_rooms::Entity::update_many()
        .col_expr(game_rooms::Column::Status, Expr::val(dto.status).into())
        .col_expr(game_rooms::Column::GameState, Expr::val(dto.game_state).into())
        .col_expr(game_rooms::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            game_rooms::Column::LockVersion,
            Expr::col(game_rooms::Column::LockVersion).add(1),
        )
        .filter(game_rooms::Column::Id.eq(dto.id))
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        return Err(game_not_found_err(dto.id));
    }
    require_room(conn, dto.id).await
}
