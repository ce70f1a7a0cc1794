use migration::{migrate, MigrationCommand};
use sea_orm::{Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

/// Connect using the given profile. Does NOT run migrations.
pub async fn connect_db(profile: &DbProfile) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(profile)?;
    let conn = Database::connect(&database_url).await?;
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn connect_and_migrate(profile: &DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile).await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db("migration failed", e))?;
    info!(?profile, "Database ready");
    Ok(conn)
}
