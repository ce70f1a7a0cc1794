use std::env;
use std::path::PathBuf;

use crate::error::AppError;

/// Database profile enum for different environments
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    /// Production Postgres database
    Prod,
    /// Test Postgres database - enforces safety rules
    Test,
    /// Local SQLite file, created on first connect
    SqliteFile(PathBuf),
}

/// Builds a database URL from environment variables based on profile
pub fn db_url(profile: &DbProfile) -> Result<String, AppError> {
    if let DbProfile::SqliteFile(path) = profile {
        return Ok(format!("sqlite://{}?mode=rwc", path.display()));
    }
    let host = host();
    let port = port();
    let db_name = db_name(profile)?;
    let username = must_var("GOLF_DB_USER")?;
    let password = must_var("GOLF_DB_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

/// Database host (defaults to localhost)
fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Database port (defaults to 5432)
fn port() -> String {
    env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string())
}

fn db_name(profile: &DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => must_var("GOLF_DB"),
        DbProfile::Test => {
            let db_name = must_var("GOLF_TEST_DB")?;
            // Test DB must end with "_test"
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
        DbProfile::SqliteFile(_) => Err(AppError::config("SQLite profile has no database name")),
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
