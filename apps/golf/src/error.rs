use thiserror::Error;

use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::infra::db_errors::map_db_err;

/// Service-level error returned by rooms, game flow and bootstrap code.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db {
        detail: String,
        #[source]
        source: sea_orm::DbErr,
    },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Db { detail, .. }
            | AppError::Internal { detail, .. }
            | AppError::Config { detail } => detail.clone(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::InternalError,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Db {
            detail: detail.into(),
            source,
        }
    }

    pub fn is_stale_write(&self) -> bool {
        self.code() == ErrorCode::StaleWrite
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let code = ErrorCode::from(&err);
        match err {
            DomainError::Validation(_, detail) => AppError::Validation { code, detail },
            DomainError::Conflict(_, detail) => AppError::Conflict { code, detail },
            DomainError::NotFound(_, detail) => AppError::NotFound { code, detail },
            DomainError::Infra(_, detail) => AppError::Internal { code, detail },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e).into()
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}
