#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod ai;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod realtime;
pub mod services;
pub mod store;
pub mod telemetry;

// Re-exports for public API
pub use config::db::{db_url, DbProfile};
pub use config::rules::ruleset_from_env;
pub use error::AppError;
pub use errors::domain::DomainError;
pub use errors::ErrorCode;
pub use infra::db::{connect_and_migrate, connect_db};
pub use services::{GameFlowService, PeerClient, RoomService};
pub use store::{GameId, MemorySnapshotStore, SeaSnapshotStore, SnapshotStore, WritePolicy};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    golf_test_support::logging::init();
}
