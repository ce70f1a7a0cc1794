pub mod hub;

pub use hub::{GameSessionRegistry, SnapshotBroadcast, Subscription};
