pub mod game_flow;
pub mod peer;
pub mod rooms;

pub use game_flow::{prepare_action, ActionOutcome, GameFlowService, PreparedAction};
pub use peer::PeerClient;
pub use rooms::{normalize_player_name, RoomService};
