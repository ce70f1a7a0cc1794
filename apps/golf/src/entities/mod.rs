pub mod game_rooms;

pub use game_rooms::Entity as GameRooms;
pub use game_rooms::Model as GameRoom;
