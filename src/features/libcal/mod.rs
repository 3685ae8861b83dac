pub mod client;
pub mod dto;

pub use client::LibCalClient;
pub use dto::RoomItemId;
