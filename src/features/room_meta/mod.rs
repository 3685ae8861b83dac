pub mod dto;
pub mod handler;
mod helpers;
pub mod service;
pub mod writer;

pub use dto::{CapacityMap, CapacityRecord};
pub use handler::{handle_sync, handle_sync_with_source};
pub use service::{RoomMetaService, SpaceItemSource};
pub use writer::{render_capacity_map, write_capacity_map};
