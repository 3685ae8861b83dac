use std::path::PathBuf;

use crate::features::libcal::RoomItemId;

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub token: String,
    pub base_url: String,
    pub room_item_ids: Vec<RoomItemId>,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub port: u16,
    pub libcal_target: String,
    pub token_refresh_target: String,
}
