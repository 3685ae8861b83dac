pub mod dto;
pub mod env_file;
pub mod loader;

pub use dto::{ProxyConfig, SyncConfig};
pub use env_file::EnvFile;
pub use loader::{
    DEFAULT_BASE_URL, DEFAULT_ENV_FILE, DEFAULT_OUTPUT_PATH, load_proxy_config, load_sync_config,
    parse_room_item_ids, proxy_config_from_env, resolve_base_url, sync_config_from_env,
};
