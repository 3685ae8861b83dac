use std::sync::Arc;

use crate::config::SyncConfig;
use crate::core::error::AppError;
use crate::features::libcal::LibCalClient;
use crate::features::room_meta::dto::CapacityMap;
use crate::features::room_meta::service::{RoomMetaService, SpaceItemSource};
use crate::features::room_meta::writer::write_capacity_map;

pub async fn handle_sync(config: &SyncConfig) -> Result<CapacityMap, AppError> {
    let client = LibCalClient::new(config.base_url.clone(), config.token.clone())?;
    handle_sync_with_source(config, Arc::new(client)).await
}

pub async fn handle_sync_with_source(
    config: &SyncConfig,
    source: Arc<dyn SpaceItemSource>,
) -> Result<CapacityMap, AppError> {
    let service = RoomMetaService::new(source);
    let capacities = service.collect_capacities(&config.room_item_ids).await;
    write_capacity_map(&config.output_path, &capacities)?;
    Ok(capacities)
}
