use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::core::error::FetchError;
use crate::features::libcal::{LibCalClient, RoomItemId};
use crate::features::room_meta::dto::{CapacityMap, CapacityRecord};
use crate::features::room_meta::helpers::{CapacityLookup, lookup_capacity, normalise_item};

#[async_trait]
pub trait SpaceItemSource: Send + Sync {
    async fn fetch_space_item(&self, id: &RoomItemId) -> Result<Value, FetchError>;
}

#[async_trait]
impl SpaceItemSource for LibCalClient {
    async fn fetch_space_item(&self, id: &RoomItemId) -> Result<Value, FetchError> {
        LibCalClient::fetch_space_item(self, id).await
    }
}

pub struct RoomMetaService {
    source: Arc<dyn SpaceItemSource>,
}

impl RoomMetaService {
    pub fn new(source: Arc<dyn SpaceItemSource>) -> Self {
        Self { source }
    }

    /// Fetches every id in order, one request at a time. Failures are logged
    /// and leave the id out of the result; nothing here aborts the run.
    pub async fn collect_capacities(&self, ids: &[RoomItemId]) -> CapacityMap {
        let mut outcomes = Vec::with_capacity(ids.len());
        for id in ids {
            outcomes.push(self.fetch_capacity(id).await);
        }

        outcomes.into_iter().flatten().collect()
    }

    pub async fn fetch_capacity(&self, id: &RoomItemId) -> Option<CapacityRecord> {
        let body = match self.source.fetch_space_item(id).await {
            Ok(body) => body,
            Err(FetchError::Status(status)) => {
                warn!(room_item_id = %id, status, "failed to fetch space item");
                return None;
            }
            Err(err) => {
                warn!(room_item_id = %id, error = %err, "error fetching space item");
                return None;
            }
        };

        let item = normalise_item(body);
        match lookup_capacity(item.as_ref()) {
            CapacityLookup::Found(capacity) => {
                info!(room_item_id = %id, %capacity, "got capacity");
                Some(CapacityRecord {
                    room_item_id: id.clone(),
                    capacity,
                })
            }
            CapacityLookup::Missing => {
                warn!(room_item_id = %id, "no capacity found");
                None
            }
            CapacityLookup::Invalid(raw) => {
                warn!(room_item_id = %id, capacity = %raw, "capacity is not a number");
                None
            }
        }
    }
}
