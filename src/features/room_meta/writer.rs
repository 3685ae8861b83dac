use std::fs;
use std::path::Path;

use crate::core::error::AppError;
use crate::features::room_meta::dto::CapacityMap;

pub fn render_capacity_map(map: &CapacityMap) -> Result<String, AppError> {
    serde_json::to_string_pretty(map)
        .map_err(|err| AppError::internal(format!("failed to serialise room metadata: {err}")))
}

/// Replaces whatever is at `path`. Not atomic.
pub fn write_capacity_map(path: &Path, map: &CapacityMap) -> Result<(), AppError> {
    let rendered = render_capacity_map(map)?;
    fs::write(path, rendered).map_err(|err| {
        AppError::internal(format!("failed to write {}: {err}", path.display()))
    })?;

    tracing::info!(path = %path.display(), entries = map.len(), "wrote room metadata");
    Ok(())
}
