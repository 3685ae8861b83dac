use reqwest::Client;
use serde_json::Value;

use crate::core::error::{AppError, FetchError};
use crate::core::http_client::build_http_client;
use crate::features::libcal::dto::RoomItemId;

const SPACE_ITEMS_PATH: &str = "space/items";

pub struct LibCalClient {
    base_url: String,
    token: String,
    http_client: Client,
}

impl LibCalClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, AppError> {
        let http_client = build_http_client()
            .map_err(|err| AppError::internal(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            base_url: base_url.into(),
            token: token.into(),
            http_client,
        })
    }

    pub fn space_item_url(&self, id: &RoomItemId) -> String {
        format!("{}/{SPACE_ITEMS_PATH}/{id}", self.base_url)
    }

    /// `GET {base}/space/items/{id}`, returning the decoded body untouched.
    pub async fn fetch_space_item(&self, id: &RoomItemId) -> Result<Value, FetchError> {
        let url = self.space_item_url(id);
        tracing::info!(%url, "fetching space item");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
