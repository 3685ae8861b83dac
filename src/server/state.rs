use std::sync::Arc;

use reqwest::Client;

use crate::features::proxy::ProxyRules;

#[derive(Clone)]
pub struct AppState {
    pub rules: Arc<ProxyRules>,
    pub http_client: Client,
}

impl AppState {
    pub fn new(rules: ProxyRules, http_client: Client) -> Self {
        Self {
            rules: Arc::new(rules),
            http_client,
        }
    }
}
