use std::time::Duration;

use reqwest::Client;
use reqwest::redirect::Policy;

/// No request timeout: a stalled fetch waits on the transport. System proxy
/// variables are ignored.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent("room-meta-sync/0.1")
        .no_proxy()
        .build()
}

/// The proxy hands redirects back to the browser instead of following them.
pub fn build_proxy_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .redirect(Policy::none())
        .no_proxy()
        .timeout(Duration::from_secs(30))
        .build()
}
