use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_LENGTH, HOST, HeaderName};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::core::error::AppError;
use crate::server::AppState;

const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

pub async fn handle_proxy(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let path_and_query = uri
        .path_and_query()
        .map(|value| value.as_str())
        .unwrap_or("/");

    let Some((rule, upstream_url)) = state.rules.route(path_and_query) else {
        tracing::debug!(path = %path_and_query, "no proxy rule");
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    // Host is dropped so the upstream sees its own origin.
    let mut forwarded = filter_headers(&headers, &[HOST, CONTENT_LENGTH]);
    if rule.reattach_authorization {
        if let Some(authorization) = headers.get(AUTHORIZATION) {
            forwarded.insert(AUTHORIZATION, authorization.clone());
        }
    }

    tracing::info!(%method, path = %path_and_query, upstream = %upstream_url, "proxying");

    let upstream = state
        .http_client
        .request(method, &upstream_url)
        .headers(forwarded)
        .body(body)
        .send()
        .await
        .map_err(|err| AppError::upstream(format!("{upstream_url}: {err}")))?;

    let status = upstream.status();
    let response_headers = filter_headers(upstream.headers(), &[CONTENT_LENGTH]);
    let bytes = upstream
        .bytes()
        .await
        .map_err(|err| AppError::upstream(format!("failed to read upstream body: {err}")))?;

    Ok((status, response_headers, bytes).into_response())
}

fn filter_headers(headers: &HeaderMap, dropped: &[HeaderName]) -> HeaderMap {
    let mut filtered = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if HOP_BY_HOP.contains(&name.as_str()) || dropped.contains(name) {
            continue;
        }
        filtered.append(name.clone(), value.clone());
    }
    filtered
}
