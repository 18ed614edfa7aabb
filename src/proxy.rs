use axum::body::to_bytes;
use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::handlers::api::AppState;
use crate::models::slots::ErrorResponse;

// Request headers copied through to the upstream calendar server. WebDAV
// verbs carry their semantics in these headers, so the list covers the
// locking/addressing set alongside plain content negotiation.
const REQUEST_HEADER_ALLOWLIST: &[&str] = &[
    "content-type",
    "depth",
    "destination",
    "if",
    "if-match",
    "if-none-match",
    "overwrite",
    "prefer",
];

// Response headers passed back to the caller
const RESPONSE_HEADER_ALLOWLIST: &[&str] =
    &["content-type", "dav", "etag", "allow", "preference-applied"];

// Largest request body the proxy will buffer
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Generic reverse proxy for the upstream CalDAV endpoint.
///
/// Forwarding is a declarative rule: target base URL plus request/response
/// header allow-lists. The proxy injects service credentials, forwards any
/// method verbatim (PROPFIND, REPORT, MKCALENDAR included) and passes the
/// upstream status and body through unchanged. It performs no calendar
/// logic of its own.
pub struct CalDavProxy {
    client: reqwest::Client,
    target_base: String,
    service_key: String,
}

impl CalDavProxy {
    /// Build the proxy from configuration. Returns `None` when the endpoint
    /// or credential is missing; callers then fail closed with a 500 and
    /// never attempt an outbound call.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        let target_base = config.caldav_endpoint.clone()?;
        let service_key = config.service_key.clone()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .ok()?;

        Some(Self {
            client,
            target_base: target_base.trim_end_matches('/').to_string(),
            service_key,
        })
    }

    pub async fn forward(&self, path: &str, req: Request) -> Result<Response, String> {
        let (parts, body) = req.into_parts();

        let body_bytes = to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(|e| format!("failed to read request body: {}", e))?;

        let query = parts
            .uri
            .query()
            .map(|q| format!("?{}", q))
            .unwrap_or_default();
        let url = format!("{}/{}{}", self.target_base, path, query);

        debug!("Forwarding {} {} to upstream", parts.method, url);

        let mut request = self
            .client
            .request(parts.method.clone(), &url)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
            .body(body_bytes.to_vec());

        for name in REQUEST_HEADER_ALLOWLIST {
            if let Some(value) = parts.headers.get(*name) {
                request = request.header(*name, value.clone());
            }
        }

        let upstream = request
            .send()
            .await
            .map_err(|e| format!("upstream request failed: {}", e))?;

        let status =
            StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);

        let mut headers = HeaderMap::new();
        for name in RESPONSE_HEADER_ALLOWLIST {
            if let Some(value) = upstream.headers().get(*name) {
                headers.insert(HeaderName::from_static(*name), value.clone());
            }
        }

        let bytes = upstream
            .bytes()
            .await
            .map_err(|e| format!("failed to read upstream body: {}", e))?;

        info!("Upstream responded with status {}", status);

        Ok((status, headers, bytes).into_response())
    }
}

// CalDAV passthrough handler for any method under /caldav/
pub async fn caldav_proxy(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    req: Request,
) -> Response {
    let Some(proxy) = &state.caldav else {
        error!("CalDAV request received but proxy is not configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "CalDAV proxy is not configured".to_string(),
            }),
        )
            .into_response();
    };

    match proxy.forward(&path, req).await {
        Ok(response) => response,
        Err(e) => {
            error!("CalDAV proxy error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: e }),
            )
                .into_response()
        }
    }
}
