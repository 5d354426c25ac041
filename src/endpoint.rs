/// HTTP endpoint serving dashboard snapshots
///
/// Lets reporting and notification tools pull the current figures as JSON
/// without scraping the page themselves. Every request captures a fresh
/// snapshot; nothing is cached.
///
/// Endpoints:
/// - GET /dashboard - Fresh snapshot (502 if the page could not be fetched)
/// - GET /health - Service health check

use crate::capture::Capturer;
use crate::model::{DashboardSnapshot, TransportError};
use std::io::Cursor;
use thiserror::Error;
use tiny_http::{Header, Response, Server, StatusCode};
use tracing::{error, info};

type JsonResponse = Response<Cursor<Vec<u8>>>;

#[derive(Debug, Error)]
#[error("failed to start HTTP server on {addr}: {source}")]
pub struct EndpointError {
    pub addr: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// Routes understood by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Health,
    NotFound,
}

/// Maps a request URL to a route; the query string is ignored.
pub fn route(url: &str) -> Route {
    let path = url.split('?').next().unwrap_or(url);
    match path.trim_end_matches('/') {
        "/dashboard" => Route::Dashboard,
        "/health" => Route::Health,
        _ => Route::NotFound,
    }
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start HTTP endpoint server on the specified port (blocks forever).
pub fn start_endpoint_server(port: u16, capturer: Capturer) -> Result<(), EndpointError> {
    let addr = format!("0.0.0.0:{}", port);
    let server = Server::http(&addr).map_err(|source| EndpointError {
        addr: addr.clone(),
        source,
    })?;

    info!(%addr, "snapshot endpoint listening (GET /dashboard, GET /health)");

    serve(&server, || capturer.capture());
    Ok(())
}

/// Answers requests on `server` until it shuts down, calling `capture` for
/// each /dashboard request. Requests are handled one at a time.
pub fn serve<F>(server: &Server, capture: F)
where
    F: Fn() -> Result<DashboardSnapshot, TransportError>,
{
    for request in server.incoming_requests() {
        let response = match route(request.url()) {
            Route::Dashboard => handle_dashboard(capture()),
            Route::Health => handle_health(),
            Route::NotFound => json_response(
                404,
                &serde_json::json!({
                    "error": "Not found",
                    "available_endpoints": ["/dashboard", "/health"]
                }),
            ),
        };

        if let Err(e) = request.respond(response) {
            error!(error = %e, "failed to send response");
        }
    }
}

/// Handle /health endpoint
fn handle_health() -> JsonResponse {
    json_response(
        200,
        &serde_json::json!({
            "status": "ok",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        }),
    )
}

/// Handle /dashboard endpoint
fn handle_dashboard(result: Result<DashboardSnapshot, TransportError>) -> JsonResponse {
    match result.map(|snapshot| serde_json::to_value(&snapshot)) {
        Ok(Ok(value)) => json_response(200, &value),
        Ok(Err(e)) => {
            error!(error = %e, "failed to serialize snapshot");
            json_response(500, &serde_json::json!({ "error": e.to_string() }))
        }
        Err(e) => {
            error!(error = %e, "dashboard capture failed");
            json_response(502, &serde_json::json!({ "error": e.to_string() }))
        }
    }
}

/// Create HTTP response with JSON body
fn json_response(status_code: u16, json: &serde_json::Value) -> JsonResponse {
    let body = serde_json::to_string_pretty(json).unwrap_or_else(|_| json.to_string());
    let mut response =
        Response::from_data(body.into_bytes()).with_status_code(StatusCode(status_code));

    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        response.add_header(header);
    }
    response
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
