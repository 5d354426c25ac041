/// City of Cape Town water dashboard: page retrieval.
///
/// One blocking GET per call, bounded by a total request timeout. The body
/// is read to the end before returning; the response (and its connection)
/// is released when it goes out of scope on every path.
///
/// Page: http://coct.co/water-dashboard/

use crate::config::SourceConfig;
use crate::model::TransportError;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DASHBOARD_URL: &str = "http://coct.co/water-dashboard/";

/// Total time allowed for connect, request and body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the blocking client used for dashboard requests.
pub fn build_client(timeout: Duration) -> Result<Client, TransportError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(TransportError::Client)
}

/// Fetches the dashboard page from the fixed URL with the default timeout.
pub fn fetch() -> Result<Vec<u8>, TransportError> {
    fetch_with(&SourceConfig::default())
}

/// Fetches the dashboard page using the URL and timeout in `source`.
pub fn fetch_with(source: &SourceConfig) -> Result<Vec<u8>, TransportError> {
    let client = build_client(source.timeout)?;
    fetch_from(&client, &source.url)
}

/// Performs the GET and drains the body.
///
/// The status code is not interpreted: a non-success response is logged and
/// its body returned like any other, leaving it to the extractor to find
/// nothing usable in it.
///
/// # Errors
/// `TransportError` on timeout, connection failure, or a failure while
/// reading the body.
pub fn fetch_from(client: &Client, url: &str) -> Result<Vec<u8>, TransportError> {
    info!(url, "fetching water dashboard");

    let response = client.get(url).send().map_err(|source| TransportError::Request {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        warn!(url, %status, "water dashboard returned non-success status");
    }

    let body = response.bytes().map_err(|source| TransportError::Body {
        url: url.to_string(),
        source,
    })?;

    debug!(url, bytes = body.len(), "water dashboard body received");
    Ok(body.to_vec())
}
