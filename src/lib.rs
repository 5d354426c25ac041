/// dayzero_service: City of Cape Town water dashboard scraper.
///
/// # Module structure
///
/// ```text
/// dayzero_service
/// ├── model       — snapshot types (DashboardSnapshot, Project, Trend, …) and errors
/// ├── config      — project registry (projects.toml) and dashboard source settings
/// ├── capture     — fetch + extract + attach projects
/// ├── endpoint    — HTTP API serving fresh snapshots
/// └── ingest
///     ├── coct      — dashboard page retrieval (blocking GET, 30 s timeout)
///     ├── dashboard — HTML extraction: day zero, dam level, residents
///     └── fixtures (test only) — representative dashboard markup
/// ```

/// Public modules
pub mod capture;
pub mod config;
pub mod endpoint;
pub mod ingest;
pub mod model;
