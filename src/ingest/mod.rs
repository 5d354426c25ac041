/// Dashboard ingest: `coct` retrieves the page, `dashboard` extracts the
/// figures from it. Another source would get its own file here.
pub mod coct;
pub mod dashboard;

#[cfg(test)]
pub(crate) mod fixtures;
