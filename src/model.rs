/// Shared data types for the water dashboard snapshot and its error kinds.
///
/// The serialized field names (`dayzero`, `city`, `dams`, `capetonians`,
/// `other`, `timestamp`) are consumed by existing reporting clients and must
/// not change.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One capture of the dashboard page.
///
/// Fields that could not be extracted keep their zero value; consumers
/// cannot tell "absent from the page" apart from "genuinely zero".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Projected shut-off date, midnight in Africa/Johannesburg.
    /// `None` when the heading could not be parsed.
    #[serde(rename = "dayzero", with = "zero_time")]
    pub day_zero: Option<DateTime<FixedOffset>>,
    pub city: City,
    pub dams: Dams,
    pub capetonians: Capetonians,
    /// Static project list, attached by the caller (never scraped).
    pub other: Vec<Project>,
    /// Wall-clock time of the extraction call.
    pub timestamp: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// A snapshot with every extracted field at its zero value.
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            day_zero: None,
            city: City::default(),
            dams: Dams::default(),
            capetonians: Capetonians::default(),
            other: Vec::new(),
            timestamp,
        }
    }

    /// Attaches the static "other projects" list.
    pub fn with_projects(mut self, projects: Vec<Project>) -> Self {
        self.other = projects;
        self
    }
}

/// City-wide augmentation progress. Never populated from the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub progress: i32,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dams {
    /// Reservoir fill level, percent.
    pub level: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capetonians {
    /// Share of residents meeting the consumption target, percent.
    pub amount: f64,
    pub trend: Trend,
}

/// Week-on-week movement. `direction == true` means up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    pub amount: i32,
    pub direction: bool,
}

/// Static project record from `projects.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub description: String,
    pub percentage: u8,
    pub status: u8,
}

/// Serde adapter mapping an unset day zero to the zero instant
/// `0001-01-01T00:00:00Z`, the value existing consumers receive for it.
mod zero_time {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const ZERO: &str = "0001-01-01T00:00:00Z";

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<FixedOffset>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_str(ZERO),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let parsed = DateTime::parse_from_rfc3339(&raw).map_err(serde::de::Error::custom)?;
        let zero = DateTime::parse_from_rfc3339(ZERO).map_err(serde::de::Error::custom)?;
        if parsed == zero {
            Ok(None)
        } else {
            Ok(Some(parsed))
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Network-level failure while fetching the dashboard page.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("reading response body from {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    /// True when the request ran into the client timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Client(e) => e.is_timeout(),
            TransportError::Request { source, .. } | TransportError::Body { source, .. } => {
                source.is_timeout()
            }
        }
    }
}

/// The input could not be turned into an HTML document at all.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read document: {0}")]
    Read(#[from] std::io::Error),

    #[error("document is empty")]
    EmptyDocument,
}

/// Document-level failure, carrying the zero-valued snapshot so the
/// caller still gets its timestamp.
#[derive(Debug, Error)]
#[error("dashboard document could not be parsed: {source}")]
pub struct ExtractError {
    pub snapshot: DashboardSnapshot,
    #[source]
    pub source: ParseError,
}

impl ExtractError {
    pub fn into_snapshot(self) -> DashboardSnapshot {
        self.snapshot
    }
}

/// Failure of a single field extraction. Never returned from `extract`;
/// the field keeps its zero value instead.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("invalid selector {selector:?}: {reason}")]
    Selector {
        selector: &'static str,
        reason: String,
    },

    #[error("no element #{index} matching {selector:?}")]
    MissingElement {
        selector: &'static str,
        index: usize,
    },

    #[error("text {text:?} is shorter than {needed} characters")]
    TextTooShort { text: String, needed: usize },

    #[error("{text:?} is not an integer: {source}")]
    InvalidInteger {
        text: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{text:?} is not a number: {source}")]
    InvalidNumber {
        text: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("{text:?} is not a finite number")]
    NonFiniteNumber { text: String },

    #[error("{year:04}-{month:02}-{day:02} is not a valid date in {zone}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        zone: &'static str,
    },
}
