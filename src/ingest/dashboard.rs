/// City of Cape Town water dashboard: HTML extraction.
///
/// Pulls three facts out of the dashboard page:
///   - day zero, from the first `<h3>`
///   - dam level, from the second `.percentage_label`
///   - residents meeting the consumption target, from the third
///     `.percentage_label`
///
/// Each field is extracted independently. A field that cannot be read keeps
/// its zero value and the snapshot is still returned; only an unreadable or
/// empty document is reported as an error.
///
/// The selectors and character offsets below match the page as published.
/// If the markup changes, adjust these constants rather than the parsing code.

use crate::model::{DashboardSnapshot, ExtractError, FieldError, ParseError};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use chrono_tz::Tz;
use scraper::{Html, Selector};
use std::io::Read;
use std::ops::Range;
use tracing::debug;

// ---------------------------------------------------------------------------
// Page layout
// ---------------------------------------------------------------------------

/// Heading holding the day zero date; the first match is used.
pub const DAY_ZERO_SELECTOR: &str = "h3";

/// Class shared by every percentage figure on the page, used positionally.
pub const PERCENTAGE_LABEL_SELECTOR: &str = ".percentage_label";

/// Position of the dam level among the percentage labels.
pub const DAM_LEVEL_INDEX: usize = 1;

/// Position of the residents figure among the percentage labels.
pub const RESIDENTS_INDEX: usize = 2;

/// Dam level text is cut to this many characters ("60.1%" -> "60.1").
pub const DAM_LEVEL_CHARS: usize = 4;

/// Day zero token, whitespace removed: `DD.MM.YYYY`.
const DAY_CHARS: Range<usize> = 0..2;
const MONTH_CHARS: Range<usize> = 3..5;
const YEAR_CHARS: Range<usize> = 6..10;

/// Zone the published date refers to. Digits are taken as local midnight,
/// never converted.
pub const DAY_ZERO_TZ: Tz = chrono_tz::Africa::Johannesburg;

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Parses a dashboard page into a snapshot.
///
/// The wall clock is read once, before anything else, for `timestamp`.
///
/// # Errors
/// `ExtractError` when the input cannot be read or holds no document. The
/// error carries the zero-valued snapshot with its timestamp set. Field-level
/// failures are never reported here.
pub fn extract<R: Read>(mut reader: R) -> Result<DashboardSnapshot, ExtractError> {
    let mut snapshot = DashboardSnapshot::empty(Utc::now());

    let document = match read_document(&mut reader) {
        Ok(document) => document,
        Err(source) => return Err(ExtractError { snapshot, source }),
    };

    snapshot.day_zero = best_effort("dayzero", day_zero(&document));
    snapshot.dams.level = best_effort("dams.level", dam_level(&document)).unwrap_or_default();
    snapshot.capetonians.amount =
        best_effort("capetonians.amount", residents_compliant(&document)).unwrap_or_default();

    Ok(snapshot)
}

/// Reads the whole input and parses it as HTML.
///
/// html5ever recovers from any markup, so the only document-level failures
/// are I/O errors and input with nothing but whitespace in it.
fn read_document<R: Read>(reader: &mut R) -> Result<Html, ParseError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ParseError::EmptyDocument);
    }

    Ok(Html::parse_document(&String::from_utf8_lossy(&bytes)))
}

/// Absorbs a field-level failure: logs it and yields `None` so the field
/// keeps its zero value.
fn best_effort<T>(field: &'static str, result: Result<T, FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(field, error = %e, "field not extracted, keeping zero value");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Day zero from the first `<h3>`, at midnight in Africa/Johannesburg.
/// Impossible dates (e.g. 31.02.2018) are rejected, not rolled over.
pub fn day_zero(document: &Html) -> Result<DateTime<FixedOffset>, FieldError> {
    let heading = nth_text(document, DAY_ZERO_SELECTOR, 0)?;
    let token = compact_date_token(&heading);
    let chars: Vec<char> = token.chars().collect();

    if chars.len() < YEAR_CHARS.end {
        return Err(FieldError::TextTooShort {
            text: token,
            needed: YEAR_CHARS.end,
        });
    }

    let day: u32 = parse_integer(&chars[DAY_CHARS])?;
    let month: u32 = parse_integer(&chars[MONTH_CHARS])?;
    let year: i32 = parse_integer(&chars[YEAR_CHARS])?;

    DAY_ZERO_TZ
        .with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .map(|midnight| midnight.fixed_offset())
        .ok_or(FieldError::InvalidDate {
            year,
            month,
            day,
            zone: DAY_ZERO_TZ.name(),
        })
}

/// Dam level from the first four characters of the second percentage label.
pub fn dam_level(document: &Html) -> Result<f64, FieldError> {
    let text = nth_text(document, PERCENTAGE_LABEL_SELECTOR, DAM_LEVEL_INDEX)?;
    let head: String = text.chars().take(DAM_LEVEL_CHARS).collect();

    if head.chars().count() < DAM_LEVEL_CHARS {
        return Err(FieldError::TextTooShort {
            text,
            needed: DAM_LEVEL_CHARS,
        });
    }

    parse_number(&head)
}

/// Residents percentage from the third percentage label, every `%` removed.
pub fn residents_compliant(document: &Html) -> Result<f64, FieldError> {
    let text = nth_text(document, PERCENTAGE_LABEL_SELECTOR, RESIDENTS_INDEX)?;
    parse_number(&text.replace('%', ""))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Text content of the `index`-th element matching `css`, in document order.
fn nth_text(document: &Html, css: &'static str, index: usize) -> Result<String, FieldError> {
    let selector = Selector::parse(css).map_err(|e| FieldError::Selector {
        selector: css,
        reason: e.to_string(),
    })?;

    document
        .select(&selector)
        .nth(index)
        .map(|element| element.text().collect())
        .ok_or(FieldError::MissingElement {
            selector: css,
            index,
        })
}

/// Trims the heading, then drops every remaining whitespace character:
/// `"\n 12 . 04 . 2018 \n"` -> `"12.04.2018"`.
pub(crate) fn compact_date_token(text: &str) -> String {
    text.trim().chars().filter(|c| !c.is_whitespace()).collect()
}

fn parse_integer<T>(chars: &[char]) -> Result<T, FieldError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    let text: String = chars.iter().collect();
    text.parse()
        .map_err(|source| FieldError::InvalidInteger { text, source })
}

/// Parses a percentage figure. `NaN` and `inf` parse as floats but have no
/// JSON representation, so they are rejected like any other non-number.
fn parse_number(text: &str) -> Result<f64, FieldError> {
    let value: f64 = text.parse().map_err(|source| FieldError::InvalidNumber {
        text: text.to_string(),
        source,
    })?;

    if !value.is_finite() {
        return Err(FieldError::NonFiniteNumber {
            text: text.to_string(),
        });
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
