//! Human-readable document number formatting.
//!
//! Numbers look like `PV-20260415-0001`: a type prefix, the document date,
//! and a zero-padded daily counter. Counter allocation itself is done under
//! a row lock in the database layer; this module only formats and parses.

use chrono::NaiveDate;

/// Default width of the daily counter.
pub const DEFAULT_COUNTER_WIDTH: usize = 4;

/// Formats a document number from its parts.
#[must_use]
pub fn format_document_number(prefix: &str, date: NaiveDate, counter: u32, width: usize) -> String {
    format!("{prefix}-{}-{counter:0width$}", date.format("%Y%m%d"))
}

/// Parsed parts of a document number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNumber {
    /// The type prefix, e.g. `PV` or `JV`.
    pub prefix: String,
    /// The document date encoded in the number.
    pub date: NaiveDate,
    /// The daily counter.
    pub counter: u32,
}

/// Parses a document number back into its parts.
///
/// Returns `None` for anything that does not match `PREFIX-YYYYMMDD-NNNN`.
#[must_use]
pub fn parse_document_number(s: &str) -> Option<DocumentNumber> {
    let mut parts = s.rsplitn(3, '-');
    let counter_part = parts.next()?;
    let date_part = parts.next()?;
    let prefix = parts.next()?;

    if prefix.is_empty() || counter_part.is_empty() {
        return None;
    }
    let date = NaiveDate::parse_from_str(date_part, "%Y%m%d").ok()?;
    let counter = counter_part.parse().ok()?;
    Some(DocumentNumber {
        prefix: prefix.to_string(),
        date,
        counter,
    })
}
