use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

const DATE_FORMAT: &str = "%Y-%m-%d";
const SQLITE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

// ---------------------------------------------------------------------------
// Updated: calendar date of a ranking observation
// ---------------------------------------------------------------------------

/// Date a position was last observed. Always serialized as `YYYY-MM-DD`.
///
/// Parsing accepts a bare date, an RFC3339 timestamp, or SQLite's
/// `YYYY-MM-DD HH:MM:SS` form. Any time-of-day is discarded; timestamps keep
/// the calendar date in their own offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Updated(pub NaiveDate);

#[derive(Debug, thiserror::Error)]
#[error("Invalid updated date '{0}'")]
pub struct InvalidUpdated(pub String);

impl Updated {
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for Updated {
    type Err = InvalidUpdated;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
            return Ok(Updated(date));
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
            return Ok(Updated(ts.date_naive()));
        }
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, SQLITE_DATETIME_FORMAT) {
            return Ok(Updated(ts.date()));
        }

        Err(InvalidUpdated(s.to_string()))
    }
}

impl fmt::Display for Updated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for Updated {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Updated {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// One keyword ranking observation for a domain.
///
/// The domain itself is the query filter and is not carried on the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub keyword: String,
    pub position: u64,
    pub url: String,
    pub volume: u64,
    pub results: u64,
    pub cpc: f64,
    pub updated: Updated,
}

impl<'r> FromRow<'r, SqliteRow> for Position {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let updated: String = row.try_get("updated")?;
        let updated = updated.parse::<Updated>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "updated".into(),
            source: Box::new(e),
        })?;

        Ok(Position {
            keyword: row.try_get("keyword")?,
            position: unsigned_column(row, "position")?,
            url: row.try_get("url")?,
            volume: unsigned_column(row, "volume")?,
            results: unsigned_column(row, "results")?,
            cpc: row.try_get("cpc")?,
            updated,
        })
    }
}

/// SQLite only has signed integers; negative values are rejected.
fn unsigned_column(row: &SqliteRow, column: &str) -> Result<u64, sqlx::Error> {
    let value: i64 = row.try_get(column)?;
    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.into(),
        source: Box::new(e),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
