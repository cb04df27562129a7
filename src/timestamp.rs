//! Catalog timestamps to calendar-local time.
//!
//! The catalog stores capture instants as floating-point seconds since
//! 2001-01-01T00:00:00Z. Everything the exporter shows or writes (folder
//! dates, filenames, manifest dates) is in *local* calendar time, computed
//! with one timezone offset captured when the run starts.
//!
//! That offset is the machine's current offset, not the zone the photo was
//! taken in. A summer photo exported in winter is shifted by the DST
//! difference. The same offset is used in both directions, so the mtime
//! written to disk ([`Normalizer::to_utc`]) is always the true instant.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, Utc};
use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};

/// Seconds between the Unix epoch and the catalog epoch (2001-01-01T00:00:00Z).
pub const CATALOG_EPOCH: i64 = 978_307_200;

/// A capture instant as stored in the catalog.
///
/// Deserialization is lenient: anything other than a number reads as zero,
/// so one malformed date never fails the whole catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CaptureOffset(pub f64);

impl<'de> Deserialize<'de> for CaptureOffset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Other(IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Self(value),
            Raw::Other(_) => Self(0.0),
        })
    }
}

impl CaptureOffset {
    /// Whole seconds since the catalog epoch. Non-finite values count as zero.
    pub fn seconds(self) -> i64 {
        if self.0.is_finite() {
            self.0.trunc() as i64
        } else {
            0
        }
    }

    pub fn unix_seconds(self) -> i64 {
        CATALOG_EPOCH.saturating_add(self.seconds())
    }
}

/// Converts capture offsets using a single, run-wide timezone offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    offset: FixedOffset,
}

impl Normalizer {
    /// Capture the current local offset. Call once per run.
    pub fn capture() -> Self {
        Self {
            offset: Local::now().offset().fix(),
        }
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Normalizer that keeps times in UTC.
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Calendar-local time of a capture instant.
    pub fn local(&self, capture: CaptureOffset) -> NaiveDateTime {
        DateTime::<Utc>::from_timestamp(capture.unix_seconds(), 0)
            .unwrap_or_default()
            .with_timezone(&self.offset)
            .naive_local()
    }

    /// The UTC instant for a local time produced by [`local`](Self::local).
    pub fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        local.and_utc() - Duration::seconds(i64::from(self.offset.local_minus_utc()))
    }
}

/// `2020-03-01`
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `March 1, 2020`
pub fn friendly_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `2020-03-01 14-05-09`, the filename prefix for exported photos.
pub fn filename_stamp(local: NaiveDateTime) -> String {
    local.format("%Y-%m-%d %H-%M-%S").to_string()
}
