use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Formats tried, in order, for strings without an offset. All are read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A point in time as it arrives from the document store.
///
/// Listing documents are written by several clients, so the same field can hold
/// a backend timestamp object, epoch milliseconds, a serialized date or an
/// ISO-like string. Any other shape decodes as `Unrecognized`, which means a
/// single bad date never prevents the surrounding document from decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Moment {
    /// Backend timestamp object (`{ seconds, nanoseconds }`).
    Timestamp {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(alias = "_nanoseconds", default)]
        nanoseconds: i64,
    },
    /// Milliseconds since the Unix epoch. JSON numbers may carry a fraction.
    EpochMillis(f64),
    /// RFC 3339 string with an explicit offset.
    Instant(DateTime<Utc>),
    /// Any other string; parsed leniently on demand.
    Text(String),
    Unrecognized(serde_json::Value),
}

impl Moment {
    /// Resolve to an instant. Returns `None` for anything that is not a real date.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Moment::Timestamp { seconds, nanoseconds } => {
                let nanos = u32::try_from(*nanoseconds)
                    .ok()
                    .filter(|n| *n < 1_000_000_000)?;
                DateTime::from_timestamp(*seconds, nanos)
            }
            Moment::EpochMillis(millis) => {
                if !millis.is_finite() {
                    return None;
                }
                DateTime::from_timestamp_millis(millis.trunc() as i64)
            }
            Moment::Instant(at) => Some(*at),
            Moment::Text(text) => parse_text(text),
            Moment::Unrecognized(_) => None,
        }
    }

    /// UTC calendar day of this moment.
    pub fn to_date(&self) -> Option<NaiveDate> {
        self.to_datetime().map(|at| at.date_naive())
    }
}

impl From<DateTime<Utc>> for Moment {
    fn from(at: DateTime<Utc>) -> Self {
        Moment::Instant(at)
    }
}

impl From<NaiveDate> for Moment {
    fn from(date: NaiveDate) -> Self {
        Moment::Text(date.format("%Y-%m-%d").to_string())
    }
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
