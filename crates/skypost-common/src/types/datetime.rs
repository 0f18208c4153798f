use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};

/// Format accepted for user-supplied timestamps: `DD/MM/YYYY hh:mm`.
pub const CUSTOM_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Error parsing a user-supplied timestamp
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("invalid date {input:?}: {source}")]
#[diagnostic(
    code(skypost::datetime::parse),
    help("use the form DD/MM/YYYY hh:mm, e.g. 25/12/2023 14:30")
)]
pub struct DatetimeError {
    input: String,
    #[source]
    source: chrono::ParseError,
}

/// A UTC timestamp, serialized as RFC 3339 with second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Datetime(DateTime<Utc>);

impl Datetime {
    /// Current time
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parse a `DD/MM/YYYY hh:mm` string, interpreted as UTC.
    pub fn parse_custom(input: &str) -> Result<Self, DatetimeError> {
        NaiveDateTime::parse_from_str(input, CUSTOM_DATE_FORMAT)
            .map(|naive| Self(naive.and_utc()))
            .map_err(|source| DatetimeError {
                input: input.to_owned(),
                source,
            })
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

impl Serialize for Datetime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Datetime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(D::Error::custom)
    }
}
