use crate::errors::{Error, Result};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// Comma-separated list of every variant's wire name, for error messages.
pub fn valid_csv<T>() -> String
where
    T: IntoEnumIterator + AsRef<str>,
{
    T::iter()
        .map(|v| v.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a user-typed variant name, naming the valid choices on failure.
pub fn parse_variant<T>(s: &str, what: &str) -> Result<T>
where
    T: FromStr + IntoEnumIterator + AsRef<str>,
{
    T::from_str(s.trim()).map_err(|_| {
        Error::Parse(format!(
            "Invalid {what}: '{}'. Valid values: {}",
            s.trim(),
            valid_csv::<T>()
        ))
    })
}
