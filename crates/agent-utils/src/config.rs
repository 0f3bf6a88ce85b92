//! Environment-driven configuration helpers

use std::str::FromStr;
use thiserror::Error;

/// An environment variable was set but could not be parsed
#[derive(Debug, Error)]
#[error("Invalid value {value:?} for {key}: {reason}")]
pub struct EnvError {
    pub key: String,
    pub value: String,
    pub reason: String,
}

/// Read and parse `key`, returning `None` when it is unset or blank
pub fn env_parse<T>(key: &str) -> Result<Option<T>, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| EnvError {
                key: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
        _ => Ok(None),
    }
}

/// Read a boolean flag; accepts `true/false`, `1/0`, `yes/no`, `on/off`
pub fn env_flag(key: &str) -> Result<Option<bool>, EnvError> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(None);
    };

    parse_flag(&raw).map_err(|reason| EnvError {
        key: key.to_string(),
        value: raw.clone(),
        reason,
    })
}

/// Read a comma separated list such as `5,10,20`
pub fn env_list<T>(key: &str) -> Result<Option<Vec<T>>, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Ok(raw) = std::env::var(key) else {
        return Ok(None);
    };

    parse_list(&raw).map(Some).map_err(|reason| EnvError {
        key: key.to_string(),
        value: raw.clone(),
        reason,
    })
}

/// Parse a boolean flag the way [`env_flag`] does
pub fn parse_flag(raw: &str) -> Result<Option<bool>, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        other => Err(format!("expected a boolean, got {other:?}")),
    }
}

/// Parse a comma separated list, ignoring blank entries
pub fn parse_list<T>(raw: &str) -> Result<Vec<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map_err(|e: T::Err| format!("{s:?}: {e}")))
        .collect()
}
