//! Argument checks shared by the gateway handlers.
//!
//! Everything here runs before a request is built, so a failing check never
//! reaches the network.

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;

use crate::infrastructure::alpaca::AlpacaError;

type Result<T> = std::result::Result<T, AlpacaError>;

/// Trim and reject empty strings.
pub fn non_empty(field: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AlpacaError::invalid(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Normalize a ticker: trimmed and upper-cased.
pub fn symbol(raw: &str) -> Result<String> {
    non_empty("symbol", raw).map(|s| s.to_uppercase())
}

/// Normalize a non-empty list of tickers.
pub fn symbols(raw: &[String]) -> Result<Vec<String>> {
    if raw.is_empty() {
        return Err(AlpacaError::invalid("symbols must contain at least one symbol"));
    }
    raw.iter().map(|s| symbol(s)).collect()
}

/// Non-empty list of identifiers sent verbatim (option contracts, ids).
pub fn identifiers(field: &str, raw: &[String]) -> Result<Vec<String>> {
    if raw.is_empty() {
        return Err(AlpacaError::invalid(format!(
            "{field} must contain at least one entry"
        )));
    }
    raw.iter().map(|s| non_empty(field, s)).collect()
}

/// Parse a `YYYY-MM-DD` date.
pub fn date(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        AlpacaError::invalid(format!("{field} must be a YYYY-MM-DD date, got '{raw}'"))
    })
}

/// Validate an optional `YYYY-MM-DD` date, returning the normalized form.
pub fn date_opt(field: &str, raw: Option<&str>) -> Result<Option<String>> {
    raw.map(|r| date(field, r).map(|d| d.to_string()))
        .transpose()
}

/// Validate an ordered `start..=end` date range.
pub fn date_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate)> {
    let start = date("start", start)?;
    let end = date("end", end)?;
    if start > end {
        return Err(AlpacaError::invalid(format!(
            "start ({start}) must not be after end ({end})"
        )));
    }
    Ok((start, end))
}

/// Reject zero and negative amounts.
pub fn positive(field: &str, value: Decimal) -> Result<Decimal> {
    if value <= Decimal::ZERO {
        return Err(AlpacaError::invalid(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(value)
}

/// Validate an optional positive amount.
pub fn positive_opt(field: &str, value: Option<Decimal>) -> Result<Option<Decimal>> {
    value.map(|v| positive(field, v)).transpose()
}

/// Validate an Alpaca bar timeframe such as `1Min`, `15Min`, `1Hour`, `1Day`.
pub fn timeframe(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (amount, unit) = trimmed.split_at(split);

    let invalid = || {
        AlpacaError::invalid(format!(
            "timeframe must look like 1Min, 5Min, 1Hour, 1Day, 1Week or 1Month, got '{raw}'"
        ))
    };

    let amount: u32 = amount.parse().map_err(|_| invalid())?;
    let max = match unit {
        "Min" | "T" => 59,
        "Hour" | "H" => 23,
        "Day" | "D" | "Week" | "W" => 1,
        "Month" | "M" => 12,
        _ => return Err(invalid()),
    };
    if amount == 0 || amount > max {
        return Err(invalid());
    }
    Ok(trimmed.to_string())
}

/// RFC 3339 timestamp `days` before `now`.
pub fn lookback_start(now: DateTime<Utc>, days: u32) -> Result<String> {
    Duration::try_days(i64::from(days))
        .and_then(|span| now.checked_sub_signed(span))
        .map(|start| start.to_rfc3339_opts(SecondsFormat::Secs, true))
        .ok_or_else(|| AlpacaError::invalid(format!("days out of range: {days}")))
}
