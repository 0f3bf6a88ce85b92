//! Validation of raw bar records into a [`Series`]
//!
//! Records are JSON objects as returned by the market-data tool. Field names
//! may be English (any case) or the provider's Chinese column names, and
//! values may be numbers or numeric strings. A record that cannot be read is
//! never skipped: the whole parse fails with the record's index or date.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::debug;

use super::bar::{Bar, Series};
use crate::config::{IndicatorConfig, OrderPolicy};
use crate::error::{Result, StockError};

const DATE_KEYS: &[&str] = &["date", "trade_date", "日期"];
const OPEN_KEYS: &[&str] = &["open", "开盘"];
const HIGH_KEYS: &[&str] = &["high", "最高"];
const LOW_KEYS: &[&str] = &["low", "最低"];
const CLOSE_KEYS: &[&str] = &["close", "收盘"];
const VOLUME_KEYS: &[&str] = &["volume", "vol", "成交量"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Largest accepted price. Keeps rolling sums over `max_bars` values finite.
pub const MAX_PRICE: f64 = 1e12;

/// Parse a JSON payload holding an array of bar records
///
/// An object wrapping the array under `bars` or `data` is accepted too. An
/// object carrying an `error` message (what the data tool returns when the
/// provider fails) is surfaced as a provider error.
pub fn parse_json(payload: &str, config: &IndicatorConfig) -> Result<Series> {
    let value: Value = serde_json::from_str(payload)?;
    parse_value(&value, config)
}

/// Parse an already decoded JSON value; see [`parse_json`]
pub fn parse_value(value: &Value, config: &IndicatorConfig) -> Result<Series> {
    match value {
        Value::Array(records) => parse_records(records, config),
        Value::Object(obj) => {
            if let Some(Value::Array(records)) = obj.get("bars").or_else(|| obj.get("data")) {
                return parse_records(records, config);
            }
            if let Some(message) = obj.get("error") {
                let message = message
                    .as_str()
                    .map_or_else(|| message.to_string(), str::to_string);
                return Err(StockError::ProviderError(message));
            }
            Err(StockError::InvalidParameter(
                "expected a JSON array of bar records".to_string(),
            ))
        }
        _ => Err(StockError::InvalidParameter(
            "expected a JSON array of bar records".to_string(),
        )),
    }
}

/// Validate raw records into an ordered series
pub fn parse_records(records: &[Value], config: &IndicatorConfig) -> Result<Series> {
    if records.len() > config.max_bars {
        return Err(StockError::SeriesTooLarge {
            len: records.len(),
            max: config.max_bars,
        });
    }
    if records.is_empty() {
        return Err(StockError::EmptySeries);
    }

    let mut bars = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let bar = parse_bar(index, record)?;

        if config.order_policy == OrderPolicy::Strict {
            if let Some(prev) = bars.last().map(|b: &Bar| b.date) {
                if bar.date == prev {
                    return Err(StockError::DuplicateDate { date: bar.date });
                }
                if bar.date < prev {
                    return Err(StockError::UnorderedInput {
                        index,
                        date: bar.date,
                        previous: prev,
                    });
                }
            }
        }

        bars.push(bar);
    }

    if config.order_policy == OrderPolicy::Sort {
        bars.sort_by_key(|b| b.date);
        if let Some(dup) = bars.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(StockError::DuplicateDate { date: dup[0].date });
        }
    }

    debug!(
        bars = bars.len(),
        first = %bars[0].date,
        last = %bars[bars.len() - 1].date,
        "Parsed bar series"
    );

    Ok(Series::from_validated(bars))
}

fn parse_bar(index: usize, record: &Value) -> Result<Bar> {
    let Value::Object(obj) = record else {
        return Err(StockError::MalformedRecord {
            index,
            field: "record",
            reason: "is not an object".to_string(),
        });
    };

    let date = read_field(index, obj, "date", DATE_KEYS, parse_date)?;
    let open = read_field(index, obj, "open", OPEN_KEYS, parse_price)?;
    let high = read_field(index, obj, "high", HIGH_KEYS, parse_price)?;
    let low = read_field(index, obj, "low", LOW_KEYS, parse_price)?;
    let close = read_field(index, obj, "close", CLOSE_KEYS, parse_price)?;
    let volume = read_field(index, obj, "volume", VOLUME_KEYS, parse_volume)?;

    let bar = Bar {
        date,
        open,
        high,
        low,
        close,
        volume,
    };
    check_ohlc(&bar)?;
    Ok(bar)
}

fn read_field<T>(
    index: usize,
    obj: &Map<String, Value>,
    field: &'static str,
    keys: &[&str],
    parse: fn(&Value) -> std::result::Result<T, String>,
) -> Result<T> {
    let value = lookup(obj, keys).ok_or_else(|| StockError::MalformedRecord {
        index,
        field,
        reason: "is missing".to_string(),
    })?;

    parse(value).map_err(|reason| StockError::MalformedRecord {
        index,
        field,
        reason,
    })
}

/// First alias present with a non-null value; aliases are tried in order
fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| {
        obj.iter()
            .find(|(k, v)| k.trim().eq_ignore_ascii_case(key) && !v.is_null())
            .map(|(_, v)| v)
    })
}

fn check_ohlc(bar: &Bar) -> Result<()> {
    for (name, price) in [
        ("open", bar.open),
        ("high", bar.high),
        ("low", bar.low),
        ("close", bar.close),
    ] {
        if price <= 0.0 {
            return Err(StockError::InvalidOhlc {
                date: bar.date,
                reason: format!("{name} {price} is not positive"),
            });
        }
        if price > MAX_PRICE {
            return Err(StockError::InvalidOhlc {
                date: bar.date,
                reason: format!("{name} {price} exceeds the maximum price {MAX_PRICE}"),
            });
        }
    }

    let body_low = bar.open.min(bar.close);
    let body_high = bar.open.max(bar.close);
    let reason = if bar.low > bar.high {
        format!("low {} exceeds high {}", bar.low, bar.high)
    } else if bar.low > body_low {
        format!("low {} exceeds open/close {}", bar.low, body_low)
    } else if body_high > bar.high {
        format!("open/close {} exceeds high {}", body_high, bar.high)
    } else {
        return Ok(());
    };

    Err(StockError::InvalidOhlc {
        date: bar.date,
        reason,
    })
}

fn parse_date(value: &Value) -> std::result::Result<NaiveDate, String> {
    match value {
        Value::String(s) => parse_date_str(s),
        Value::Number(n) => match n.as_u64() {
            Some(compact) => parse_date_str(&compact.to_string()),
            None => Err(format!("{n} is not a date")),
        },
        other => Err(format!("must be a date string, got {other}")),
    }
}

/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYYMMDD`, and date-times whose date
/// part uses one of those forms
pub(crate) fn parse_date_str(raw: &str) -> std::result::Result<NaiveDate, String> {
    let s = raw.trim();
    if let Some(date) = parse_date_only(s) {
        return Ok(date);
    }
    if let Some((head, _)) = s.split_once(['T', ' ']) {
        if let Some(date) = parse_date_only(head) {
            return Ok(date);
        }
    }
    Err(format!("cannot parse {raw:?} as a date"))
}

fn parse_date_only(s: &str) -> Option<NaiveDate> {
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year = s[0..4].parse().ok()?;
        let month = s[4..6].parse().ok()?;
        let day = s[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn parse_price(value: &Value) -> std::result::Result<f64, String> {
    let price = match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| format!("{n} is not a number"))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("cannot parse {s:?} as a number"))?,
        other => return Err(format!("must be a number, got {other}")),
    };

    if price.is_finite() {
        Ok(price)
    } else {
        Err(format!("{price} is not a finite number"))
    }
}

fn parse_volume(value: &Value) -> std::result::Result<u64, String> {
    let raw = match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return Ok(v);
            }
            n.as_f64().ok_or_else(|| format!("{n} is not a number"))?
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(v) = s.parse::<u64>() {
                return Ok(v);
            }
            s.parse::<f64>()
                .map_err(|_| format!("cannot parse {s:?} as an integer"))?
        }
        other => return Err(format!("must be an integer, got {other}")),
    };

    if !raw.is_finite() || raw.fract() != 0.0 {
        return Err(format!("{raw} is not a whole number"));
    }
    if raw < 0.0 {
        return Err(format!("{raw} is negative"));
    }
    if raw > u64::MAX as f64 {
        return Err(format!("{raw} is out of range"));
    }
    Ok(raw as u64)
}
