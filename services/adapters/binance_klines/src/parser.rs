//! Kline row parsing
//!
//! Binance returns each kline as a positional array:
//! `[open_time, open, high, low, close, volume, close_time, ...]` with the
//! price and volume fields encoded as decimal strings.

use serde_json::Value;
use strategy_shared::FetchError;
use types::Candle;

const OPEN_TIME: usize = 0;
const OPEN: usize = 1;
const HIGH: usize = 2;
const LOW: usize = 3;
const CLOSE: usize = 4;
const VOLUME: usize = 5;

/// Parse and validate a kline response body, preserving order
pub fn parse_klines(pair: &str, interval: &str, body: &Value) -> Result<Vec<Candle>, FetchError> {
    let malformed = |index: usize, message: String| FetchError::Malformed {
        pair: pair.to_string(),
        interval: interval.to_string(),
        index,
        message,
    };

    let rows = body
        .as_array()
        .ok_or_else(|| malformed(0, format!("expected array body, got {}", kind(body))))?;

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let candle = parse_row(row).map_err(|message| malformed(index, message))?;
            candle
                .validate()
                .map_err(|source| FetchError::InvalidCandle {
                    pair: pair.to_string(),
                    interval: interval.to_string(),
                    index,
                    source,
                })?;
            Ok(candle)
        })
        .collect()
}

fn parse_row(row: &Value) -> Result<Candle, String> {
    let fields = row
        .as_array()
        .ok_or_else(|| format!("expected array row, got {}", kind(row)))?;
    if fields.len() <= VOLUME {
        return Err(format!("expected at least 6 fields, got {}", fields.len()));
    }

    let open_time_ms = fields[OPEN_TIME]
        .as_i64()
        .ok_or_else(|| format!("open time is not an integer: {}", fields[OPEN_TIME]))?;

    Ok(Candle::new(
        open_time_ms,
        number(&fields[OPEN], "open")?,
        number(&fields[HIGH], "high")?,
        number(&fields[LOW], "low")?,
        number(&fields[CLOSE], "close")?,
        number(&fields[VOLUME], "volume")?,
    ))
}

/// Decimal string or bare JSON number
fn number(value: &Value, field: &str) -> Result<f64, String> {
    match value {
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|e| format!("{} {:?} is not a number: {}", field, s, e)),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("{} {} is out of range", field, n)),
        other => Err(format!("{} has unexpected type {}", field, kind(other))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
