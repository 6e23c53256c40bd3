use serde_json::{json, Value};

use super::error::Error;
use crate::model::Credentials;

/// Longest key identifier the firmware accepts.
pub const MAX_KEY_LEN: usize = 17;

/// Fixed register of the cumulative energy production log.
pub const LOG_KEY: u32 = 28672;

/// Nominal spacing of log points in seconds.
pub const LOG_INTERVAL_SECS: u32 = 300;

pub fn login_body(credentials: &Credentials) -> Value {
    json!({
        "right": credentials.account_type.right(),
        "pass": credentials.password,
    })
}

pub fn logout_body() -> Value {
    json!({})
}

/// Body of a `getValues` query. Every key is length-checked before any
/// network access; `destDev` stays empty, sub-device addressing is not
/// supported by this client.
pub fn values_body(keys: &[&str]) -> Result<Value, Error> {
    for (i, key) in keys.iter().enumerate() {
        if key.len() > MAX_KEY_LEN {
            return Err(Error::Validation(format!(
                "invalid key {}: {}, too long",
                i, key
            )));
        }
    }
    Ok(json!({ "keys": keys, "destDev": [] }))
}

/// Body of a `getLogger` query over `[start_time, end_time]` unix seconds.
/// Inverted ranges are rejected rather than sent to the device.
pub fn logger_body(start_time: u32, end_time: u32) -> Result<Value, Error> {
    if end_time < start_time {
        return Err(Error::Validation(format!(
            "inverted log range: tStart {} > tEnd {}",
            start_time, end_time
        )));
    }
    Ok(json!({
        "key": LOG_KEY,
        "destDev": [],
        "tStart": start_time,
        "tEnd": end_time,
    }))
}

pub fn all_values_body() -> Value {
    json!({ "destDev": [] })
}

/// Upper bound on the number of points a log query over the given range can
/// return, at one point per [`LOG_INTERVAL_SECS`], never less than one.
pub fn log_capacity(start_time: u32, end_time: u32) -> usize {
    std::cmp::max((end_time - start_time) / LOG_INTERVAL_SECS + 1, 1) as usize
}
