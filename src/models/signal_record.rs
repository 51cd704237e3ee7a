//! Signal record data model.
//!
//! Represents a single persisted RSSI sample inside a gesture log.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::GestureLabel;
use crate::scan::NetworkReading;

/// Wall-clock format with sub-second precision. Fixed-width fields keep the
/// strings lexicographically ordered, which the log ordering tests rely on.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One persisted RSSI sample. Every record in a log file carries the same
/// gesture label as the file's name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalRecord {
    pub timestamp: String,
    pub ssid: String,
    pub bssid: String,
    pub rssi: i32,
    pub gesture: GestureLabel,
}

impl SignalRecord {
    /// Stamp a scan reading with the current wall clock and the active label.
    /// The timestamp is captured here, per record, so that multiple readings
    /// from one poll still serialize in strictly increasing time order.
    pub fn stamp(reading: &NetworkReading, gesture: GestureLabel) -> Self {
        Self {
            timestamp: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
            ssid: reading.ssid.clone(),
            bssid: reading.bssid.clone(),
            rssi: reading.rssi,
            gesture,
        }
    }
}
