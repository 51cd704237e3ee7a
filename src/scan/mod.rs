//! WiFi scan port and its adapters.

pub mod nmcli;
pub mod simulated;

pub use nmcli::NmcliScanner;
pub use simulated::SimulatedScanSource;

use anyhow::Result;

/// One scan result: a visible access point and its signal strength.
/// Produced fresh on every poll; never retained across poll cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkReading {
    pub ssid: String,
    pub bssid: String,
    /// Signal strength on the dBm scale (negative, stronger toward zero).
    pub rssi: i32,
}

/// Port abstracting the platform WiFi scan backend.
///
/// `poll` may return an empty list and may fail; callers treat a failure as
/// a skipped poll (capture) or an empty result (inference), never a crash.
/// Implementations block on a subprocess or radio wait, so async callers
/// drive them through `tokio::task::spawn_blocking`.
pub trait ScanSource: Send + Sync {
    fn poll(&self) -> Result<Vec<NetworkReading>>;
}
