//! Scan backend that fabricates a small neighborhood of access points, for
//! development and tests on machines without a usable WiFi radio.

use anyhow::Result;
use rand::Rng;

use super::{NetworkReading, ScanSource};

pub struct SimulatedScanSource {
    networks: Vec<(String, String)>,
    base_rssi: i32,
    jitter: i32,
}

impl SimulatedScanSource {
    pub fn new() -> Self {
        Self::with_networks(
            vec![
                ("HomeNet".to_string(), "aa:bb:cc:dd:ee:01".to_string()),
                ("HomeNet-5G".to_string(), "aa:bb:cc:dd:ee:02".to_string()),
                ("Neighbor".to_string(), "11:22:33:44:55:66".to_string()),
            ],
            -55,
            10,
        )
    }

    pub fn with_networks(networks: Vec<(String, String)>, base_rssi: i32, jitter: i32) -> Self {
        Self {
            networks,
            base_rssi,
            jitter,
        }
    }
}

impl Default for SimulatedScanSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSource for SimulatedScanSource {
    fn poll(&self) -> Result<Vec<NetworkReading>> {
        let mut rng = rand::thread_rng();
        Ok(self
            .networks
            .iter()
            .map(|(ssid, bssid)| NetworkReading {
                ssid: ssid.clone(),
                bssid: bssid.clone(),
                rssi: self.base_rssi + rng.gen_range(-self.jitter..=self.jitter),
            })
            .collect())
    }
}
