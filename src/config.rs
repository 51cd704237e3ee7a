use std::path::PathBuf;
use std::time::Duration;

/// Tunables for the recording path.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Directory holding one `<gesture>_rssi.json` log per label.
    pub data_dir: PathBuf,

    /// Pause between scan polls; bounds CPU and I/O pressure.
    pub poll_interval: Duration,

    /// Pause after each record write so consecutive timestamps stay distinct.
    pub record_gap: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            poll_interval: Duration::from_millis(500),
            record_gap: Duration::from_millis(10),
        }
    }
}

/// Tunables for the streaming inference path.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Number of scalar readings per inference unit.
    pub window_size: usize,

    /// Span of the trailing moving average applied before standardization.
    pub smoothing_span: usize,

    /// RSSI floor substituted for missing or non-finite readings. The model
    /// was trained with this value; changing it requires retraining.
    pub sentinel_rssi: f64,

    /// Pause between polls while a window fills.
    pub poll_interval: Duration,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            window_size: 50,
            smoothing_span: 3,
            sentinel_rssi: -100.0,
            poll_interval: Duration::from_millis(20),
        }
    }
}
