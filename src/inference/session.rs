//! Online inference: poll the scan source, collapse each poll to one scalar,
//! fill a window, then normalize and predict exactly once.

use std::sync::Arc;

use log::{error, info};
use tokio_util::sync::CancellationToken;

use crate::config::InferenceConfig;
use crate::inference::normalize::normalize;
use crate::inference::predictor::GesturePredictor;
use crate::inference::window::WindowBuffer;
use crate::models::GestureLabel;
use crate::scan::{NetworkReading, ScanSource};

/// Collect one full window from the live stream and classify it.
///
/// Everything runs sequentially on one task; the only suspension points are
/// the inter-poll sleep and the blocking scan handoff, so a cancellation is
/// honored between polls. Returns `None` when cancelled before the window
/// fills.
pub async fn run_once(
    source: Arc<dyn ScanSource>,
    predictor: &GesturePredictor,
    config: &InferenceConfig,
    cancel_token: &CancellationToken,
) -> Option<GestureLabel> {
    let mut window = WindowBuffer::new(config.window_size);

    while !window.is_ready() {
        let readings = {
            let source = Arc::clone(&source);
            match tokio::task::spawn_blocking(move || source.poll()).await {
                Ok(Ok(readings)) => readings,
                Ok(Err(err)) => {
                    // A failed poll reads as an empty neighborhood.
                    error!("scan failed during inference: {err:?}");
                    Vec::new()
                }
                Err(err) => {
                    error!("scan worker join failed: {err}");
                    Vec::new()
                }
            }
        };
        window.push(poll_level(&readings, config.sentinel_rssi));

        tokio::select! {
            _ = tokio::time::sleep(config.poll_interval) => {}
            _ = cancel_token.cancelled() => {
                info!("inference pass cancelled at {}/{} samples", window.len(), config.window_size);
                return None;
            }
        }
    }

    let features = normalize(window.values(), config);
    Some(predictor.predict(&features))
}

/// Mean RSSI across one poll; an empty poll reads as the sentinel floor.
fn poll_level(readings: &[NetworkReading], sentinel: f64) -> f64 {
    if readings.is_empty() {
        return sentinel;
    }
    readings.iter().map(|r| f64::from(r.rssi)).sum::<f64>() / readings.len() as f64
}
