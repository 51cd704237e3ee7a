use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::config::CaptureConfig;
use crate::gesture_log;
use crate::models::{GestureLabel, SignalRecord};
use crate::scan::ScanSource;

/// Background recording task: polls the scan source at a fixed cadence and
/// appends one record per visible network until cancelled.
///
/// Cancellation takes effect at the next poll boundary; the records of an
/// in-flight poll are always written out completely before the task exits.
pub async fn capture_loop(
    run_id: String,
    label: GestureLabel,
    log_path: PathBuf,
    source: Arc<dyn ScanSource>,
    config: CaptureConfig,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(config.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("capture loop {run_id} recording '{label}' to {}", log_path.display());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let readings = {
                    let source = Arc::clone(&source);
                    match tokio::task::spawn_blocking(move || source.poll()).await {
                        Ok(Ok(readings)) => readings,
                        Ok(Err(err)) => {
                            // Transient scan failure: skip this poll, keep the run alive.
                            error!("scan failed during '{label}' capture (run {run_id}): {err:?}");
                            continue;
                        }
                        Err(err) => {
                            error!("scan worker join failed (run {run_id}): {err}");
                            continue;
                        }
                    }
                };

                for reading in &readings {
                    // Timestamp sampled per record, after the previous write
                    // completed, so records stay strictly ordered in the file.
                    let record = SignalRecord::stamp(reading, label);
                    if let Err(err) = gesture_log::append(&log_path, &record) {
                        // One lost sample beats losing the rest of the run.
                        error!("dropped one '{label}' record (run {run_id}): {err:?}");
                    }
                    tokio::time::sleep(config.record_gap).await;
                }
            }
            _ = cancel_token.cancelled() => {
                info!("capture loop {run_id} shutting down");
                break;
            }
        }
    }
}
