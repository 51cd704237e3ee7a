use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::CaptureConfig;
use crate::gesture_log;
use crate::models::GestureLabel;
use crate::scan::ScanSource;

use super::loop_worker::capture_loop;

struct ActiveCapture {
    label: GestureLabel,
    handle: JoinHandle<()>,
    cancel_token: CancellationToken,
}

/// Owns the single permitted capture task.
///
/// Gesture sessions are serialized to match the single-operator workflow:
/// activating a new label stops the previous loop, join included, before the
/// next one starts. `deactivate` waits for the task to exit, so an append can
/// never race a later `finalize`.
pub struct CaptureSupervisor {
    source: Arc<dyn ScanSource>,
    config: CaptureConfig,
    active: Option<ActiveCapture>,
}

impl CaptureSupervisor {
    pub fn new(source: Arc<dyn ScanSource>, config: CaptureConfig) -> Self {
        Self {
            source,
            config,
            active: None,
        }
    }

    pub fn active_label(&self) -> Option<GestureLabel> {
        self.active.as_ref().map(|capture| capture.label)
    }

    /// Start recording `label`, stopping any loop for a different label
    /// first. Re-activating the label that is already running is a no-op.
    pub async fn activate(&mut self, label: GestureLabel) -> Result<()> {
        if let Some(active) = &self.active {
            if active.label == label {
                info!("capture for '{label}' already active");
                return Ok(());
            }
        }
        self.deactivate().await?;

        let path = gesture_log::log_path(&self.config.data_dir, label);
        gesture_log::initialize(&path)
            .with_context(|| format!("failed to prepare log for '{label}'"))?;

        let run_id = Uuid::new_v4().to_string();
        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(capture_loop(
            run_id,
            label,
            path,
            Arc::clone(&self.source),
            self.config.clone(),
            cancel_token.clone(),
        ));

        self.active = Some(ActiveCapture {
            label,
            handle,
            cancel_token,
        });
        Ok(())
    }

    /// Stop the active loop, if any, and wait for the task to exit.
    /// Idempotent.
    pub async fn deactivate(&mut self) -> Result<()> {
        if let Some(active) = self.active.take() {
            active.cancel_token.cancel();
            active
                .handle
                .await
                .context("capture loop task failed to join")?;
            info!("capture for '{}' stopped", active.label);
        }
        Ok(())
    }

    /// Termination path: stop the active loop, then close every recordable
    /// label's log, whether or not it was opened this run. Finalizing a
    /// never-created log is a safe no-op.
    pub async fn shutdown_all(&mut self) -> Result<()> {
        self.deactivate().await?;
        for label in GestureLabel::RECORDABLE {
            let path = gesture_log::log_path(&self.config.data_dir, label);
            gesture_log::finalize(&path)
                .with_context(|| format!("failed to finalize log for '{label}'"))?;
        }
        Ok(())
    }
}
