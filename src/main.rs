use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use airgest::capture::CaptureSupervisor;
use airgest::config::{CaptureConfig, InferenceConfig};
use airgest::inference::session;
use airgest::inference::{CentroidModel, GesturePredictor};
use airgest::models::GestureLabel;
use airgest::scan::{NmcliScanner, ScanSource, SimulatedScanSource};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let capture_config = CaptureConfig {
        data_dir: env::var("AIRGEST_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data")),
        ..CaptureConfig::default()
    };
    let inference_config = InferenceConfig::default();

    let source: Arc<dyn ScanSource> = if env::var("AIRGEST_SIMULATE").is_ok() {
        info!("using simulated scan source");
        Arc::new(SimulatedScanSource::new())
    } else {
        Arc::new(NmcliScanner::new())
    };

    // Model loading happens once at startup and is fatal to the inference
    // path only; capture keeps working without a model.
    let predictor = match env::var("AIRGEST_MODEL") {
        Ok(path) => {
            let model = CentroidModel::load(Path::new(&path))
                .context("failed to load the gesture model")?;
            Some(GesturePredictor::new(Box::new(model)))
        }
        Err(_) => {
            warn!("AIRGEST_MODEL not set; prediction disabled for this session");
            None
        }
    };

    let mut supervisor = CaptureSupervisor::new(Arc::clone(&source), capture_config);

    println!("1=swipe  2=push-pull  3=circular  s=stop  p=predict  q=quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read command")? else {
                    break;
                };
                match line.trim() {
                    "1" => start_capture(&mut supervisor, GestureLabel::Swipe).await,
                    "2" => start_capture(&mut supervisor, GestureLabel::PushPull).await,
                    "3" => start_capture(&mut supervisor, GestureLabel::Circular).await,
                    "s" => {
                        if let Err(err) = supervisor.deactivate().await {
                            error!("failed to stop capture: {err:?}");
                        }
                    }
                    "p" => match &predictor {
                        Some(predictor) => {
                            println!("collecting one window...");
                            let cancel_token = CancellationToken::new();
                            if let Some(gesture) = session::run_once(
                                Arc::clone(&source),
                                predictor,
                                &inference_config,
                                &cancel_token,
                            )
                            .await
                            {
                                println!("predicted gesture: {gesture}");
                            }
                        }
                        None => warn!("no model loaded; set AIRGEST_MODEL to enable prediction"),
                    },
                    "q" => break,
                    "" => {}
                    other => warn!("unknown command '{other}'"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received, shutting down");
                break;
            }
        }
    }

    // Cooperative shutdown: join the capture task first, then close every
    // log, so no finalize can land inside an in-flight append.
    supervisor.shutdown_all().await?;
    Ok(())
}

async fn start_capture(supervisor: &mut CaptureSupervisor, label: GestureLabel) {
    println!("capturing '{label}' gesture...");
    if let Err(err) = supervisor.activate(label).await {
        error!("failed to start '{label}' capture: {err:?}");
    }
}
