pub mod capture;
pub mod config;
pub mod gesture_log;
pub mod inference;
pub mod models;
pub mod scan;

pub use capture::CaptureSupervisor;
pub use config::{CaptureConfig, InferenceConfig};
pub use models::{GestureLabel, SignalRecord};
