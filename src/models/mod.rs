pub mod gesture;
pub mod signal_record;

pub use gesture::GestureLabel;
pub use signal_record::{SignalRecord, TIMESTAMP_FORMAT};
