pub mod loop_worker;
pub mod supervisor;

pub use supervisor::CaptureSupervisor;
