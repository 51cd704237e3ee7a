pub mod centroid;
pub mod normalize;
pub mod predictor;
pub mod session;
pub mod window;

pub use centroid::CentroidModel;
pub use normalize::normalize;
pub use predictor::{Classifier, GesturePredictor};
pub use window::WindowBuffer;
