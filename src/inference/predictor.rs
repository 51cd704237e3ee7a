use anyhow::Result;
use log::warn;

use crate::models::GestureLabel;

/// Port for the pre-trained gesture model. Implementations receive the
/// normalized window as one flat sample and return a raw class index.
pub trait Classifier: Send + Sync {
    fn predict(&self, window: &[f64]) -> Result<usize>;
}

/// Maps raw classifier output onto gesture labels, absorbing model failures.
pub struct GesturePredictor {
    classifier: Box<dyn Classifier>,
}

impl GesturePredictor {
    pub fn new(classifier: Box<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Classify one normalized window. A failed prediction is downgraded to
    /// `Unidentified` with a warning; one bad window must not take down a
    /// continuously running session.
    pub fn predict(&self, window: &[f64]) -> GestureLabel {
        match self.classifier.predict(window) {
            Ok(index) => GestureLabel::from_class_index(index),
            Err(err) => {
                warn!("prediction failed: {err:?}");
                GestureLabel::Unidentified
            }
        }
    }
}
