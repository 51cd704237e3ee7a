//! Nearest-centroid model over normalized windows, stored as JSON.
//!
//! Fitting happens offline; this loads the finished centroids once at
//! process start. A missing or malformed model file is fatal to the
//! inference path only.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::predictor::Classifier;

#[derive(Debug, Serialize, Deserialize)]
pub struct CentroidModel {
    /// One centroid per class, indexed by classifier class id.
    centroids: Vec<Vec<f64>>,
}

impl CentroidModel {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read model file {}", path.display()))?;
        let model: CentroidModel = serde_json::from_str(&contents)
            .with_context(|| format!("model file {} is not a valid centroid model", path.display()))?;
        if model.centroids.is_empty() {
            bail!("model file {} contains no centroids", path.display());
        }
        Ok(model)
    }

    pub fn from_centroids(centroids: Vec<Vec<f64>>) -> Self {
        Self { centroids }
    }
}

impl Classifier for CentroidModel {
    fn predict(&self, window: &[f64]) -> Result<usize> {
        let mut best: Option<(usize, f64)> = None;

        for (index, centroid) in self.centroids.iter().enumerate() {
            if centroid.len() != window.len() {
                bail!(
                    "centroid {index} has {} features, window has {}",
                    centroid.len(),
                    window.len()
                );
            }
            let distance = centroid
                .iter()
                .zip(window)
                .map(|(c, v)| (c - v).powi(2))
                .sum::<f64>();
            if best.map_or(true, |(_, smallest)| distance < smallest) {
                best = Some((index, distance));
            }
        }

        match best {
            Some((index, _)) => Ok(index),
            None => bail!("model has no centroids"),
        }
    }
}
