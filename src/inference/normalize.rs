//! Turns a raw RSSI window into the feature vector the classifier was
//! trained on: trailing moving average, z-score standardization, and
//! sentinel padding for short or degenerate streams.

use crate::config::InferenceConfig;

/// Normalize a raw window into exactly `window_size` finite scalars.
///
/// A zero-variance window (all readings identical, e.g. no networks ever
/// detected) standardizes to all zeros instead of dividing by zero. A window
/// shorter than `window_size` is right-padded with the sentinel floor after
/// standardization, matching the convention the model was trained with.
pub fn normalize(values: &[f64], config: &InferenceConfig) -> Vec<f64> {
    let smoothed = smooth(values, config.smoothing_span);

    let count = smoothed.len() as f64;
    let mean = smoothed.iter().sum::<f64>() / count;
    let variance = smoothed.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    let std = variance.sqrt();

    let mut sequence: Vec<f64> = if std == 0.0 {
        smoothed.iter().map(|v| v - mean).collect()
    } else {
        smoothed.iter().map(|v| (v - mean) / std).collect()
    };

    if sequence.len() < config.window_size {
        sequence.resize(config.window_size, config.sentinel_rssi);
    }
    for value in &mut sequence {
        if !value.is_finite() {
            *value = config.sentinel_rssi;
        }
    }
    sequence.truncate(config.window_size);
    sequence
}

/// Trailing moving average: each output point is the mean of itself and up
/// to `span - 1` preceding raw points, so the first points average over
/// fewer elements and the filter adds no lag beyond `span - 1` samples.
fn smooth(values: &[f64], span: usize) -> Vec<f64> {
    let span = span.max(1);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(span);
            let window = &values[start..=i];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> InferenceConfig {
        InferenceConfig::default()
    }

    #[test]
    fn identical_values_normalize_to_zeros() {
        let values = vec![-60.0; 50];
        let output = normalize(&values, &config());
        assert_eq!(output.len(), 50);
        for value in output {
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn short_window_is_padded_with_the_sentinel() {
        let values: Vec<f64> = (0..10).map(|i| -40.0 - f64::from(i)).collect();
        let output = normalize(&values, &config());
        assert_eq!(output.len(), 50);
        for value in &output[10..] {
            assert_eq!(*value, -100.0);
        }
        // The real prefix was standardized, not padded.
        assert!(output[..10].iter().all(|v| v.abs() < 10.0));
    }

    #[test]
    fn full_window_standardizes_to_unit_stats() {
        let values: Vec<f64> = (0..50).map(|i| -70.0 + f64::from(i % 7)).collect();
        let output = normalize(&values, &config());
        assert_eq!(output.len(), 50);

        let mean = output.iter().sum::<f64>() / 50.0;
        let variance = output.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 50.0;
        assert!(mean.abs() < 1e-9);
        assert!((variance.sqrt() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn non_finite_inputs_become_the_sentinel() {
        let mut values = vec![-55.0; 50];
        values[7] = f64::NAN;
        let output = normalize(&values, &config());
        assert_eq!(output.len(), 50);
        assert!(output.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn empty_input_yields_a_full_sentinel_window() {
        let output = normalize(&[], &config());
        assert_eq!(output, vec![-100.0; 50]);
    }

    #[test]
    fn smoothing_averages_trailing_points() {
        let smoothed = smooth(&[3.0, 6.0, 9.0, 12.0], 3);
        assert_eq!(smoothed, vec![3.0, 4.5, 6.0, 9.0]);
    }
}
