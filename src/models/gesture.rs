//! Gesture label enumeration and the classifier class-index mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hand-motion categories known to the system.
///
/// `Unidentified` is the fallback for out-of-range class indices and failed
/// predictions; it is never recorded to a capture log.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum GestureLabel {
    Swipe,
    PushPull,
    Circular,
    Unidentified,
}

impl GestureLabel {
    /// Labels a capture session can record, ordered by classifier class index.
    pub const RECORDABLE: [GestureLabel; 3] = [
        GestureLabel::Swipe,
        GestureLabel::PushPull,
        GestureLabel::Circular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::Swipe => "swipe",
            GestureLabel::PushPull => "push-pull",
            GestureLabel::Circular => "circular",
            GestureLabel::Unidentified => "unidentified",
        }
    }

    /// Map a raw classifier class index onto a label. Indices past the last
    /// recordable gesture fall back to `Unidentified`.
    pub fn from_class_index(index: usize) -> Self {
        Self::RECORDABLE
            .get(index)
            .copied()
            .unwrap_or(GestureLabel::Unidentified)
    }

    /// File name of this label's capture log.
    pub fn log_file_name(&self) -> String {
        format!("{}_rssi.json", self.as_str())
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_class_indices_in_order() {
        assert_eq!(GestureLabel::from_class_index(0), GestureLabel::Swipe);
        assert_eq!(GestureLabel::from_class_index(1), GestureLabel::PushPull);
        assert_eq!(GestureLabel::from_class_index(2), GestureLabel::Circular);
    }

    #[test]
    fn out_of_range_indices_are_unidentified() {
        assert_eq!(GestureLabel::from_class_index(3), GestureLabel::Unidentified);
        assert_eq!(GestureLabel::from_class_index(42), GestureLabel::Unidentified);
    }

    #[test]
    fn serializes_as_kebab_case() {
        let json = serde_json::to_string(&GestureLabel::PushPull).expect("label should serialize");
        assert_eq!(json, "\"push-pull\"");

        let parsed: GestureLabel =
            serde_json::from_str("\"circular\"").expect("label should deserialize");
        assert_eq!(parsed, GestureLabel::Circular);
    }

    #[test]
    fn log_file_names_are_deterministic() {
        assert_eq!(GestureLabel::Swipe.log_file_name(), "swipe_rssi.json");
        assert_eq!(GestureLabel::PushPull.log_file_name(), "push-pull_rssi.json");
    }
}
