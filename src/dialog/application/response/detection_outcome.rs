use crate::core::infrastructure::os_detector::DetectedOs;

/// What an honoured OS auto-detection result did to the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionOutcome {
    /// The detected OS was selected.
    Applied(DetectedOs),
    /// Nothing usable was detected; the draft is unchanged.
    NotRecognised,
    /// The detector failed; the draft is unchanged.
    Failed(String),
}
