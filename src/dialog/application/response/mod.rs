pub mod detection_outcome;
pub mod submit_outcome;
pub mod validation_report;
