use crate::dialog::application::response::validation_report::ValidationReport;

/// What a submit attempt led to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The draft has validation failures; nothing was submitted and the
    /// dialog stays open.
    Invalid(ValidationReport),
    /// Creation succeeded within the grace period.
    Created,
    /// Creation failed within the grace period. The failure was also sent as
    /// a notification.
    Failed(String),
    /// Creation is still running after the grace period; its outcome will be
    /// reported through the notification channel if it fails.
    Pending,
}

impl SubmitOutcome {
    /// Whether the dialog was closed by this submit.
    #[must_use]
    pub fn closes_dialog(&self) -> bool {
        !matches!(self, SubmitOutcome::Invalid(_))
    }
}
