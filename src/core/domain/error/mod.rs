use thiserror::Error;

/// The main error type for VM creation dialog operations.
///
/// This enum represents all possible errors that can occur while
/// editing, validating and submitting a VM draft, including the
/// failures reported by external collaborators.
#[derive(Error, Debug)]
pub enum MachinesError {
    /// Represents failures reported by the VM creation collaborator
    ///
    /// # Fields
    /// * `0` - The human-readable detail returned by the collaborator
    #[error("VM creation failed: {0}")]
    Creation(String),

    /// Represents failures of the OS auto-detection collaborator
    ///
    /// # Fields
    /// * `0` - A description of why detection failed
    #[error("OS detection failed: {0}")]
    Detection(String),

    /// Represents invalid dialog configuration
    ///
    /// # Fields
    /// * `0` - A description of the configuration problem
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Represents an operation attempted on a dialog that is no longer open
    #[error("Dialog is closed")]
    DialogClosed,

    /// Represents validation failures with detailed context
    ///
    /// # Fields
    /// * `0` - The underlying validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

impl ValidationError {
    /// Returns the bare human-readable reason, without the variant prefix.
    ///
    /// This is the text shown next to the offending form section.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            ValidationError::Field { message, .. } => message,
            ValidationError::Format(message) => message,
            ValidationError::ConstraintViolation(message) => message,
        }
    }
}

/// Type alias for Results that may fail with a MachinesError
pub type MachinesResult<T> = Result<T, MachinesError>;
