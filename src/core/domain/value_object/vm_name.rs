use crate::core::domain::error::ValidationError;

/// A VM name as stored in the draft: whitespace already replaced by `_`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VmName(String);

impl VmName {
    /// Normalizes raw user input into a name.
    pub fn normalize(raw: &str) -> Self {
        Self(
            raw.chars()
                .map(|c| if c.is_whitespace() { '_' } else { c })
                .collect(),
        )
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the object and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Validates a name against emptiness and the names already in use in the
/// active connection scope. The comparison is case-sensitive.
pub(crate) fn validate_vm_name(name: &str, existing: &[String]) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Field {
            field: "name".to_string(),
            message: "Name must not be empty".to_string(),
        });
    }
    if existing.iter().any(|taken| taken == name) {
        return Err(ValidationError::ConstraintViolation(format!(
            "VM {name} already exists"
        )));
    }
    Ok(())
}
