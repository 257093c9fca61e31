use crate::core::domain::error::ValidationError;
use zxcvbn::{Score, zxcvbn};

/// Coarse strength rating shown next to the unattended-install passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Acceptable,
    Good,
    Excellent,
}

/// Strength rating plus the estimator's warning, if it has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordQuality {
    pub strength: PasswordStrength,
    pub warning: Option<String>,
}

/// Rates a password. Returns `None` for an empty password.
///
/// This is a hint only, it never blocks submission.
pub fn password_strength(password: &str) -> Option<PasswordQuality> {
    if password.is_empty() {
        return None;
    }
    let entropy = zxcvbn(password, &[]);
    let score = entropy.score();
    let strength = if score >= Score::Four {
        PasswordStrength::Excellent
    } else if score >= Score::Three {
        PasswordStrength::Good
    } else if score >= Score::Two {
        PasswordStrength::Acceptable
    } else {
        PasswordStrength::Weak
    };
    let warning = entropy
        .feedback()
        .and_then(|feedback| feedback.warning())
        .map(|warning| warning.to_string());
    Some(PasswordQuality { strength, warning })
}

/// Validates that an unattended installation has at least one usable
/// credential.
///
/// When the console runs as root, only a root password counts.
pub(crate) fn validate_credentials(
    unattended: bool,
    root_password: Option<&str>,
    user_password: Option<&str>,
    current_user_is_root: bool,
) -> Result<(), ValidationError> {
    let is_set = |password: Option<&str>| password.is_some_and(|p| !p.is_empty());
    if !unattended || is_set(root_password) {
        return Ok(());
    }
    if current_user_is_root {
        return Err(ValidationError::Field {
            field: "password".to_string(),
            message: "Root password must be set".to_string(),
        });
    }
    if !is_set(user_password) {
        return Err(ValidationError::Field {
            field: "password".to_string(),
            message: "Root or user password must be set".to_string(),
        });
    }
    Ok(())
}
