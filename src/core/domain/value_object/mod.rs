mod install_source;
mod size;
mod unattended_password;
mod vm_name;

pub mod serde_helpers;

pub use install_source::{ACCEPTED_URL_PREFIXES, SourceType};
pub use size::{Size, SizeUnit, convert_to_unit, convert_to_unit_f64};
pub use unattended_password::{PasswordQuality, PasswordStrength, password_strength};
pub use vm_name::VmName;

// Re-export validation functions for internal use
pub(crate) use install_source::validate_source;
pub(crate) use size::validate_size;
pub(crate) use unattended_password::validate_credentials;
pub(crate) use vm_name::validate_vm_name;
