use crate::core::domain::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Units of the base-2 byte ladder used by the memory and storage fields.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize,
)]
pub enum SizeUnit {
    B,
    KiB,
    MiB,
    #[default]
    GiB,
}

impl SizeUnit {
    /// All units, smallest first.
    pub const ALL: [SizeUnit; 4] = [SizeUnit::B, SizeUnit::KiB, SizeUnit::MiB, SizeUnit::GiB];

    fn exponent(self) -> u32 {
        match self {
            SizeUnit::B => 0,
            SizeUnit::KiB => 1,
            SizeUnit::MiB => 2,
            SizeUnit::GiB => 3,
        }
    }

    /// Number of bytes in one of this unit.
    #[must_use]
    pub fn bytes(self) -> u64 {
        1024u64.pow(self.exponent())
    }

    /// Short label shown next to the value.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SizeUnit::B => "B",
            SizeUnit::KiB => "KiB",
            SizeUnit::MiB => "MiB",
            SizeUnit::GiB => "GiB",
        }
    }
}

impl Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Re-expresses `value` given in `from` as a whole number of `to`.
///
/// Converting down the ladder multiplies (saturating), converting up divides
/// and floors.
#[must_use]
pub fn convert_to_unit(value: u64, from: SizeUnit, to: SizeUnit) -> u64 {
    if from >= to {
        let factor = 1024u64.pow(from.exponent() - to.exponent());
        value.saturating_mul(factor)
    } else {
        let factor = 1024u64.pow(to.exponent() - from.exponent());
        value / factor
    }
}

/// Same as [`convert_to_unit`] without flooring. Used for messages and for
/// the GiB storage figure handed to the provisioning command.
#[must_use]
pub fn convert_to_unit_f64(value: u64, from: SizeUnit, to: SizeUnit) -> f64 {
    value as f64 * from.bytes() as f64 / to.bytes() as f64
}

/// A memory or storage quantity, kept in the unit it was entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Size {
    value: u64,
    unit: SizeUnit,
}

impl Size {
    pub fn new(value: u64, unit: SizeUnit) -> Self {
        Self { value, unit }
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.value
    }

    #[must_use]
    pub fn unit(&self) -> SizeUnit {
        self.unit
    }

    /// Returns the quantity in bytes.
    #[must_use]
    pub fn as_bytes(&self) -> u64 {
        convert_to_unit(self.value, self.unit, SizeUnit::B)
    }

    /// Returns the same quantity with a new numeric value.
    #[must_use]
    pub fn with_value(self, value: u64) -> Self {
        Self { value, ..self }
    }

    /// Returns the quantity re-expressed in `unit`.
    #[must_use]
    pub fn convert_to(self, unit: SizeUnit) -> Self {
        Self {
            value: convert_to_unit(self.value, self.unit, unit),
            unit,
        }
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Validates a memory or storage size against zero and the OS minimum.
///
/// `field` is the human label used in messages ("Memory", "Storage").
pub(crate) fn validate_size(
    field: &str,
    size: Size,
    minimum_bytes: Option<u64>,
) -> Result<(), ValidationError> {
    if size.value() == 0 {
        return Err(ValidationError::Field {
            field: field.to_lowercase(),
            message: format!("{field} must not be 0"),
        });
    }
    if let Some(minimum) = minimum_bytes.filter(|m| *m > 0) {
        if size.as_bytes() < minimum {
            return Err(ValidationError::ConstraintViolation(format!(
                "The selected operating system has minimum {} requirement of {} {}",
                field.to_lowercase(),
                convert_to_unit_f64(minimum, SizeUnit::B, size.unit()),
                size.unit()
            )));
        }
    }
    Ok(())
}
