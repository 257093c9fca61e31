use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// Form sections a validation failure is shown next to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormSection {
    Name,
    Os,
    Source,
    Memory,
    Storage,
    Password,
}

impl FormSection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FormSection::Name => "name",
            FormSection::Os => "os",
            FormSection::Source => "source",
            FormSection::Memory => "memory",
            FormSection::Storage => "storage",
            FormSection::Password => "password",
        }
    }
}

impl Display for FormSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reason per form section. Empty means the draft can be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport(BTreeMap<FormSection, String>);

impl ValidationReport {
    pub(crate) fn insert(&mut self, section: FormSection, reason: impl Into<String>) {
        self.0.insert(section, reason.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The failure reason of a section, if it failed.
    #[must_use]
    pub fn get(&self, section: FormSection) -> Option<&str> {
        self.0.get(&section).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, section: FormSection) -> bool {
        self.0.contains_key(&section)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormSection, &str)> {
        self.0.iter().map(|(section, reason)| (*section, reason.as_str()))
    }
}
