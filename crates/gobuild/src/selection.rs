//! Parsing of the `-platform` flag into an ordered list of catalog entries.

use thiserror::Error;

use crate::catalog::Platform;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The flag was supplied more than once.
    #[error("platform flag already set")]
    AlreadySet,

    #[error("invalid platform: {0:?}")]
    InvalidPlatform(String),
}

/// The platforms requested on the command line.
///
/// Names are kept exactly as the user typed them (minus surrounding
/// whitespace) so that report lines echo the user's spelling.
#[derive(Debug, Default)]
pub struct PlatformSelection {
    set: bool,
    entries: Vec<(String, Platform)>,
}

impl PlatformSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from every occurrence of the flag, in order.
    pub fn from_occurrences<I, S>(values: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for value in values {
            selection.set(value.as_ref())?;
        }
        Ok(selection)
    }

    /// Populate the selection from a comma-separated list.
    ///
    /// Either every token is accepted or nothing is. A blank value selects
    /// nothing but still counts as the one allowed assignment.
    pub fn set(&mut self, raw: &str) -> Result<(), SelectionError> {
        if self.set {
            return Err(SelectionError::AlreadySet);
        }

        let mut entries = Vec::new();
        if !raw.trim().is_empty() {
            for token in raw.split(',') {
                let token = token.trim();
                let platform = Platform::find(token)
                    .ok_or_else(|| SelectionError::InvalidPlatform(token.to_string()))?;
                entries.push((token.to_string(), platform));
            }
        }

        self.entries = entries;
        self.set = true;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The names as the user spelled them.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Platform)> {
        self.entries.iter().map(|(name, p)| (name.as_str(), p))
    }
}
