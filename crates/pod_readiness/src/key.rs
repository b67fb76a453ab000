use std::fmt;

use crate::ReadinessError;

/// Storage key used for writes that do not name a reporter.
pub const DEFAULT_KEY: &str = "default";

/// A validated reporter identifier.
///
/// Callers can never name [`DEFAULT_KEY`] explicitly; it is only reachable
/// through [`ReporterKey::implicit`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReporterKey(String);

impl ReporterKey {
    pub fn new(name: impl Into<String>) -> Result<Self, ReadinessError> {
        let name = name.into();
        if name == DEFAULT_KEY {
            return Err(ReadinessError::ReservedKey);
        }
        Ok(Self(name))
    }

    pub fn implicit() -> Self {
        Self(DEFAULT_KEY.to_string())
    }

    /// Resolve an optional caller-supplied name, falling back to the implicit key.
    pub fn resolve(name: Option<&str>) -> Result<Self, ReadinessError> {
        match name {
            Some(name) => Self::new(name),
            None => Ok(Self::implicit()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_implicit(&self) -> bool {
        self.0 == DEFAULT_KEY
    }
}

impl fmt::Display for ReporterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReporterKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
