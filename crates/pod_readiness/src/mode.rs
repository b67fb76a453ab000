use std::fmt;
use std::str::FromStr;

use crate::ReadinessError;

/// How writes are folded into the aggregate flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadinessMode {
    /// Every key keeps its own value; the aggregate is the AND of all of them.
    #[default]
    WithKeys,
    /// Writes overwrite the aggregate flag and keys are ignored.
    Direct,
}

impl FromStr for ReadinessMode {
    type Err = ReadinessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "with-keys" | "with_keys" | "keys" => Ok(Self::WithKeys),
            "direct" => Ok(Self::Direct),
            other => Err(ReadinessError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for ReadinessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WithKeys => f.write_str("with-keys"),
            Self::Direct => f.write_str("direct"),
        }
    }
}
