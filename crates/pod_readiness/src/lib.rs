//! Process-local readiness aggregation.
//!
//! A [`ReadinessStore`] collects boolean readiness reports from independent
//! reporters and derives a single aggregate flag from them. The HTTP surface
//! lives in the `pod_readiness_http` crate; this crate has no I/O.

use thiserror::Error;

pub mod key;
pub mod mode;
pub mod store;

pub use key::{DEFAULT_KEY, ReporterKey};
pub use mode::ReadinessMode;
pub use store::{ReadinessSnapshot, ReadinessStore, Reporter};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadinessError {
    #[error("reporter key must not be '{}'", DEFAULT_KEY)]
    ReservedKey,
    #[error("unknown readiness mode: {0}")]
    InvalidMode(String),
}
