//! Shared error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `WsnError` via `From` impls, or keep them separate and wrap `WsnError` as
//! one variant.

use thiserror::Error;

use crate::{NodeId, SensorId};

/// The top-level error type for `wsn-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum WsnError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("sensor {0} not found")]
    SensorNotFound(SensorId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `wsn-*` crates.
pub type WsnResult<T> = Result<T, WsnError>;
