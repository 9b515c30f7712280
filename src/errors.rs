//! Error types produced while editing designs or loading configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::PostId;

/// Error returned when an action names a post the design does not hold.
///
/// # Examples
///
/// ```
/// use patiox::{point, Design, DesignEditError, Engine, PostId};
///
/// let engine = Engine::default();
/// let error = engine
///     .move_post(&Design::new(), PostId(7), point(1.0, 1.0))
///     .expect_err("unknown post is rejected");
/// assert_eq!(error, DesignEditError::UnknownPost(PostId(7)));
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DesignEditError {
    /// Returned when a post cannot be found in the design.
    #[error("post {0:?} does not exist in this design")]
    UnknownPost(PostId),
}

/// Error returned when an engine configuration is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration file cannot be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Returned when the configuration is not valid JSON for the schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// Returned when the scale is zero, negative or not finite.
    #[error("feet per plan unit must be positive (received {0})")]
    NonPositiveScale(f64),
    /// Returned when the cantilever table has no entries.
    #[error("cantilever limit table is empty")]
    EmptyLimitTable,
    /// Returned when cantilever limits do not increase down the table.
    #[error("cantilever limit {current}ft follows larger limit {previous}ft")]
    UnorderedLimits {
        /// Limit of the earlier entry.
        previous: f64,
        /// Limit of the offending entry.
        current: f64,
    },
    /// Returned when a cantilever limit is negative or not finite.
    #[error("cantilever limit must be a finite, non-negative span (received {0})")]
    InvalidLimit(f64),
    /// Returned when a price or fee is negative or not finite.
    #[error("price {name} must be a finite, non-negative amount (received {value})")]
    NegativePrice {
        /// Field name in the price table.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the hit-test tolerance is negative or not finite.
    #[error("hit tolerance must be a finite, non-negative distance (received {0})")]
    InvalidHitTolerance(f64),
}
