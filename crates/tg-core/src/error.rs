//! Core error type.
//!
//! Sub-crates define their own error enums; `CoreError` only covers the value
//! types that live in this crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown phase tag {0:?}")]
    UnknownPhase(String),

    #[error("road class {0:?} is not drivable")]
    NotDrivable(String),

    #[error("empty highway tag")]
    EmptyHighway,

    #[error("invalid bounding box: south={south} west={west} north={north} east={east}")]
    InvalidBoundingBox {
        south: f64,
        west:  f64,
        north: f64,
        east:  f64,
    },
}

/// Shorthand result type for `tg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
