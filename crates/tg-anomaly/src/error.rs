//! Anomaly-injection error type.
//!
//! Rejected detour candidates are not errors; they are counted in
//! [`Rejections`](crate::Rejections).  Only invalid parameters fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnomalyError {
    #[error("min_length must be at least 1")]
    ZeroLength,

    #[error("min_length {min} exceeds max_length {max}")]
    LengthRange { min: usize, max: usize },

    #[error("anomaly_start_prob {0} is outside [0, 1]")]
    Probability(f64),

    #[error("deviation_radius {0} must be in (0, 90] degrees")]
    DeviationRadius(f64),
}

pub type AnomalyResult<T> = Result<T, AnomalyError>;
