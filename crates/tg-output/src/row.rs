//! Plain data row written by output backends.

use tg_core::{PhaseTag, TIMESTAMP_FORMAT};
use tg_sim::TrajectoryPoint;

/// One trajectory file row, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryRow {
    /// `YYYY-MM-DD HH:MM:SS`
    pub timestamp:    String,
    pub latitude:     f64,
    pub longitude:    f64,
    pub anomaly_flag: PhaseTag,
}

impl From<&TrajectoryPoint> for TrajectoryRow {
    fn from(p: &TrajectoryPoint) -> Self {
        Self {
            timestamp:    p.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            latitude:     p.pos.lat,
            longitude:    p.pos.lon,
            anomaly_flag: p.phase,
        }
    }
}
