//! The `TrajectoryWriter` trait implemented by backend writers.

use tg_sim::TrajectoryPoint;

use crate::{OutputResult, TrajectoryRow};

/// Sink for the points of one trajectory.
pub trait TrajectoryWriter {
    /// Append a batch of rows.
    fn write_rows(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()>;

    /// Append simulated points, formatting each as a [`TrajectoryRow`].
    fn write_points(&mut self, points: &[TrajectoryPoint]) -> OutputResult<()> {
        let rows: Vec<TrajectoryRow> = points.iter().map(TrajectoryRow::from).collect();
        self.write_rows(&rows)
    }

    /// Flush and close the underlying file handle.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
