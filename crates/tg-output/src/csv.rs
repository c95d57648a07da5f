//! CSV output backend.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TrajectoryWriter;
use crate::{OutputResult, TrajectoryRow};

/// Column names, in file order.
pub const HEADER: [&str; 4] = ["timestamp", "latitude", "longitude", "anomaly_flag"];

/// Writes one trajectory to one CSV file.
pub struct CsvTrajectoryWriter {
    inner:    Writer<File>,
    finished: bool,
}

impl CsvTrajectoryWriter {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let mut inner = Writer::from_path(path)?;
        inner.write_record(HEADER)?;
        Ok(Self { inner, finished: false })
    }
}

impl TrajectoryWriter for CsvTrajectoryWriter {
    fn write_rows(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()> {
        for row in rows {
            self.inner.write_record(&[
                row.timestamp.clone(),
                row.latitude.to_string(),
                row.longitude.to_string(),
                row.anomaly_flag.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.inner.flush()?;
        Ok(())
    }
}
