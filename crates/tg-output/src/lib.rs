//! `tg-output` — persists simulated trajectories.
//!
//! Every trajectory file is a CSV table with the header
//! `timestamp,latitude,longitude,anomaly_flag`, one row per
//! [`TrajectoryPoint`](tg_sim::TrajectoryPoint).  A dataset run writes one
//! file per sample and scenario.  Samples are numbered from 1:
//!
//! ```text
//! <root>/normal_route/route_001.csv
//! <root>/off_route/route_001.csv
//! <root>/noisy_route/route_001.csv
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use tg_output::{DatasetLayout, RouteKind};
//!
//! let layout = DatasetLayout::create(Path::new("./dataset"))?;
//! layout.write_route(RouteKind::OffRoute, 7, &report.points)?;
//! ```

pub mod csv;
pub mod error;
pub mod layout;
pub mod row;
pub mod writer;


pub use self::csv::CsvTrajectoryWriter;
pub use error::{OutputError, OutputResult};
pub use layout::{DatasetLayout, RouteKind};
pub use row::TrajectoryRow;
pub use writer::TrajectoryWriter;
