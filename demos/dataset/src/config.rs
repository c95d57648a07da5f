//! Run configuration, read from a JSON file.
//!
//! Every field is optional; an absent file or field takes the default below.
//!
//! ```json
//! {
//!   "output_dir": "dataset",
//!   "samples": 20,
//!   "seed": 42,
//!   "start_time": "2025-06-01 08:00:00",
//!   "min_pair_distance_km": 100.0,
//!   "bbox_buffer_deg": 0.2,
//!   "noise_radius_m": 10.0,
//!   "cities_csv": null,
//!   "network": { "kind": "synthetic", "spacing_deg": 0.01 },
//!   "injection": { "anomaly_start_prob": 0.1, "min_length": 5, "max_length": 50 }
//! }
//! ```
//!
//! Fields missing from a present `injection` object fall back to
//! `InjectionParams::default()`, not to the dataset defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;

use tg_anomaly::InjectionParams;
use tg_core::TIMESTAMP_FORMAT;

/// Where each sample's road network comes from.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NetworkSource {
    /// A generated street lattice covering the sample's bounding box.
    Synthetic {
        #[serde(default = "default_spacing_deg")]
        spacing_deg: f64,
    },
    /// An OSM PBF extract, clipped to the sample's bounding box.
    Pbf { path: PathBuf },
}

fn default_spacing_deg() -> f64 {
    0.01
}

impl Default for NetworkSource {
    fn default() -> Self {
        NetworkSource::Synthetic { spacing_deg: default_spacing_deg() }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub output_dir:           PathBuf,
    pub samples:              usize,
    pub seed:                 u64,
    /// Departure time of every drive, `YYYY-MM-DD HH:MM:SS`.
    pub start_time:           String,
    pub min_pair_distance_km: f64,
    /// Margin added around the origin/destination box, in degrees.
    pub bbox_buffer_deg:      f64,
    /// `None` skips the noisy copy.
    pub noise_radius_m:       Option<f64>,
    /// `city,latitude,longitude` table; `None` uses the built-in list.
    pub cities_csv:           Option<PathBuf>,
    pub network:              NetworkSource,
    pub injection:            InjectionParams,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            output_dir:           PathBuf::from("dataset"),
            samples:              20,
            seed:                 42,
            start_time:           "2025-06-01 08:00:00".to_owned(),
            min_pair_distance_km: 100.0,
            bbox_buffer_deg:      0.2,
            noise_radius_m:       Some(10.0),
            cities_csv:           None,
            network:              NetworkSource::default(),
            injection:            InjectionParams::default()
                .with_start_prob(0.1)
                .with_length(5, 50),
        }
    }
}

impl DatasetConfig {
    /// Read `path`, or return the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn start_time(&self) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.start_time, TIMESTAMP_FORMAT)
            .with_context(|| format!("start_time {:?} is not {TIMESTAMP_FORMAT}", self.start_time))
    }
}
