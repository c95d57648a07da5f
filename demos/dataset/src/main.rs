//! `dataset` — labeled GPS trajectory dataset generator.
//!
//! For each sample, picks two cities far enough apart, builds the road
//! network around them, plans the fastest route, and writes three drives:
//! the planned route, the same route with off-route detours injected, and a
//! noisy copy of the planned drive.
//!
//! Run with:
//!   cargo run -p dataset --release -- demos/dataset/dataset.json
//!
//! Log verbosity follows `RUST_LOG` (default `info`); `RUST_LOG=tg_anomaly=debug`
//! shows every rejected detour candidate.

mod cities;
mod config;
mod network;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tg_anomaly::OffRouteInjector;
use tg_core::{BoundingBox, SimRng};
use tg_output::{DatasetLayout, RouteKind};
use tg_sim::{add_gps_noise, simulate};
use tg_spatial::{GeoGraph, Weight};

use cities::City;
use config::DatasetConfig;

/// Shared, read-only state of one run.
struct Run<'a> {
    config:   &'a DatasetConfig,
    injector: OffRouteInjector,
    layout:   DatasetLayout,
    start:    NaiveDateTime,
}

/// What one sample produced.
struct SampleSummary {
    route_nodes:      usize,
    normal_points:    usize,
    off_route_points: usize,
    anomalies:        usize,
    rejections:       u32,
    skipped_segments: usize,
}

impl Run<'_> {
    fn sample(&self, index: usize, origin: &City, destination: &City, rng: &mut SimRng) -> Result<SampleSummary> {
        let bbox = BoundingBox::around(origin.pos(), destination.pos(), self.config.bbox_buffer_deg);
        let network = network::build(&self.config.network, bbox)?;

        let from = network.nearest_node(origin.pos()).context("road network is empty")?;
        let to = network.nearest_node(destination.pos()).context("road network is empty")?;
        let route = network.shortest_path(from, to, Weight::TravelTime)?;

        let normal = simulate(&network, &route, self.start, None, rng)?;
        let injected = self.injector.inject(&network, &route, rng);
        let off_route = simulate(&network, &injected.route, self.start, Some(injected.labels.as_slice()), rng)?;

        self.layout.write_route(RouteKind::Normal, index, &normal.points)?;
        self.layout.write_route(RouteKind::OffRoute, index, &off_route.points)?;
        if let Some(radius) = self.config.noise_radius_m {
            let noisy = add_gps_noise(&normal.points, radius, rng);
            self.layout.write_route(RouteKind::Noisy, index, &noisy)?;
        }

        Ok(SampleSummary {
            route_nodes:      route.len(),
            normal_points:    normal.points.len(),
            off_route_points: off_route.points.len(),
            anomalies:        injected.anomaly_count(),
            rejections:       injected.rejections.total(),
            skipped_segments: normal.skipped_segments + off_route.skipped_segments,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = DatasetConfig::load(config_path.as_deref())?;

    let cities = match &config.cities_csv {
        Some(path) => cities::load_csv(path)?,
        None => cities::built_in(),
    };
    let run = Run {
        config:   &config,
        injector: OffRouteInjector::new(config.injection.clone())?,
        layout:   DatasetLayout::create(&config.output_dir)?,
        start:    config.start_time()?,
    };

    info!(
        samples = config.samples,
        cities = cities.len(),
        output = %run.layout.root().display(),
        "generating dataset"
    );

    let t0 = Instant::now();
    let mut root_rng = SimRng::new(config.seed);
    let mut written = 0usize;

    for index in 1..=config.samples {
        let mut rng = root_rng.child(index as u64);

        let Some((origin, destination)) = cities::pick_pair(&cities, config.min_pair_distance_km, &mut rng) else {
            warn!(sample = index, "no city pair found");
            continue;
        };

        match run.sample(index, origin, destination, &mut rng) {
            Ok(s) => {
                written += 1;
                info!(
                    sample = index,
                    origin = %origin.city,
                    destination = %destination.city,
                    route_nodes = s.route_nodes,
                    normal_points = s.normal_points,
                    off_route_points = s.off_route_points,
                    anomalies = s.anomalies,
                    rejections = s.rejections,
                    skipped_segments = s.skipped_segments,
                    "sample written"
                );
            }
            Err(e) => {
                error!(
                    sample = index,
                    origin = %origin.city,
                    destination = %destination.city,
                    "sample failed: {e:#}"
                );
            }
        }
    }

    info!(
        written,
        requested = config.samples,
        elapsed_s = t0.elapsed().as_secs_f64(),
        "dataset complete"
    );
    Ok(())
}
