//! Per-sample road network construction.
//!
//! The synthetic lattice has a street every `spacing_deg` in both directions.
//! Every 5th line is a secondary road, every 10th primary and every 50th a
//! trunk road; the rest are residential.  Edge lengths are haversine
//! distances.

use anyhow::{Result, bail};

use tg_core::{BoundingBox, GeoPoint, NodeId, RoadClass};
use tg_spatial::{RoadNetwork, RoadNetworkBuilder, TravelTimeProfile};

use crate::config::NetworkSource;

pub fn build(source: &NetworkSource, bbox: BoundingBox) -> Result<RoadNetwork> {
    match source {
        NetworkSource::Synthetic { spacing_deg } => lattice(bbox, *spacing_deg),
        NetworkSource::Pbf { path } => load_pbf(path, bbox),
    }
}

#[cfg(feature = "osm")]
fn load_pbf(path: &std::path::Path, bbox: BoundingBox) -> Result<RoadNetwork> {
    use tg_spatial::osm::{LoadOptions, load_from_pbf};
    Ok(load_from_pbf(path, &LoadOptions::clipped(bbox))?)
}

#[cfg(not(feature = "osm"))]
fn load_pbf(path: &std::path::Path, _bbox: BoundingBox) -> Result<RoadNetwork> {
    bail!("cannot read {}: built without the `osm` feature", path.display())
}

fn line_class(k: usize) -> RoadClass {
    match k {
        k if k % 50 == 0 => RoadClass::Trunk,
        k if k % 10 == 0 => RoadClass::Primary,
        k if k % 5 == 0 => RoadClass::Secondary,
        _ => RoadClass::Residential,
    }
}

fn street(b: &mut RoadNetworkBuilder, x: NodeId, y: NodeId, class: RoadClass) {
    let len = b.node_pos(x).distance_m(b.node_pos(y));
    b.add_road(x, y, len, class);
}

/// Build a street lattice covering `bbox`.
pub fn lattice(bbox: BoundingBox, spacing_deg: f64) -> Result<RoadNetwork> {
    if !spacing_deg.is_finite() || spacing_deg <= 0.0 {
        bail!("lattice spacing must be positive, got {spacing_deg}");
    }
    let rows = ((bbox.north - bbox.south) / spacing_deg).ceil() as usize + 1;
    let cols = ((bbox.east - bbox.west) / spacing_deg).ceil() as usize + 1;

    let mut b = RoadNetworkBuilder::with_capacity(rows * cols, rows * cols * 4)
        .travel_time_profile(TravelTimeProfile::default());
    let mut nodes = vec![NodeId::INVALID; rows * cols];

    for row in 0..rows {
        for col in 0..cols {
            let pos = GeoPoint::new(
                bbox.south + row as f64 * spacing_deg,
                bbox.west + col as f64 * spacing_deg,
            );
            nodes[row * cols + col] = b.add_node(pos);
        }
    }

    // East-west streets take their class from the row, north-south from the column.
    for row in 0..rows {
        for col in 0..cols - 1 {
            street(&mut b, nodes[row * cols + col], nodes[row * cols + col + 1], line_class(row));
        }
    }
    for row in 0..rows - 1 {
        for col in 0..cols {
            street(&mut b, nodes[row * cols + col], nodes[(row + 1) * cols + col], line_class(col));
        }
    }

    Ok(b.build())
}
