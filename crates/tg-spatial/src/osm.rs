//! OSM PBF loader — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use tg_core::{BoundingBox, GeoPoint};
//! use tg_spatial::osm::{load_from_pbf, LoadOptions};
//!
//! let bbox = BoundingBox::around(origin, destination, 0.2);
//! let network = load_from_pbf(Path::new("turkey.osm.pbf"), &LoadOptions::clipped(bbox))?;
//! ```
//!
//! # What is loaded
//!
//! Only car-drivable `highway=*` ways are included (see
//! [`RoadClass`]'s `FromStr`).  Way nodes outside the bounding box are
//! dropped together with the segments touching them.  `oneway=yes` adds a
//! single forward edge, `oneway=-1` a single reversed edge, two-way roads add
//! both directions.  Ways are not simplified: every OSM way node becomes a
//! graph node.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use osmpbf::{Element, ElementReader};

use tg_core::{BoundingBox, GeoPoint, NodeId, RoadClass};

use crate::network::{RoadNetwork, RoadNetworkBuilder, TravelTimeProfile};
use crate::SpatialError;

/// Loader settings.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    /// Keep only nodes inside this box.  `None` loads the whole file.
    pub bbox: Option<BoundingBox>,
    /// Travel-time precomputation; see [`TravelTimeProfile`].
    pub profile: TravelTimeProfile,
}

impl LoadOptions {
    pub fn clipped(bbox: BoundingBox) -> Self {
        Self { bbox: Some(bbox), ..Self::default() }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Load a drivable road network from an OSM PBF file.
///
/// # Errors
///
/// Returns [`SpatialError::Osm`] on open or parse errors.
pub fn load_from_pbf(path: &Path, options: &LoadOptions) -> Result<RoadNetwork, SpatialError> {
    // ── Phase 1: collect in-box OSM nodes + road ways in one pass ─────────
    let reader = ElementReader::from_path(path).map_err(|e| SpatialError::Osm(e.to_string()))?;

    let inside = |p: GeoPoint| options.bbox.is_none_or(|b| b.contains(p));

    let mut all_nodes: HashMap<i64, GeoPoint> = HashMap::new();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                let p = GeoPoint::new(n.lat(), n.lon());
                if inside(p) {
                    all_nodes.insert(n.id(), p);
                }
            }
            Element::DenseNode(n) => {
                let p = GeoPoint::new(n.lat(), n.lon());
                if inside(p) {
                    all_nodes.insert(n.id(), p);
                }
            }
            Element::Way(w) => {
                let tags: Vec<(&str, &str)> = w.tags().collect();
                if let Some((class, direction)) = way_profile(&tags) {
                    let refs: Vec<i64> = w.refs().collect();
                    road_ways.push(OsmWay { refs, class, direction });
                }
            }
            _ => {}
        })
        .map_err(|e| SpatialError::Osm(e.to_string()))?;

    // ── Phase 2: identify road-referenced node IDs ────────────────────────
    let road_node_ids: HashSet<i64> = road_ways
        .iter()
        .flat_map(|w| w.refs.iter().copied())
        .filter(|id| all_nodes.contains_key(id))
        .collect();

    // ── Phase 3: build network ────────────────────────────────────────────
    let mut builder = RoadNetworkBuilder::with_capacity(
        road_node_ids.len(),
        road_node_ids.len() * 2,
    )
    .travel_time_profile(options.profile);

    // Sorted so node numbering does not depend on hash order.
    let mut ordered: Vec<i64> = road_node_ids.into_iter().collect();
    ordered.sort_unstable();

    let mut osm_to_tg: HashMap<i64, NodeId> = HashMap::with_capacity(ordered.len());
    for osm_id in ordered {
        if let Some(&pos) = all_nodes.get(&osm_id) {
            osm_to_tg.insert(osm_id, builder.add_node(pos));
        }
    }
    drop(all_nodes);

    for way in &road_ways {
        for window in way.refs.windows(2) {
            let (Some(&a), Some(&b)) = (osm_to_tg.get(&window[0]), osm_to_tg.get(&window[1])) else {
                continue;
            };
            let len_m = builder.node_pos(a).distance_m(builder.node_pos(b));
            match way.direction {
                Direction::Both => builder.add_road(a, b, len_m, way.class),
                Direction::Forward => builder.add_directed_edge(a, b, len_m, way.class),
                Direction::Backward => builder.add_directed_edge(b, a, len_m, way.class),
            }
        }
    }

    Ok(builder.build())
}

// ── Internal types ────────────────────────────────────────────────────────────

struct OsmWay {
    refs:      Vec<i64>,
    class:     RoadClass,
    direction: Direction,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Direction {
    Both,
    Forward,
    Backward,
}

/// Road class and travel direction of a way, or `None` if cars cannot use it.
///
/// List-valued `highway` tags are classified by their first element.
pub(crate) fn way_profile(tags: &[(&str, &str)]) -> Option<(RoadClass, Direction)> {
    let highway = tags.iter().find(|(k, _)| *k == "highway").map(|(_, v)| *v)?;
    let class = RoadClass::from_highway(highway).ok()?;
    Some((class, direction(RoadClass::tag_head(highway), tags)))
}

/// Car travel direction of a way.
///
/// Motorways are implicitly one-way in OSM convention.
fn direction(highway: &str, tags: &[(&str, &str)]) -> Direction {
    let oneway = tags.iter().find(|(k, _)| *k == "oneway").map(|(_, v)| *v);
    match oneway {
        Some("yes" | "1" | "true") => Direction::Forward,
        Some("-1" | "reverse") => Direction::Backward,
        Some("no" | "0" | "false") => Direction::Both,
        _ if matches!(highway, "motorway" | "motorway_link") => Direction::Forward,
        _ => Direction::Both,
    }
}
