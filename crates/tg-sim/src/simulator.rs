//! Segment-by-segment drive along a route.

use chrono::NaiveDateTime;
use tracing::warn;

use tg_core::{GeoPoint, NodeId, PhaseTag, SimRng, TripClock, speed_mps};
use tg_spatial::GeoGraph;

use crate::{SimError, SimResult};

/// Inclusive bounds of the extra delay when leaving a junction, in seconds.
const JUNCTION_DELAY_SECS: (f64, f64) = (3.0, 10.0);

/// Distinct successors above which a node counts as a junction.
const JUNCTION_MIN_SUCCESSORS: usize = 2;

/// One emitted GPS fix.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryPoint {
    pub timestamp: NaiveDateTime,
    pub pos:       GeoPoint,
    pub phase:     PhaseTag,
}

/// Output of [`simulate`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationReport {
    /// Chronological points, one per traversed segment.
    pub points: Vec<TrajectoryPoint>,
    /// Segments with no edge in either direction (or an unknown endpoint).
    pub skipped_segments: usize,
    /// Segments that started at a junction and were delayed.
    pub junction_delays: usize,
}

/// Drive `route` starting at `start`.
///
/// `labels`, when given, must be index-aligned with `route`; the point for
/// segment `i → i+1` carries `labels[i + 1]`.  Without labels every point is
/// `Normal`.
///
/// Segments whose endpoints are not joined by an edge in either direction
/// are skipped with a warning and counted in
/// [`SimulationReport::skipped_segments`]; the clock does not advance for
/// them.  A route of `N` nodes yields at most `N - 1` points.
///
/// # Errors
///
/// [`SimError::LabelLengthMismatch`] if `labels` and `route` differ in length.
pub fn simulate<G: GeoGraph + ?Sized>(
    graph:  &G,
    route:  &[NodeId],
    start:  NaiveDateTime,
    labels: Option<&[PhaseTag]>,
    rng:    &mut SimRng,
) -> SimResult<SimulationReport> {
    if let Some(labels) = labels {
        if labels.len() != route.len() {
            return Err(SimError::LabelLengthMismatch { expected: route.len(), got: labels.len() });
        }
    }

    let mut clock = TripClock::new(start);
    let mut report = SimulationReport {
        points: Vec::with_capacity(route.len().saturating_sub(1)),
        ..SimulationReport::default()
    };

    for (i, pair) in route.windows(2).enumerate() {
        let (u, v) = (pair[0], pair[1]);

        let (Some(from), Some(to)) = (graph.node_coordinate(u), graph.node_coordinate(v)) else {
            warn!(%u, %v, "segment endpoint has no coordinate, skipping");
            report.skipped_segments += 1;
            continue;
        };
        let Some(edge) = graph.canonical_edge_either(u, v) else {
            warn!(%u, %v, "no edge between route nodes, skipping segment");
            report.skipped_segments += 1;
            continue;
        };

        let class = edge.road_class;
        let speed = speed_mps(class, class.is_urban(), clock.hour());
        let mut secs = from.distance_m(to) / speed;

        if graph.out_degree_distinct(u) > JUNCTION_MIN_SUCCESSORS {
            secs += rng.gen_range(JUNCTION_DELAY_SECS.0..=JUNCTION_DELAY_SECS.1);
            report.junction_delays += 1;
        }

        clock.advance_secs(secs);
        report.points.push(TrajectoryPoint {
            timestamp: clock.now(),
            pos:       to,
            phase:     labels.map_or(PhaseTag::Normal, |l| l[i + 1]),
        });
    }

    Ok(report)
}
