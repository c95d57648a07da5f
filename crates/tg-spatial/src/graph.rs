//! The graph interface consumed by the injector and the simulator.
//!
//! # Contract
//!
//! A `GeoGraph` is a read-only directed multigraph whose nodes carry a
//! coordinate and whose edges carry [`EdgeAttrs`].  Several parallel edges
//! may join the same ordered node pair; attribute lookups use the shortest
//! one (see [`GeoGraph::canonical_edge`]).
//!
//! Implementations only need the required methods.  The provided methods are
//! expressed in terms of them and may be overridden when the backend can do
//! better (as `RoadNetwork` does for [`GeoGraph::nearest_reachable`]).

use tg_core::{GeoPoint, NodeId, RoadClass};

use crate::{SpatialResult, Weight};

/// Attributes of one directed edge.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeAttrs {
    /// Physical length in metres.
    pub length_m: f64,
    pub road_class: RoadClass,
    /// Precomputed traversal time in seconds, if the loader provided one.
    pub travel_secs: Option<f64>,
}

/// Read-only road graph with coordinates, routing and nearest-node lookup.
pub trait GeoGraph {
    fn node_count(&self) -> usize;

    /// Coordinate of `node`, or `None` if the node does not exist.
    fn node_coordinate(&self, node: NodeId) -> Option<GeoPoint>;

    /// Distinct successors of `node`, in the backend's storage order.
    fn neighbors(&self, node: NodeId) -> Vec<NodeId>;

    /// Attributes of every parallel edge `from → to`; empty if none exist.
    fn edge_data(&self, from: NodeId, to: NodeId) -> Vec<EdgeAttrs>;

    /// Node sequence of a shortest path, including both endpoints.
    ///
    /// `from == to` yields `[from]`.
    fn shortest_path(&self, from: NodeId, to: NodeId, weight: Weight) -> SpatialResult<Vec<NodeId>>;

    /// Total weight of a shortest path (metres for `Length`, seconds for
    /// `TravelTime`).
    fn shortest_path_length(&self, from: NodeId, to: NodeId, weight: Weight) -> SpatialResult<f64>;

    /// Node closest to `pos`, or `None` for an empty graph.
    fn nearest_node(&self, pos: GeoPoint) -> Option<NodeId>;

    // ── Provided ──────────────────────────────────────────────────────────

    /// The minimum-length edge among the parallel edges `from → to`.
    fn canonical_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeAttrs> {
        self.edge_data(from, to)
            .into_iter()
            .min_by(|a, b| a.length_m.total_cmp(&b.length_m))
    }

    /// [`canonical_edge`](Self::canonical_edge) in the `a → b` direction,
    /// falling back to `b → a`.
    fn canonical_edge_either(&self, a: NodeId, b: NodeId) -> Option<EdgeAttrs> {
        self.canonical_edge(a, b).or_else(|| self.canonical_edge(b, a))
    }

    /// Number of distinct successors.  A node with more than two is a
    /// junction.
    fn out_degree_distinct(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// The candidate with the smallest shortest-path distance from `source`,
    /// with that distance.  Ties go to the earliest candidate; unreachable
    /// candidates are ignored.
    fn nearest_reachable(
        &self,
        source: NodeId,
        candidates: &[NodeId],
        weight: Weight,
    ) -> Option<(NodeId, f64)> {
        let mut best: Option<(NodeId, f64)> = None;
        for &candidate in candidates {
            let Ok(dist) = self.shortest_path_length(source, candidate, weight) else {
                continue;
            };
            if best.is_none_or(|(_, b)| dist < b) {
                best = Some((candidate, dist));
            }
        }
        best
    }
}
