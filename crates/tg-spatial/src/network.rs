//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays are sorted by source node and indexed by `EdgeId`.
//! Parallel edges between the same node pair are kept side by side, which
//! makes the network a multigraph.  The sort is stable, so a node's edges
//! keep their insertion order and neighbor enumeration is reproducible.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`.  It
//! backs endpoint snapping and the injector's far-node lookup.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use tg_core::{speed_mps, EdgeId, GeoPoint, NodeId, RoadClass};

use crate::graph::{EdgeAttrs, GeoGraph};
use crate::router::{self, Weight};
use crate::SpatialResult;

/// Reference hour used to estimate travel time for edges without one.
pub const DEFAULT_REFERENCE_HOUR: u32 = 8;

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space, matching the
    /// degree-based offsets the injector samples in.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── TravelTimeProfile ─────────────────────────────────────────────────────────

/// How the builder precomputes per-edge travel time from the speed model.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelTimeProfile {
    /// Apply the urban discount to every edge regardless of class.
    pub is_urban: bool,
    /// Hour of day whose traffic multiplier is baked into the estimate.
    pub ref_hour: u32,
}

impl Default for TravelTimeProfile {
    fn default() -> Self {
        Self { is_urban: true, ref_hour: DEFAULT_REFERENCE_HOUR }
    }
}

impl TravelTimeProfile {
    #[inline]
    pub fn travel_secs(self, length_m: f64, class: RoadClass) -> f64 {
        length_m / speed_mps(class, self.is_urban, self.ref_hour)
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road multigraph in CSR format plus a spatial index.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`RoadNetworkBuilder`].  The network is immutable
/// once built and may be shared freely between injector and simulator calls.
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge, used for path reconstruction.
    pub edge_from: Vec<NodeId>,

    pub edge_to: Vec<NodeId>,

    /// Length of each edge in metres.
    pub edge_length_m: Vec<f64>,

    pub edge_class: Vec<RoadClass>,

    /// Precomputed travel time in seconds, if any.
    pub edge_travel_secs: Vec<Option<f64>>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    ///
    /// Unknown nodes have no outgoing edges.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let (start, end) = if self.contains(node) {
            (
                self.node_out_start[node.index()] as usize,
                self.node_out_start[node.index() + 1] as usize,
            )
        } else {
            (0, 0)
        };
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node`, counting parallel edges.
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_edges(node).count()
    }

    /// Attributes of a single edge.
    #[inline]
    pub fn edge_attrs(&self, edge: EdgeId) -> EdgeAttrs {
        EdgeAttrs {
            length_m:    self.edge_length_m[edge.index()],
            road_class:  self.edge_class[edge.index()],
            travel_secs: self.edge_travel_secs[edge.index()],
        }
    }

    /// Travel time of `edge` in seconds, estimated with the default
    /// [`TravelTimeProfile`] when no precomputed value exists.
    #[inline]
    pub fn travel_secs(&self, edge: EdgeId) -> f64 {
        self.edge_travel_secs[edge.index()].unwrap_or_else(|| {
            TravelTimeProfile::default()
                .travel_secs(self.edge_length_m[edge.index()], self.edge_class[edge.index()])
        })
    }
}

impl GeoGraph for RoadNetwork {
    fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    fn node_coordinate(&self, node: NodeId) -> Option<GeoPoint> {
        self.node_pos.get(node.index()).copied()
    }

    fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = Vec::with_capacity(self.out_degree(node));
        for edge in self.out_edges(node) {
            let to = self.edge_to[edge.index()];
            if !out.contains(&to) {
                out.push(to);
            }
        }
        out
    }

    fn edge_data(&self, from: NodeId, to: NodeId) -> Vec<EdgeAttrs> {
        self.out_edges(from)
            .filter(|e| self.edge_to[e.index()] == to)
            .map(|e| self.edge_attrs(e))
            .collect()
    }

    fn shortest_path(&self, from: NodeId, to: NodeId, weight: Weight) -> SpatialResult<Vec<NodeId>> {
        router::shortest_path(self, from, to, weight)
    }

    fn shortest_path_length(&self, from: NodeId, to: NodeId, weight: Weight) -> SpatialResult<f64> {
        router::shortest_path_length(self, from, to, weight)
    }

    fn nearest_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    /// One Dijkstra search from `source` instead of one per candidate.
    fn nearest_reachable(
        &self,
        source: NodeId,
        candidates: &[NodeId],
        weight: Weight,
    ) -> Option<(NodeId, f64)> {
        router::nearest_reachable(self, source, candidates, weight)
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use tg_core::{GeoPoint, RoadClass};
/// use tg_spatial::{GeoGraph, RoadNetworkBuilder};
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(40.32, 28.00));
/// let c = b.add_node(GeoPoint::new(40.33, 28.00));
/// b.add_road(a, c, 1_100.0, RoadClass::Secondary);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<GeoPoint>,
    raw_edges: Vec<RawEdge>,
    profile:   Option<TravelTimeProfile>,
}

struct RawEdge {
    from:        NodeId,
    to:          NodeId,
    length_m:    f64,
    class:       RoadClass,
    travel_secs: Option<f64>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new(), profile: None }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
            profile:   None,
        }
    }

    /// Precompute travel time for every edge that was added without one.
    pub fn travel_time_profile(mut self, profile: TravelTimeProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Add a road node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** edge from `from` to `to`.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f64, class: RoadClass) {
        self.raw_edges.push(RawEdge { from, to, length_m, class, travel_secs: None });
    }

    /// Add a directed edge with a known travel time in seconds.
    pub fn add_timed_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        length_m: f64,
        class: RoadClass,
        travel_secs: f64,
    ) {
        self.raw_edges.push(RawEdge { from, to, length_m, class, travel_secs: Some(travel_secs) });
    }

    /// Convenience: add edges in **both directions** for a two-way road.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f64, class: RoadClass) {
        self.add_directed_edge(a, b, length_m, class);
        self.add_directed_edge(b, a, length_m, class);
    }

    /// Look up the position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Time complexity: O(E log E) for edge sort + O(N log N) for R-tree bulk
    /// load, where N = nodes, E = edges.
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();
        let profile = self.profile;

        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:     Vec<NodeId>    = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<NodeId>    = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>       = raw.iter().map(|e| e.length_m).collect();
        let edge_class:    Vec<RoadClass> = raw.iter().map(|e| e.class).collect();
        let edge_travel_secs: Vec<Option<f64>> = raw
            .iter()
            .map(|e| e.travel_secs.or_else(|| profile.map(|p| p.travel_secs(e.length_m, e.class))))
            .collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lat, pos.lon],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_class,
            edge_travel_secs,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
