//! Detour construction and splicing.
//!
//! # Algorithm
//!
//! One left-to-right pass over the planned route.  Each node is copied out as
//! `Normal`; at an eligible index (not within two nodes of the origin or
//! five of the destination, under the per-trip cap, Bernoulli trial passed)
//! the injector picks a target body length and walks the node's off-route
//! neighbors in random order.  For each neighbor it:
//!
//! 1. snaps a random point within `deviation_radius` of the neighbor to a
//!    "far" node,
//! 2. takes the shortest path neighbor → far node, requiring at least
//!    `target` nodes and `30 m × target` of road,
//! 3. cuts a `target`-node body out of it at a random offset, requiring it
//!    to avoid every planned-route node,
//! 4. picks the reconvergence point: the later route node closest (by road
//!    length) to the body's last node,
//! 5. routes `route[i]` → body start and body end → reconvergence point.
//!
//! The first neighbor to pass every step is spliced in and the pass moves on
//! to `i + 1`.  The pass does not jump to the reconvergence point: the
//! planned route resumes at `route[i + 1]` wherever the detour rejoined.

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use tg_core::{NodeId, PhaseTag, SimRng};
use tg_spatial::{GeoGraph, Weight};

use crate::{AnomalyResult, InjectionParams, path_length};

/// Minimum road length per detour node, in metres.
const MIN_METRES_PER_NODE: f64 = 30.0;

/// Nodes kept free of detours at the start of the route.
const HEAD_MARGIN: usize = 2;

/// `i + TAIL_MARGIN <= route.len()` must hold to start a detour at `i`.
const TAIL_MARGIN: usize = 6;

// ── Output types ──────────────────────────────────────────────────────────────

/// One spliced detour.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Detour {
    /// Index in the planned route where the detour leaves.
    pub index: usize,
    /// Body of the detour, `target` nodes, none on the planned route.
    pub segment: Vec<NodeId>,
    /// Planned-route node the return path ends at.
    pub reconvergence: NodeId,
}

/// Why a neighbor candidate was abandoned.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Rejection {
    /// No coordinate for the neighbor, or the nearest-node lookup failed.
    FarNodeLookup,
    /// No path from the neighbor to the far node.
    Unreachable,
    /// Path to the far node has fewer nodes than the target length.
    TooFewNodes,
    /// Path to the far node is physically shorter than the floor.
    TooShort,
    /// Detour body touches the planned route.
    OverlapsRoute,
    /// No later route node is reachable from the body's end.
    NoReconvergence,
    /// No path from the departure node to the body's start.
    NoConnection,
    /// No path from the body's end back to the reconvergence point.
    NoReturn,
}

impl Rejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Rejection::FarNodeLookup   => "far_node_lookup",
            Rejection::Unreachable     => "unreachable",
            Rejection::TooFewNodes     => "too_few_nodes",
            Rejection::TooShort        => "too_short",
            Rejection::OverlapsRoute   => "overlaps_route",
            Rejection::NoReconvergence => "no_reconvergence",
            Rejection::NoConnection    => "no_connection",
            Rejection::NoReturn        => "no_return",
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected-candidate counters for one pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rejections {
    pub far_node_lookup:  u32,
    pub unreachable:      u32,
    pub too_few_nodes:    u32,
    pub too_short:        u32,
    pub overlaps_route:   u32,
    pub no_reconvergence: u32,
    pub no_connection:    u32,
    pub no_return:        u32,
}

impl Rejections {
    pub fn record(&mut self, reason: Rejection) {
        let slot = match reason {
            Rejection::FarNodeLookup   => &mut self.far_node_lookup,
            Rejection::Unreachable     => &mut self.unreachable,
            Rejection::TooFewNodes     => &mut self.too_few_nodes,
            Rejection::TooShort        => &mut self.too_short,
            Rejection::OverlapsRoute   => &mut self.overlaps_route,
            Rejection::NoReconvergence => &mut self.no_reconvergence,
            Rejection::NoConnection    => &mut self.no_connection,
            Rejection::NoReturn        => &mut self.no_return,
        };
        *slot += 1;
    }

    pub fn total(&self) -> u32 {
        self.far_node_lookup
            + self.unreachable
            + self.too_few_nodes
            + self.too_short
            + self.overlaps_route
            + self.no_reconvergence
            + self.no_connection
            + self.no_return
    }
}

/// Result of an injection pass.
///
/// `route` and `labels` always have the same length and are index-aligned.
#[derive(Clone, Debug, Default)]
pub struct InjectedRoute {
    pub route:      Vec<NodeId>,
    pub labels:     Vec<PhaseTag>,
    pub detours:    Vec<Detour>,
    pub rejections: Rejections,
}

impl InjectedRoute {
    fn with_capacity(n: usize) -> Self {
        Self {
            route:  Vec::with_capacity(n),
            labels: Vec::with_capacity(n),
            ..Self::default()
        }
    }

    #[inline]
    fn push(&mut self, node: NodeId, label: PhaseTag) {
        self.route.push(node);
        self.labels.push(label);
    }

    /// Number of detours spliced in.
    #[inline]
    pub fn anomaly_count(&self) -> usize {
        self.detours.len()
    }

    /// Append a planned detour after `route[index]`, which is already out.
    fn splice(&mut self, index: usize, plan: DetourPlan) {
        for (k, &node) in plan.connection.iter().skip(1).enumerate() {
            let label = if k == 0 { PhaseTag::OffRouteStart } else { PhaseTag::OffRouteContinue };
            self.push(node, label);
        }
        for &node in &plan.segment {
            self.push(node, PhaseTag::OffRouteContinue);
        }
        for &node in plan.return_path.iter().skip(1) {
            self.push(node, PhaseTag::OffRouteReturn);
        }
        self.detours.push(Detour {
            index,
            segment: plan.segment,
            reconvergence: plan.reconvergence,
        });
    }
}

/// Paths assembled for one accepted candidate.
struct DetourPlan {
    connection:    Vec<NodeId>,
    segment:       Vec<NodeId>,
    return_path:   Vec<NodeId>,
    reconvergence: NodeId,
}

// ── OffRouteInjector ──────────────────────────────────────────────────────────

/// Splices off-route detours into planned routes.
///
/// # Example
///
/// ```rust,ignore
/// let injector = OffRouteInjector::new(InjectionParams::default().with_start_prob(0.1))?;
/// let out = injector.inject(&network, &route, &mut rng);
/// assert_eq!(out.route.len(), out.labels.len());
/// ```
#[derive(Clone, Debug)]
pub struct OffRouteInjector {
    params: InjectionParams,
}

impl OffRouteInjector {
    /// Validate `params` and build an injector.
    pub fn new(params: InjectionParams) -> AnomalyResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &InjectionParams {
        &self.params
    }

    /// Run one injection pass over `route`.
    ///
    /// Never fails: rejected candidates are counted in
    /// [`InjectedRoute::rejections`] and an index with no surviving candidate
    /// is simply left untouched.  The output starts with `route[0]` and ends
    /// with the last planned node.
    pub fn inject<G: GeoGraph + ?Sized>(
        &self,
        graph: &G,
        route: &[NodeId],
        rng:   &mut SimRng,
    ) -> InjectedRoute {
        let p = &self.params;
        let n = route.len();
        let on_route: FxHashSet<NodeId> = route.iter().copied().collect();
        let mut out = InjectedRoute::with_capacity(n);

        let mut i = 0;
        while i + 1 < n {
            out.push(route[i], PhaseTag::Normal);

            let eligible = out.detours.len() < p.max_anomalies
                && i >= HEAD_MARGIN
                && i + TAIL_MARGIN <= n
                && rng.gen_bool(p.anomaly_start_prob);

            if eligible {
                let target = rng.gen_range(p.min_length..=p.max_length);
                let mut neighbors = graph.neighbors(route[i]);
                rng.shuffle(&mut neighbors);

                let mut injected = false;
                let candidates = neighbors
                    .into_iter()
                    .filter(|nb| !on_route.contains(nb))
                    .take(p.max_trials);

                for neighbor in candidates {
                    match self.plan_detour(graph, route, i, neighbor, target, &on_route, rng) {
                        Ok(plan) => {
                            debug!(
                                index = i,
                                %neighbor,
                                target,
                                reconvergence = %plan.reconvergence,
                                "detour injected"
                            );
                            out.splice(i, plan);
                            injected = true;
                            break;
                        }
                        Err(reason) => {
                            debug!(index = i, %neighbor, %reason, "detour candidate rejected");
                            out.rejections.record(reason);
                        }
                    }
                }

                if !injected {
                    debug!(index = i, target, "no detour candidate survived");
                }
            }

            i += 1;
        }

        for &node in &route[i..] {
            out.push(node, PhaseTag::Normal);
        }
        out
    }

    /// Build the detour paths through `neighbor`, or say why not.
    #[allow(clippy::too_many_arguments)]
    fn plan_detour<G: GeoGraph + ?Sized>(
        &self,
        graph:    &G,
        route:    &[NodeId],
        i:        usize,
        neighbor: NodeId,
        target:   usize,
        on_route: &FxHashSet<NodeId>,
        rng:      &mut SimRng,
    ) -> Result<DetourPlan, Rejection> {
        let radius = self.params.effective_deviation_radius();

        let origin = graph.node_coordinate(neighbor).ok_or(Rejection::FarNodeLookup)?;
        let d_lon = rng.gen_range(-radius..=radius);
        let d_lat = rng.gen_range(-radius..=radius);
        let Some(far) = graph.nearest_node(origin.offset_deg(d_lat, d_lon)) else {
            warn!(%neighbor, "nearest-node lookup failed for detour offset");
            return Err(Rejection::FarNodeLookup);
        };

        let full = graph
            .shortest_path(neighbor, far, Weight::Length)
            .map_err(|_| Rejection::Unreachable)?;
        if full.len() < target {
            return Err(Rejection::TooFewNodes);
        }
        if path_length(graph, &full) < MIN_METRES_PER_NODE * target as f64 {
            return Err(Rejection::TooShort);
        }

        let start = rng.gen_range(0..=full.len() - target);
        let segment = full[start..start + target].to_vec();
        if segment.iter().any(|node| on_route.contains(node)) {
            return Err(Rejection::OverlapsRoute);
        }

        let (first, last) = (segment[0], segment[target - 1]);
        let (reconvergence, _) = graph
            .nearest_reachable(last, &route[i + 1..], Weight::Length)
            .ok_or(Rejection::NoReconvergence)?;

        let connection = graph
            .shortest_path(route[i], first, Weight::Length)
            .map_err(|e| {
                warn!(error = %e, "detour connection path not found");
                Rejection::NoConnection
            })?;
        let return_path = graph
            .shortest_path(last, reconvergence, Weight::Length)
            .map_err(|e| {
                warn!(error = %e, "detour return path not found");
                Rejection::NoReturn
            })?;

        Ok(DetourPlan { connection, segment, return_path, reconvergence })
    }
}
