//! Dijkstra search over the CSR road graph.
//!
//! # Cost units
//!
//! Costs are accumulated as integers so heap ordering is total and ties are
//! broken deterministically by `NodeId`: millimetres for [`Weight::Length`],
//! milliseconds for [`Weight::TravelTime`].  Public results are converted
//! back to metres / seconds.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tg_core::{EdgeId, NodeId};

use crate::graph::GeoGraph;
use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

/// Edge attribute minimised by a shortest-path query.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Weight {
    /// Physical length in metres.
    #[default]
    Length,
    /// Traversal time in seconds.
    TravelTime,
}

/// Integer cost units per public unit (metre or second).
const COST_SCALE: f64 = 1_000.0;

#[inline]
fn edge_cost(network: &RoadNetwork, edge: EdgeId, weight: Weight) -> u64 {
    let value = match weight {
        Weight::Length => network.edge_length_m[edge.index()],
        Weight::TravelTime => network.travel_secs(edge),
    };
    // Negative or NaN inputs saturate to zero.
    (value * COST_SCALE).round() as u64
}

// ── Search state ──────────────────────────────────────────────────────────────

struct Search {
    /// dist[v] = best known cost to reach v; `u64::MAX` if unreached.
    dist:      Vec<u64>,
    /// prev_edge[v] = EdgeId that reached v; `EdgeId::INVALID` for the
    /// source and unreached nodes.
    prev_edge: Vec<EdgeId>,
}

/// Run Dijkstra from `from`, settling nodes until `stop` returns `true` for
/// a settled node or the frontier is exhausted.
fn search(
    network:  &RoadNetwork,
    from:     NodeId,
    weight:   Weight,
    mut stop: impl FnMut(NodeId) -> bool,
) -> Search {
    let n = network.node_count();
    let mut dist      = vec![u64::MAX; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0;

    // Reverse makes BinaryHeap (max) behave as min-heap.
    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }
        if stop(node) {
            break;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost.saturating_add(edge_cost(network, edge, weight));

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    Search { dist, prev_edge }
}

fn check_node(network: &RoadNetwork, node: NodeId) -> SpatialResult<()> {
    if network.contains(node) {
        Ok(())
    } else {
        Err(SpatialError::NodeNotFound(node))
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

pub(crate) fn shortest_path(
    network: &RoadNetwork,
    from:    NodeId,
    to:      NodeId,
    weight:  Weight,
) -> SpatialResult<Vec<NodeId>> {
    check_node(network, from)?;
    check_node(network, to)?;
    if from == to {
        return Ok(vec![from]);
    }

    let s = search(network, from, weight, |node| node == to);
    if s.dist[to.index()] == u64::MAX {
        return Err(SpatialError::NoRoute { from, to });
    }

    let mut nodes = vec![to];
    let mut cur = to;
    loop {
        let e = s.prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    Ok(nodes)
}

pub(crate) fn shortest_path_length(
    network: &RoadNetwork,
    from:    NodeId,
    to:      NodeId,
    weight:  Weight,
) -> SpatialResult<f64> {
    check_node(network, from)?;
    check_node(network, to)?;
    if from == to {
        return Ok(0.0);
    }

    let s = search(network, from, weight, |node| node == to);
    match s.dist[to.index()] {
        u64::MAX => Err(SpatialError::NoRoute { from, to }),
        cost => Ok(cost as f64 / COST_SCALE),
    }
}

/// Single one-to-many search that stops once every candidate is settled.
pub(crate) fn nearest_reachable(
    network:    &RoadNetwork,
    source:     NodeId,
    candidates: &[NodeId],
    weight:     Weight,
) -> Option<(NodeId, f64)> {
    if !network.contains(source) {
        return None;
    }

    let mut pending = vec![false; network.node_count()];
    let mut remaining = 0usize;
    for &c in candidates {
        if network.contains(c) && !pending[c.index()] {
            pending[c.index()] = true;
            remaining += 1;
        }
    }
    if remaining == 0 {
        return None;
    }

    let s = search(network, source, weight, |node| {
        if pending[node.index()] {
            pending[node.index()] = false;
            remaining -= 1;
        }
        remaining == 0
    });

    let mut best: Option<(NodeId, u64)> = None;
    for &c in candidates {
        let Some(&d) = s.dist.get(c.index()) else { continue };
        if d == u64::MAX {
            continue;
        }
        if best.is_none_or(|(_, b)| d < b) {
            best = Some((c, d));
        }
    }
    best.map(|(node, cost)| (node, cost as f64 / COST_SCALE))
}
