//! Physical length of a node path.

use tg_core::NodeId;
use tg_spatial::GeoGraph;

/// Sum of canonical edge lengths (metres) along `path`.
///
/// Each consecutive pair uses the shortest parallel edge in the forward
/// direction, falling back to the reverse direction.  Pairs with no edge
/// either way contribute nothing.
pub fn path_length<G: GeoGraph + ?Sized>(graph: &G, path: &[NodeId]) -> f64 {
    path.windows(2)
        .filter_map(|pair| graph.canonical_edge_either(pair[0], pair[1]))
        .map(|edge| edge.length_m)
        .sum()
}
