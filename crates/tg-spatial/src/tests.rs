//! Unit tests for tg-spatial.
//!
//! All tests use a hand-crafted network so they run without any OSM file.

#[cfg(test)]
mod helpers {
    use tg_core::{GeoPoint, NodeId, RoadClass};
    use crate::{RoadNetwork, RoadNetworkBuilder};

    /// Build a small network for testing.
    ///
    /// Nodes (lat, lon):
    ///   0:(0,0)  1:(0,1)  2:(0,2)
    ///   3:(1,0)           4:(1,2)
    ///
    /// Undirected edges: 0-1, 1-2, 0-3, 2-4, 3-4
    ///
    /// By length 0→4 goes 0→1→2→4 (300 m) rather than 0→3→4 (600 m).
    /// The 0-3 road is a motorway, so by travel time 0→3→4 wins.
    pub fn grid_network() -> (RoadNetwork, [NodeId; 5]) {
        let mut b = RoadNetworkBuilder::new();

        let n0 = b.add_node(GeoPoint::new(0.0, 0.0));
        let n1 = b.add_node(GeoPoint::new(0.0, 1.0));
        let n2 = b.add_node(GeoPoint::new(0.0, 2.0));
        let n3 = b.add_node(GeoPoint::new(1.0, 0.0));
        let n4 = b.add_node(GeoPoint::new(1.0, 2.0));

        b.add_road(n0, n1, 100.0, RoadClass::Service);
        b.add_road(n1, n2, 100.0, RoadClass::Service);
        b.add_road(n2, n4, 100.0, RoadClass::Service);
        b.add_road(n0, n3, 500.0, RoadClass::Motorway);
        b.add_road(n3, n4, 100.0, RoadClass::Motorway);

        (b.build(), [n0, n1, n2, n3, n4])
    }
}

// ── Builder & network structure ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use tg_core::{EdgeId, GeoPoint, NodeId, RoadClass};
    use crate::{GeoGraph, RoadNetworkBuilder, TravelTimeProfile};

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
    }

    #[test]
    fn csr_out_edges() {
        let (net, [n0, n1, n2, n3, n4]) = super::helpers::grid_network();
        assert_eq!(net.out_degree(n0), 2);
        assert_eq!(net.out_degree(n1), 2);
        assert_eq!(net.out_degree(n2), 2);
        assert_eq!(net.out_degree(n3), 2);
        assert_eq!(net.out_degree(n4), 2);
        for e in net.out_edges(n0) {
            assert_eq!(net.edge_from[e.index()], n0);
        }
    }

    #[test]
    fn unknown_node_has_no_edges() {
        let (net, _) = super::helpers::grid_network();
        assert_eq!(net.out_degree(NodeId(99)), 0);
        assert!(net.neighbors(NodeId(99)).is_empty());
        assert!(net.node_coordinate(NodeId(99)).is_none());
    }

    #[test]
    fn directed_only_edge() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_directed_edge(a, c, 100.0, RoadClass::Primary);
        let net = b.build();
        assert_eq!(net.edge_count(), 1);
        assert_eq!(net.out_degree(a), 1);
        assert_eq!(net.out_degree(c), 0);
    }

    #[test]
    fn parallel_edges_collapse_in_neighbors() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_directed_edge(a, c, 300.0, RoadClass::Primary);
        b.add_directed_edge(a, c, 120.0, RoadClass::Residential);
        let net = b.build();

        assert_eq!(net.out_degree(a), 2);
        assert_eq!(net.neighbors(a), vec![c]);
        assert_eq!(net.out_degree_distinct(a), 1);
        assert_eq!(net.edge_data(a, c).len(), 2);

        let canonical = net.canonical_edge(a, c).unwrap();
        assert_eq!(canonical.length_m, 120.0);
        assert_eq!(canonical.road_class, RoadClass::Residential);
    }

    #[test]
    fn canonical_edge_falls_back_to_reverse() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_directed_edge(c, a, 80.0, RoadClass::Tertiary);
        let net = b.build();

        assert!(net.canonical_edge(a, c).is_none());
        let either = net.canonical_edge_either(a, c).unwrap();
        assert_eq!(either.length_m, 80.0);
    }

    #[test]
    fn neighbors_keep_insertion_order() {
        let mut b = RoadNetworkBuilder::new();
        let hub = b.add_node(GeoPoint::new(0.0, 0.0));
        let x = b.add_node(GeoPoint::new(0.0, 1.0));
        let y = b.add_node(GeoPoint::new(1.0, 0.0));
        let z = b.add_node(GeoPoint::new(1.0, 1.0));
        b.add_road(hub, z, 10.0, RoadClass::Primary);
        b.add_road(hub, x, 10.0, RoadClass::Primary);
        b.add_road(hub, y, 10.0, RoadClass::Primary);
        let net = b.build();
        assert_eq!(net.neighbors(hub), vec![z, x, y]);
    }

    #[test]
    fn travel_time_profile_precomputes() {
        let mut b = RoadNetworkBuilder::new().travel_time_profile(TravelTimeProfile::default());
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_directed_edge(a, c, 1_000.0, RoadClass::Primary);
        b.add_timed_edge(c, a, 1_000.0, RoadClass::Primary, 42.0);
        let net = b.build();

        // Primary, urban discount, 08:00 peak: 70 × 0.8 × 0.7 km/h.
        let expected = 1_000.0 / (70.0 * 0.8 * 0.7 / 3.6);
        let forward = net.canonical_edge(a, c).unwrap().travel_secs.unwrap();
        assert!((forward - expected).abs() < 1e-9);
        assert_eq!(net.canonical_edge(c, a).unwrap().travel_secs, Some(42.0));
    }

    #[test]
    fn no_profile_leaves_travel_time_empty() {
        let (net, [n0, n1, ..]) = super::helpers::grid_network();
        assert_eq!(net.canonical_edge(n0, n1).unwrap().travel_secs, None);
    }

    #[test]
    fn fallback_travel_time_matches_default_profile() {
        let profile = TravelTimeProfile::default();
        let mut plain = RoadNetworkBuilder::new();
        let mut timed = RoadNetworkBuilder::new().travel_time_profile(profile);
        for b in [&mut plain, &mut timed] {
            let a = b.add_node(GeoPoint::new(0.0, 0.0));
            let c = b.add_node(GeoPoint::new(0.0, 0.01));
            let d = b.add_node(GeoPoint::new(0.0, 0.02));
            b.add_directed_edge(a, c, 1_000.0, RoadClass::Primary);
            b.add_directed_edge(c, d, 1_000.0, RoadClass::Residential);
        }
        let (plain, timed) = (plain.build(), timed.build());

        for edge in 0..2 {
            let edge = EdgeId(edge);
            assert_eq!(plain.edge_attrs(edge).travel_secs, None);
            assert!((plain.travel_secs(edge) - timed.travel_secs(edge)).abs() < 1e-9);
        }
        let expected = 1_000.0 / (70.0 * 0.8 * 0.7 / 3.6);
        assert!((plain.travel_secs(EdgeId(0)) - expected).abs() < 1e-9);
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use tg_core::GeoPoint;
    use crate::{GeoGraph, RoadNetworkBuilder};

    #[test]
    fn snap_exact_position() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        assert_eq!(net.nearest_node(GeoPoint::new(0.0, 0.0)), Some(n0));
    }

    #[test]
    fn snap_nearest() {
        let (net, [n0, n1, ..]) = super::helpers::grid_network();
        assert_eq!(net.nearest_node(GeoPoint::new(0.0, 0.4)), Some(n0));
        assert_eq!(net.nearest_node(GeoPoint::new(0.0, 0.6)), Some(n1));
    }

    #[test]
    fn empty_network_returns_none() {
        let net = RoadNetworkBuilder::new().build();
        assert!(net.nearest_node(GeoPoint::new(0.0, 0.0)).is_none());
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use tg_core::{GeoPoint, NodeId, RoadClass};
    use crate::{GeoGraph, RoadNetworkBuilder, SpatialError, Weight};

    #[test]
    fn trivial_same_node() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        assert_eq!(net.shortest_path(n0, n0, Weight::Length).unwrap(), vec![n0]);
        assert_eq!(net.shortest_path_length(n0, n0, Weight::Length).unwrap(), 0.0);
    }

    #[test]
    fn shortest_by_length() {
        let (net, [n0, n1, n2, _, n4]) = super::helpers::grid_network();
        let path = net.shortest_path(n0, n4, Weight::Length).unwrap();
        assert_eq!(path, vec![n0, n1, n2, n4]);
        let len = net.shortest_path_length(n0, n4, Weight::Length).unwrap();
        assert!((len - 300.0).abs() < 1e-9);
    }

    #[test]
    fn shortest_by_travel_time_prefers_motorway() {
        let (net, [n0, _, _, n3, n4]) = super::helpers::grid_network();
        // Estimated at 08:00: 300 m of service road ≈ 96 s, 600 m of motorway ≈ 31 s.
        let path = net.shortest_path(n0, n4, Weight::TravelTime).unwrap();
        assert_eq!(path, vec![n0, n3, n4]);
    }

    #[test]
    fn no_route_disconnected() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(1.0, 0.0));
        let net = b.build();
        let result = net.shortest_path(a, c, Weight::Length);
        assert!(matches!(result, Err(SpatialError::NoRoute { .. })));
        assert!(net.shortest_path_length(a, c, Weight::Length).is_err());
    }

    #[test]
    fn unknown_node_is_reported() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let result = net.shortest_path(n0, NodeId(77), Weight::Length);
        assert!(matches!(result, Err(SpatialError::NodeNotFound(NodeId(77)))));
    }

    #[test]
    fn directed_one_way_blocks_return() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_directed_edge(a, c, 100.0, RoadClass::Primary);
        let net = b.build();
        assert!(net.shortest_path(a, c, Weight::Length).is_ok());
        assert!(net.shortest_path(c, a, Weight::Length).is_err());
    }

    #[test]
    fn nearest_reachable_picks_minimum() {
        let (net, [_, n1, n2, n3, n4]) = super::helpers::grid_network();
        // From n1: n2 at 100 m, n4 at 200 m, n3 at 300 m.
        let best = net.nearest_reachable(n1, &[n3, n4, n2], Weight::Length).unwrap();
        assert_eq!(best.0, n2);
        assert!((best.1 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn nearest_reachable_tie_goes_to_first_candidate() {
        let (net, [n0, n1, n2, ..]) = super::helpers::grid_network();
        // n0 and n2 are both 100 m from n1.
        let best = net.nearest_reachable(n1, &[n2, n0], Weight::Length).unwrap();
        assert_eq!(best.0, n2);
        let best = net.nearest_reachable(n1, &[n0, n2], Weight::Length).unwrap();
        assert_eq!(best.0, n0);
    }

    #[test]
    fn nearest_reachable_agrees_with_default_impl() {
        struct Loop<'a>(&'a crate::RoadNetwork);

        impl GeoGraph for Loop<'_> {
            fn node_count(&self) -> usize { self.0.node_count() }
            fn node_coordinate(&self, n: NodeId) -> Option<GeoPoint> { self.0.node_coordinate(n) }
            fn neighbors(&self, n: NodeId) -> Vec<NodeId> { self.0.neighbors(n) }
            fn edge_data(&self, a: NodeId, b: NodeId) -> Vec<crate::EdgeAttrs> { self.0.edge_data(a, b) }
            fn shortest_path(&self, a: NodeId, b: NodeId, w: Weight) -> crate::SpatialResult<Vec<NodeId>> {
                self.0.shortest_path(a, b, w)
            }
            fn shortest_path_length(&self, a: NodeId, b: NodeId, w: Weight) -> crate::SpatialResult<f64> {
                self.0.shortest_path_length(a, b, w)
            }
            fn nearest_node(&self, p: GeoPoint) -> Option<NodeId> { self.0.nearest_node(p) }
        }

        let (net, nodes) = super::helpers::grid_network();
        let looped = Loop(&net);
        for &source in &nodes {
            for weight in [Weight::Length, Weight::TravelTime] {
                let fast = net.nearest_reachable(source, &nodes[1..], weight);
                let slow = looped.nearest_reachable(source, &nodes[1..], weight);
                assert_eq!(fast.map(|b| b.0), slow.map(|b| b.0));
            }
        }
    }

    #[test]
    fn nearest_reachable_ignores_unreachable() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        let island = b.add_node(GeoPoint::new(5.0, 5.0));
        b.add_road(a, c, 50.0, RoadClass::Primary);
        let net = b.build();
        assert_eq!(net.nearest_reachable(a, &[island], Weight::Length), None);
        assert_eq!(net.nearest_reachable(a, &[island, c], Weight::Length).map(|b| b.0), Some(c));
    }
}

// ── OSM tag handling ──────────────────────────────────────────────────────────

#[cfg(all(test, feature = "osm"))]
mod osm_tags {
    use tg_core::RoadClass;
    use crate::osm::{Direction, way_profile};

    #[test]
    fn list_highway_uses_first_class() {
        let tags = [("highway", "residential;service")];
        assert_eq!(way_profile(&tags), Some((RoadClass::Residential, Direction::Both)));
    }

    #[test]
    fn list_motorway_is_one_way() {
        let tags = [("name", "O-4"), ("highway", "motorway;trunk")];
        assert_eq!(way_profile(&tags), Some((RoadClass::Motorway, Direction::Forward)));
    }

    #[test]
    fn oneway_tag_overrides() {
        let tags = [("highway", "primary"), ("oneway", "-1")];
        assert_eq!(way_profile(&tags), Some((RoadClass::Primary, Direction::Backward)));
    }

    #[test]
    fn non_drivable_head_is_dropped() {
        assert_eq!(way_profile(&[("highway", "footway;residential")]), None);
        assert_eq!(way_profile(&[("building", "yes")]), None);
    }
}
