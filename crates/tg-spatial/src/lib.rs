//! `tg-spatial` — road network, spatial indexing, and shortest paths.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`graph`]   | `GeoGraph` trait, `EdgeAttrs`                               |
//! | [`network`] | `RoadNetwork` (CSR multigraph + R-tree), builder            |
//! | [`router`]  | `Weight`, Dijkstra search over `RoadNetwork`                |
//! | [`osm`]     | `load_from_pbf` (feature = `"osm"` only)                   |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                         |
//!
//! The anomaly injector and the trajectory simulator only ever see a
//! `GeoGraph`, so any backend (including a test double) can stand in for
//! `RoadNetwork`.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.             |
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod graph;
pub mod network;
pub mod router;

#[cfg(feature = "osm")]
pub mod osm;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use graph::{EdgeAttrs, GeoGraph};
pub use network::{RoadNetwork, RoadNetworkBuilder, TravelTimeProfile};
pub use router::Weight;
