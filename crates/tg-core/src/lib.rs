//! `tg-core` — foundational types for the `trajgen` GPS trajectory synthesizer.
//!
//! This crate is a dependency of every other `tg-*` crate.  It intentionally
//! has no `tg-*` dependencies and few external ones (`rand`, `chrono` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`ids`]     | `NodeId`, `EdgeId`                                       |
//! | [`geo`]     | `GeoPoint`, haversine distance, `BoundingBox`            |
//! | [`road`]    | `RoadClass` enum and tag parsing                         |
//! | [`speed`]   | Speed model: road class × urban flag × hour → m/s        |
//! | [`phase`]   | `PhaseTag` labels attached to route nodes                |
//! | [`time`]    | `TripClock`, timestamp format                            |
//! | [`rng`]     | `SimRng` seedable random source                          |
//! | [`error`]   | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod geo;
pub mod ids;
pub mod phase;
pub mod rng;
pub mod road;
pub mod speed;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{BoundingBox, GeoPoint};
pub use ids::{EdgeId, NodeId};
pub use phase::PhaseTag;
pub use rng::SimRng;
pub use road::RoadClass;
pub use speed::speed_mps;
pub use time::{TIMESTAMP_FORMAT, TripClock};
