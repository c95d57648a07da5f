//! `tg-anomaly` — off-route anomaly injection.
//!
//! Takes a planned route (an ordered node sequence) and splices in detours
//! that leave the route, wander through nodes the route never visits, and
//! rejoin it further along.  Every output node carries a [`PhaseTag`]:
//!
//! ```text
//! route[i]  conn…        segment…          return…   route[i+1] …
//! normal    start cont…  cont cont cont    return…   normal …
//! ```
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`params`]   | `InjectionParams` with defaults and validation        |
//! | [`injector`] | `OffRouteInjector`, `InjectedRoute`, `Detour`          |
//! | [`length`]   | `path_length` over canonical edges                    |
//! | [`error`]    | `AnomalyError`, `AnomalyResult<T>`                    |
//!
//! [`PhaseTag`]: tg_core::PhaseTag

pub mod error;
pub mod injector;
pub mod length;
pub mod params;


pub use error::{AnomalyError, AnomalyResult};
pub use injector::{Detour, InjectedRoute, OffRouteInjector, Rejection, Rejections};
pub use length::path_length;
pub use params::{InjectionParams, MAX_DEVIATION_RADIUS_DEG};
