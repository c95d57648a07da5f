//! `tg-sim` — turns a node route into a timestamped GPS trajectory.
//!
//! The simulator drives along the route one segment at a time.  Each segment
//! takes `haversine distance / speed`, where the speed comes from the road
//! class of the connecting edge and the current hour of the trip clock.
//! Leaving a junction (more than two distinct successors) adds a random
//! 3–10 s delay.  One point is emitted per traversed segment, at the
//! segment's destination.
//!
//! | Module        | Contents                                           |
//! |---------------|----------------------------------------------------|
//! | [`simulator`] | `simulate`, `TrajectoryPoint`, `SimulationReport`  |
//! | [`noise`]     | `add_gps_noise`                                    |
//! | [`error`]     | `SimError`, `SimResult<T>`                         |

pub mod error;
pub mod noise;
pub mod simulator;


pub use error::{SimError, SimResult};
pub use noise::add_gps_noise;
pub use simulator::{SimulationReport, TrajectoryPoint, simulate};
