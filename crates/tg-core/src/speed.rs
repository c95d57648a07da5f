//! Traversal speed model.
//!
//! ```text
//! speed = base_kmh(class) × (0.8 if urban) × traffic(hour) / 3.6   [m/s]
//! ```
//!
//! | Hours         | Traffic multiplier |
//! |---------------|--------------------|
//! | 07–09, 17–19  | 0.7 (peak)         |
//! | 00–06         | 1.2 (night)        |
//! | otherwise     | 1.0                |

use crate::RoadClass;

/// Free-flow speed in km/h for a road class.
pub fn base_speed_kmh(class: RoadClass) -> f64 {
    match class {
        RoadClass::Motorway    => 100.0,
        RoadClass::Trunk       => 85.0,
        RoadClass::Primary     => 70.0,
        RoadClass::Secondary   => 55.0,
        RoadClass::Tertiary    => 45.0,
        RoadClass::Residential => 30.0,
        RoadClass::Service     => 20.0,
        RoadClass::Other       => 50.0,
    }
}

/// Congestion factor for an hour of day (0–23).
pub fn traffic_multiplier(hour: u32) -> f64 {
    match hour {
        7..=9 | 17..=19 => 0.7,
        0..=6 => 1.2,
        _ => 1.0,
    }
}

/// Speed in metres per second.
pub fn speed_mps(class: RoadClass, is_urban: bool, hour: u32) -> f64 {
    let mut kmh = base_speed_kmh(class);
    if is_urban {
        kmh *= 0.8;
    }
    kmh * traffic_multiplier(hour) / 3.6
}
