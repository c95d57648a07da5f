//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Detour offsets are sampled in
//! thousandths of a degree, so single precision would visibly quantize them.

use crate::{CoreError, CoreResult};

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// The point shifted by `d_lat` / `d_lon` degrees.
    #[inline]
    pub fn offset_deg(self, d_lat: f64, d_lon: f64) -> GeoPoint {
        GeoPoint::new(self.lat + d_lat, self.lon + d_lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// Axis-aligned lat/lon rectangle used to clip road networks.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub south: f64,
    pub west:  f64,
    pub north: f64,
    pub east:  f64,
}

impl BoundingBox {
    /// Build a box from its edges.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidBoundingBox`] if `south > north` or `west > east`.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> CoreResult<Self> {
        if south > north || west > east {
            return Err(CoreError::InvalidBoundingBox { south, west, north, east });
        }
        Ok(Self { south, west, north, east })
    }

    /// The smallest box containing `a` and `b`, grown by `buffer_deg` on
    /// every side.
    pub fn around(a: GeoPoint, b: GeoPoint, buffer_deg: f64) -> Self {
        let buffer = buffer_deg.max(0.0);
        Self {
            south: a.lat.min(b.lat) - buffer,
            west:  a.lon.min(b.lon) - buffer,
            north: a.lat.max(b.lat) + buffer,
            east:  a.lon.max(b.lon) + buffer,
        }
    }

    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        (self.south..=self.north).contains(&p.lat) && (self.west..=self.east).contains(&p.lon)
    }
}
