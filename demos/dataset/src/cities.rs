//! City list and origin/destination pair sampling.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use tg_core::{GeoPoint, SimRng};

/// Attempts before a sample gives up on finding a distant enough pair.
const PAIR_ATTEMPTS: usize = 100;

#[derive(Clone, Debug, Deserialize)]
pub struct City {
    pub city:      String,
    pub latitude:  f64,
    pub longitude: f64,
}

impl City {
    pub fn pos(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// North-western Turkey.
const BUILT_IN: &[(&str, f64, f64)] = &[
    ("Istanbul",   41.0082, 28.9784),
    ("Bursa",      40.1885, 29.0610),
    ("Kocaeli",    40.7654, 29.9408),
    ("Sakarya",    40.7569, 30.3781),
    ("Tekirdag",   40.9780, 27.5110),
    ("Yalova",     40.6550, 29.2769),
    ("Bilecik",    40.1425, 29.9793),
    ("Balikesir",  39.6484, 27.8826),
    ("Canakkale",  40.1553, 26.4142),
    ("Edirne",     41.6818, 26.5623),
    ("Kirklareli", 41.7351, 27.2252),
    ("Bolu",       40.7350, 31.6061),
];

pub fn built_in() -> Vec<City> {
    BUILT_IN
        .iter()
        .map(|&(city, latitude, longitude)| City { city: city.to_owned(), latitude, longitude })
        .collect()
}

/// Read a `city,latitude,longitude` CSV table.
pub fn load_csv(path: &Path) -> Result<Vec<City>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening city table {}", path.display()))?;
    reader
        .deserialize()
        .collect::<Result<Vec<City>, _>>()
        .with_context(|| format!("reading city table {}", path.display()))
}

/// Draw two distinct cities at least `min_km` apart.
///
/// Returns `None` after [`PAIR_ATTEMPTS`] draws without success, or when
/// fewer than two cities are available.
pub fn pick_pair<'a>(cities: &'a [City], min_km: f64, rng: &mut SimRng) -> Option<(&'a City, &'a City)> {
    if cities.len() < 2 {
        return None;
    }
    for _ in 0..PAIR_ATTEMPTS {
        let pair = rng.choose_multiple(cities, 2);
        let (a, b) = (pair[0], pair[1]);
        if a.pos().distance_m(b.pos()) / 1_000.0 >= min_km {
            return Some((a, b));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_respect_minimum_distance() {
        let cities = built_in();
        let mut rng = SimRng::new(3);
        for _ in 0..50 {
            let (a, b) = pick_pair(&cities, 100.0, &mut rng).unwrap();
            assert_ne!(a.city, b.city);
            assert!(a.pos().distance_m(b.pos()) >= 100_000.0);
        }
    }

    #[test]
    fn impossible_distance_gives_none() {
        let cities = built_in();
        assert!(pick_pair(&cities, 20_000.0, &mut SimRng::new(1)).is_none());
        assert!(pick_pair(&cities[..1], 0.0, &mut SimRng::new(1)).is_none());
    }
}
