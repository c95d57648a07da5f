//! Injection parameters.

use crate::{AnomalyError, AnomalyResult};

/// Floor of the automatic deviation radius, in degrees.
const MIN_AUTO_RADIUS_DEG: f64 = 0.004;

/// Automatic radius growth per node of `max_length`, in degrees.
const AUTO_RADIUS_PER_NODE_DEG: f64 = 0.0015;

/// Largest accepted deviation radius, in degrees.
pub const MAX_DEVIATION_RADIUS_DEG: f64 = 90.0;

/// Tuning knobs for [`OffRouteInjector`](crate::OffRouteInjector).
///
/// | Field                | Default                                  |
/// |----------------------|------------------------------------------|
/// | `deviation_radius`   | `max(0.004, max_length × 0.0015)` degrees |
/// | `max_trials`         | 10 neighbor candidates per index         |
/// | `anomaly_start_prob` | 1.0                                      |
/// | `min_length`         | 3 nodes                                  |
/// | `max_length`         | 6 nodes                                  |
/// | `max_anomalies`      | 2 per trip                               |
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InjectionParams {
    /// Half-width in degrees of the box the far node is sampled from.
    /// `None` derives it from `max_length`.
    pub deviation_radius: Option<f64>,
    /// Off-route neighbors examined per insertion index.
    pub max_trials: usize,
    /// Probability of attempting a detour at an eligible index.
    pub anomaly_start_prob: f64,
    /// Inclusive bounds on the detour body length, in nodes.
    pub min_length: usize,
    pub max_length: usize,
    pub max_anomalies: usize,
}

impl Default for InjectionParams {
    fn default() -> Self {
        Self {
            deviation_radius:   None,
            max_trials:         10,
            anomaly_start_prob: 1.0,
            min_length:         3,
            max_length:         6,
            max_anomalies:      2,
        }
    }
}

impl InjectionParams {
    pub fn with_deviation_radius(mut self, degrees: f64) -> Self {
        self.deviation_radius = Some(degrees);
        self
    }

    pub fn with_max_trials(mut self, max_trials: usize) -> Self {
        self.max_trials = max_trials;
        self
    }

    pub fn with_start_prob(mut self, p: f64) -> Self {
        self.anomaly_start_prob = p;
        self
    }

    pub fn with_length(mut self, min: usize, max: usize) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_max_anomalies(mut self, max_anomalies: usize) -> Self {
        self.max_anomalies = max_anomalies;
        self
    }

    /// The radius actually used, in degrees.
    pub fn effective_deviation_radius(&self) -> f64 {
        self.deviation_radius
            .unwrap_or_else(|| MIN_AUTO_RADIUS_DEG.max(self.max_length as f64 * AUTO_RADIUS_PER_NODE_DEG))
    }

    /// Check the parameters before a pass starts.
    pub fn validate(&self) -> AnomalyResult<()> {
        if self.min_length == 0 {
            return Err(AnomalyError::ZeroLength);
        }
        if self.min_length > self.max_length {
            return Err(AnomalyError::LengthRange { min: self.min_length, max: self.max_length });
        }
        if !(0.0..=1.0).contains(&self.anomaly_start_prob) {
            return Err(AnomalyError::Probability(self.anomaly_start_prob));
        }
        let radius = self.effective_deviation_radius();
        if radius.is_nan() || radius <= 0.0 || radius > MAX_DEVIATION_RADIUS_DEG {
            return Err(AnomalyError::DeviationRadius(radius));
        }
        Ok(())
    }
}
