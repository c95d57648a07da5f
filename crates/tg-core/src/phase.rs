//! Per-node anomaly phase labels.

use std::str::FromStr;

use crate::CoreError;

/// Role of a route node with respect to an injected detour.
///
/// A detour is labelled `OffRouteStart` on its first departing node,
/// `OffRouteContinue` while away from the planned route, and `OffRouteReturn`
/// on the way back to the reconvergence point.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PhaseTag {
    #[default]
    Normal,
    OffRouteStart,
    OffRouteContinue,
    OffRouteReturn,
}

impl PhaseTag {
    /// `true` for every phase other than `Normal`.
    #[inline]
    pub fn is_off_route(self) -> bool {
        !matches!(self, PhaseTag::Normal)
    }

    /// Label written to the `anomaly_flag` column.
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseTag::Normal           => "normal",
            PhaseTag::OffRouteStart    => "off_route_start",
            PhaseTag::OffRouteContinue => "off_route_continue",
            PhaseTag::OffRouteReturn   => "off_route_return",
        }
    }
}

impl FromStr for PhaseTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal"             => Ok(PhaseTag::Normal),
            "off_route_start"    => Ok(PhaseTag::OffRouteStart),
            "off_route_continue" => Ok(PhaseTag::OffRouteContinue),
            "off_route_return"   => Ok(PhaseTag::OffRouteReturn),
            other => Err(CoreError::UnknownPhase(other.to_owned())),
        }
    }
}

impl std::fmt::Display for PhaseTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
