//! Road classification carried on every network edge.

use std::str::FromStr;

use crate::{CoreError, CoreResult};

/// OSM-style `highway` class of a drivable road.
///
/// Values outside the seven named classes (`motorway_link`, `unclassified`,
/// `living_street`, …) are still drivable and map to [`RoadClass::Other`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoadClass {
    Motorway,
    Trunk,
    #[default]
    Primary,
    Secondary,
    Tertiary,
    Residential,
    Service,
    Other,
}

impl RoadClass {
    /// Residential streets and service roads count as urban driving.
    #[inline]
    pub fn is_urban(self) -> bool {
        matches!(self, RoadClass::Residential | RoadClass::Service)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoadClass::Motorway    => "motorway",
            RoadClass::Trunk       => "trunk",
            RoadClass::Primary     => "primary",
            RoadClass::Secondary   => "secondary",
            RoadClass::Tertiary    => "tertiary",
            RoadClass::Residential => "residential",
            RoadClass::Service     => "service",
            RoadClass::Other       => "other",
        }
    }

    /// First element of a raw `highway` tag that may hold a single value or
    /// a list (`"residential;service"`, `"['residential', 'service']"`).
    pub fn tag_head(raw: &str) -> &str {
        raw.trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split([';', ',', '|'])
            .next()
            .map(|s| s.trim().trim_matches(|c| c == '\'' || c == '"'))
            .unwrap_or_default()
    }

    /// Parse a raw, possibly list-valued `highway` tag by its first element.
    ///
    /// Non-car heads are rejected with [`CoreError::NotDrivable`], an empty
    /// head with [`CoreError::EmptyHighway`].
    pub fn from_highway(raw: &str) -> CoreResult<RoadClass> {
        match Self::tag_head(raw) {
            "" => Err(CoreError::EmptyHighway),
            head => head.parse(),
        }
    }

    /// Lenient variant of [`from_highway`](Self::from_highway).
    ///
    /// A missing or empty tag is [`RoadClass::Primary`]; anything not
    /// drivable is [`RoadClass::Other`].
    pub fn parse_first(raw: Option<&str>) -> RoadClass {
        match raw.map(Self::from_highway) {
            None | Some(Err(CoreError::EmptyHighway)) => RoadClass::default(),
            Some(Ok(class)) => class,
            Some(Err(_)) => RoadClass::Other,
        }
    }
}

impl FromStr for RoadClass {
    type Err = CoreError;

    /// Parse a single `highway` value.  Non-car ways are rejected with
    /// [`CoreError::NotDrivable`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "motorway"    => RoadClass::Motorway,
            "trunk"       => RoadClass::Trunk,
            "primary"     => RoadClass::Primary,
            "secondary"   => RoadClass::Secondary,
            "tertiary"    => RoadClass::Tertiary,
            "residential" => RoadClass::Residential,
            "service"     => RoadClass::Service,
            "footway" | "path" | "cycleway" | "pedestrian" | "steps" | "track"
            | "bridleway" | "corridor" | "proposed" | "construction" => {
                return Err(CoreError::NotDrivable(s.to_owned()));
            }
            _ => RoadClass::Other,
        })
    }
}

impl std::fmt::Display for RoadClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
