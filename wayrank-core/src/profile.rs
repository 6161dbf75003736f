//! Routing modes and route-geometry detail levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named routing mode that shapes upstream cost computation.
///
/// # Examples
/// ```
/// use wayrank_core::Profile;
///
/// let profile: Profile = "bike".parse().unwrap();
/// assert_eq!(profile, Profile::Bike);
/// assert_eq!(profile.to_string(), "bike");
/// assert_eq!(Profile::default(), Profile::Car);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Motor vehicle routing.
    #[default]
    Car,
    /// Bicycle routing.
    Bike,
    /// Pedestrian routing.
    Foot,
}

impl Profile {
    /// Name used in upstream request paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Bike => "bike",
            Self::Foot => "foot",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a profile name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown routing profile {0:?} (expected car, bike or foot)")]
pub struct ParseProfileError(pub String);

impl FromStr for Profile {
    type Err = ParseProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(Self::Car),
            "bike" => Ok(Self::Bike),
            "foot" => Ok(Self::Foot),
            other => Err(ParseProfileError(other.to_owned())),
        }
    }
}

/// How much route geometry the detail-route service returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overview {
    /// Full-resolution geometry.
    #[default]
    Full,
    /// Geometry simplified for the highest zoom level that still shows the
    /// whole route.
    Simplified,
    /// No geometry.
    False,
}

impl Overview {
    /// Name used in upstream query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Simplified => "simplified",
            Self::False => "false",
        }
    }
}

impl fmt::Display for Overview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an overview name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown overview {0:?} (expected full, simplified or false)")]
pub struct ParseOverviewError(pub String);

impl FromStr for Overview {
    type Err = ParseOverviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "simplified" => Ok(Self::Simplified),
            "false" => Ok(Self::False),
            other => Err(ParseOverviewError(other.to_owned())),
        }
    }
}
