//! Mood profiles steering how erratic generated checkpoints are.
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::WalkError;

/// Mood selected by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodKey {
    /// Gentle, nearly straight legs.
    Relax,
    City,
    /// Any direction at every hop, and longer hops.
    Adventure,
}

/// Directional spread and distance scaling for one mood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodProfile {
    /// Width of the bearing perturbation window, in radians.
    pub angle_range: f64,
    /// Multiplier applied to each hop's distance budget.
    pub distance_rate: f64,
}

const RELAX: MoodProfile = MoodProfile {
    angle_range: PI / 3.0,
    distance_rate: 0.8,
};

const CITY: MoodProfile = MoodProfile {
    angle_range: PI,
    distance_rate: 1.0,
};

const ADVENTURE: MoodProfile = MoodProfile {
    angle_range: PI * 2.0,
    distance_rate: 1.2,
};

impl MoodKey {
    pub const ALL: [Self; 3] = [Self::Relax, Self::City, Self::Adventure];

    #[must_use]
    pub const fn profile(self) -> MoodProfile {
        match self {
            Self::Relax => RELAX,
            Self::City => CITY,
            Self::Adventure => ADVENTURE,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relax => "relax",
            Self::City => "city",
            Self::Adventure => "adventure",
        }
    }

    /// Human readable label for selectors.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Relax => "Relax",
            Self::City => "City stroll",
            Self::Adventure => "Adventure",
        }
    }
}

impl MoodProfile {
    /// Look up the profile for a textual mood key.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::InvalidMoodKey`] when `key` names no known mood.
    pub fn lookup(key: &str) -> Result<Self, WalkError> {
        key.parse::<MoodKey>().map(MoodKey::profile)
    }
}

impl FromStr for MoodKey {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "relax" => Ok(Self::Relax),
            "city" => Ok(Self::City),
            "adventure" => Ok(Self::Adventure),
            other => Err(WalkError::InvalidMoodKey(other.to_string())),
        }
    }
}

impl fmt::Display for MoodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
