use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aircraft model. `Unspecified` is a placeholder and never valid in a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AircraftVariant {
    #[default]
    Unspecified,
    AirbusA310,
    AirbusA320,
    Boeing737,
    Boeing747,
}

impl AircraftVariant {
    pub const ALL: [AircraftVariant; 4] = [
        AircraftVariant::AirbusA310,
        AircraftVariant::AirbusA320,
        AircraftVariant::Boeing737,
        AircraftVariant::Boeing747,
    ];

    /// Empty (unladen) weight in kilograms, `None` for `Unspecified`.
    pub const fn empty_weight(self) -> Option<f64> {
        match self {
            AircraftVariant::Unspecified => None,
            AircraftVariant::AirbusA310 => Some(82_000.0),
            AircraftVariant::AirbusA320 => Some(36_750.0),
            AircraftVariant::Boeing737 => Some(26_400.0),
            AircraftVariant::Boeing747 => Some(186_000.0),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            AircraftVariant::Unspecified => "Unspecified",
            AircraftVariant::AirbusA310 => "AirbusA310",
            AircraftVariant::AirbusA320 => "AirbusA320",
            AircraftVariant::Boeing737 => "Boeing737",
            AircraftVariant::Boeing747 => "Boeing747",
        }
    }
}

impl fmt::Display for AircraftVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown aircraft variant '{}'", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for AircraftVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unspecified" | "none" => Ok(AircraftVariant::Unspecified),
            "airbusa310" | "a310" => Ok(AircraftVariant::AirbusA310),
            "airbusa320" | "a320" => Ok(AircraftVariant::AirbusA320),
            "boeing737" | "b737" => Ok(AircraftVariant::Boeing737),
            "boeing747" | "b747" => Ok(AircraftVariant::Boeing747),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}
