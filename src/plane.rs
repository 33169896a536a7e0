use crate::error::FleetError;
use crate::variant::AircraftVariant;
use std::fmt;

/// Takeoff weight contribution of one passenger, in kilograms.
pub const PASSENGER_WEIGHT: f64 = 62.0;

/// Identity shared by every plane kind.
///
/// The empty weight is cached and always matches the current variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Airframe {
    variant: AircraftVariant,
    empty_weight: Option<f64>,
    pub number: String,
}

impl Airframe {
    pub fn new(variant: AircraftVariant, number: impl Into<String>) -> Airframe {
        Airframe {
            variant,
            empty_weight: variant.empty_weight(),
            number: number.into(),
        }
    }

    pub fn variant(&self) -> AircraftVariant {
        self.variant
    }

    pub fn set_variant(&mut self, variant: AircraftVariant) {
        self.variant = variant;
        self.empty_weight = variant.empty_weight();
    }

    pub fn empty_weight(&self) -> Result<f64, FleetError> {
        self.empty_weight
            .ok_or_else(|| FleetError::UnresolvedVariant {
                number: self.number.clone(),
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassengerPlane {
    pub airframe: Airframe,
    pub passenger_count: u32,
}

impl PassengerPlane {
    pub fn new(variant: AircraftVariant, number: impl Into<String>, passenger_count: u32) -> Self {
        PassengerPlane {
            airframe: Airframe::new(variant, number),
            passenger_count,
        }
    }

    pub fn takeoff_weight(&self) -> Result<f64, FleetError> {
        Ok(PASSENGER_WEIGHT * f64::from(self.passenger_count) + self.airframe.empty_weight()?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CargoAircraft {
    pub airframe: Airframe,
    pub cargo_weight: f64,
}

impl CargoAircraft {
    pub fn new(variant: AircraftVariant, number: impl Into<String>, cargo_weight: f64) -> Self {
        CargoAircraft {
            airframe: Airframe::new(variant, number),
            cargo_weight,
        }
    }

    pub fn takeoff_weight(&self) -> Result<f64, FleetError> {
        Ok(self.cargo_weight + self.airframe.empty_weight()?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneKind {
    Passenger,
    Cargo,
}

impl PlaneKind {
    pub const fn name(self) -> &'static str {
        match self {
            PlaneKind::Passenger => "PassengerPlane",
            PlaneKind::Cargo => "CargoAircraft",
        }
    }
}

impl fmt::Display for PlaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Plane {
    Passenger(PassengerPlane),
    Cargo(CargoAircraft),
}

impl Plane {
    pub fn kind(&self) -> PlaneKind {
        match self {
            Plane::Passenger(_) => PlaneKind::Passenger,
            Plane::Cargo(_) => PlaneKind::Cargo,
        }
    }

    pub fn airframe(&self) -> &Airframe {
        match self {
            Plane::Passenger(p) => &p.airframe,
            Plane::Cargo(c) => &c.airframe,
        }
    }

    pub fn airframe_mut(&mut self) -> &mut Airframe {
        match self {
            Plane::Passenger(p) => &mut p.airframe,
            Plane::Cargo(c) => &mut c.airframe,
        }
    }

    pub fn variant(&self) -> AircraftVariant {
        self.airframe().variant()
    }

    pub fn number(&self) -> &str {
        &self.airframe().number
    }

    pub fn empty_weight(&self) -> Result<f64, FleetError> {
        self.airframe().empty_weight()
    }

    pub fn takeoff_weight(&self) -> Result<f64, FleetError> {
        match self {
            Plane::Passenger(p) => p.takeoff_weight(),
            Plane::Cargo(c) => c.takeoff_weight(),
        }
    }
}

impl From<PassengerPlane> for Plane {
    fn from(plane: PassengerPlane) -> Self {
        Plane::Passenger(plane)
    }
}

impl From<CargoAircraft> for Plane {
    fn from(plane: CargoAircraft) -> Self {
        Plane::Cargo(plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::AircraftVariant::{AirbusA320, Boeing737, Boeing747, Unspecified};

    #[test]
    fn test_passenger_takeoff_weight() {
        let plane = PassengerPlane::new(AirbusA320, "X1", 150);
        assert_eq!(plane.takeoff_weight().unwrap(), 46_050.0);

        let empty = PassengerPlane::new(Boeing737, "X2", 0);
        assert_eq!(empty.takeoff_weight().unwrap(), 26_400.0);
    }

    #[test]
    fn test_cargo_takeoff_weight() {
        let plane = CargoAircraft::new(Boeing747, "C1", 50_000.0);
        assert_eq!(plane.takeoff_weight().unwrap(), 236_000.0);

        let empty = CargoAircraft::new(Boeing747, "C2", 0.0);
        assert_eq!(empty.takeoff_weight().unwrap(), empty.airframe.empty_weight().unwrap());
    }

    #[test]
    fn test_set_variant_recomputes_empty_weight() {
        let mut plane: Plane = PassengerPlane::new(Boeing737, "P1", 10).into();
        assert_eq!(plane.empty_weight().unwrap(), 26_400.0);

        plane.airframe_mut().set_variant(Boeing747);
        assert_eq!(plane.variant(), Boeing747);
        assert_eq!(plane.empty_weight().unwrap(), 186_000.0);
        assert_eq!(plane.takeoff_weight().unwrap(), 186_620.0);
    }

    #[test]
    fn test_unspecified_variant_is_unresolved() {
        let plane: Plane = CargoAircraft::new(Unspecified, "C9", 10.0).into();
        assert!(matches!(
            plane.takeoff_weight(),
            Err(FleetError::UnresolvedVariant { number }) if number == "C9"
        ));
        assert!(plane.empty_weight().is_err());
    }

    #[test]
    fn test_kind() {
        let p: Plane = PassengerPlane::new(AirbusA320, "P", 1).into();
        let c: Plane = CargoAircraft::new(AirbusA320, "C", 1.0).into();
        assert_eq!(p.kind(), PlaneKind::Passenger);
        assert_eq!(c.kind().to_string(), "CargoAircraft");
    }
}
