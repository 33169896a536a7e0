use crate::error::{FleetError, Rejection};
use crate::plane::Plane;
use crate::variant::AircraftVariant;
use tracing::{debug, warn};

/// Ordered collection of planes owned by the airline.
///
/// Every plane inside passed the admission rule, either through [`Fleet::add`]
/// or [`Fleet::from_decoded`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fleet {
    planes: Vec<Plane>,
}

impl Fleet {
    pub fn new() -> Fleet {
        Fleet::default()
    }

    fn admit(plane: &Plane) -> Result<(), Rejection> {
        if plane.variant() == AircraftVariant::Unspecified {
            return Err(Rejection::UnspecifiedVariant);
        }
        if plane.number().is_empty() {
            return Err(Rejection::MissingNumber);
        }
        if let Plane::Cargo(c) = plane
            && !c.cargo_weight.is_finite()
        {
            return Err(Rejection::NonFiniteCargoWeight);
        }
        Ok(())
    }

    pub fn add(&mut self, plane: impl Into<Plane>) -> Result<(), FleetError> {
        let plane = plane.into();
        if let Err(rejection) = Self::admit(&plane) {
            warn!(number = plane.number(), %rejection, "plane rejected");
            return Err(FleetError::InvalidPlane(rejection));
        }
        debug!(number = plane.number(), kind = %plane.kind(), variant = %plane.variant(), "plane added");
        self.planes.push(plane);
        Ok(())
    }

    /// Builds a fleet from decoded planes, keeping their order.
    ///
    /// The admission rule still applies; the index of the first offending
    /// plane is returned with the rejection.
    pub fn from_decoded(planes: Vec<Plane>) -> Result<Fleet, (usize, Rejection)> {
        for (idx, plane) in planes.iter().enumerate() {
            Self::admit(plane).map_err(|r| (idx, r))?;
        }
        Ok(Fleet { planes })
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    pub fn total_weight(&self) -> Result<f64, FleetError> {
        self.planes.iter().map(Plane::takeoff_weight).sum()
    }

    /// Mean takeoff weight, `None` for an empty fleet.
    pub fn average_weight(&self) -> Result<Option<f64>, FleetError> {
        if self.planes.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.total_weight()? / self.planes.len() as f64))
    }

    /// Stable ascending sort by takeoff weight. On error the order is untouched.
    pub fn sort_by_weight(&mut self) -> Result<(), FleetError> {
        let weights = self
            .planes
            .iter()
            .map(Plane::takeoff_weight)
            .collect::<Result<Vec<f64>, FleetError>>()?;

        let mut keyed = weights
            .into_iter()
            .zip(self.planes.drain(..))
            .collect::<Vec<(f64, Plane)>>();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.planes = keyed.into_iter().map(|(_, p)| p).collect();

        debug!(planes = self.planes.len(), "fleet sorted by takeoff weight");
        Ok(())
    }
}
