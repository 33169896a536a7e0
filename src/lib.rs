pub mod codec;
pub mod error;
pub mod fleet;
pub mod logging;
pub mod plane;
pub mod variant;

pub use codec::Format;
pub use error::{FleetError, Rejection};
pub use fleet::Fleet;
pub use plane::{Airframe, CargoAircraft, PassengerPlane, Plane, PlaneKind};
pub use variant::AircraftVariant;
