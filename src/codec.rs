//! Fleet persistence in two interchangeable formats.
//!
//! Both codecs keep the concrete plane kind through a discriminator (the
//! element name in XML, the `type` field in JSON) along with the variant,
//! number and kind-specific payload. The empty weight is not persisted and is
//! re-derived from the variant on decode.
//!
//! Decoded planes are checked against the same admission rule as
//! [`Fleet::add`]; a file holding an unspecified variant, an empty number or
//! a non-finite cargo weight is reported as [`FleetError::MalformedData`]
//! instead of being loaded. Non-finite cargo weights also fail to encode.

use crate::error::FleetError;
use crate::fleet::Fleet;
use crate::plane::{CargoAircraft, PassengerPlane, Plane};
use crate::variant::AircraftVariant;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

mod json;
mod xml;

pub use json::JsonCodec;
pub use xml::XmlCodec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Xml,
    Json,
}

impl Format {
    /// Infers the format from a `.xml` or `.json` extension.
    pub fn from_path(path: &Path) -> Option<Format> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    pub fn codec(self) -> &'static dyn Codec {
        match self {
            Format::Xml => &XmlCodec,
            Format::Json => &JsonCodec,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Xml => f.write_str("xml"),
            Format::Json => f.write_str("json"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(Format::Xml),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown format '{other}', expected xml or json")),
        }
    }
}

/// Paired encoder and decoder for one persisted format.
pub trait Codec {
    fn format(&self) -> Format;

    fn encode(&self, planes: &[Plane]) -> Result<String, FleetError>;

    /// Rebuilds planes in persisted order. No admission check happens here.
    fn decode(&self, text: &str) -> Result<Vec<Plane>, FleetError>;
}

/// Persisted shape of a plane, shared by both codecs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub(crate) enum PlaneRecord {
    #[serde(rename = "PassengerPlane", rename_all = "camelCase")]
    Passenger {
        variant: AircraftVariant,
        number: String,
        passenger_count: u32,
    },
    #[serde(rename = "CargoAircraft", rename_all = "camelCase")]
    Cargo {
        variant: AircraftVariant,
        number: String,
        cargo_weight: f64,
    },
}

impl From<&Plane> for PlaneRecord {
    fn from(plane: &Plane) -> Self {
        match plane {
            Plane::Passenger(p) => PlaneRecord::Passenger {
                variant: p.airframe.variant(),
                number: p.airframe.number.clone(),
                passenger_count: p.passenger_count,
            },
            Plane::Cargo(c) => PlaneRecord::Cargo {
                variant: c.airframe.variant(),
                number: c.airframe.number.clone(),
                cargo_weight: c.cargo_weight,
            },
        }
    }
}

impl From<PlaneRecord> for Plane {
    fn from(record: PlaneRecord) -> Self {
        match record {
            PlaneRecord::Passenger {
                variant,
                number,
                passenger_count,
            } => PassengerPlane::new(variant, number, passenger_count).into(),
            PlaneRecord::Cargo {
                variant,
                number,
                cargo_weight,
            } => CargoAircraft::new(variant, number, cargo_weight).into(),
        }
    }
}

/// Persisted records for `planes`. Non-finite cargo weights have no
/// representation in either format and fail the encode.
pub(crate) fn records(planes: &[Plane], format: Format) -> Result<Vec<PlaneRecord>, FleetError> {
    planes
        .iter()
        .map(|plane| match plane {
            Plane::Cargo(c) if !c.cargo_weight.is_finite() => Err(FleetError::Encode {
                format,
                reason: format!(
                    "plane '{}' has non-finite cargo weight {}",
                    c.airframe.number, c.cargo_weight
                ),
            }),
            _ => Ok(PlaneRecord::from(plane)),
        })
        .collect()
}

/// Writes the fleet to `path`, replacing any existing file.
pub fn save(fleet: &Fleet, path: &Path, format: Format) -> Result<(), FleetError> {
    let text = format.codec().encode(fleet.planes())?;
    let io_err = |source| FleetError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(text.as_bytes()).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    info!(path = %path.display(), %format, planes = fleet.len(), "fleet saved");
    Ok(())
}

/// Reads a fresh fleet from `path`. The caller's fleet is only replaced on success.
pub fn load(path: &Path, format: Format) -> Result<Fleet, FleetError> {
    let text = std::fs::read_to_string(path).map_err(|source| FleetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let planes = format.codec().decode(&text)?;
    let fleet = Fleet::from_decoded(planes).map_err(|(idx, rejection)| {
        FleetError::malformed(format, format!("plane #{}: {rejection}", idx + 1))
    })?;

    info!(path = %path.display(), %format, planes = fleet.len(), "fleet loaded");
    Ok(fleet)
}
