use crate::codec::{Codec, Format, PlaneRecord, records};
use crate::error::FleetError;
use crate::plane::Plane;

/// Pretty-printed array of objects tagged with a `type` discriminator.
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn encode(&self, planes: &[Plane]) -> Result<String, FleetError> {
        let records = records(planes, Format::Json)?;
        serde_json::to_string_pretty(&records).map_err(|e| FleetError::Encode {
            format: Format::Json,
            reason: e.to_string(),
        })
    }

    fn decode(&self, text: &str) -> Result<Vec<Plane>, FleetError> {
        let records: Vec<PlaneRecord> = serde_json::from_str(text)
            .map_err(|e| FleetError::malformed(Format::Json, e.to_string()))?;
        Ok(records.into_iter().map(Plane::from).collect())
    }
}
