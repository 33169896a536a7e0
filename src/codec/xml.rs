use crate::codec::{Codec, Format, PlaneRecord, records};
use crate::error::FleetError;
use crate::plane::{Plane, PlaneKind};
use crate::variant::AircraftVariant;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::HashMap;

const ROOT: &str = "Fleet";
const VARIANT: &str = "variant";
const NUMBER: &str = "number";
const PASSENGER_COUNT: &str = "passengerCount";
const CARGO_WEIGHT: &str = "cargoWeight";

/// `<Fleet>` root holding one element per plane, named after its kind:
///
/// ```xml
/// <Fleet>
///   <PassengerPlane variant="AirbusA320" number="X1" passengerCount="150"/>
///   <CargoAircraft variant="Boeing747" number="C1" cargoWeight="50000"/>
/// </Fleet>
/// ```
pub struct XmlCodec;

fn malformed(reason: impl Into<String>) -> FleetError {
    FleetError::malformed(Format::Xml, reason)
}

fn encode_error(reason: String) -> FleetError {
    FleetError::Encode {
        format: Format::Xml,
        reason,
    }
}

fn write_event(xml: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), FleetError> {
    xml.write_event(event).map_err(|e| encode_error(e.to_string()))
}

fn expect_root(elem: &BytesStart<'_>) -> Result<(), FleetError> {
    if elem.name().as_ref() == ROOT.as_bytes() {
        return Ok(());
    }
    Err(malformed(format!(
        "expected <{ROOT}> root, found <{}>",
        String::from_utf8_lossy(elem.name().as_ref())
    )))
}

fn plane_element(record: &PlaneRecord) -> BytesStart<'static> {
    let (kind, variant, number, field, value) = match record {
        PlaneRecord::Passenger {
            variant,
            number,
            passenger_count,
        } => (
            PlaneKind::Passenger,
            variant,
            number,
            PASSENGER_COUNT,
            passenger_count.to_string(),
        ),
        PlaneRecord::Cargo {
            variant,
            number,
            cargo_weight,
        } => (
            PlaneKind::Cargo,
            variant,
            number,
            CARGO_WEIGHT,
            cargo_weight.to_string(),
        ),
    };

    let mut elem = BytesStart::new(kind.name());
    elem.push_attribute((VARIANT, variant.name()));
    elem.push_attribute((NUMBER, number.as_str()));
    elem.push_attribute((field, value.as_str()));
    elem
}

fn attributes(elem: &BytesStart<'_>) -> Result<HashMap<String, String>, FleetError> {
    let mut attrs = HashMap::new();
    for attr in elem.attributes() {
        let attr = attr.map_err(|e| malformed(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| malformed(e.to_string()))?
            .into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

fn required<'a>(
    attrs: &'a HashMap<String, String>,
    kind: &str,
    name: &str,
) -> Result<&'a str, FleetError> {
    attrs
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| malformed(format!("{kind} is missing attribute '{name}'")))
}

fn parse_plane(elem: &BytesStart<'_>) -> Result<PlaneRecord, FleetError> {
    let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
    let attrs = attributes(elem)?;

    let variant = required(&attrs, &name, VARIANT)?
        .parse::<AircraftVariant>()
        .map_err(|e| malformed(e.to_string()))?;
    let number = required(&attrs, &name, NUMBER)?.to_string();

    if name == PlaneKind::Passenger.name() {
        let raw = required(&attrs, &name, PASSENGER_COUNT)?;
        let passenger_count = raw
            .parse::<u32>()
            .map_err(|_| malformed(format!("invalid {PASSENGER_COUNT} '{raw}'")))?;
        Ok(PlaneRecord::Passenger {
            variant,
            number,
            passenger_count,
        })
    } else if name == PlaneKind::Cargo.name() {
        let raw = required(&attrs, &name, CARGO_WEIGHT)?;
        let cargo_weight = raw
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite())
            .ok_or_else(|| malformed(format!("invalid {CARGO_WEIGHT} '{raw}'")))?;
        Ok(PlaneRecord::Cargo {
            variant,
            number,
            cargo_weight,
        })
    } else {
        Err(malformed(format!("unknown plane element <{name}>")))
    }
}

impl Codec for XmlCodec {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn encode(&self, planes: &[Plane]) -> Result<String, FleetError> {
        let records = records(planes, Format::Xml)?;
        let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);

        write_event(
            &mut xml,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        write_event(&mut xml, Event::Start(BytesStart::new(ROOT)))?;
        for record in &records {
            write_event(&mut xml, Event::Empty(plane_element(record)))?;
        }
        write_event(&mut xml, Event::End(BytesEnd::new(ROOT)))?;

        String::from_utf8(xml.into_inner()).map_err(|e| encode_error(e.to_string()))
    }

    fn decode(&self, text: &str) -> Result<Vec<Plane>, FleetError> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut planes = Vec::new();
        let mut in_root = false;
        let mut closed = false;
        // kind of a plane written as <Kind ...></Kind>, awaiting its end tag
        let mut open: Option<String> = None;

        loop {
            match reader.read_event().map_err(|e| malformed(e.to_string()))? {
                Event::Eof if closed => break,
                Event::Eof => return Err(malformed("unexpected end of document")),
                Event::Start(_)
                | Event::Empty(_)
                | Event::End(_)
                | Event::Text(_)
                | Event::CData(_)
                    if closed =>
                {
                    return Err(malformed(format!("unexpected content after </{ROOT}>")));
                }
                Event::Empty(e) if !in_root => {
                    expect_root(&e)?;
                    closed = true;
                }
                Event::Start(e) if !in_root => {
                    expect_root(&e)?;
                    in_root = true;
                }
                Event::End(e) if !in_root => {
                    return Err(malformed(format!(
                        "unexpected </{}> before <{ROOT}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                Event::Empty(e) if open.is_none() => {
                    planes.push(Plane::from(parse_plane(&e)?));
                }
                Event::Start(e) if open.is_none() => {
                    planes.push(Plane::from(parse_plane(&e)?));
                    open = Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    match open.take() {
                        Some(kind) if kind == name => {}
                        Some(kind) => {
                            return Err(malformed(format!("<{kind}> closed by </{name}>")));
                        }
                        None if name == ROOT => closed = true,
                        None => return Err(malformed(format!("unexpected </{name}>"))),
                    }
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(malformed(format!(
                        "unexpected <{}> inside a plane element",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                Event::Text(_) | Event::CData(_) if in_root => {
                    return Err(malformed(format!("unexpected text inside <{ROOT}>")));
                }
                Event::Text(_) | Event::CData(_) => {
                    return Err(malformed(format!("unexpected text before <{ROOT}>")));
                }
                _ => {}
            }
        }

        Ok(planes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::tests::utils::{cargo, passenger};
    use crate::variant::AircraftVariant::{AirbusA320, Boeing737, Boeing747};

    #[test]
    fn test_encode_layout() {
        let planes = vec![
            passenger(AirbusA320, "X1", 150),
            cargo(Boeing747, "C1", 50_000.0),
        ];

        let text = XmlCodec.encode(&planes).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                "<Fleet>",
                r#"  <PassengerPlane variant="AirbusA320" number="X1" passengerCount="150"/>"#,
                r#"  <CargoAircraft variant="Boeing747" number="C1" cargoWeight="50000"/>"#,
                "</Fleet>",
            ]
        );
    }

    #[test]
    fn test_decode_accepts_open_and_empty_elements() {
        let text = r#"<?xml version="1.0"?>
            <!-- saved by hand -->
            <Fleet>
              <CargoAircraft variant="Boeing747" number="C1" cargoWeight="50000"></CargoAircraft>
              <PassengerPlane variant="b737" number="P1" passengerCount="120"/>
            </Fleet>"#;

        let planes = XmlCodec.decode(text).unwrap();

        assert_eq!(
            planes,
            vec![
                cargo(Boeing747, "C1", 50_000.0),
                passenger(Boeing737, "P1", 120)
            ]
        );
    }

    #[test]
    fn test_decode_empty_root() {
        assert!(XmlCodec.decode("<Fleet/>").unwrap().is_empty());
        assert!(XmlCodec.decode("<Fleet></Fleet>").unwrap().is_empty());
    }

    #[test]
    fn test_decode_unescapes_number() {
        let text = r#"<Fleet><CargoAircraft variant="AirbusA320" number="A&amp;B" cargoWeight="1.5"/></Fleet>"#;
        let planes = XmlCodec.decode(text).unwrap();
        assert_eq!(planes[0].number(), "A&B");
    }

    #[test]
    fn test_decode_rejects_unknown_element() {
        let text = r#"<Fleet><Glider variant="Boeing737" number="G1"/></Fleet>"#;
        assert!(matches!(
            XmlCodec.decode(text),
            Err(FleetError::MalformedData { format: Format::Xml, reason }) if reason.contains("Glider")
        ));
    }

    #[test]
    fn test_decode_rejects_missing_attribute() {
        let text = r#"<Fleet><PassengerPlane variant="Boeing737" number="P1"/></Fleet>"#;
        assert!(matches!(
            XmlCodec.decode(text),
            Err(FleetError::MalformedData { reason, .. }) if reason.contains(PASSENGER_COUNT)
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_root_and_truncation() {
        assert!(XmlCodec.decode("<Planes/>").is_err());
        assert!(XmlCodec.decode("<Fleet><CargoAircraft variant=\"Boeing737\" number=\"C\" cargoWeight=\"1\"/>").is_err());
        assert!(XmlCodec.decode("").is_err());
    }

    #[test]
    fn test_decode_rejects_content_after_root() {
        let second_root = r#"<Fleet/><Fleet><PassengerPlane variant="Boeing737" number="P1" passengerCount="1"/></Fleet>"#;
        assert!(matches!(
            XmlCodec.decode(second_root),
            Err(FleetError::MalformedData { format: Format::Xml, .. })
        ));

        let trailing = "<Fleet></Fleet>more junk";
        assert!(matches!(
            XmlCodec.decode(trailing),
            Err(FleetError::MalformedData { .. })
        ));

        // whitespace and comments after the root are fine
        assert!(XmlCodec.decode("<Fleet></Fleet>\n<!-- end -->\n").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_text_before_root() {
        assert!(matches!(
            XmlCodec.decode("junk<Fleet></Fleet>"),
            Err(FleetError::MalformedData { reason, .. }) if reason.contains("before")
        ));
        assert!(XmlCodec.decode("</Fleet>").is_err());
    }

    #[test]
    fn test_decode_rejects_non_finite_cargo_weight() {
        for raw in ["inf", "-inf", "NaN"] {
            let text = format!(
                r#"<Fleet><CargoAircraft variant="Boeing747" number="C1" cargoWeight="{raw}"/></Fleet>"#
            );
            assert!(matches!(
                XmlCodec.decode(&text),
                Err(FleetError::MalformedData { reason, .. }) if reason.contains(CARGO_WEIGHT)
            ));
        }
    }

    #[test]
    fn test_encode_rejects_non_finite_cargo_weight() {
        let planes = vec![cargo(Boeing747, "C1", f64::NAN)];
        assert!(matches!(
            XmlCodec.encode(&planes),
            Err(FleetError::Encode { format: Format::Xml, .. })
        ));
    }
}
