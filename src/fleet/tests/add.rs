use crate::error::{FleetError, Rejection};
use crate::fleet::Fleet;
use crate::fleet::tests::utils::{cargo, passenger};
use crate::variant::AircraftVariant::{AirbusA310, Boeing737, Unspecified};

#[test]
fn test_add_appends_in_order() {
    let mut fleet = Fleet::new();
    fleet.add(passenger(Boeing737, "P1", 100)).unwrap();
    fleet.add(cargo(AirbusA310, "C1", 5_000.0)).unwrap();

    let numbers: Vec<&str> = fleet.planes().iter().map(|p| p.number()).collect();
    assert_eq!(numbers, vec!["P1", "C1"]);
    assert_eq!(fleet.len(), 2);
}

#[test]
fn test_rejects_unspecified_variant() {
    let mut fleet = Fleet::new();
    fleet.add(passenger(Boeing737, "P1", 100)).unwrap();

    let err = fleet.add(cargo(Unspecified, "C1", 10.0)).unwrap_err();

    assert!(matches!(
        err,
        FleetError::InvalidPlane(Rejection::UnspecifiedVariant)
    ));
    assert_eq!(fleet.len(), 1);
}

#[test]
fn test_rejects_empty_number() {
    let mut fleet = Fleet::new();

    let err = fleet.add(passenger(Boeing737, "", 100)).unwrap_err();

    assert!(matches!(err, FleetError::InvalidPlane(Rejection::MissingNumber)));
    assert!(fleet.is_empty());
}

#[test]
fn test_rejects_non_finite_cargo_weight() {
    let mut fleet = Fleet::new();

    for weight in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let err = fleet.add(cargo(AirbusA310, "C1", weight)).unwrap_err();
        assert!(matches!(
            err,
            FleetError::InvalidPlane(Rejection::NonFiniteCargoWeight)
        ));
    }
    assert!(fleet.is_empty());
}

#[test]
fn test_from_decoded_reports_first_offender() {
    let planes = vec![
        passenger(Boeing737, "P1", 1),
        cargo(AirbusA310, "", 1.0),
        cargo(Unspecified, "C3", 1.0),
    ];

    assert_eq!(
        Fleet::from_decoded(planes),
        Err((1, Rejection::MissingNumber))
    );
}

#[test]
fn test_from_decoded_keeps_order() {
    let planes = vec![cargo(AirbusA310, "C1", 1.0), passenger(Boeing737, "P1", 1)];

    let fleet = Fleet::from_decoded(planes.clone()).unwrap();

    assert_eq!(fleet.planes(), planes.as_slice());
}
