use crate::fleet::Fleet;
use crate::plane::{CargoAircraft, PassengerPlane, Plane};
use crate::variant::AircraftVariant;
use proptest::prelude::{Strategy, any};
use proptest::prop_oneof;
use proptest::strategy::Just;

pub fn passenger(variant: AircraftVariant, number: &str, count: u32) -> Plane {
    PassengerPlane::new(variant, number, count).into()
}

pub fn cargo(variant: AircraftVariant, number: &str, weight: f64) -> Plane {
    CargoAircraft::new(variant, number, weight).into()
}

pub fn fleet_of(planes: Vec<Plane>) -> Fleet {
    let mut fleet = Fleet::new();
    for plane in planes {
        fleet.add(plane).unwrap();
    }
    fleet
}

pub fn weights(fleet: &Fleet) -> Vec<f64> {
    fleet
        .planes()
        .iter()
        .map(|p| p.takeoff_weight().unwrap())
        .collect()
}

pub fn arb_variant() -> impl Strategy<Value = AircraftVariant> {
    prop_oneof![
        Just(AircraftVariant::AirbusA310),
        Just(AircraftVariant::AirbusA320),
        Just(AircraftVariant::Boeing737),
        Just(AircraftVariant::Boeing747),
    ]
}

pub fn arb_number() -> impl Strategy<Value = String> {
    "[A-Z]{2}-[A-Z0-9]{3,5}"
}

pub fn arb_plane() -> impl Strategy<Value = Plane> {
    prop_oneof![
        (arb_variant(), arb_number(), 0..600u32)
            .prop_map(|(v, n, count)| passenger(v, &n, count)),
        (arb_variant(), arb_number(), 0..150_000u32)
            .prop_map(|(v, n, kg)| cargo(v, &n, f64::from(kg))),
        (arb_variant(), arb_number(), any::<u16>())
            .prop_map(|(v, n, kg)| cargo(v, &n, f64::from(kg) + 0.25)),
    ]
}
