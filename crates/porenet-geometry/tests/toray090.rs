//! The Toray 090 preset on a small cubic network.

use std::rc::Rc;

use porenet_core::RegenMode;
use porenet_geometry::toray090;
use porenet_geometry::toray090::{SIZE_LOC, SIZE_OFFSET};
use porenet_models::{GeometryConfig, ObjectRef, RegenRequest, Registry};
use porenet_test_utils::cubic_network;

const PROPS: [&str; 10] = [
    "pore.seed",
    "throat.seed",
    "pore.diameter",
    "pore.area",
    "pore.volume",
    "throat.diameter",
    "throat.length",
    "throat.volume",
    "throat.area",
    "throat.surface_area",
];

fn toray(registry: &Rc<Registry>, seed: Option<u64>) -> (ObjectRef, ObjectRef) {
    let net = cubic_network(registry, "net", 4).unwrap();
    let geo = ObjectRef::geometry(registry, "gdl", &net, GeometryConfig::all(&net)).unwrap();
    toray090(&geo, seed).unwrap();
    (net, geo)
}

#[test]
fn declares_ten_models_in_dependency_order() {
    let registry = Registry::new();
    let (_net, geo) = toray(&registry, Some(42));
    let models = geo.models();
    assert_eq!(models.keys(), PROPS);
    assert_eq!(
        models.get("pore.seed").unwrap().regen_mode(),
        RegenMode::Constant
    );
    for name in &PROPS[1..] {
        assert_eq!(models.get(name).unwrap().regen_mode(), RegenMode::Normal);
    }
}

#[test]
fn every_property_is_written_with_the_right_length() {
    let registry = Registry::new();
    let (net, geo) = toray(&registry, Some(42));
    for name in PROPS {
        let values = geo.floats(name).unwrap();
        let expected = if name.starts_with("pore.") {
            net.pore_count()
        } else {
            net.throat_count()
        };
        assert_eq!(values.len(), expected, "{name}");
        assert!(values.iter().all(|v| v.is_finite()), "{name}");
    }
}

#[test]
fn sizes_are_physical() {
    let registry = Registry::new();
    let (_net, geo) = toray(&registry, Some(7));
    let seeds = geo.floats("pore.seed").unwrap();
    assert!(seeds.iter().all(|s| (0.0..0.95).contains(s)));
    let diameters = geo.floats("pore.diameter").unwrap();
    assert!(diameters.iter().all(|d| *d >= SIZE_LOC + SIZE_OFFSET));
    // 100 µm spacing leaves room for ~20 µm pores
    let lengths = geo.floats("throat.length").unwrap();
    assert!(lengths.iter().all(|l| *l > 0.0));
}

#[test]
fn same_seed_same_geometry() {
    let a = Registry::new();
    let b = Registry::new();
    let (_na, ga) = toray(&a, Some(11));
    let (_nb, gb) = toray(&b, Some(11));
    for name in PROPS {
        assert_eq!(ga.floats(name).unwrap(), gb.floats(name).unwrap(), "{name}");
    }
}

#[test]
fn accepts_seeds_across_the_unsigned_range() {
    for seed in [u64::MAX, 1 << 63] {
        let registry = Registry::new();
        let (_net, geo) = toray(&registry, Some(seed));
        let seeds = geo.floats("pore.seed").unwrap();
        assert!(seeds.iter().all(|s| (0.0..0.95).contains(s)));
    }
}

#[test]
fn regenerate_keeps_the_seed_field() {
    let registry = Registry::new();
    let (_net, geo) = toray(&registry, None);
    let seeds = geo.floats("pore.seed").unwrap();
    let diameters = geo.floats("pore.diameter").unwrap();

    let report = geo.regenerate(RegenRequest::all()).unwrap();
    assert_eq!(report.regenerated, &PROPS[1..]);
    assert_eq!(geo.floats("pore.seed").unwrap(), seeds);
    assert_eq!(geo.floats("pore.diameter").unwrap(), diameters);
}

#[test]
fn changing_an_argument_propagates_downstream() {
    let registry = Registry::new();
    let (_net, geo) = toray(&registry, Some(3));
    let volume = geo.floats("pore.volume").unwrap();

    geo.models()
        .set_arg("pore.diameter", "psd_offset", 20e-6)
        .unwrap();
    geo.regenerate(RegenRequest::exclude(["throat.seed"]))
        .unwrap();
    let bigger = geo.floats("pore.volume").unwrap();
    assert!(volume.iter().zip(&bigger).all(|(a, b)| b > a));
}

#[test]
fn describe_lists_every_model() {
    let registry = Registry::new();
    let (_net, geo) = toray(&registry, Some(1));
    let text = geo.models().to_string();
    assert!(text.contains("0     pore.seed                      constant"));
    assert!(text.contains("9     throat.surface_area            normal"));

    let entry = geo.models().get("pore.diameter").unwrap().to_string();
    assert!(entry.contains("geometry.pore_diameter.sphere"));
    assert!(entry.contains("psd_name             weibull_min / (---)"));
    assert!(entry.contains("pore_seed            pore.seed / (pore.seed)"));
}
