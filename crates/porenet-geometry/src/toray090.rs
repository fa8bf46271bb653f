//! Geometry preset for a Toray TGP-H-090 gas diffusion layer.

use std::sync::Arc;

use porenet_core::{RegenError, RegenMode};
use porenet_models::{ModelArgs, ObjectRef};

use crate::pore_misc::Random;
use crate::pore_size::{SphereDiameter, SphereVolume, SphericalArea};
use crate::throat_misc::Neighbor;
use crate::throat_size::{
    CylinderArea, CylinderDiameter, CylinderSurfaceArea, CylinderVolume, StraightLength,
};

/// Weibull shape of the fiber-gap size distribution.
pub const SIZE_SHAPE: f64 = 2.77;
/// Weibull location, in meters.
pub const SIZE_LOC: f64 = 6.9e-7;
/// Weibull scale, in meters.
pub const SIZE_SCALE: f64 = 9.8e-6;
/// Added to every sampled diameter, in meters.
pub const SIZE_OFFSET: f64 = 10e-6;

/// Declare the Toray 090 model chain on `geometry`.
///
/// Ten properties, in dependency order: `pore.seed` (constant, so the
/// random field survives later regenerates), `throat.seed`,
/// `pore.diameter`, `pore.area`, `pore.volume`, `throat.diameter`,
/// `throat.length`, `throat.volume`, `throat.area` and
/// `throat.surface_area`. Each is computed as it is added.
///
/// `seed = None` draws a fresh random field.
pub fn toray090(geometry: &ObjectRef, seed: Option<u64>) -> Result<(), RegenError> {
    let psd = |prefix: &str| {
        ModelArgs::new()
            .with(format!("{prefix}_name"), "weibull_min")
            .with(format!("{prefix}_shape"), SIZE_SHAPE)
            .with(format!("{prefix}_loc"), SIZE_LOC)
            .with(format!("{prefix}_scale"), SIZE_SCALE)
            .with(format!("{prefix}_offset"), SIZE_OFFSET)
    };

    geometry.add_model(
        "pore.seed",
        Arc::new(Random),
        RegenMode::Constant,
        ModelArgs::new()
            .with("num_range", [0.0, 0.95])
            .with("seed", seed),
    )?;
    geometry.add_model(
        "throat.seed",
        Arc::new(Neighbor),
        RegenMode::Normal,
        ModelArgs::new()
            .with("pore_prop", "pore.seed")
            .with("mode", "min"),
    )?;
    geometry.add_model(
        "pore.diameter",
        Arc::new(SphereDiameter),
        RegenMode::Normal,
        psd("psd"),
    )?;
    geometry.add_model(
        "pore.area",
        Arc::new(SphericalArea),
        RegenMode::Normal,
        ModelArgs::new(),
    )?;
    geometry.add_model(
        "pore.volume",
        Arc::new(SphereVolume),
        RegenMode::Normal,
        ModelArgs::new(),
    )?;
    geometry.add_model(
        "throat.diameter",
        Arc::new(CylinderDiameter),
        RegenMode::Normal,
        psd("tsd"),
    )?;
    geometry.add_model(
        "throat.length",
        Arc::new(StraightLength),
        RegenMode::Normal,
        ModelArgs::new(),
    )?;
    geometry.add_model(
        "throat.volume",
        Arc::new(CylinderVolume),
        RegenMode::Normal,
        ModelArgs::new(),
    )?;
    geometry.add_model(
        "throat.area",
        Arc::new(CylinderArea),
        RegenMode::Normal,
        ModelArgs::new(),
    )?;
    geometry.add_model(
        "throat.surface_area",
        Arc::new(CylinderSurfaceArea),
        RegenMode::Normal,
        ModelArgs::new(),
    )
}
