//! Pore and throat size estimation functions for porenet geometries.
//!
//! Each model is a unit struct implementing
//! [`PropertyModel`](porenet_models::PropertyModel) with a declared
//! parameter schema. Models read their inputs from the owning object by
//! property name (`pore_diameter = "pore.diameter"` and so on), so a chain
//! of models is only consistent when it is declared in dependency order.
//!
//! # Model library
//!
//! | Module | Models |
//! |--------|--------|
//! | [`pore_misc`] | [`Random`](pore_misc::Random), [`Constant`](pore_misc::Constant) |
//! | [`throat_misc`] | [`Neighbor`](throat_misc::Neighbor) |
//! | [`pore_size`] | [`SphereDiameter`](pore_size::SphereDiameter), [`SphericalArea`](pore_size::SphericalArea), [`CubicArea`](pore_size::CubicArea), [`SphereVolume`](pore_size::SphereVolume) |
//! | [`throat_size`] | [`CylinderDiameter`](throat_size::CylinderDiameter), [`StraightLength`](throat_size::StraightLength), [`CylinderVolume`](throat_size::CylinderVolume), [`CylinderArea`](throat_size::CylinderArea), [`CylinderSurfaceArea`](throat_size::CylinderSurfaceArea) |
//!
//! [`toray090`] declares the full chain for a Toray TGP-H-090 gas diffusion
//! layer.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod distributions;
pub mod pore_misc;
pub mod pore_size;
pub mod throat_misc;
pub mod throat_size;
pub mod toray090;

pub use toray090::toray090;

use porenet_core::{ModelError, PropertyValue};
use porenet_models::{ModelArgs, ModelContext};

/// The owner float property named by the string argument `param`.
pub(crate) fn owner_floats(
    ctx: &ModelContext,
    args: &ModelArgs,
    param: &str,
) -> Result<Vec<f64>, ModelError> {
    ctx.floats(args.str(param)?)
}

/// Elementwise `f(a, b)` over two owner properties of equal length.
pub(crate) fn zip_owner_floats(
    ctx: &ModelContext,
    args: &ModelArgs,
    a: &str,
    b: &str,
    f: impl Fn(f64, f64) -> f64,
) -> Result<PropertyValue, ModelError> {
    let xs = owner_floats(ctx, args, a)?;
    let ys = owner_floats(ctx, args, b)?;
    if xs.len() != ys.len() {
        return Err(ModelError::ExecutionFailed {
            reason: format!(
                "'{}' has {} values but '{}' has {}",
                args.str(a)?,
                xs.len(),
                args.str(b)?,
                ys.len()
            ),
        });
    }
    Ok(PropertyValue::Float(
        xs.into_iter().zip(ys).map(|(x, y)| f(x, y)).collect(),
    ))
}
