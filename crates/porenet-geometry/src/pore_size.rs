//! Pore diameter, area and volume models.

use std::f64::consts::PI;

use porenet_core::{ModelError, PropertyValue};
use porenet_models::{ModelArgs, ModelContext, ParamSpec, PropertyModel};

use crate::distributions;
use crate::owner_floats;

/// Diameter from a size distribution evaluated at each pore's seed.
///
/// `ppf(pore_seed) + psd_offset`, with the distribution named by
/// `psd_name` (see [`distributions::Distribution`]).
#[derive(Clone, Copy, Debug, Default)]
pub struct SphereDiameter;

impl PropertyModel for SphereDiameter {
    fn name(&self) -> &str {
        "geometry.pore_diameter.sphere"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required("psd_name"),
            ParamSpec::required("psd_shape"),
            ParamSpec::required("psd_loc"),
            ParamSpec::required("psd_scale"),
            ParamSpec::optional("pore_seed", "pore.seed"),
            ParamSpec::optional("psd_offset", 0.0),
        ]
    }

    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        let seeds = owner_floats(ctx, args, "pore_seed")?;
        let offset = args.float("psd_offset")?;
        let sizes = distributions::ppf(
            "psd_name",
            args.str("psd_name")?,
            args.float("psd_shape")?,
            args.float("psd_loc")?,
            args.float("psd_scale")?,
            &seeds,
        )?;
        Ok(PropertyValue::Float(
            sizes.into_iter().map(|d| d + offset).collect(),
        ))
    }
}

/// Cross-sectional area of a sphere: `π/4 · d²`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SphericalArea;

impl PropertyModel for SphericalArea {
    fn name(&self) -> &str {
        "geometry.pore_area.spherical"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::optional("pore_diameter", "pore.diameter")]
    }

    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        let d = owner_floats(ctx, args, "pore_diameter")?;
        Ok(PropertyValue::Float(
            d.iter().map(|d| PI / 4.0 * d * d).collect(),
        ))
    }
}

/// Face area of a cube with edge `d`: `d²`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CubicArea;

impl PropertyModel for CubicArea {
    fn name(&self) -> &str {
        "geometry.pore_area.cubic"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::optional("pore_diameter", "pore.diameter")]
    }

    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        let d = owner_floats(ctx, args, "pore_diameter")?;
        Ok(PropertyValue::Float(d.iter().map(|d| d * d).collect()))
    }
}

/// Sphere volume: `π/6 · d³`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SphereVolume;

impl PropertyModel for SphereVolume {
    fn name(&self) -> &str {
        "geometry.pore_volume.sphere"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::optional("pore_diameter", "pore.diameter")]
    }

    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        let d = owner_floats(ctx, args, "pore_diameter")?;
        Ok(PropertyValue::Float(
            d.iter().map(|d| PI / 6.0 * d.powi(3)).collect(),
        ))
    }
}
