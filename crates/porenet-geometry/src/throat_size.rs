//! Throat diameter, length, area and volume models.

use std::f64::consts::PI;

use porenet_core::{ModelError, PropertyValue};
use porenet_models::{ModelArgs, ModelContext, ParamSpec, PropertyModel};
use tracing::warn;

use crate::distributions;
use crate::{owner_floats, zip_owner_floats};

/// Diameter from a size distribution evaluated at each throat's seed.
///
/// `ppf(throat_seed) + tsd_offset`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CylinderDiameter;

impl PropertyModel for CylinderDiameter {
    fn name(&self) -> &str {
        "geometry.throat_diameter.cylinder"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required("tsd_name"),
            ParamSpec::required("tsd_shape"),
            ParamSpec::required("tsd_loc"),
            ParamSpec::required("tsd_scale"),
            ParamSpec::optional("throat_seed", "throat.seed"),
            ParamSpec::optional("tsd_offset", 0.0),
        ]
    }

    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        let seeds = owner_floats(ctx, args, "throat_seed")?;
        let offset = args.float("tsd_offset")?;
        let sizes = distributions::ppf(
            "tsd_name",
            args.str("tsd_name")?,
            args.float("tsd_shape")?,
            args.float("tsd_loc")?,
            args.float("tsd_scale")?,
            &seeds,
        )?;
        Ok(PropertyValue::Float(
            sizes.into_iter().map(|d| d + offset).collect(),
        ))
    }
}

/// Center-to-center pore distance minus the two pore radii.
///
/// Throats shorter than the radii of their pores come out negative; that is
/// logged, not rejected.
#[derive(Clone, Copy, Debug, Default)]
pub struct StraightLength;

impl PropertyModel for StraightLength {
    fn name(&self) -> &str {
        "geometry.throat_length.straight"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::optional("pore_diameter", "pore.diameter")]
    }

    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        let coords = ctx.pore_coords()?;
        let diameters = ctx.pore_values(args.str("pore_diameter")?)?;
        let lengths: Vec<f64> = ctx
            .throat_conns()?
            .into_iter()
            .map(|[a, b]| {
                let (c1, c2) = (coords[a], coords[b]);
                let e = ((c1[0] - c2[0]).powi(2) + (c1[1] - c2[1]).powi(2) + (c1[2] - c2[2]).powi(2))
                    .sqrt();
                e - (diameters[a] + diameters[b]) / 2.0
            })
            .collect();
        let negative = lengths.iter().filter(|l| **l < 0.0).count();
        if negative > 0 {
            warn!(
                owner = %ctx.owner().name(),
                negative,
                "throat lengths are negative; pores overlap"
            );
        }
        Ok(PropertyValue::Float(lengths))
    }
}

/// Cylinder volume: `π/4 · L · d²`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CylinderVolume;

impl PropertyModel for CylinderVolume {
    fn name(&self) -> &str {
        "geometry.throat_volume.cylinder"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::optional("throat_length", "throat.length"),
            ParamSpec::optional("throat_diameter", "throat.diameter"),
        ]
    }

    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        zip_owner_floats(ctx, args, "throat_length", "throat_diameter", |l, d| {
            PI / 4.0 * l * d * d
        })
    }
}

/// Cylinder cross-section: `π/4 · d²`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CylinderArea;

impl PropertyModel for CylinderArea {
    fn name(&self) -> &str {
        "geometry.throat_area.cylinder"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::optional("throat_diameter", "throat.diameter")]
    }

    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        let d = owner_floats(ctx, args, "throat_diameter")?;
        Ok(PropertyValue::Float(
            d.iter().map(|d| PI / 4.0 * d * d).collect(),
        ))
    }
}

/// Cylinder lateral surface: `π · d · L`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CylinderSurfaceArea;

impl PropertyModel for CylinderSurfaceArea {
    fn name(&self) -> &str {
        "geometry.throat_surface_area.cylinder"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::optional("throat_diameter", "throat.diameter"),
            ParamSpec::optional("throat_length", "throat.length"),
        ]
    }

    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        zip_owner_floats(ctx, args, "throat_diameter", "throat_length", |d, l| {
            PI * d * l
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use porenet_models::{GeometryConfig, NetworkConfig, ObjectRef, Registry};

    struct Fixture {
        registry: std::rc::Rc<Registry>,
        _net: ObjectRef,
        geo: ObjectRef,
    }

    fn fixture() -> Fixture {
        let registry = Registry::new();
        let config = NetworkConfig {
            coords: vec![[0.0; 3], [4.0, 0.0, 0.0], [4.0, 3.0, 0.0]],
            conns: vec![[0, 1], [1, 2]],
        };
        let net = ObjectRef::network(&registry, "net", config).unwrap();
        let geo = ObjectRef::geometry(&registry, "geo", &net, GeometryConfig::all(&net)).unwrap();
        Fixture {
            registry,
            _net: net,
            geo,
        }
    }

    fn run(model: &dyn PropertyModel, f: &Fixture, propname: &str) -> Result<Vec<f64>, ModelError> {
        let ctx = ModelContext::derive(&f.geo, &f.registry, propname).unwrap();
        let args = ModelArgs::resolve(&model.params(), &ModelArgs::new()).unwrap();
        model
            .evaluate(&ctx, &args)
            .map(|v| v.as_floats().unwrap().to_vec())
    }

    #[test]
    fn straight_length_subtracts_radii() {
        let f = fixture();
        f.geo.set("pore.diameter", vec![1.0, 1.0, 2.0]);
        let lengths = run(&StraightLength, &f, "throat.length").unwrap();
        assert_eq!(lengths, vec![3.0, 1.5]);
    }

    #[test]
    fn overlapping_pores_give_negative_length() {
        let f = fixture();
        f.geo.set("pore.diameter", vec![6.0, 6.0, 0.0]);
        let lengths = run(&StraightLength, &f, "throat.length").unwrap();
        assert_eq!(lengths[0], -2.0);
    }

    #[test]
    fn cylinder_formulas() {
        let f = fixture();
        f.geo.set("throat.diameter", vec![2.0, 1.0]);
        f.geo.set("throat.length", vec![3.0, 4.0]);
        assert_eq!(
            run(&CylinderArea, &f, "throat.area").unwrap(),
            vec![PI, PI / 4.0]
        );
        assert_eq!(
            run(&CylinderVolume, &f, "throat.volume").unwrap(),
            vec![PI / 4.0 * 3.0 * 2.0 * 2.0, PI / 4.0 * 4.0]
        );
        assert_eq!(
            run(&CylinderSurfaceArea, &f, "throat.surface_area").unwrap(),
            vec![PI * 2.0 * 3.0, PI * 4.0]
        );
    }

    #[test]
    fn mismatched_inputs_are_rejected() {
        let f = fixture();
        f.geo.set("throat.diameter", vec![2.0, 1.0]);
        f.geo.set("throat.length", vec![3.0]);
        let err = run(&CylinderVolume, &f, "throat.volume").unwrap_err();
        assert!(matches!(err, ModelError::ExecutionFailed { .. }));
    }
}
