//! Miscellaneous throat models.

use std::str::FromStr;

use porenet_core::{ModelError, PropertyValue};
use porenet_models::{ModelArgs, ModelContext, ParamSpec, PropertyModel};

/// How [`Neighbor`] combines the two pore values of a throat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NeighborMode {
    /// Smaller of the two.
    #[default]
    Min,
    /// Larger of the two.
    Max,
    /// Arithmetic mean.
    Mean,
}

impl NeighborMode {
    fn combine(self, a: f64, b: f64) -> f64 {
        if a.is_nan() || b.is_nan() {
            return f64::NAN;
        }
        match self {
            Self::Min => a.min(b),
            Self::Max => a.max(b),
            Self::Mean => (a + b) / 2.0,
        }
    }
}

impl FromStr for NeighborMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "mean" => Ok(Self::Mean),
            other => Err(format!("expected min, max or mean, got '{other}'")),
        }
    }
}

/// A throat value taken from the pores it connects.
///
/// Reads `pore_prop` from the owner in network pore indexing; pores the
/// owner does not cover are NaN, and so are throats touching them.
#[derive(Clone, Copy, Debug, Default)]
pub struct Neighbor;

impl PropertyModel for Neighbor {
    fn name(&self) -> &str {
        "geometry.throat_misc.neighbor"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::optional("pore_prop", "pore.seed"),
            ParamSpec::optional("mode", "min"),
        ]
    }

    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        let mode: NeighborMode = args.str("mode")?.parse().map_err(|reason| {
            ModelError::InvalidArgument {
                param: "mode".to_string(),
                reason,
            }
        })?;
        let pores = ctx.pore_values(args.str("pore_prop")?)?;
        let values = ctx
            .throat_conns()?
            .into_iter()
            .map(|[a, b]| mode.combine(pores[a], pores[b]))
            .collect();
        Ok(PropertyValue::Float(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use porenet_models::{GeometryConfig, NetworkConfig, ObjectRef, Registry};

    fn args(mode: &str) -> ModelArgs {
        ModelArgs::resolve(&Neighbor.params(), &ModelArgs::new().with("mode", mode)).unwrap()
    }

    #[test]
    fn combines_connected_pore_values() {
        let registry = Registry::new();
        let config = NetworkConfig {
            coords: vec![[0.0; 3], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            conns: vec![[0, 1], [1, 2]],
        };
        let net = ObjectRef::network(&registry, "net", config).unwrap();
        let geo = ObjectRef::geometry(&registry, "geo", &net, GeometryConfig::all(&net)).unwrap();
        geo.set("pore.seed", vec![0.2, 0.6, 0.4]);
        let ctx = ModelContext::derive(&geo, &registry, "throat.seed").unwrap();

        let min = Neighbor.evaluate(&ctx, &args("min")).unwrap();
        let max = Neighbor.evaluate(&ctx, &args("max")).unwrap();
        assert_eq!(min.as_floats().unwrap(), &[0.2, 0.4]);
        assert_eq!(max.as_floats().unwrap(), &[0.6, 0.6]);
        let mean = Neighbor.evaluate(&ctx, &args("mean")).unwrap();
        assert!((mean.as_floats().unwrap()[0] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn uncovered_pores_give_nan() {
        let registry = Registry::new();
        let config = NetworkConfig {
            coords: vec![[0.0; 3], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            conns: vec![[0, 1], [1, 2]],
        };
        let net = ObjectRef::network(&registry, "net", config).unwrap();
        let geo =
            ObjectRef::geometry(&registry, "geo", &net, GeometryConfig::new(vec![0, 1], vec![0, 1]))
                .unwrap();
        geo.set("pore.seed", vec![0.2, 0.6]);
        let ctx = ModelContext::derive(&geo, &registry, "throat.seed").unwrap();
        let values = Neighbor.evaluate(&ctx, &args("min")).unwrap();
        let values = values.as_floats().unwrap();
        assert_eq!(values[0], 0.2);
        assert!(values[1].is_nan());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!("median".parse::<NeighborMode>().is_err());
        assert!(NeighborMode::Min.combine(1.0, f64::NAN).is_nan());
    }
}
