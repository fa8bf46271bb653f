//! Miscellaneous pore models: random seeds and constants.

use porenet_core::{ModelError, PropertyValue};
use porenet_models::{ModelArgs, ModelContext, ParamSpec, PropertyModel};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform random values in `num_range`, one per element.
///
/// With `seed = None` a fresh seed is drawn from the thread RNG, so the
/// values differ between runs. A fixed seed gives identical values for
/// identical element counts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Random;

impl PropertyModel for Random {
    fn name(&self) -> &str {
        "geometry.pore_misc.random"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::optional("seed", Option::<u64>::None),
            ParamSpec::optional("num_range", [0.0, 1.0]),
        ]
    }

    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        let seed = args
            .opt_u64("seed")?
            .unwrap_or_else(|| rand::rng().random::<u64>());
        let [lo, hi] = range(args, "num_range")?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let values = (0..ctx.element_count())
            .map(|_| lo + (hi - lo) * rng.random::<f64>())
            .collect();
        Ok(PropertyValue::Float(values))
    }
}

fn range(args: &ModelArgs, param: &str) -> Result<[f64; 2], ModelError> {
    match args.float_list(param)? {
        &[lo, hi] if lo <= hi => Ok([lo, hi]),
        other => Err(ModelError::InvalidArgument {
            param: param.to_string(),
            reason: format!("expected [min, max], got {other:?}"),
        }),
    }
}

/// The same `value` for every element.
#[derive(Clone, Copy, Debug, Default)]
pub struct Constant;

impl PropertyModel for Constant {
    fn name(&self) -> &str {
        "geometry.pore_misc.constant"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::required("value")]
    }

    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        let value = args.float("value")?;
        Ok(PropertyValue::Float(vec![value; ctx.element_count()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use porenet_models::{NetworkConfig, ObjectRef, Registry};

    fn ctx(n: usize) -> (std::rc::Rc<Registry>, ModelContext) {
        let registry = Registry::new();
        let config = NetworkConfig {
            coords: (0..n).map(|i| [i as f64, 0.0, 0.0]).collect(),
            conns: (1..n).map(|i| [i - 1, i]).collect(),
        };
        let net = ObjectRef::network(&registry, "net", config).unwrap();
        let ctx = ModelContext::derive(&net, &registry, "pore.seed").unwrap();
        (registry, ctx)
    }

    fn seeded(seed: i64, range: [f64; 2]) -> ModelArgs {
        ModelArgs::resolve(
            &Random.params(),
            &ModelArgs::new().with("seed", seed).with("num_range", range),
        )
        .unwrap()
    }

    #[test]
    fn random_stays_in_range_and_is_reproducible() {
        let (_registry, ctx) = ctx(50);
        let args = seeded(7, [0.0, 0.95]);
        let a = Random.evaluate(&ctx, &args).unwrap();
        let b = Random.evaluate(&ctx, &args).unwrap();
        assert_eq!(a, b);
        let values = a.as_floats().unwrap();
        assert_eq!(values.len(), 50);
        assert!(values.iter().all(|v| (0.0..0.95).contains(v)));
    }

    #[test]
    fn different_seeds_differ() {
        let (_registry, ctx) = ctx(20);
        let a = Random.evaluate(&ctx, &seeded(1, [0.0, 1.0])).unwrap();
        let b = Random.evaluate(&ctx, &seeded(2, [0.0, 1.0])).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let (_registry, ctx) = ctx(3);
        let err = Random.evaluate(&ctx, &seeded(1, [1.0, 0.0])).unwrap_err();
        assert!(matches!(err, ModelError::InvalidArgument { .. }));
    }

    #[test]
    fn constant_fills() {
        let (_registry, ctx) = ctx(4);
        let args = ModelArgs::new().with("value", 2.5);
        assert_eq!(
            Constant.evaluate(&ctx, &args).unwrap(),
            PropertyValue::Float(vec![2.5; 4])
        );
    }
}
