//! Reusable estimation-function fixtures.
//!
//! - [`ConstModel`]: fills every element with a constant.
//! - [`CountingModel`]: fills with its own call index, so recomputation is
//!   visible in the stored value.
//! - [`ScaleModel`]: `factor * source^power` of another owner property.
//! - [`FailingModel`]: fails deterministically after N calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use porenet_core::{ModelError, PropertyValue};
use porenet_models::{ModelArgs, ModelContext, ModelRef, ParamSpec, PropertyModel};

/// Writes a constant to every element. Declares `value` with default 1.0.
pub struct ConstModel {
    pub name: String,
}

impl ConstModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn shared(name: impl Into<String>) -> ModelRef {
        Arc::new(Self::new(name))
    }
}

impl PropertyModel for ConstModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::optional("value", 1.0)]
    }

    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        let value = args.float("value")?;
        Ok(PropertyValue::Float(vec![value; ctx.element_count()]))
    }
}

/// Fills every element with the number of previous calls.
///
/// The first evaluation writes 0.0, the second 1.0 and so on.
pub struct CountingModel {
    pub name: String,
    call_count: AtomicUsize,
}

impl CountingModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `evaluate()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Reset the call counter.
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::Relaxed);
    }
}

impl PropertyModel for CountingModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &ModelContext, _args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(PropertyValue::Float(vec![n as f64; ctx.element_count()]))
    }
}

/// `factor * source^power`, elementwise, from an owner float property.
///
/// Declares `source` (required), `factor` (1.0) and `power` (1.0).
pub struct ScaleModel {
    pub name: String,
    call_count: AtomicUsize,
}

impl ScaleModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl PropertyModel for ScaleModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required("source"),
            ParamSpec::optional("factor", 1.0),
            ParamSpec::optional("power", 1.0),
        ]
    }

    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        let source = ctx.floats(args.str("source")?)?;
        let factor = args.float("factor")?;
        let power = args.float("power")?;
        Ok(PropertyValue::Float(
            source.iter().map(|x| factor * x.powf(power)).collect(),
        ))
    }
}

/// Succeeds `succeed_count` times (writing zeros), then fails.
pub struct FailingModel {
    pub name: String,
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingModel {
    pub fn new(name: impl Into<String>, succeed_count: usize) -> Self {
        Self {
            name: name.into(),
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl PropertyModel for FailingModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &ModelContext, _args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(ModelError::ExecutionFailed {
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        Ok(PropertyValue::Float(vec![0.0; ctx.element_count()]))
    }
}
