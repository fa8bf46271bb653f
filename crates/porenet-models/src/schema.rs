//! The [`PropertyModel`] trait and its declared parameter schema.
//!
//! Estimation functions are opaque pure computations from the registry's
//! point of view. Instead of introspecting a function signature at runtime,
//! each model declares its parameters ([`ParamSpec`]) up front; defaults
//! are resolved once, when the model is added to a collection.

use std::fmt;
use std::sync::Arc;

use porenet_core::{ArgValue, ModelError, PropertyValue};

use crate::args::ModelArgs;
use crate::context::ModelContext;

/// One declared parameter of an estimation function.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamSpec {
    /// Keyword name.
    pub name: String,
    /// Declared default. `None` means the caller must supply a value.
    pub default: Option<ArgValue>,
}

impl ParamSpec {
    /// A parameter with no default.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// A parameter with a declared default.
    pub fn optional(name: impl Into<String>, default: impl Into<ArgValue>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }

    /// Whether a value must be supplied explicitly.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A pure estimation function computing one property array.
///
/// # Contract
///
/// - `evaluate()` reads whatever it needs through the [`ModelContext`]
///   (owner, network, geometry, phase, physics) and returns the full value
///   for the context's property name. It never writes: storing the result
///   is the collection's job.
/// - `params()` lists every keyword the function consumes. Arguments the
///   function does not declare are still passed through and must be ignored.
///
/// # Examples
///
/// ```
/// use porenet_core::{ModelError, PropertyValue};
/// use porenet_models::{ModelArgs, ModelContext, ParamSpec, PropertyModel};
///
/// struct Fill;
///
/// impl PropertyModel for Fill {
///     fn name(&self) -> &str { "example.fill" }
///
///     fn params(&self) -> Vec<ParamSpec> {
///         vec![ParamSpec::optional("value", 1.0)]
///     }
///
///     fn evaluate(
///         &self,
///         ctx: &ModelContext,
///         args: &ModelArgs,
///     ) -> Result<PropertyValue, ModelError> {
///         let value = args.float("value")?;
///         Ok(PropertyValue::Float(vec![value; ctx.element_count()]))
///     }
/// }
///
/// assert_eq!(Fill.params()[0].name, "value");
/// ```
pub trait PropertyModel: Send + Sync + 'static {
    /// Qualified name shown in listings (e.g., `geometry.pore_size.sphere_volume`).
    fn name(&self) -> &str;

    /// Declared parameters, in declaration order.
    ///
    /// Default: no parameters.
    fn params(&self) -> Vec<ParamSpec> {
        Vec::new()
    }

    /// Compute the property value.
    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs)
        -> Result<PropertyValue, ModelError>;
}

/// Shared reference to an estimation function.
///
/// Two entries bound to the same function hold clones of the same `Arc`.
pub type ModelRef = Arc<dyn PropertyModel>;

/// Adapter turning a closure plus a parameter schema into a [`PropertyModel`].
pub struct FnModel<F> {
    name: String,
    params: Vec<ParamSpec>,
    f: F,
}

impl<F> FnModel<F>
where
    F: Fn(&ModelContext, &ModelArgs) -> Result<PropertyValue, ModelError> + Send + Sync + 'static,
{
    /// Wrap `f` under `name` with the given parameter schema.
    pub fn new(name: impl Into<String>, params: Vec<ParamSpec>, f: F) -> Self {
        Self {
            name: name.into(),
            params,
            f,
        }
    }
}

impl<F> PropertyModel for FnModel<F>
where
    F: Fn(&ModelContext, &ModelArgs) -> Result<PropertyValue, ModelError> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn params(&self) -> Vec<ParamSpec> {
        self.params.clone()
    }

    fn evaluate(&self, ctx: &ModelContext, args: &ModelArgs) -> Result<PropertyValue, ModelError> {
        (self.f)(ctx, args)
    }
}

impl<F> fmt::Debug for FnModel<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnModel")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Build a shared [`ModelRef`] from a closure.
pub fn model_fn<F>(name: impl Into<String>, params: Vec<ParamSpec>, f: F) -> ModelRef
where
    F: Fn(&ModelContext, &ModelArgs) -> Result<PropertyValue, ModelError> + Send + Sync + 'static,
{
    Arc::new(FnModel::new(name, params, f))
}
