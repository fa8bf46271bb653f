//! A single bound computation: estimation function plus resolved arguments.

use std::fmt;

use porenet_core::{ArgValue, CollectionId, ModelError, PropertyValue, RegenError, RegenMode};

use crate::args::ModelArgs;
use crate::collection;
use crate::context::ModelContext;
use crate::object::ObjectRef;
use crate::registry::Registry;
use crate::schema::ModelRef;

const RULE: &str = "------------------------------------------------------------";

/// An estimation function bound to a property name, a regeneration policy
/// and a fully resolved argument set.
///
/// The property name and function are fixed at construction; arguments can
/// be changed afterwards with [`set_arg`](Self::set_arg). An entry does not
/// own its owning object: [`regenerate`](Self::regenerate) finds it through
/// the registry.
#[derive(Clone)]
pub struct ModelEntry {
    propname: String,
    model: ModelRef,
    regen_mode: RegenMode,
    args: ModelArgs,
    collection: Option<CollectionId>,
}

impl ModelEntry {
    /// Bind `model` to `propname`, merging declared defaults with `explicit`.
    ///
    /// # Errors
    ///
    /// [`ModelError::MissingArgument`] if a parameter without a default
    /// is absent from `explicit`.
    pub fn new(
        model: ModelRef,
        propname: impl Into<String>,
        regen_mode: RegenMode,
        explicit: &ModelArgs,
    ) -> Result<Self, ModelError> {
        let args = ModelArgs::resolve(&model.params(), explicit)?;
        Ok(Self {
            propname: propname.into(),
            model,
            regen_mode,
            args,
            collection: None,
        })
    }

    /// Target property name.
    pub fn propname(&self) -> &str {
        &self.propname
    }

    /// The bound estimation function.
    pub fn model(&self) -> &ModelRef {
        &self.model
    }

    /// Qualified name of the bound function.
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Regeneration policy.
    pub fn regen_mode(&self) -> RegenMode {
        self.regen_mode
    }

    /// The resolved arguments.
    pub fn args(&self) -> &ModelArgs {
        &self.args
    }

    /// The collection this entry is stored in, if any.
    pub fn collection(&self) -> Option<CollectionId> {
        self.collection
    }

    /// Replace one argument, returning the previous value.
    pub fn set_arg(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Option<ArgValue> {
        self.args.set(name, value)
    }

    pub(crate) fn attach(&mut self, propname: &str, collection: CollectionId) {
        self.propname = propname.to_string();
        self.collection = Some(collection);
    }

    /// Call the function with the stored arguments. Pure: nothing is written.
    pub fn invoke(&self, ctx: &ModelContext) -> Result<PropertyValue, ModelError> {
        self.model.evaluate(ctx, &self.args)
    }

    /// Resolve the owner, derive its context and invoke.
    ///
    /// # Errors
    ///
    /// [`RegenError::OwnershipAmbiguous`] if more than one object holds this
    /// entry's collection, [`RegenError::OwnershipMissing`] if none does, and
    /// [`RegenError::ModelFailed`] if the function fails.
    pub fn regenerate(&self, registry: &Registry) -> Result<PropertyValue, RegenError> {
        let collection = self.collection.ok_or(RegenError::OwnershipMissing { collection: None })?;
        let owner = collection::find_owner(registry, collection)?;
        self.evaluate_for(&owner, registry)
    }

    pub(crate) fn evaluate_for(
        &self,
        owner: &ObjectRef,
        registry: &Registry,
    ) -> Result<PropertyValue, RegenError> {
        ModelContext::derive(owner, registry, &self.propname)
            .and_then(|ctx| self.invoke(&ctx))
            .map_err(|source| RegenError::ModelFailed {
                propname: self.propname.clone(),
                model: self.model.name().to_string(),
                source,
            })
    }

    /// Listing of the function name and each argument with its default.
    ///
    /// Arguments are sorted by name; those without a declared default show
    /// `---`.
    pub fn describe(&self) -> String {
        let params = self.model.params();
        let default_of = |name: &str| -> String {
            params
                .iter()
                .find(|p| p.name == name)
                .and_then(|p| p.default.as_ref())
                .map_or_else(|| "---".to_string(), ToString::to_string)
        };

        let mut rows: Vec<(String, String, String)> = self
            .args
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string(), default_of(name)))
            .collect();
        rows.push((
            "regen_mode".to_string(),
            self.regen_mode.to_string(),
            "---".to_string(),
        ));
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = String::new();
        out.push_str(RULE);
        out.push('\n');
        out.push_str(self.model.name());
        out.push('\n');
        out.push_str(RULE);
        out.push('\n');
        out.push_str(&format!("{:<20} {}\n", "Argument Name", "Value / (Default)"));
        out.push_str(RULE);
        out.push('\n');
        for (name, value, default) in rows {
            out.push_str(&format!("{name:<20} {value} / ({default})\n"));
        }
        out.push_str(RULE);
        out
    }
}

impl fmt::Display for ModelEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl fmt::Debug for ModelEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelEntry")
            .field("propname", &self.propname)
            .field("model", &self.model.name())
            .field("regen_mode", &self.regen_mode)
            .field("args", &self.args)
            .field("collection", &self.collection)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{model_fn, ParamSpec};

    fn seeded() -> ModelRef {
        model_fn(
            "geometry.pore_misc.random",
            vec![
                ParamSpec::optional("seed", ArgValue::None),
                ParamSpec::optional("num_range", [0.0, 1.0]),
            ],
            |ctx, _| Ok(PropertyValue::Float(vec![0.0; ctx.element_count()])),
        )
    }

    #[test]
    fn defaults_merge_with_explicit() {
        let entry = ModelEntry::new(
            seeded(),
            "pore.seed",
            RegenMode::Normal,
            &ModelArgs::new().with("seed", 1i64),
        )
        .unwrap();
        assert_eq!(entry.args().get("seed"), Some(&ArgValue::Int(1)));
        assert_eq!(
            entry.args().get("num_range"),
            Some(&ArgValue::FloatList(vec![0.0, 1.0]))
        );
        assert!(entry.collection().is_none());
    }

    #[test]
    fn describe_lists_values_and_defaults() {
        let entry = ModelEntry::new(
            seeded(),
            "pore.seed",
            RegenMode::Normal,
            &ModelArgs::new().with("seed", 1i64),
        )
        .unwrap();
        let text = entry.describe();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "geometry.pore_misc.random");
        assert_eq!(lines[3], "Argument Name        Value / (Default)");
        assert_eq!(lines[5], "num_range            [0, 1] / ([0, 1])");
        assert_eq!(lines[6], "regen_mode           normal / (---)");
        assert_eq!(lines[7], "seed                 1 / (None)");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn detached_entry_has_no_owner() {
        let entry = ModelEntry::new(seeded(), "pore.seed", RegenMode::Normal, &ModelArgs::new())
            .unwrap();
        let registry = Registry::new();
        assert_eq!(
            entry.regenerate(&registry).unwrap_err(),
            RegenError::OwnershipMissing { collection: None }
        );
    }
}
