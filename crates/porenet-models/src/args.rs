//! Keyword arguments bound to a model entry.

use indexmap::IndexMap;
use porenet_core::{ArgValue, ModelError};

use crate::schema::ParamSpec;

/// An ordered set of keyword arguments.
///
/// Used both for the explicit values a caller passes to
/// [`Models::add`](crate::Models::add) and for the fully resolved argument
/// set stored on a [`ModelEntry`](crate::ModelEntry).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelArgs {
    values: IndexMap<String, ArgValue>,
}

impl ModelArgs {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Insert or replace an argument, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Option<ArgValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Look up an argument.
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// Whether an argument is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Combine a parameter schema with explicitly supplied values.
    ///
    /// Explicit values override declared defaults; declared defaults that
    /// are not overridden are retained. Schema parameters come first in
    /// declaration order, followed by explicit extras the schema does not
    /// name (those are passed through untouched).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingArgument`] for a required parameter
    /// that was not supplied.
    pub fn resolve(params: &[ParamSpec], explicit: &ModelArgs) -> Result<Self, ModelError> {
        let mut values = IndexMap::with_capacity(params.len() + explicit.len());
        for param in params {
            let value = match (explicit.get(&param.name), &param.default) {
                (Some(v), _) => v.clone(),
                (None, Some(default)) => default.clone(),
                (None, None) => {
                    return Err(ModelError::MissingArgument {
                        param: param.name.clone(),
                    })
                }
            };
            values.insert(param.name.clone(), value);
        }
        for (name, value) in &explicit.values {
            if !values.contains_key(name) {
                values.insert(name.clone(), value.clone());
            }
        }
        Ok(Self { values })
    }

    // ── Typed accessors for estimation functions ───────────────────

    fn require(&self, name: &str) -> Result<&ArgValue, ModelError> {
        self.values
            .get(name)
            .ok_or_else(|| ModelError::MissingArgument {
                param: name.to_string(),
            })
    }

    fn invalid(name: &str, expected: &str, got: &ArgValue) -> ModelError {
        ModelError::InvalidArgument {
            param: name.to_string(),
            reason: format!("expected {expected}, got {got}"),
        }
    }

    /// A numeric argument (integers are widened).
    pub fn float(&self, name: &str) -> Result<f64, ModelError> {
        let v = self.require(name)?;
        v.as_f64().ok_or_else(|| Self::invalid(name, "a number", v))
    }

    /// An integer argument.
    pub fn int(&self, name: &str) -> Result<i64, ModelError> {
        let v = self.require(name)?;
        v.as_i64().ok_or_else(|| Self::invalid(name, "an integer", v))
    }

    /// A string argument.
    pub fn str(&self, name: &str) -> Result<&str, ModelError> {
        let v = self.require(name)?;
        v.as_str().ok_or_else(|| Self::invalid(name, "a string", v))
    }

    /// A boolean argument.
    pub fn bool(&self, name: &str) -> Result<bool, ModelError> {
        let v = self.require(name)?;
        v.as_bool().ok_or_else(|| Self::invalid(name, "a boolean", v))
    }

    /// A float list argument.
    pub fn float_list(&self, name: &str) -> Result<&[f64], ModelError> {
        let v = self.require(name)?;
        v.as_float_list()
            .ok_or_else(|| Self::invalid(name, "a list of numbers", v))
    }

    /// An optional non-negative integer, where [`ArgValue::None`] means unset.
    pub fn opt_u64(&self, name: &str) -> Result<Option<u64>, ModelError> {
        match self.require(name)? {
            ArgValue::None => Ok(None),
            v @ (ArgValue::Int(_) | ArgValue::UInt(_)) => v
                .as_u64()
                .map(Some)
                .ok_or_else(|| Self::invalid(name, "a non-negative integer", v)),
            v => Err(Self::invalid(name, "an integer or None", v)),
        }
    }
}

impl<K: Into<String>, V: Into<ArgValue>> FromIterator<(K, V)> for ModelArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (k, v) in iter {
            args.set(k, v);
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Vec<ParamSpec> {
        vec![ParamSpec::optional("a", 1i64), ParamSpec::optional("b", 2i64)]
    }

    #[test]
    fn explicit_overrides_default() {
        let resolved = ModelArgs::resolve(&schema(), &ModelArgs::new().with("a", 5i64)).unwrap();
        assert_eq!(resolved.int("a").unwrap(), 5);
        assert_eq!(resolved.int("b").unwrap(), 2);
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn extras_pass_through_after_schema() {
        let explicit = ModelArgs::new().with("extra", "x").with("b", 9i64);
        let resolved = ModelArgs::resolve(&schema(), &explicit).unwrap();
        let names: Vec<&str> = resolved.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", "b", "extra"]);
        assert_eq!(resolved.str("extra").unwrap(), "x");
    }

    #[test]
    fn missing_required_is_rejected() {
        let params = vec![ParamSpec::required("pore_prop")];
        let err = ModelArgs::resolve(&params, &ModelArgs::new()).unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingArgument {
                param: "pore_prop".into()
            }
        );
    }

    #[test]
    fn typed_accessors_report_mismatch() {
        let args = ModelArgs::new().with("seed", "abc").with("range", [0.0, 1.0]);
        assert!(matches!(
            args.opt_u64("seed"),
            Err(ModelError::InvalidArgument { .. })
        ));
        assert_eq!(args.float_list("range").unwrap(), &[0.0, 1.0]);
        assert!(matches!(
            args.float("nope"),
            Err(ModelError::MissingArgument { .. })
        ));
    }

    #[test]
    fn opt_u64_accepts_none() {
        let args = ModelArgs::new().with("seed", ArgValue::None);
        assert_eq!(args.opt_u64("seed").unwrap(), None);
        let args = ModelArgs::new().with("seed", 7i64);
        assert_eq!(args.opt_u64("seed").unwrap(), Some(7));
    }

    #[test]
    fn opt_u64_keeps_the_full_unsigned_range() {
        let args = ModelArgs::new().with("seed", u64::MAX);
        assert_eq!(args.opt_u64("seed").unwrap(), Some(u64::MAX));
        let args = ModelArgs::new().with("seed", -1i64);
        assert!(matches!(
            args.opt_u64("seed"),
            Err(ModelError::InvalidArgument { .. })
        ));
    }
}
