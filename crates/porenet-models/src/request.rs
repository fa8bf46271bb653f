//! Selecting which entries a regenerate pass recomputes.

use porenet_core::{RegenMode, SelectMode};
use smallvec::SmallVec;

/// The property list and selection mode passed to
/// [`Models::regenerate`](crate::Models::regenerate).
///
/// An empty inclusive list means "everything swept by default"; an empty
/// exclude list selects the complement of that sweep.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegenRequest {
    /// Named properties. Duplicates are allowed and collapse.
    pub props: SmallVec<[String; 4]>,
    /// How `props` is interpreted.
    pub mode: SelectMode,
}

impl RegenRequest {
    /// Every entry swept by default (`normal` and `deferred`).
    pub fn all() -> Self {
        Self::default()
    }

    /// Exactly the named properties, on-demand ones included.
    pub fn only<I, S>(props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            props: props.into_iter().map(Into::into).collect(),
            mode: SelectMode::Inclusive,
        }
    }

    /// Every non-`constant` entry except the named properties, `on_demand`
    /// ones included.
    pub fn exclude<I, S>(props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            props: props.into_iter().map(Into::into).collect(),
            mode: SelectMode::Exclude,
        }
    }

    /// Whether the request names no properties.
    pub fn is_all(&self) -> bool {
        self.props.is_empty()
    }

    fn names(&self, name: &str) -> bool {
        self.props.iter().any(|p| p == name)
    }

    /// Materialize the working set against a collection's current order.
    ///
    /// `order` lists every key with its policy, in collection order. The
    /// result is computed in full before anything is run:
    ///
    /// - inclusive, empty: every `normal` and `deferred` key;
    /// - inclusive: every named key;
    /// - exclude: every key not named;
    /// - exclude, empty: every key outside the empty request's sweep,
    ///   i.e. the `on_demand` keys.
    ///
    /// `constant` keys are dropped from every working set. `run` follows
    /// `order`, never the order of the request. Named keys that are absent
    /// from `order` are reported in `unknown`, once each.
    pub fn plan<K: AsRef<str>>(&self, order: &[(K, RegenMode)]) -> RegenPlan {
        let run = order
            .iter()
            .filter(|(key, mode)| {
                let key: &str = key.as_ref();
                if mode.is_frozen() {
                    return false;
                }
                match (self.mode, self.is_all()) {
                    (SelectMode::Inclusive, true) => mode.swept_by_default(),
                    (SelectMode::Inclusive, false) => self.names(key),
                    (SelectMode::Exclude, true) => !mode.swept_by_default(),
                    (SelectMode::Exclude, false) => !self.names(key),
                }
            })
            .map(|(key, _)| {
                let key: &str = key.as_ref();
                key.to_string()
            })
            .collect();

        let mut unknown: Vec<String> = Vec::new();
        for name in &self.props {
            let present = order.iter().any(|(key, _)| {
                let key: &str = key.as_ref();
                key == name.as_str()
            });
            if !present && !unknown.contains(name) {
                unknown.push(name.clone());
            }
        }
        RegenPlan { run, unknown }
    }
}

impl From<&str> for RegenRequest {
    /// A single name, or every default entry for `""`.
    fn from(prop: &str) -> Self {
        if prop.is_empty() {
            Self::all()
        } else {
            Self::only([prop])
        }
    }
}

impl From<String> for RegenRequest {
    fn from(prop: String) -> Self {
        Self::from(prop.as_str())
    }
}

impl From<Vec<String>> for RegenRequest {
    fn from(props: Vec<String>) -> Self {
        Self::only(props)
    }
}

impl From<&[&str]> for RegenRequest {
    fn from(props: &[&str]) -> Self {
        Self::only(props.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for RegenRequest {
    fn from(props: [&str; N]) -> Self {
        Self::only(props)
    }
}

/// A materialized working set. See [`RegenRequest::plan`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegenPlan {
    /// Keys to recompute, in collection order.
    pub run: Vec<String>,
    /// Requested names the collection does not contain.
    pub unknown: Vec<String>,
}

/// Outcome of a completed regenerate call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegenReport {
    /// Properties recomputed and written back, in the order they ran.
    pub regenerated: Vec<String>,
    /// Requested names that were skipped because no entry has them.
    pub unknown: Vec<String>,
}

impl RegenReport {
    /// Whether `propname` was recomputed.
    pub fn ran(&self, propname: &str) -> bool {
        self.regenerated.iter().any(|p| p == propname)
    }
}
