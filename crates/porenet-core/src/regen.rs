//! Regeneration policies and selection modes.

use std::fmt;
use std::str::FromStr;

/// Controls when, and if, a property model is recomputed.
///
/// Freshness is not tracked explicitly: a `Normal` entry is simply always
/// eligible for re-invocation. `Constant` is the only policy that freezes
/// a value once it has been computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RegenMode {
    /// Computed when added, recomputed by every blanket regenerate.
    #[default]
    Normal,
    /// Computed once when added and never recomputed.
    Constant,
    /// Stored without running; first computed by a regenerate that includes it.
    Deferred,
    /// Stored without running; only computed when explicitly requested.
    OnDemand,
}

impl RegenMode {
    /// All policies, in declaration order.
    pub const ALL: [RegenMode; 4] = [
        RegenMode::Normal,
        RegenMode::Constant,
        RegenMode::Deferred,
        RegenMode::OnDemand,
    ];

    /// Whether `add` evaluates the model immediately.
    pub fn runs_on_add(self) -> bool {
        matches!(self, Self::Normal | Self::Constant)
    }

    /// Whether a regenerate without an explicit property list picks this entry up.
    pub fn swept_by_default(self) -> bool {
        matches!(self, Self::Normal | Self::Deferred)
    }

    /// Whether regenerate must never touch this entry.
    pub fn is_frozen(self) -> bool {
        self == Self::Constant
    }

    /// The lowercase name used in listings (`normal`, `on_demand`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Constant => "constant",
            Self::Deferred => "deferred",
            Self::OnDemand => "on_demand",
        }
    }
}

impl fmt::Display for RegenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegenMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "constant" => Ok(Self::Constant),
            "deferred" => Ok(Self::Deferred),
            "on_demand" => Ok(Self::OnDemand),
            other => Err(format!("unknown regen_mode '{other}'")),
        }
    }
}

/// How the property list passed to regenerate is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectMode {
    /// Regenerate exactly the named properties.
    #[default]
    Inclusive,
    /// Regenerate everything except the named properties.
    Exclude,
}

impl fmt::Display for SelectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inclusive => f.write_str("inclusive"),
            Self::Exclude => f.write_str("exclude"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_table() {
        assert!(RegenMode::Normal.runs_on_add());
        assert!(RegenMode::Constant.runs_on_add());
        assert!(!RegenMode::Deferred.runs_on_add());
        assert!(!RegenMode::OnDemand.runs_on_add());

        assert!(RegenMode::Normal.swept_by_default());
        assert!(RegenMode::Deferred.swept_by_default());
        assert!(!RegenMode::OnDemand.swept_by_default());
        assert!(!RegenMode::Constant.swept_by_default());

        assert!(RegenMode::Constant.is_frozen());
        assert!(!RegenMode::Normal.is_frozen());
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for mode in RegenMode::ALL {
            assert_eq!(mode.as_str().parse::<RegenMode>(), Ok(mode));
        }
        assert!("sometimes".parse::<RegenMode>().is_err());
    }

    #[test]
    fn default_is_normal_inclusive() {
        assert_eq!(RegenMode::default(), RegenMode::Normal);
        assert_eq!(SelectMode::default(), SelectMode::Inclusive);
    }
}
