//! Inverse cumulative distribution functions for size distributions.
//!
//! Seeds in `[0, 1)` are mapped to sizes through a distribution's percent
//! point function. Only the distributions used by the bundled geometries
//! are provided.

use std::str::FromStr;

use porenet_core::ModelError;

/// A parameterized continuous distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Distribution {
    /// Weibull minimum: `loc + scale * (-ln(1 - q))^(1 / shape)`.
    WeibullMin {
        /// Shape `c > 0`.
        shape: f64,
        /// Location.
        loc: f64,
        /// Scale `> 0`.
        scale: f64,
    },
    /// Uniform on `[loc, loc + scale]`.
    Uniform {
        /// Lower bound.
        loc: f64,
        /// Width.
        scale: f64,
    },
}

/// Distribution family names accepted by [`Distribution::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    /// `weibull_min`
    WeibullMin,
    /// `uniform`
    Uniform,
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weibull_min" => Ok(Self::WeibullMin),
            "uniform" => Ok(Self::Uniform),
            other => Err(format!("unsupported distribution '{other}'")),
        }
    }
}

impl Distribution {
    /// Build a distribution from its family name and parameters.
    ///
    /// `shape` is ignored by families without one.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidArgument`] (reported against `param`) for an
    /// unknown family or a non-positive scale or shape.
    pub fn new(
        param: &str,
        name: &str,
        shape: f64,
        loc: f64,
        scale: f64,
    ) -> Result<Self, ModelError> {
        let invalid = |reason: String| ModelError::InvalidArgument {
            param: param.to_string(),
            reason,
        };
        let family: Family = name.parse().map_err(invalid)?;
        if !(scale > 0.0) {
            return Err(invalid(format!("scale must be positive, got {scale}")));
        }
        match family {
            Family::WeibullMin => {
                if !(shape > 0.0) {
                    return Err(invalid(format!("shape must be positive, got {shape}")));
                }
                Ok(Self::WeibullMin { shape, loc, scale })
            }
            Family::Uniform => Ok(Self::Uniform { loc, scale }),
        }
    }

    /// Percent point function at `q`. NaN outside `[0, 1]`.
    pub fn ppf(&self, q: f64) -> f64 {
        if !(0.0..=1.0).contains(&q) {
            return f64::NAN;
        }
        match *self {
            Self::WeibullMin { shape, loc, scale } => {
                loc + scale * (-(-q).ln_1p()).powf(1.0 / shape)
            }
            Self::Uniform { loc, scale } => loc + scale * q,
        }
    }
}

/// Map each seed through the named distribution's ppf.
pub fn ppf(
    param: &str,
    name: &str,
    shape: f64,
    loc: f64,
    scale: f64,
    q: &[f64],
) -> Result<Vec<f64>, ModelError> {
    let dist = Distribution::new(param, name, shape, loc, scale)?;
    Ok(q.iter().map(|&q| dist.ppf(q)).collect())
}
