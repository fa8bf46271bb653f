//! Property values stored on objects and argument values bound to models.

use std::fmt;

/// A named, array-valued attribute of pores or throats.
///
/// One element per pore (for `pore.*` properties) or per throat (for
/// `throat.*` properties) of the object that stores it.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// One floating-point value per element.
    Float(Vec<f64>),
    /// A fixed-size vector per element, stored flat (element-major).
    Vector {
        /// Components per element (e.g., 3 for coordinates).
        dims: u32,
        /// Flat storage of `len * dims` values.
        data: Vec<f64>,
    },
    /// A boolean label per element.
    Label(Vec<bool>),
}

impl PropertyValue {
    /// Number of elements (pores or throats) covered by this value.
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Vector { dims, data } => {
                if *dims == 0 {
                    0
                } else {
                    data.len() / *dims as usize
                }
            }
            Self::Label(v) => v.len(),
        }
    }

    /// Whether the value covers zero elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the data as a flat float slice, if this is a `Float` value.
    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            Self::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the data as labels, if this is a `Label` value.
    pub fn as_labels(&self) -> Option<&[bool]> {
        match self {
            Self::Label(v) => Some(v),
            _ => None,
        }
    }

    /// Short name of the variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Vector { .. } => "vector",
            Self::Label(_) => "label",
        }
    }
}

impl From<Vec<f64>> for PropertyValue {
    fn from(v: Vec<f64>) -> Self {
        Self::Float(v)
    }
}

impl From<Vec<bool>> for PropertyValue {
    fn from(v: Vec<bool>) -> Self {
        Self::Label(v)
    }
}

/// A keyword argument bound to an estimation function.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgValue {
    /// Explicitly unset (e.g., an unseeded random generator).
    None,
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer, such as an RNG seed. Kept apart from `Int` so
    /// the full `u64` range survives.
    UInt(u64),
    /// A float.
    Float(f64),
    /// A string, typically a property name or a distribution name.
    Str(String),
    /// A list of floats (e.g., a `[min, max]` range).
    FloatList(Vec<f64>),
}

impl ArgValue {
    /// Numeric view: floats as-is, integers widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::UInt(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Integer view. Floats are not truncated and unsigned values above
    /// `i64::MAX` do not fit.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Unsigned integer view. Negative integers do not fit.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(v) => u64::try_from(*v).ok(),
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean view.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// String view.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Float list view.
    pub fn as_float_list(&self) -> Option<&[f64]> {
        match self {
            Self::FloatList(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this is [`ArgValue::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::FloatList(v) => {
                write!(f, "[")?;
                for (i, x) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{x}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<f64> for ArgValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ArgValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u64> for ArgValue {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<f64>> for ArgValue {
    fn from(v: Vec<f64>) -> Self {
        Self::FloatList(v)
    }
}

impl<const N: usize> From<[f64; N]> for ArgValue {
    fn from(v: [f64; N]) -> Self {
        Self::FloatList(v.to_vec())
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::None,
        }
    }
}
