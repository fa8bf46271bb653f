//! Error types for the porenet toolkit.
//!
//! Organized by layer: [`ModelError`] is raised by an individual estimation
//! function, [`RegenError`] by model collection operations (add, regenerate,
//! reorder), and [`ConfigError`] by object construction.

use std::error::Error;
use std::fmt;

use crate::id::{CollectionId, ObjectId};

/// Errors raised while evaluating a single estimation function.
///
/// Wrapped in [`RegenError::ModelFailed`] by the collection, which adds the
/// property and model names.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelError {
    /// A required parameter has no declared default and was not supplied.
    MissingArgument {
        /// Parameter name.
        param: String,
    },
    /// A parameter was supplied with the wrong type or an unusable value.
    InvalidArgument {
        /// Parameter name.
        param: String,
        /// What is wrong with it.
        reason: String,
    },
    /// The function reads a property that the object does not hold.
    MissingProperty {
        /// Name of the object that was read.
        object: String,
        /// The missing property.
        propname: String,
    },
    /// The owner cannot supply a context object the function needs.
    MissingContext {
        /// Which role was missing (`network`, `geometry`, `phase`, `physics`).
        role: String,
        /// Name of the owning object.
        object: String,
    },
    /// A context object was dropped while still referenced by ID.
    ObjectDropped {
        /// The dangling ID.
        id: ObjectId,
    },
    /// The function's computation failed.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument { param } => write!(f, "missing required argument '{param}'"),
            Self::InvalidArgument { param, reason } => {
                write!(f, "invalid argument '{param}': {reason}")
            }
            Self::MissingProperty { object, propname } => {
                write!(f, "object '{object}' has no property '{propname}'")
            }
            Self::MissingContext { role, object } => {
                write!(f, "object '{object}' has no associated {role}")
            }
            Self::ObjectDropped { id } => write!(f, "object {id} is no longer alive"),
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
        }
    }
}

impl Error for ModelError {}

/// Errors from model collection operations.
///
/// Only [`OwnershipAmbiguous`](Self::OwnershipAmbiguous) indicates a broken
/// invariant; the other variants are ordinary lookup or evaluation failures.
/// Unknown property names in a regenerate request are not errors at all:
/// they are logged and skipped.
#[derive(Clone, Debug, PartialEq)]
pub enum RegenError {
    /// More than one live object holds the same collection. Use a copy to
    /// attach a collection to a second owner.
    OwnershipAmbiguous {
        /// The shared collection.
        collection: CollectionId,
        /// Names of every object claiming it.
        owners: Vec<String>,
    },
    /// No live object holds the collection.
    OwnershipMissing {
        /// The orphaned collection, or `None` for an entry that was never
        /// stored in one.
        collection: Option<CollectionId>,
    },
    /// A property name is not present in the collection.
    KeyNotFound {
        /// The missing key.
        propname: String,
    },
    /// A reorder request is self-contradictory.
    InvalidReorder {
        /// What is wrong with it.
        reason: String,
    },
    /// An estimation function failed.
    ModelFailed {
        /// Property being computed.
        propname: String,
        /// Qualified name of the function.
        model: String,
        /// The underlying failure.
        source: ModelError,
    },
}

impl fmt::Display for RegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OwnershipAmbiguous { collection, owners } => write!(
                f,
                "model collection {collection} is claimed by {} objects ({}); \
                 attach a copy instead of sharing it",
                owners.len(),
                owners.join(", "),
            ),
            Self::OwnershipMissing {
                collection: Some(collection),
            } => write!(f, "model collection {collection} has no owner"),
            Self::OwnershipMissing { collection: None } => {
                write!(f, "model entry is not stored in a collection")
            }
            Self::KeyNotFound { propname } => {
                write!(f, "no model registered for '{propname}'")
            }
            Self::InvalidReorder { reason } => write!(f, "invalid reorder: {reason}"),
            Self::ModelFailed {
                propname,
                model,
                source,
            } => write!(f, "model '{model}' for '{propname}' failed: {source}"),
        }
    }
}

impl Error for RegenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ModelFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors detected while constructing simulation objects.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A network must have at least one pore.
    EmptyNetwork,
    /// A throat references a pore index past the end of the network.
    PoreOutOfRange {
        /// Offending throat.
        throat: usize,
        /// The out-of-range pore index.
        pore: usize,
        /// Number of pores in the network.
        pore_count: usize,
    },
    /// A throat connects a pore to itself.
    SelfLoop {
        /// Offending throat.
        throat: usize,
    },
    /// A subset index is past the end of its parent's elements.
    IndexOutOfRange {
        /// `"pore"` or `"throat"`.
        element: &'static str,
        /// The offending index.
        index: usize,
        /// Number of elements available.
        len: usize,
    },
    /// A subset lists the same index twice.
    DuplicateIndex {
        /// `"pore"` or `"throat"`.
        element: &'static str,
        /// The repeated index.
        index: usize,
    },
    /// Another live object in the registry already uses this name.
    DuplicateName {
        /// The contested name.
        name: String,
    },
    /// A physics object needs at least one phase.
    NoPhases {
        /// Name of the physics object.
        physics: String,
    },
    /// A related object has the wrong kind or lives in another registry.
    ForeignObject {
        /// Name of the related object.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNetwork => write!(f, "network must have at least one pore"),
            Self::PoreOutOfRange {
                throat,
                pore,
                pore_count,
            } => write!(
                f,
                "throat {throat} references pore {pore} but the network has {pore_count} pores"
            ),
            Self::SelfLoop { throat } => write!(f, "throat {throat} connects a pore to itself"),
            Self::IndexOutOfRange {
                element,
                index,
                len,
            } => write!(f, "{element} index {index} out of range (len {len})"),
            Self::DuplicateIndex { element, index } => {
                write!(f, "{element} index {index} listed more than once")
            }
            Self::DuplicateName { name } => write!(f, "an object named '{name}' already exists"),
            Self::NoPhases { physics } => {
                write!(f, "physics '{physics}' must be associated with a phase")
            }
            Self::ForeignObject { name, reason } => write!(f, "object '{name}': {reason}"),
        }
    }
}

impl Error for ConfigError {}
