//! Core types and traits for the porenet pore network toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared by the model registry and the
//! estimation function library: object and collection IDs, property and
//! argument values, regeneration policies, error types, and the
//! [`PropertyStore`] trait through which computed values are written back.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod regen;
pub mod traits;
pub mod value;

pub use error::{ConfigError, ModelError, RegenError};
pub use id::{CollectionId, ObjectId};
pub use regen::{RegenMode, SelectMode};
pub use traits::{PropertyMap, PropertyStore};
pub use value::{ArgValue, PropertyValue};
