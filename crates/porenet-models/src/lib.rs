//! Property model registry and regeneration engine.
//!
//! Every simulation object (network, geometry, phase, physics) carries a
//! [`Models`] collection: an insertion-ordered map from property name to a
//! [`ModelEntry`], which binds an estimation function ([`PropertyModel`])
//! to its resolved arguments and a [`RegenMode`](porenet_core::RegenMode).
//!
//! # Ownership
//!
//! A collection never stores a pointer to its owner. The owner is found by
//! scanning the explicitly injected [`Registry`] for the one live object
//! holding the collection. This is what lets a collection be copied and
//! reattached to another object by plain reassignment
//! ([`ObjectRef::set_models`]). Two live objects sharing one collection is
//! a fatal [`RegenError::OwnershipAmbiguous`](porenet_core::RegenError).
//!
//! # Regeneration
//!
//! [`Models::regenerate`] materializes its working set first
//! ([`RegenRequest::plan`]) and then re-invokes each selected entry in
//! collection order, writing results into the owner's property store.
//! Downstream properties see fresh upstream values as long as declaration
//! order respects dependency order.
//!
//! # Threading
//!
//! Objects and collections are `Rc`/`RefCell` based: one logical thread of
//! control per simulation run. Estimation functions themselves are
//! `Send + Sync` and can be shared freely.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod args;
pub mod collection;
pub mod config;
pub mod context;
pub mod entry;
pub mod object;
pub mod registry;
pub mod request;
pub mod schema;

pub use args::ModelArgs;
pub use collection::Models;
pub use config::{GeometryConfig, NetworkConfig};
pub use context::ModelContext;
pub use entry::ModelEntry;
pub use object::{ObjectData, ObjectKind, ObjectRef, Topology};
pub use registry::Registry;
pub use request::{RegenPlan, RegenReport, RegenRequest};
pub use schema::{model_fn, FnModel, ModelRef, ParamSpec, PropertyModel};
