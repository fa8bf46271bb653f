//! Porenet: pore network objects with dynamically declared property models.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! porenet sub-crates. For most users, adding `porenet` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use porenet::prelude::*;
//!
//! let registry = Registry::new();
//! let net = ObjectRef::network(&registry, "net", NetworkConfig::cubic(3, 3, 3, 1e-4)).unwrap();
//!
//! // pore.diameter feeds pore.area, so it is declared first.
//! net.add_model(
//!     "pore.diameter",
//!     model_fn("example.fixed", vec![ParamSpec::optional("value", 2e-5)], |ctx, args| {
//!         Ok(vec![args.float("value")?; ctx.element_count()].into())
//!     }),
//!     RegenMode::Normal,
//!     ModelArgs::new(),
//! )
//! .unwrap();
//! net.add_model(
//!     "pore.area",
//!     std::sync::Arc::new(porenet::geometry::pore_size::SphericalArea),
//!     RegenMode::Normal,
//!     ModelArgs::new(),
//! )
//! .unwrap();
//!
//! net.models().set_arg("pore.diameter", "value", 4e-5).unwrap();
//! let report = net.regenerate(RegenRequest::all()).unwrap();
//! assert_eq!(report.regenerated, vec!["pore.diameter", "pore.area"]);
//! let area = net.floats("pore.area").unwrap();
//! assert!((area[0] - std::f64::consts::PI / 4.0 * 16e-10).abs() < 1e-20);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `porenet-core` | IDs, property and argument values, regen modes, errors |
//! | [`models`] | `porenet-models` | Registry, objects, model entries and collections |
//! | [`geometry`] | `porenet-geometry` | Estimation functions and the Toray 090 preset |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and errors (`porenet-core`).
pub use porenet_core as types;

/// The model registry and regeneration engine (`porenet-models`).
///
/// [`models::Models`] is the per-object collection;
/// [`models::Registry`] is the object directory used to find its owner.
pub use porenet_models as models;

/// Estimation functions and geometry presets (`porenet-geometry`).
pub use porenet_geometry as geometry;

/// Common imports for typical porenet usage.
pub mod prelude {
    // Core types
    pub use porenet_core::{
        ArgValue, CollectionId, ObjectId, PropertyStore, PropertyValue, RegenMode, SelectMode,
    };

    // Errors
    pub use porenet_core::{ConfigError, ModelError, RegenError};

    // Objects and the registry
    pub use porenet_models::{
        GeometryConfig, NetworkConfig, ObjectKind, ObjectRef, Registry, Topology,
    };

    // Models
    pub use porenet_models::{
        model_fn, ModelArgs, ModelContext, ModelEntry, ModelRef, Models, ParamSpec,
        PropertyModel, RegenReport, RegenRequest,
    };

    // Presets
    pub use porenet_geometry::toray090;
}
