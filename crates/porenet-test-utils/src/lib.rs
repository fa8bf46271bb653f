//! Test fixtures and object builders for porenet development.
//!
//! Provides small networks ([`linear_network`], [`cubic_network`]) and a
//! set of estimation-function fixtures in [`fixtures`] whose call counts
//! can be observed from tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::rc::Rc;

use porenet_core::ConfigError;
use porenet_models::{GeometryConfig, NetworkConfig, ObjectRef, Registry};

/// `n` pores on a line, unit spacing, `n - 1` throats.
pub fn linear_config(n: usize) -> NetworkConfig {
    NetworkConfig {
        coords: (0..n).map(|i| [i as f64, 0.0, 0.0]).collect(),
        conns: (1..n).map(|i| [i - 1, i]).collect(),
    }
}

/// A registered linear network of `n` pores.
pub fn linear_network(
    registry: &Rc<Registry>,
    name: &str,
    n: usize,
) -> Result<ObjectRef, ConfigError> {
    ObjectRef::network(registry, name, linear_config(n))
}

/// A registered `n × n × n` cubic network with 100 µm spacing.
pub fn cubic_network(
    registry: &Rc<Registry>,
    name: &str,
    n: usize,
) -> Result<ObjectRef, ConfigError> {
    ObjectRef::network(registry, name, NetworkConfig::cubic(n, n, n, 1e-4))
}

/// A network plus a geometry covering all of it.
pub fn network_with_geometry(
    registry: &Rc<Registry>,
    n: usize,
) -> Result<(ObjectRef, ObjectRef), ConfigError> {
    let network = linear_network(registry, "net", n)?;
    let geometry = ObjectRef::geometry(registry, "geo", &network, GeometryConfig::all(&network))?;
    Ok((network, geometry))
}
