//! Benchmark profiles for the porenet model registry.
//!
//! - [`reference_profile`]: `n³` cubic network with the Toray 090 chain
//!   on a geometry covering all of it.
//! - [`crowded_registry`]: many live objects, to make owner scans costly.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::rc::Rc;

use porenet_core::ConfigError;
use porenet_models::{GeometryConfig, NetworkConfig, ObjectRef, Registry};

/// A profile's objects. Keep it alive for as long as the objects are used.
pub struct Profile {
    /// The registry all objects live in.
    pub registry: Rc<Registry>,
    /// The cubic network.
    pub network: ObjectRef,
    /// A geometry covering the whole network, carrying the Toray 090 models.
    pub geometry: ObjectRef,
}

/// Build an `n × n × n` network (100 µm spacing) with a Toray 090 geometry.
pub fn reference_profile(n: usize, seed: u64) -> Result<Profile, Box<dyn std::error::Error>> {
    let registry = Registry::new();
    let network = ObjectRef::network(&registry, "net", NetworkConfig::cubic(n, n, n, 1e-4))?;
    let geometry =
        ObjectRef::geometry(&registry, "gdl", &network, GeometryConfig::all(&network))?;
    porenet_geometry::toray090(&geometry, Some(seed))?;
    Ok(Profile {
        registry,
        network,
        geometry,
    })
}

/// `count` phases on one small network, plus the network itself.
///
/// Returns every handle; dropping them removes the objects.
pub fn crowded_registry(count: usize) -> Result<(Rc<Registry>, Vec<ObjectRef>), ConfigError> {
    let registry = Registry::new();
    let network = ObjectRef::network(&registry, "net", NetworkConfig::cubic(2, 2, 2, 1e-4))?;
    let mut objects = vec![network.clone()];
    for i in 0..count {
        objects.push(ObjectRef::phase(&registry, &format!("phase_{i}"), &network)?);
    }
    Ok((registry, objects))
}
