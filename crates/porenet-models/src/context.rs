//! Context arguments handed to estimation functions.
//!
//! The owner's kind decides what is supplied: a network supplies only
//! itself; a geometry its parent network plus itself; a phase its parent
//! network plus itself; a physics its parent network, its first phase and
//! itself.

use porenet_core::{ModelError, ObjectId};

use crate::object::{ObjectKind, ObjectRef};
use crate::registry::Registry;

/// Everything an estimation function may read while computing one property.
#[derive(Clone, Debug)]
pub struct ModelContext {
    propname: String,
    owner: ObjectRef,
    network: ObjectRef,
    geometry: Option<ObjectRef>,
    phase: Option<ObjectRef>,
    physics: Option<ObjectRef>,
}

fn lookup(registry: &Registry, id: ObjectId) -> Result<ObjectRef, ModelError> {
    registry.get(id).ok_or(ModelError::ObjectDropped { id })
}

impl ModelContext {
    /// Derive the context for computing `propname` on `owner`.
    ///
    /// # Errors
    ///
    /// [`ModelError::ObjectDropped`] if a related object is gone, and
    /// [`ModelError::MissingContext`] for a physics with no phase left.
    pub fn derive(
        owner: &ObjectRef,
        registry: &Registry,
        propname: &str,
    ) -> Result<Self, ModelError> {
        let kind = owner.borrow().kind().clone();
        let mut ctx = Self {
            propname: propname.to_string(),
            owner: owner.clone(),
            network: owner.clone(),
            geometry: None,
            phase: None,
            physics: None,
        };
        match kind {
            ObjectKind::Network(_) => {}
            ObjectKind::Geometry { network, .. } => {
                ctx.network = lookup(registry, network)?;
                ctx.geometry = Some(owner.clone());
            }
            ObjectKind::Phase { network } => {
                ctx.network = lookup(registry, network)?;
                ctx.phase = Some(owner.clone());
            }
            ObjectKind::Physics { network, phases } => {
                ctx.network = lookup(registry, network)?;
                let first = phases.first().ok_or_else(|| ModelError::MissingContext {
                    role: "phase".to_string(),
                    object: owner.name(),
                })?;
                ctx.phase = Some(lookup(registry, *first)?);
                ctx.physics = Some(owner.clone());
            }
        }
        Ok(ctx)
    }

    /// The property being computed.
    pub fn propname(&self) -> &str {
        &self.propname
    }

    /// The object the result will be written to.
    pub fn owner(&self) -> &ObjectRef {
        &self.owner
    }

    /// The network (the owner itself when the owner is a network).
    pub fn network(&self) -> &ObjectRef {
        &self.network
    }

    /// The geometry, when the owner is one.
    pub fn geometry(&self) -> Option<&ObjectRef> {
        self.geometry.as_ref()
    }

    /// The phase: the owner itself, or a physics owner's first phase.
    pub fn phase(&self) -> Option<&ObjectRef> {
        self.phase.as_ref()
    }

    /// The physics, when the owner is one.
    pub fn physics(&self) -> Option<&ObjectRef> {
        self.physics.as_ref()
    }

    /// Number of values the result must hold: owner throats for
    /// `throat.*` properties, owner pores otherwise.
    pub fn element_count(&self) -> usize {
        if self.propname.starts_with("throat.") {
            self.owner.throat_count()
        } else {
            self.owner.pore_count()
        }
    }

    /// Owner pore count.
    pub fn pore_count(&self) -> usize {
        self.owner.pore_count()
    }

    /// Owner throat count.
    pub fn throat_count(&self) -> usize {
        self.owner.throat_count()
    }

    /// A float property of the owner.
    pub fn floats(&self, propname: &str) -> Result<Vec<f64>, ModelError> {
        self.owner.floats(propname)
    }

    /// An owner pore property scattered to network pore indexing.
    ///
    /// Pores the owner does not cover read as NaN.
    pub fn pore_values(&self, propname: &str) -> Result<Vec<f64>, ModelError> {
        let local = self.owner.floats(propname)?;
        let indices = self.owner.pore_indices();
        if local.len() != indices.len() {
            return Err(ModelError::ExecutionFailed {
                reason: format!(
                    "'{propname}' has {} values but '{}' spans {} pores",
                    local.len(),
                    self.owner.name(),
                    indices.len()
                ),
            });
        }
        let mut global = vec![f64::NAN; self.network.pore_count()];
        for (value, index) in local.into_iter().zip(indices) {
            global[index] = value;
        }
        Ok(global)
    }

    /// Network pore pairs of each owner throat.
    pub fn throat_conns(&self) -> Result<Vec<[usize; 2]>, ModelError> {
        let topology = self.topology()?;
        Ok(self
            .owner
            .throat_indices()
            .into_iter()
            .map(|t| topology.conns()[t])
            .collect())
    }

    /// Network pore coordinates.
    pub fn pore_coords(&self) -> Result<Vec<[f64; 3]>, ModelError> {
        Ok(self.topology()?.coords().to_vec())
    }

    fn topology(&self) -> Result<crate::object::Topology, ModelError> {
        self.network
            .topology()
            .ok_or_else(|| ModelError::MissingContext {
                role: "network".to_string(),
                object: self.owner.name(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeometryConfig, NetworkConfig};

    fn net(registry: &std::rc::Rc<Registry>) -> ObjectRef {
        let config = NetworkConfig {
            coords: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            conns: vec![[0, 1], [1, 2]],
        };
        ObjectRef::network(registry, "net", config).unwrap()
    }

    #[test]
    fn network_supplies_itself() {
        let registry = Registry::new();
        let net = net(&registry);
        let ctx = ModelContext::derive(&net, &registry, "pore.seed").unwrap();
        assert!(ctx.network().ptr_eq(&net));
        assert!(ctx.geometry().is_none());
        assert!(ctx.phase().is_none());
        assert!(ctx.physics().is_none());
        assert_eq!(ctx.element_count(), 3);
    }

    #[test]
    fn geometry_supplies_network_and_itself() {
        let registry = Registry::new();
        let net = net(&registry);
        let geo = ObjectRef::geometry(
            &registry,
            "geo",
            &net,
            GeometryConfig::new(vec![2, 0], vec![1]),
        )
        .unwrap();
        let ctx = ModelContext::derive(&geo, &registry, "throat.length").unwrap();
        assert!(ctx.network().ptr_eq(&net));
        assert!(ctx.geometry().is_some_and(|g| g.ptr_eq(&geo)));
        assert_eq!(ctx.element_count(), 1);
        assert_eq!(ctx.throat_conns().unwrap(), vec![[1, 2]]);
    }

    #[test]
    fn physics_supplies_first_phase() {
        let registry = Registry::new();
        let net = net(&registry);
        let water = ObjectRef::phase(&registry, "water", &net).unwrap();
        let air = ObjectRef::phase(&registry, "air", &net).unwrap();
        let phys = ObjectRef::physics(&registry, "phys", &net, &[&water, &air]).unwrap();
        let ctx = ModelContext::derive(&phys, &registry, "throat.conductance").unwrap();
        assert!(ctx.phase().is_some_and(|p| p.ptr_eq(&water)));
        assert!(ctx.physics().is_some_and(|p| p.ptr_eq(&phys)));
        assert!(ctx.network().ptr_eq(&net));
    }

    #[test]
    fn dropped_phase_is_reported() {
        let registry = Registry::new();
        let net = net(&registry);
        let water = ObjectRef::phase(&registry, "water", &net).unwrap();
        let water_id = water.id();
        let phys = ObjectRef::physics(&registry, "phys", &net, &[&water]).unwrap();
        drop(water);
        let err = ModelContext::derive(&phys, &registry, "pore.x").unwrap_err();
        assert_eq!(err, ModelError::ObjectDropped { id: water_id });
    }

    #[test]
    fn pore_values_scatter_to_network_indexing() {
        let registry = Registry::new();
        let net = net(&registry);
        let geo = ObjectRef::geometry(
            &registry,
            "geo",
            &net,
            GeometryConfig::new(vec![2, 0], vec![]),
        )
        .unwrap();
        geo.set("pore.diameter", vec![20.0, 0.5]);
        let ctx = ModelContext::derive(&geo, &registry, "pore.volume").unwrap();
        let global = ctx.pore_values("pore.diameter").unwrap();
        assert_eq!(global[0], 0.5);
        assert!(global[1].is_nan());
        assert_eq!(global[2], 20.0);
    }
}
