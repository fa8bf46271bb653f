//! Owning objects: networks, geometries, phases and physics.
//!
//! Each object holds a property store and one [`Models`] collection. The
//! kind of object is a closed union ([`ObjectKind`]); it decides which
//! context objects an estimation function receives and how many pores and
//! throats the object's properties span.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use porenet_core::{
    CollectionId, ConfigError, ModelError, ObjectId, PropertyMap, PropertyStore, PropertyValue,
    RegenError, RegenMode,
};

use crate::args::ModelArgs;
use crate::collection::Models;
use crate::config::{GeometryConfig, NetworkConfig};
use crate::registry::Registry;
use crate::request::{RegenReport, RegenRequest};
use crate::schema::ModelRef;

/// Pore coordinates and throat connectivity of a network.
#[derive(Clone, Debug, PartialEq)]
pub struct Topology {
    coords: Vec<[f64; 3]>,
    conns: Vec<[usize; 2]>,
}

impl Topology {
    /// Pore center coordinates, indexed by pore.
    pub fn coords(&self) -> &[[f64; 3]] {
        &self.coords
    }

    /// Pore pairs, indexed by throat.
    pub fn conns(&self) -> &[[usize; 2]] {
        &self.conns
    }
}

/// What kind of object this is, and which objects it relates to.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectKind {
    /// The pore network itself.
    Network(Topology),
    /// Geometric properties for a subset of the network's pores and throats.
    Geometry {
        /// Parent network.
        network: ObjectId,
        /// Network pore indices covered, in local order.
        pores: Vec<usize>,
        /// Network throat indices covered, in local order.
        throats: Vec<usize>,
    },
    /// A fluid (or solid) phase spanning the whole network.
    Phase {
        /// Parent network.
        network: ObjectId,
    },
    /// Pore-scale physics relating a phase to the network.
    Physics {
        /// Parent network.
        network: ObjectId,
        /// Associated phases; the first supplies the `phase` context.
        phases: Vec<ObjectId>,
    },
}

impl ObjectKind {
    /// Lowercase kind name (`network`, `geometry`, `phase`, `physics`).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Geometry { .. } => "geometry",
            Self::Phase { .. } => "phase",
            Self::Physics { .. } => "physics",
        }
    }

    /// The parent network's ID, or `None` for a network.
    pub fn network_id(&self) -> Option<ObjectId> {
        match self {
            Self::Network(_) => None,
            Self::Geometry { network, .. }
            | Self::Phase { network }
            | Self::Physics { network, .. } => Some(*network),
        }
    }
}

/// State of a simulation object. Accessed through [`ObjectRef`].
pub struct ObjectData {
    id: ObjectId,
    name: String,
    kind: ObjectKind,
    props: PropertyMap,
    models: Models,
    pore_count: usize,
    throat_count: usize,
    registry: Rc<Registry>,
}

impl ObjectData {
    /// Object ID.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Unique name within the registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind and relations.
    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// The property store.
    pub fn props(&self) -> &PropertyMap {
        &self.props
    }

    /// Number of pores this object's `pore.*` properties span.
    pub fn pore_count(&self) -> usize {
        self.pore_count
    }

    /// Number of throats this object's `throat.*` properties span.
    pub fn throat_count(&self) -> usize {
        self.throat_count
    }
}

impl PropertyStore for ObjectData {
    fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.props.property(name)
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) {
        self.props.set_property(name, value);
    }

    fn remove_property(&mut self, name: &str) -> Option<PropertyValue> {
        self.props.remove_property(name)
    }

    fn property_names(&self) -> Vec<String> {
        self.props.property_names()
    }
}

impl Drop for ObjectData {
    fn drop(&mut self) {
        self.registry.forget(self.id);
    }
}

/// Shared handle to a simulation object.
///
/// Cloning the handle aliases the same object. Methods borrow the object
/// only for the duration of the call, so estimation functions may freely
/// read any object while a collection operation is in progress.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<ObjectData>>);

impl ObjectRef {
    pub(crate) fn from_rc(rc: Rc<RefCell<ObjectData>>) -> Self {
        Self(rc)
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<ObjectData>> {
        Rc::downgrade(&self.0)
    }

    fn create(
        registry: &Rc<Registry>,
        name: &str,
        kind: ObjectKind,
        pore_count: usize,
        throat_count: usize,
    ) -> Result<Self, ConfigError> {
        let id = ObjectId::next();
        let name = if name.is_empty() {
            format!("{}_{}", kind.label(), id)
        } else {
            name.to_string()
        };
        if registry.find(&name).is_some() {
            return Err(ConfigError::DuplicateName { name });
        }
        let obj = Self(Rc::new(RefCell::new(ObjectData {
            id,
            name,
            kind,
            props: PropertyMap::new(),
            models: Models::new(),
            pore_count,
            throat_count,
            registry: Rc::clone(registry),
        })));
        registry.register(&obj);
        Ok(obj)
    }

    /// Check that `other` is a live member of `registry` of the expected kind.
    fn check_related(
        registry: &Rc<Registry>,
        other: &ObjectRef,
        expected: &'static str,
    ) -> Result<(), ConfigError> {
        let data = other.borrow();
        if data.kind.label() != expected {
            return Err(ConfigError::ForeignObject {
                name: data.name.clone(),
                reason: format!("expected a {expected}, found a {}", data.kind.label()),
            });
        }
        if !Rc::ptr_eq(&data.registry, registry) {
            return Err(ConfigError::ForeignObject {
                name: data.name.clone(),
                reason: "belongs to a different registry".to_string(),
            });
        }
        Ok(())
    }

    /// Create and register a network.
    ///
    /// An empty `name` is replaced by `network_<id>`.
    pub fn network(
        registry: &Rc<Registry>,
        name: &str,
        config: NetworkConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let pore_count = config.coords.len();
        let throat_count = config.conns.len();
        let kind = ObjectKind::Network(Topology {
            coords: config.coords,
            conns: config.conns,
        });
        Self::create(registry, name, kind, pore_count, throat_count)
    }

    /// Create and register a geometry covering part of `network`.
    pub fn geometry(
        registry: &Rc<Registry>,
        name: &str,
        network: &ObjectRef,
        config: GeometryConfig,
    ) -> Result<Self, ConfigError> {
        Self::check_related(registry, network, "network")?;
        config.validate(network.pore_count(), network.throat_count())?;
        let pore_count = config.pores.len();
        let throat_count = config.throats.len();
        let kind = ObjectKind::Geometry {
            network: network.id(),
            pores: config.pores,
            throats: config.throats,
        };
        Self::create(registry, name, kind, pore_count, throat_count)
    }

    /// Create and register a phase spanning `network`.
    pub fn phase(
        registry: &Rc<Registry>,
        name: &str,
        network: &ObjectRef,
    ) -> Result<Self, ConfigError> {
        Self::check_related(registry, network, "network")?;
        let kind = ObjectKind::Phase {
            network: network.id(),
        };
        Self::create(
            registry,
            name,
            kind,
            network.pore_count(),
            network.throat_count(),
        )
    }

    /// Create and register a physics object for `phases` on `network`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoPhases`] if `phases` is empty.
    pub fn physics(
        registry: &Rc<Registry>,
        name: &str,
        network: &ObjectRef,
        phases: &[&ObjectRef],
    ) -> Result<Self, ConfigError> {
        Self::check_related(registry, network, "network")?;
        if phases.is_empty() {
            return Err(ConfigError::NoPhases {
                physics: name.to_string(),
            });
        }
        for phase in phases {
            Self::check_related(registry, phase, "phase")?;
        }
        let kind = ObjectKind::Physics {
            network: network.id(),
            phases: phases.iter().map(|p| p.id()).collect(),
        };
        Self::create(
            registry,
            name,
            kind,
            network.pore_count(),
            network.throat_count(),
        )
    }

    /// Borrow the object state.
    ///
    /// Do not hold the borrow across calls that write to this object
    /// (`set`, `add_model`, `regenerate`).
    pub fn borrow(&self) -> Ref<'_, ObjectData> {
        self.0.borrow()
    }

    /// Object ID.
    pub fn id(&self) -> ObjectId {
        self.0.borrow().id
    }

    /// Object name.
    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    /// Kind name (`network`, `geometry`, `phase`, `physics`).
    pub fn kind_label(&self) -> &'static str {
        self.0.borrow().kind.label()
    }

    /// Number of pores spanned by `pore.*` properties.
    pub fn pore_count(&self) -> usize {
        self.0.borrow().pore_count
    }

    /// Number of throats spanned by `throat.*` properties.
    pub fn throat_count(&self) -> usize {
        self.0.borrow().throat_count
    }

    /// Network pore index of each local pore.
    pub fn pore_indices(&self) -> Vec<usize> {
        let data = self.0.borrow();
        match &data.kind {
            ObjectKind::Geometry { pores, .. } => pores.clone(),
            _ => (0..data.pore_count).collect(),
        }
    }

    /// Network throat index of each local throat.
    pub fn throat_indices(&self) -> Vec<usize> {
        let data = self.0.borrow();
        match &data.kind {
            ObjectKind::Geometry { throats, .. } => throats.clone(),
            _ => (0..data.throat_count).collect(),
        }
    }

    /// Network topology, if this object is a network.
    pub fn topology(&self) -> Option<Topology> {
        match &self.0.borrow().kind {
            ObjectKind::Network(topology) => Some(topology.clone()),
            _ => None,
        }
    }

    /// Clone a stored property.
    pub fn get(&self, propname: &str) -> Option<PropertyValue> {
        self.0.borrow().props.property(propname).cloned()
    }

    /// Clone a stored float property.
    ///
    /// # Errors
    ///
    /// [`ModelError::MissingProperty`] if absent,
    /// [`ModelError::ExecutionFailed`] if it is not a float array.
    pub fn floats(&self, propname: &str) -> Result<Vec<f64>, ModelError> {
        let data = self.0.borrow();
        match data.props.property(propname) {
            Some(PropertyValue::Float(v)) => Ok(v.clone()),
            Some(other) => Err(ModelError::ExecutionFailed {
                reason: format!(
                    "'{propname}' on '{}' is a {} property, expected float",
                    data.name,
                    other.kind_name()
                ),
            }),
            None => Err(ModelError::MissingProperty {
                object: data.name.clone(),
                propname: propname.to_string(),
            }),
        }
    }

    /// Write a property (`owner[propname] = value`).
    pub fn set(&self, propname: &str, value: impl Into<PropertyValue>) {
        self.0
            .borrow_mut()
            .props
            .set_property(propname, value.into());
    }

    /// Remove a property, returning its last value.
    pub fn remove(&self, propname: &str) -> Option<PropertyValue> {
        self.0.borrow_mut().props.remove_property(propname)
    }

    /// Whether a property has been written.
    pub fn contains(&self, propname: &str) -> bool {
        self.0.borrow().props.contains(propname)
    }

    /// The registry this object lives in.
    pub fn registry(&self) -> Rc<Registry> {
        Rc::clone(&self.0.borrow().registry)
    }

    /// Shared handle to this object's model collection.
    pub fn models(&self) -> Models {
        self.0.borrow().models.clone()
    }

    pub(crate) fn models_id(&self) -> CollectionId {
        self.0.borrow().models.id()
    }

    /// Attach a collection to this object, replacing the current one.
    ///
    /// Attach a [`Models::copy`] when the collection came from another live
    /// object; attaching the same handle to two objects makes every later
    /// operation on it fail with [`RegenError::OwnershipAmbiguous`].
    pub fn set_models(&self, models: Models) {
        let registry = {
            let mut data = self.0.borrow_mut();
            data.models = models;
            Rc::clone(&data.registry)
        };
        registry.touch();
    }

    /// Add a property model to this object's collection.
    ///
    /// See [`Models::add`].
    pub fn add_model(
        &self,
        propname: &str,
        model: ModelRef,
        regen_mode: RegenMode,
        args: ModelArgs,
    ) -> Result<(), RegenError> {
        let registry = self.registry();
        self.models()
            .add(&registry, propname, model, regen_mode, args)
    }

    /// Regenerate this object's models.
    ///
    /// See [`Models::regenerate`].
    pub fn regenerate(&self, request: impl Into<RegenRequest>) -> Result<RegenReport, RegenError> {
        let registry = self.registry();
        self.models().regenerate(&registry, &request.into())
    }

    /// Whether two handles refer to the same object.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("ObjectRef")
            .field("id", &data.id)
            .field("name", &data.name)
            .field("kind", &data.kind.label())
            .field("pores", &data.pore_count)
            .field("throats", &data.throat_count)
            .field("properties", &data.props.len())
            .field("models", &data.models.len())
            .finish()
    }
}
