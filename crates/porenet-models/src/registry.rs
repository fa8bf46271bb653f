//! The object directory used for owner resolution.
//!
//! [`Registry`] maps object IDs to live simulation objects without keeping
//! them alive: it stores weak references, and an object removes itself when
//! its last handle is dropped. It is an explicit service, created by the
//! caller and passed to every object constructor and collection operation.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use porenet_core::{CollectionId, ObjectId};
use smallvec::SmallVec;
use tracing::debug;

use crate::object::{ObjectData, ObjectRef};

/// Source of attachment epochs, shared by every registry in the process so
/// that two registries never report the same epoch.
static EPOCH_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_epoch() -> u64 {
    EPOCH_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Process-local directory of simulation objects.
///
/// Single-threaded: interior mutability through `RefCell`, shared through
/// `Rc`. Concurrent use would need one exclusive lock per owning object.
pub struct Registry {
    objects: RefCell<IndexMap<ObjectId, Weak<RefCell<ObjectData>>>>,
    /// Changes whenever the object set or any object's collection changes.
    epoch: Cell<u64>,
    /// Set when a dropped object could not be removed at drop time.
    pending_prune: Cell<bool>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            objects: RefCell::new(IndexMap::new()),
            epoch: Cell::new(next_epoch()),
            pending_prune: Cell::new(false),
        })
    }

    /// Register an object under its ID. Re-registering is a no-op.
    pub fn register(&self, object: &ObjectRef) {
        self.sweep();
        let id = object.id();
        let mut objects = self.objects.borrow_mut();
        if !objects.contains_key(&id) {
            objects.insert(id, object.downgrade());
            drop(objects);
            self.touch();
            debug!(object = %object.name(), %id, "registered object");
        }
    }

    /// Remove an object from the directory. The object itself stays alive.
    ///
    /// Returns `false` if the ID was not registered.
    pub fn unregister(&self, id: ObjectId) -> bool {
        let removed = self.objects.borrow_mut().shift_remove(&id).is_some();
        if removed {
            self.touch();
            debug!(%id, "unregistered object");
        }
        removed
    }

    /// Drop-path removal. If the directory is borrowed at that moment the
    /// entry is swept on the next access instead.
    pub(crate) fn forget(&self, id: ObjectId) {
        match self.objects.try_borrow_mut() {
            Ok(mut objects) => {
                objects.shift_remove(&id);
            }
            Err(_) => self.pending_prune.set(true),
        }
        self.touch();
    }

    /// Run a prune deferred by [`forget`](Self::forget), when possible.
    fn sweep(&self) {
        if !self.pending_prune.get() {
            return;
        }
        if let Ok(mut objects) = self.objects.try_borrow_mut() {
            objects.retain(|_, weak| weak.strong_count() > 0);
            self.pending_prune.set(false);
            debug!("swept dropped objects");
        }
    }

    /// Look up a live object by ID.
    pub fn get(&self, id: ObjectId) -> Option<ObjectRef> {
        self.sweep();
        self.objects
            .borrow()
            .get(&id)
            .and_then(Weak::upgrade)
            .map(ObjectRef::from_rc)
    }

    /// Look up a live object by name.
    pub fn find(&self, name: &str) -> Option<ObjectRef> {
        self.all()
            .into_iter()
            .map(|(_, obj)| obj)
            .find(|obj| obj.name() == name)
    }

    /// All live objects, in registration order.
    pub fn all(&self) -> Vec<(ObjectId, ObjectRef)> {
        self.sweep();
        self.objects
            .borrow()
            .iter()
            .filter_map(|(&id, weak)| weak.upgrade().map(|rc| (id, ObjectRef::from_rc(rc))))
            .collect()
    }

    /// Number of live registered objects.
    pub fn len(&self) -> usize {
        self.sweep();
        self.objects
            .borrow()
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Whether no live objects are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove entries whose objects have been dropped. Returns how many went.
    pub fn prune(&self) -> usize {
        let mut objects = self.objects.borrow_mut();
        let before = objects.len();
        objects.retain(|_, weak| weak.strong_count() > 0);
        self.pending_prune.set(false);
        before - objects.len()
    }

    /// Current attachment epoch.
    ///
    /// Owner lookups cached under an older epoch must be redone.
    pub fn epoch(&self) -> u64 {
        self.epoch.get()
    }

    /// Invalidate every cached owner lookup.
    pub(crate) fn touch(&self) {
        self.epoch.set(next_epoch());
    }

    /// Every live object whose model collection has the given ID.
    ///
    /// A consistent registry yields at most one.
    pub fn owners_of(&self, collection: CollectionId) -> SmallVec<[ObjectRef; 2]> {
        self.all()
            .into_iter()
            .map(|(_, obj)| obj)
            .filter(|obj| obj.models_id() == collection)
            .collect()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.all().iter().map(|(_, o)| o.name()).collect();
        f.debug_struct("Registry")
            .field("objects", &names)
            .field("epoch", &self.epoch.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;

    fn two_pore_config() -> NetworkConfig {
        NetworkConfig {
            coords: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
            conns: vec![[0, 1]],
        }
    }

    #[test]
    fn constructed_objects_are_registered() {
        let registry = Registry::new();
        let net = ObjectRef::network(&registry, "net", two_pore_config()).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(net.id()).is_some());
        assert_eq!(registry.find("net").map(|o| o.id()), Some(net.id()));
    }

    #[test]
    fn registry_does_not_keep_objects_alive() {
        let registry = Registry::new();
        let net = ObjectRef::network(&registry, "net", two_pore_config()).unwrap();
        let id = net.id();
        drop(net);
        assert!(registry.get(id).is_none());
        assert!(registry.is_empty());
        assert_eq!(registry.prune(), 0);
    }

    #[test]
    fn unregister_keeps_object_alive() {
        let registry = Registry::new();
        let net = ObjectRef::network(&registry, "net", two_pore_config()).unwrap();
        assert!(registry.unregister(net.id()));
        assert!(!registry.unregister(net.id()));
        assert!(registry.is_empty());
        assert_eq!(net.name(), "net");
        registry.register(&net);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn epoch_moves_on_membership_change() {
        let registry = Registry::new();
        let e0 = registry.epoch();
        let net = ObjectRef::network(&registry, "net", two_pore_config()).unwrap();
        let e1 = registry.epoch();
        assert_ne!(e0, e1);
        registry.unregister(net.id());
        assert_ne!(registry.epoch(), e1);
    }

    #[test]
    fn drop_during_a_borrow_is_swept_later() {
        let registry = Registry::new();
        let net = ObjectRef::network(&registry, "net", two_pore_config()).unwrap();
        {
            let _held = registry.objects.borrow();
            drop(net);
        }
        assert_eq!(registry.objects.borrow().len(), 1);
        assert!(registry.all().is_empty());
        assert!(registry.objects.borrow().is_empty());
        assert!(!registry.pending_prune.get());
    }

    #[test]
    fn epochs_differ_across_registries() {
        let a = Registry::new();
        let b = Registry::new();
        assert_ne!(a.epoch(), b.epoch());
    }

    #[test]
    fn owners_of_finds_holder() {
        let registry = Registry::new();
        let net = ObjectRef::network(&registry, "net", two_pore_config()).unwrap();
        let owners = registry.owners_of(net.models().id());
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].id(), net.id());
    }
}
