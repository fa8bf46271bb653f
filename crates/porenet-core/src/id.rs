//! Strongly-typed identifiers for simulation objects and model collections.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ObjectId`] allocation.
static OBJECT_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Counter for unique [`CollectionId`] allocation.
static COLLECTION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifies a simulation object (network, geometry, phase, physics).
///
/// Allocated from a monotonic atomic counter via [`ObjectId::next`], so an
/// ID is never reused within a process even after its object is dropped.
/// The registry is keyed by this ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Allocate a fresh, unique object ID. Thread-safe.
    pub fn next() -> Self {
        Self(OBJECT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique per-instance identifier for a model collection.
///
/// Ownership of a collection is discovered by matching this ID against the
/// collections held by registered objects, never through a stored back
/// pointer. Sharing a collection handle shares its ID; copying a collection
/// allocates a new one, which is what makes a copy attachable to a second
/// owner without an ownership conflict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionId(u64);

impl CollectionId {
    /// Allocate a fresh, unique collection ID. Thread-safe.
    pub fn next() -> Self {
        Self(COLLECTION_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_ids_are_unique() {
        let a = ObjectId::next();
        let b = ObjectId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn collection_ids_are_unique() {
        let a = CollectionId::next();
        let b = CollectionId::next();
        assert_ne!(a, b);
    }
}
