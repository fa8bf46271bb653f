//! The ordered model collection and its regeneration algorithm.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use porenet_core::{ArgValue, CollectionId, ObjectId, RegenError, RegenMode};
use tracing::{debug, info, warn};

use crate::args::ModelArgs;
use crate::entry::ModelEntry;
use crate::object::ObjectRef;
use crate::registry::Registry;
use crate::request::{RegenReport, RegenRequest};
use crate::schema::ModelRef;

const RULE: &str = "------------------------------------------------------------";

/// Uncached owner lookup: the single live object holding `collection`.
pub(crate) fn find_owner(
    registry: &Registry,
    collection: CollectionId,
) -> Result<ObjectRef, RegenError> {
    let mut owners = registry.owners_of(collection);
    match owners.len() {
        0 => Err(RegenError::OwnershipMissing {
            collection: Some(collection),
        }),
        1 => Ok(owners.remove(0)),
        _ => Err(RegenError::OwnershipAmbiguous {
            collection,
            owners: owners.iter().map(ObjectRef::name).collect(),
        }),
    }
}

struct Shared {
    id: CollectionId,
    entries: RefCell<IndexMap<String, ModelEntry>>,
    /// `(registry epoch, owner)` of the last successful resolution.
    owner_cache: Cell<Option<(u64, ObjectId)>>,
}

/// An insertion-ordered map from property name to [`ModelEntry`].
///
/// `Models` is a handle: cloning it aliases the same collection (same
/// [`CollectionId`]), which is how an object hands out its collection.
/// [`copy`](Self::copy) makes an independent collection with a fresh ID,
/// suitable for attaching to another object.
///
/// The owner is never stored. Operations that need it resolve it through
/// the [`Registry`] and cache the result until the registry's attachment
/// epoch moves.
#[derive(Clone)]
pub struct Models(Rc<Shared>);

impl Default for Models {
    fn default() -> Self {
        Self::new()
    }
}

impl Models {
    /// An empty collection with a fresh ID.
    pub fn new() -> Self {
        Self::with_entries(IndexMap::new())
    }

    fn with_entries(entries: IndexMap<String, ModelEntry>) -> Self {
        Self(Rc::new(Shared {
            id: CollectionId::next(),
            entries: RefCell::new(entries),
            owner_cache: Cell::new(None),
        }))
    }

    /// Identity of this collection.
    pub fn id(&self) -> CollectionId {
        self.0.id
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.entries.borrow().len()
    }

    /// Whether the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.entries.borrow().is_empty()
    }

    /// Whether an entry exists for `propname`.
    pub fn contains(&self, propname: &str) -> bool {
        self.0.entries.borrow().contains_key(propname)
    }

    /// Property names in collection order.
    pub fn keys(&self) -> Vec<String> {
        self.0.entries.borrow().keys().cloned().collect()
    }

    /// Clone of the entry for `propname`.
    pub fn get(&self, propname: &str) -> Option<ModelEntry> {
        self.0.entries.borrow().get(propname).cloned()
    }

    /// Snapshot of all entries, in collection order.
    ///
    /// The snapshot is detached from the collection, so the collection may
    /// be modified while iterating it.
    pub fn iter(&self) -> impl Iterator<Item = ModelEntry> {
        let snapshot: Vec<ModelEntry> = self.0.entries.borrow().values().cloned().collect();
        snapshot.into_iter()
    }

    /// Store `entry` under `propname`.
    ///
    /// The entry's property name is set to `propname`. An existing key is
    /// replaced in place and keeps its position; a new key is appended.
    /// Returns the replaced entry, if any.
    pub fn insert(&self, propname: &str, mut entry: ModelEntry) -> Option<ModelEntry> {
        entry.attach(propname, self.0.id);
        self.0
            .entries
            .borrow_mut()
            .insert(propname.to_string(), entry)
    }

    /// Remove the entry for `propname`. The rest keep their order.
    ///
    /// Values already written to the owner are left alone.
    pub fn remove(&self, propname: &str) -> Option<ModelEntry> {
        self.0.entries.borrow_mut().shift_remove(propname)
    }

    /// Change one stored argument of an existing entry, keeping its position.
    ///
    /// Nothing is recomputed; the new value takes effect at the next
    /// regenerate. Returns the previous value of the argument.
    ///
    /// # Errors
    ///
    /// [`RegenError::KeyNotFound`] if there is no entry for `propname`.
    pub fn set_arg(
        &self,
        propname: &str,
        name: impl Into<String>,
        value: impl Into<ArgValue>,
    ) -> Result<Option<ArgValue>, RegenError> {
        let mut entries = self.0.entries.borrow_mut();
        let entry = entries
            .get_mut(propname)
            .ok_or_else(|| RegenError::KeyNotFound {
                propname: propname.to_string(),
            })?;
        Ok(entry.set_arg(name, value))
    }

    /// Find the single live object holding this collection.
    ///
    /// # Errors
    ///
    /// [`RegenError::OwnershipMissing`] if no object holds it,
    /// [`RegenError::OwnershipAmbiguous`] if more than one does.
    pub fn resolve_owner(&self, registry: &Registry) -> Result<ObjectRef, RegenError> {
        let epoch = registry.epoch();
        if let Some((cached_epoch, id)) = self.0.owner_cache.get() {
            if cached_epoch == epoch {
                if let Some(owner) = registry.get(id) {
                    debug!(collection = %self.0.id, owner = %id, "owner cache hit");
                    return Ok(owner);
                }
            }
        }
        debug!(collection = %self.0.id, "resolving owner");
        let owner = find_owner(registry, self.0.id)?;
        self.0.owner_cache.set(Some((epoch, owner.id())));
        Ok(owner)
    }

    /// Add an estimation function for `propname`.
    ///
    /// Declared defaults are merged with `args` (explicit values win) and the
    /// entry is stored, replacing any entry already at `propname` in place.
    /// `normal` and `constant` entries are then computed immediately and
    /// written to the owner; `deferred` and `on_demand` entries are stored
    /// without running.
    ///
    /// With no owner the call still succeeds: a warning is logged and the
    /// entry is stored as `deferred`.
    ///
    /// # Errors
    ///
    /// - [`RegenError::OwnershipAmbiguous`]: nothing is stored.
    /// - [`RegenError::ModelFailed`] wrapping a missing required argument:
    ///   nothing is stored.
    /// - [`RegenError::ModelFailed`] from the first evaluation: the entry
    ///   stays stored but no value is written.
    pub fn add(
        &self,
        registry: &Registry,
        propname: &str,
        model: ModelRef,
        regen_mode: RegenMode,
        args: ModelArgs,
    ) -> Result<(), RegenError> {
        let owner = match self.resolve_owner(registry) {
            Ok(owner) => Some(owner),
            Err(RegenError::OwnershipMissing { .. }) => {
                warn!(
                    propname = %propname,
                    collection = %self.0.id,
                    requested = %regen_mode,
                    "no owner found for model collection, regen_mode set to deferred"
                );
                None
            }
            Err(err) => return Err(err),
        };
        let regen_mode = if owner.is_some() {
            regen_mode
        } else {
            RegenMode::Deferred
        };

        let model_name = model.name().to_string();
        let entry = ModelEntry::new(model, propname, regen_mode, &args).map_err(|source| {
            RegenError::ModelFailed {
                propname: propname.to_string(),
                model: model_name,
                source,
            }
        })?;
        self.insert(propname, entry);

        if let Some(owner) = owner {
            if regen_mode.runs_on_add() {
                let entry = self.get(propname).ok_or_else(|| RegenError::KeyNotFound {
                    propname: propname.to_string(),
                })?;
                let value = entry.evaluate_for(&owner, registry)?;
                owner.set(propname, value);
            }
        }
        Ok(())
    }

    /// Recompute the selected entries and write the results to the owner.
    ///
    /// The working set is materialized first (see [`RegenRequest::plan`])
    /// and then run in collection order, so an entry sees the fresh values
    /// of every entry declared before it. `constant` entries never run.
    /// Requested names with no entry are logged and skipped.
    ///
    /// # Errors
    ///
    /// - [`RegenError::OwnershipAmbiguous`] or
    ///   [`RegenError::OwnershipMissing`]: nothing runs.
    /// - [`RegenError::ModelFailed`]: the pass stops at the failing entry;
    ///   values written before it remain.
    pub fn regenerate(
        &self,
        registry: &Registry,
        request: &RegenRequest,
    ) -> Result<RegenReport, RegenError> {
        let owner = self.resolve_owner(registry)?;
        let order: Vec<(String, RegenMode)> = self
            .0
            .entries
            .borrow()
            .iter()
            .map(|(name, entry)| (name.clone(), entry.regen_mode()))
            .collect();
        let plan = request.plan(&order);

        for name in &plan.unknown {
            warn!(propname = %name, mode = %request.mode, "not in model collection, skipping");
        }

        info!(owner = %owner.name(), count = plan.run.len(), "regenerating models");
        let mut regenerated = Vec::with_capacity(plan.run.len());
        for (i, name) in plan.run.iter().enumerate() {
            // An estimation function may have removed it mid-pass.
            let Some(entry) = self.get(name) else {
                continue;
            };
            let value = entry.evaluate_for(&owner, registry)?;
            owner.set(name, value);
            info!(index = i, propname = %name, "regenerated");
            regenerated.push(name.clone());
        }
        Ok(RegenReport {
            regenerated,
            unknown: plan.unknown,
        })
    }

    /// Move the named entries to new positions.
    ///
    /// The named entries are taken out first. Each is then inserted at its
    /// target index into the remaining order, lowest index first. Entries not
    /// named keep their relative order. An index past the end is clamped to
    /// the end.
    ///
    /// The request is validated before anything moves.
    ///
    /// # Errors
    ///
    /// - [`RegenError::KeyNotFound`] for a name with no entry.
    /// - [`RegenError::InvalidReorder`] if a name or an index appears twice.
    pub fn reorder<I, K>(&self, positions: I) -> Result<(), RegenError>
    where
        I: IntoIterator<Item = (K, usize)>,
        K: Into<String>,
    {
        let mut entries = self.0.entries.borrow_mut();

        let mut targets: BTreeMap<usize, String> = BTreeMap::new();
        let mut moved: HashSet<String> = HashSet::new();
        for (name, index) in positions {
            let name = name.into();
            if !entries.contains_key(&name) {
                return Err(RegenError::KeyNotFound { propname: name });
            }
            if !moved.insert(name.clone()) {
                return Err(RegenError::InvalidReorder {
                    reason: format!("'{name}' is given more than one position"),
                });
            }
            if let Some(other) = targets.get(&index) {
                return Err(RegenError::InvalidReorder {
                    reason: format!("'{other}' and '{name}' both target index {index}"),
                });
            }
            targets.insert(index, name);
        }

        let mut order: Vec<String> = entries
            .keys()
            .filter(|name| !moved.contains(*name))
            .cloned()
            .collect();
        for (index, name) in targets {
            let at = if index > order.len() {
                warn!(propname = %name, index, len = order.len(), "reorder index past the end, clamping");
                order.len()
            } else {
                index
            };
            order.insert(at, name);
        }

        let mut old = std::mem::take(&mut *entries);
        for name in order {
            if let Some(entry) = old.shift_remove(&name) {
                entries.insert(name, entry);
            }
        }
        Ok(())
    }

    /// An independent collection with the same entries in the same order.
    ///
    /// The copy has a fresh ID and no owner. Attach it with
    /// [`ObjectRef::set_models`]; from then on its entries resolve to that
    /// object alone.
    pub fn copy(&self) -> Self {
        let copy = Self::new();
        {
            let source = self.0.entries.borrow();
            let mut target = copy.0.entries.borrow_mut();
            for (name, entry) in source.iter() {
                let mut entry = entry.clone();
                entry.attach(name, copy.0.id);
                target.insert(name.clone(), entry);
            }
        }
        copy
    }

    /// Whether two handles alias the same collection.
    pub fn ptr_eq(&self, other: &Models) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Table of index, property name and regeneration mode.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        out.push_str(RULE);
        out.push('\n');
        let header = format!("{:<5} {:<30} {:<20}", "#", "Property Name", "Regeneration Mode");
        out.push_str(header.trim_end());
        out.push('\n');
        out.push_str(RULE);
        out.push('\n');
        for (i, (name, entry)) in self.0.entries.borrow().iter().enumerate() {
            let row = format!("{:<5} {:<30} {:<20}", i, name, entry.regen_mode().as_str());
            out.push_str(row.trim_end());
            out.push('\n');
        }
        out.push_str(RULE);
        out
    }
}

impl fmt::Display for Models {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl fmt::Debug for Models {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Models")
            .field("id", &self.0.id)
            .field("keys", &self.keys())
            .finish()
    }
}
