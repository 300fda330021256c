#![forbid(unsafe_code)]

//! Identity-keyed side tables with weak instance anchors.
//!
//! # Design
//!
//! Every instance is an `Rc<O>` allocation; its identity is the allocation
//! address. The registry keeps two tables keyed by that address:
//!
//! ```text
//! values:  instance -> TypeId -> property name -> Box<T>
//! sources: instance -> TypeId -> companion key -> EventSource<T>
//! ```
//!
//! Each slot also stores a `Weak` anchor to its instance. The anchor never
//! keeps the instance's value alive, but it does keep the allocation itself
//! reserved, so an address cannot be reused while a slot for it exists.
//! Slots whose anchor is dead are *stale*: they are invisible to
//! [`has_entry`](InstanceRegistry::has_entry) and are removed by
//! [`prune`](InstanceRegistry::prune) or an automatic sweep.
//!
//! Keying entries by `TypeId` as well as by name keeps every typed lookup
//! total: the same name used with two different types yields two entries.
//!
//! # Invariants
//!
//! 1. A slot exists for an instance only after a write or a companion read.
//! 2. Exactly one `EventSource<T>` exists per (instance, key, `T`).
//! 3. The registry never holds a strong reference to an instance.
//! 4. Dropped entries are released outside the table borrow, so `Drop` impls
//!    of stored values may safely touch the registry.
//!
//! # Limitations
//!
//! Stored values, and the latest value held by each `EventSource`, are owned
//! strongly. A value that holds an `Rc` to its own instance forms a cycle:
//! the instance stays alive until the entry is overwritten with a value that
//! does not point back. Store a `Weak` for back-references.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use companion_stream::EventSource;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::config::RegistryConfig;

type Entries = FxHashMap<TypeId, FxHashMap<String, Box<dyn Any>>>;

struct Slot {
    anchor: Weak<dyn Any>,
    entries: Entries,
}

impl Slot {
    fn is_live(&self) -> bool {
        self.anchor.strong_count() > 0
    }
}

#[derive(Default)]
struct SideTable {
    slots: FxHashMap<usize, Slot>,
    /// Slots created since the last sweep.
    created: usize,
}

impl SideTable {
    fn slot_mut<O: Any>(&mut self, instance: &Rc<O>) -> &mut Slot {
        let created = &mut self.created;
        self.slots.entry(identity(instance)).or_insert_with(|| {
            *created += 1;
            trace!(
                instance = identity(instance),
                ty = std::any::type_name::<O>(),
                "registry slot created"
            );
            let anchor: Weak<dyn Any> = Rc::downgrade(instance) as Weak<dyn Any>;
            Slot {
                anchor,
                entries: Entries::default(),
            }
        })
    }

    fn slot<O: Any>(&self, instance: &Rc<O>) -> Option<&Slot> {
        self.slots.get(&identity(instance))
    }

    /// Remove stale slots, handing them back so the caller can drop them
    /// after releasing its borrow.
    fn sweep(&mut self) -> Vec<Slot> {
        self.created = 0;
        let dead: Vec<usize> = self
            .slots
            .iter()
            .filter(|(_, slot)| !slot.is_live())
            .map(|(key, _)| *key)
            .collect();
        dead.iter().filter_map(|key| self.slots.remove(key)).collect()
    }

    fn sweep_if_due(&mut self, prune_every: usize) -> Vec<Slot> {
        if prune_every > 0 && self.created >= prune_every {
            let swept = self.sweep();
            if !swept.is_empty() {
                debug!(removed = swept.len(), "registry auto-sweep");
            }
            swept
        } else {
            Vec::new()
        }
    }
}

fn identity<O>(instance: &Rc<O>) -> usize {
    Rc::as_ptr(instance).cast::<()>().addr()
}

/// Per-instance storage for bound property values and companion sources.
///
/// The registry is single-threaded (`!Send`); the shared registry returned by
/// [`shared`](Self::shared) is per thread.
pub struct InstanceRegistry {
    config: RegistryConfig,
    values: RefCell<SideTable>,
    sources: RefCell<SideTable>,
}

impl fmt::Debug for InstanceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceRegistry")
            .field("config", &self.config)
            .field("value_slots", &self.values.borrow().slots.len())
            .field("source_slots", &self.sources.borrow().slots.len())
            .finish()
    }
}

impl Default for InstanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static SHARED: Rc<InstanceRegistry> =
        Rc::new(InstanceRegistry::with_config(RegistryConfig::from_env()));
}

impl InstanceRegistry {
    /// Create a registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry with a custom configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            values: RefCell::new(SideTable::default()),
            sources: RefCell::new(SideTable::default()),
        }
    }

    /// The current thread's process-wide registry.
    ///
    /// Configured from the environment on first use
    /// (see [`RegistryConfig::from_env`]).
    #[must_use]
    pub fn shared() -> Rc<Self> {
        SHARED.with(Rc::clone)
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> RegistryConfig {
        self.config
    }

    /// Return the companion source for `(instance, key)`, creating an empty
    /// one on first access.
    pub fn event_source<O, T>(&self, instance: &Rc<O>, key: &str) -> EventSource<T>
    where
        O: Any,
        T: Clone + 'static,
    {
        let mut table = self.sources.borrow_mut();
        let swept = table.sweep_if_due(self.config.prune_every);
        let by_key = table
            .slot_mut(instance)
            .entries
            .entry(TypeId::of::<T>())
            .or_default();

        let source = match by_key
            .get(key)
            .and_then(|s| s.downcast_ref::<EventSource<T>>())
        {
            Some(existing) => existing.clone(),
            None => {
                trace!(key, "companion source created");
                let source = EventSource::new();
                by_key.insert(key.to_owned(), Box::new(source.clone()));
                source
            }
        };
        drop(table);
        drop(swept);
        source
    }

    /// Return the companion source for `(instance, key)` if one exists.
    #[must_use]
    pub fn existing_event_source<O, T>(&self, instance: &Rc<O>, key: &str) -> Option<EventSource<T>>
    where
        O: Any,
        T: Clone + 'static,
    {
        self.sources
            .borrow()
            .slot(instance)
            .and_then(|slot| slot.entries.get(&TypeId::of::<T>()))
            .and_then(|by_key| by_key.get(key))
            .and_then(|s| s.downcast_ref::<EventSource<T>>())
            .cloned()
    }

    /// Stored value of `name` on `instance`, or `None` if never set.
    ///
    /// Reading never creates registry state.
    #[must_use]
    pub fn value<O, T>(&self, instance: &Rc<O>, name: &str) -> Option<T>
    where
        O: Any,
        T: Clone + 'static,
    {
        self.values
            .borrow()
            .slot(instance)
            .and_then(|slot| slot.entries.get(&TypeId::of::<T>()))
            .and_then(|by_name| by_name.get(name))
            .and_then(|v| v.downcast_ref::<T>())
            .cloned()
    }

    /// Store `value` as the current value of `name` on `instance`.
    pub fn set_value<O, T>(&self, instance: &Rc<O>, name: &str, value: T)
    where
        O: Any,
        T: 'static,
    {
        let mut table = self.values.borrow_mut();
        let swept = table.sweep_if_due(self.config.prune_every);
        let previous = table
            .slot_mut(instance)
            .entries
            .entry(TypeId::of::<T>())
            .or_default()
            .insert(name.to_owned(), Box::new(value));
        drop(table);
        drop(previous);
        drop(swept);
    }

    /// Whether a live instance has any registry state.
    #[must_use]
    pub fn has_entry<O: Any>(&self, instance: &Rc<O>) -> bool {
        let live = |table: &RefCell<SideTable>| {
            table
                .borrow()
                .slot(instance)
                .is_some_and(Slot::is_live)
        };
        live(&self.values) || live(&self.sources)
    }

    /// Number of instances with a slot, including stale ones not yet pruned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instance_keys(|_| true).len()
    }

    /// Number of instances with a slot whose instance is still alive.
    #[must_use]
    pub fn live_len(&self) -> usize {
        self.instance_keys(Slot::is_live).len()
    }

    /// Whether the registry holds no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every slot whose instance has been reclaimed. Returns the
    /// number of instances released.
    pub fn prune(&self) -> usize {
        let stale = self.instance_keys(|slot| !slot.is_live()).len();
        let swept_values = self.values.borrow_mut().sweep();
        let swept_sources = self.sources.borrow_mut().sweep();
        debug!(
            instances = stale,
            value_slots = swept_values.len(),
            source_slots = swept_sources.len(),
            "registry pruned"
        );
        stale
    }

    fn instance_keys(&self, keep: impl Fn(&Slot) -> bool) -> FxHashSet<usize> {
        let values = self.values.borrow();
        let sources = self.sources.borrow();
        values
            .slots
            .iter()
            .chain(sources.slots.iter())
            .filter(|&(_, slot)| keep(slot))
            .map(|(key, _)| *key)
            .collect()
    }
}
