#![forbid(unsafe_code)]

//! Typed handles to bound properties.

use std::fmt;
use std::rc::Rc;

use companion_registry::InstanceRegistry;
use companion_stream::EventSource;

use crate::accessor::Accessor;
use crate::error::BindError;

/// A property bound to a companion stream, as produced by
/// [`Prototype::bind`](crate::Prototype::bind).
///
/// The handle is the typed equivalent of name-based access on the prototype:
/// `get`/`set` go through the bound accessor and `companion` returns the
/// per-instance stream.
pub struct BoundProperty<O, T> {
    name: Rc<str>,
    companion_key: Rc<str>,
    accessor: Accessor<O, T>,
    registry: Rc<InstanceRegistry>,
    layered: bool,
}

impl<O, T> Clone for BoundProperty<O, T> {
    fn clone(&self) -> Self {
        Self {
            name: Rc::clone(&self.name),
            companion_key: Rc::clone(&self.companion_key),
            accessor: self.accessor.clone(),
            registry: Rc::clone(&self.registry),
            layered: self.layered,
        }
    }
}

impl<O, T> fmt::Debug for BoundProperty<O, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundProperty")
            .field("name", &self.name)
            .field("companion_key", &self.companion_key)
            .field("layered", &self.layered)
            .finish()
    }
}

impl<O: 'static, T: Clone + 'static> BoundProperty<O, T> {
    pub(crate) fn new(
        name: Rc<str>,
        companion_key: Rc<str>,
        accessor: Accessor<O, T>,
        registry: Rc<InstanceRegistry>,
        layered: bool,
    ) -> Self {
        Self {
            name,
            companion_key,
            accessor,
            registry,
            layered,
        }
    }

    /// Property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key the companion stream is exposed under.
    #[must_use]
    pub fn companion_key(&self) -> &str {
        &self.companion_key
    }

    /// Whether the binding wraps a previously defined accessor.
    #[must_use]
    pub fn is_layered(&self) -> bool {
        self.layered
    }

    /// Current value, or `None` if never written.
    pub fn get(&self, instance: &Rc<O>) -> Result<Option<T>, BindError> {
        self.accessor.read(&self.name, instance)
    }

    /// Write a value and emit on the companion stream.
    pub fn set(&self, instance: &Rc<O>, value: T) -> Result<(), BindError> {
        self.accessor.write(&self.name, instance, value)
    }

    /// The instance's companion stream, created on first access.
    #[must_use]
    pub fn companion(&self, instance: &Rc<O>) -> EventSource<T>
    where
        O: std::any::Any,
    {
        self.registry.event_source(instance, &self.companion_key)
    }

    /// The bound accessor pair, for wrapping by a later binding.
    #[must_use]
    pub fn accessor(&self) -> Accessor<O, T> {
        self.accessor.clone()
    }
}
