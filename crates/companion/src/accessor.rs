#![forbid(unsafe_code)]

//! Getter/setter pairs for computed properties.
//!
//! An [`Accessor`] is what a property *is* once it stops being a plain field:
//! reads and writes are routed through closures that receive the owning
//! instance. Either half may be absent. Accessing a missing half is a
//! [`BindError::MissingGetter`] / [`BindError::MissingSetter`].
//!
//! Getters report `None` for "no value" (never written).

use std::fmt;
use std::rc::Rc;

use crate::error::BindError;

type GetFn<O, T> = dyn Fn(&Rc<O>) -> Result<Option<T>, BindError>;
type SetFn<O, T> = dyn Fn(&Rc<O>, T) -> Result<(), BindError>;

/// A getter/setter pair over instances of `O` holding values of type `T`.
///
/// Cloning shares the underlying closures.
pub struct Accessor<O, T> {
    getter: Option<Rc<GetFn<O, T>>>,
    setter: Option<Rc<SetFn<O, T>>>,
}

impl<O, T> Clone for Accessor<O, T> {
    fn clone(&self) -> Self {
        Self {
            getter: self.getter.clone(),
            setter: self.setter.clone(),
        }
    }
}

impl<O, T> Default for Accessor<O, T> {
    fn default() -> Self {
        Self {
            getter: None,
            setter: None,
        }
    }
}

impl<O, T> fmt::Debug for Accessor<O, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .finish()
    }
}

impl<O: 'static, T: 'static> Accessor<O, T> {
    /// An accessor with neither getter nor setter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an infallible getter.
    #[must_use]
    pub fn getter(self, get: impl Fn(&Rc<O>) -> Option<T> + 'static) -> Self {
        self.try_getter(move |instance| Ok(get(instance)))
    }

    /// Install an infallible setter.
    #[must_use]
    pub fn setter(self, set: impl Fn(&Rc<O>, T) + 'static) -> Self {
        self.try_setter(move |instance, value| {
            set(instance, value);
            Ok(())
        })
    }

    /// Install a getter that may fail (e.g. because it wraps another accessor).
    #[must_use]
    pub fn try_getter(
        mut self,
        get: impl Fn(&Rc<O>) -> Result<Option<T>, BindError> + 'static,
    ) -> Self {
        self.getter = Some(Rc::new(get));
        self
    }

    /// Install a setter that may fail.
    #[must_use]
    pub fn try_setter(
        mut self,
        set: impl Fn(&Rc<O>, T) -> Result<(), BindError> + 'static,
    ) -> Self {
        self.setter = Some(Rc::new(set));
        self
    }

    /// Whether a getter is installed.
    #[must_use]
    pub fn has_getter(&self) -> bool {
        self.getter.is_some()
    }

    /// Whether a setter is installed.
    #[must_use]
    pub fn has_setter(&self) -> bool {
        self.setter.is_some()
    }

    /// Read `property` on `instance` through the getter.
    pub fn read(&self, property: &str, instance: &Rc<O>) -> Result<Option<T>, BindError> {
        match &self.getter {
            Some(get) => get(instance),
            None => Err(BindError::MissingGetter {
                property: property.to_owned(),
            }),
        }
    }

    /// Write `value` to `property` on `instance` through the setter.
    pub fn write(&self, property: &str, instance: &Rc<O>, value: T) -> Result<(), BindError> {
        match &self.setter {
            Some(set) => set(instance, value),
            None => Err(BindError::MissingSetter {
                property: property.to_owned(),
            }),
        }
    }
}
