#![forbid(unsafe_code)]

//! Declaration-time member tables and the property transformer.
//!
//! # Design
//!
//! A [`Prototype<O>`] describes the properties of instances of `O`: plain
//! fields, computed [`Accessor`]s, and read-only companion streams. It plays
//! the role of a class body. Members are declared once, in order, while the
//! type is being set up; afterwards instances are created with
//! [`instantiate`](Prototype::instantiate) and accessed by name or through
//! typed [`BoundProperty`] handles.
//!
//! [`bind`](Prototype::bind) turns a property into a bound (value, stream)
//! pair:
//!
//! ```text
//! before:  name  -> field | accessor(get?, set?)
//! after:   name  -> accessor(get, set + emit)
//!          key   -> companion (read-only, per-instance EventSource)
//! ```
//!
//! - **Plain field** (no prior accessor): values live in the
//!   [`InstanceRegistry`]; each write stores the value, reads it back and
//!   emits what was stored.
//! - **Layered** (prior accessor present): the new accessor wraps the old
//!   one. Writes go through the old setter, then emit either the raw value
//!   (`emit_raw_setter_value`, or when the old accessor has no getter) or the
//!   value read back through the old getter.
//!
//! Any previous member under the property name or the companion key is
//! replaced, so the binding always takes full effect.
//!
//! # Failure Modes
//!
//! | Condition                         | Result                          |
//! |-----------------------------------|---------------------------------|
//! | Layered write, old setter missing | `MissingSetter`, nothing emitted |
//! | Layered read, old getter missing  | `MissingGetter`                 |
//! | Name not declared                 | `UnknownProperty`               |
//! | Declared with another value type  | `TypeMismatch`                  |
//! | Stream op on a value, or vice versa | `WrongKind`                   |
//! | Companion key equal to the name   | `KeyCollision`                  |

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::rc::Rc;

use companion_registry::InstanceRegistry;
use companion_stream::EventSource;
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::accessor::Accessor;
use crate::error::BindError;
use crate::options::{BindArg, normalize};
use crate::property::BoundProperty;

/// What a prototype member currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Plain data field stored in the registry.
    Field,
    /// Getter/setter pair (including bound properties).
    Accessor,
    /// Read-only companion stream.
    Companion,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Field => "a plain field",
            Self::Accessor => "an accessor",
            Self::Companion => "a companion stream",
        })
    }
}

type CompanionFn<O, T> = Rc<dyn Fn(&Rc<O>) -> EventSource<T>>;
type Initializer<O> = Rc<dyn Fn(&Prototype<O>, &Rc<O>) -> Result<(), BindError>>;

struct Member {
    kind: MemberKind,
    ty: TypeId,
    ty_name: &'static str,
    /// `Accessor<O, T>` or `CompanionFn<O, T>`; unit for plain fields.
    slot: Box<dyn Any>,
}

impl Member {
    fn new<T: 'static>(kind: MemberKind, slot: Box<dyn Any>) -> Self {
        Self {
            kind,
            ty: TypeId::of::<T>(),
            ty_name: type_name::<T>(),
            slot,
        }
    }

    fn expect_type<T: 'static>(&self, property: &str) -> Result<(), BindError> {
        if self.ty == TypeId::of::<T>() {
            Ok(())
        } else {
            Err(BindError::TypeMismatch {
                property: property.to_owned(),
                expected: type_name::<T>(),
                found: self.ty_name,
            })
        }
    }

    fn downcast<S: 'static, T: 'static>(&self, property: &str) -> Result<&S, BindError> {
        self.expect_type::<T>(property)?;
        self.slot
            .downcast_ref::<S>()
            .ok_or_else(|| BindError::TypeMismatch {
                property: property.to_owned(),
                expected: type_name::<T>(),
                found: self.ty_name,
            })
    }
}

/// Property table for instances of `O`.
pub struct Prototype<O> {
    type_name: String,
    registry: Rc<InstanceRegistry>,
    members: FxHashMap<String, Member>,
    /// Field initializers in declaration order.
    initializers: Vec<(String, Initializer<O>)>,
}

impl<O> fmt::Debug for Prototype<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut members: Vec<_> = self
            .members
            .iter()
            .map(|(name, m)| (name.as_str(), m.kind))
            .collect();
        members.sort_unstable_by_key(|(name, _)| *name);
        f.debug_struct("Prototype")
            .field("type_name", &self.type_name)
            .field("members", &members)
            .field("initializers", &self.initializers.len())
            .finish()
    }
}

impl<O: Any> Prototype<O> {
    /// Create an empty prototype backed by the thread's shared registry.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self::with_registry(type_name, InstanceRegistry::shared())
    }

    /// Create an empty prototype backed by `registry`.
    #[must_use]
    pub fn with_registry(type_name: impl Into<String>, registry: Rc<InstanceRegistry>) -> Self {
        Self {
            type_name: type_name.into(),
            registry,
            members: FxHashMap::default(),
            initializers: Vec::new(),
        }
    }

    /// Name of the described type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Registry holding per-instance state.
    #[must_use]
    pub fn registry(&self) -> &Rc<InstanceRegistry> {
        &self.registry
    }

    /// Whether a member named `name` is declared.
    #[must_use]
    pub fn has_member(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Kind of the member named `name`, if declared.
    #[must_use]
    pub fn member_kind(&self, name: &str) -> Option<MemberKind> {
        self.members.get(name).map(|m| m.kind)
    }

    /// Declared member names, sorted.
    #[must_use]
    pub fn member_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.members.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Declare a plain field with no initializer.
    ///
    /// An accessor of the same value type already declared under `name`
    /// (including a binding) is kept, so declaration order does not matter.
    pub fn field<T: Clone + 'static>(&mut self, name: &str) -> &mut Self {
        if let Some(member) = self.members.get(name)
            && member.kind == MemberKind::Accessor
        {
            match member.expect_type::<T>(name) {
                Ok(()) => {
                    trace!(ty = %self.type_name, field = name, "field kept as accessor");
                    return self;
                }
                Err(err) => warn!(ty = %self.type_name, %err, "accessor replaced by field"),
            }
        }
        self.members.insert(
            name.to_owned(),
            Member::new::<T>(MemberKind::Field, Box::new(())),
        );
        self
    }

    /// Declare a plain field whose initializer runs on every
    /// [`instantiate`](Self::instantiate).
    ///
    /// The initializer writes through whatever the member is at instantiation
    /// time, so a field bound after this declaration emits its initial value.
    pub fn field_with<T, F>(&mut self, name: &str, init: F) -> &mut Self
    where
        T: Clone + 'static,
        F: Fn() -> T + 'static,
    {
        self.field::<T>(name);
        let property = name.to_owned();
        let initializer: Initializer<O> =
            Rc::new(move |proto: &Prototype<O>, instance: &Rc<O>| {
                proto.set::<T>(instance, &property, init())
            });
        self.initializers.push((name.to_owned(), initializer));
        self
    }

    /// Define `name` as a computed property.
    pub fn accessor<T: Clone + 'static>(
        &mut self,
        name: &str,
        accessor: Accessor<O, T>,
    ) -> &mut Self {
        self.members.insert(
            name.to_owned(),
            Member::new::<T>(MemberKind::Accessor, Box::new(accessor)),
        );
        self
    }

    /// Bind `name` to a companion stream.
    ///
    /// `arg` is `()`, a companion key, or [`BindOptions`](crate::BindOptions).
    /// If `name` is currently an accessor, the binding wraps it; otherwise the
    /// value is stored in the registry. A companion key equal to `name` is
    /// rejected with `KeyCollision`.
    pub fn bind<T: Clone + 'static>(
        &mut self,
        name: &str,
        arg: impl Into<BindArg>,
    ) -> Result<BoundProperty<O, T>, BindError> {
        let options = normalize(arg);
        let key = options.companion_key(name);
        if key == name {
            return Err(BindError::KeyCollision {
                property: name.to_owned(),
            });
        }

        let prior = match self.members.get(name) {
            Some(member) if member.kind == MemberKind::Accessor => {
                Some(member.downcast::<Accessor<O, T>, T>(name)?.clone())
            }
            Some(member) if member.kind == MemberKind::Field => {
                member.expect_type::<T>(name)?;
                None
            }
            _ => None,
        };

        self.members.remove(name);
        self.members.remove(&key);

        let property: Rc<str> = Rc::from(name);
        let companion_key: Rc<str> = Rc::from(key.as_str());
        let layered = prior.is_some();

        let companion: CompanionFn<O, T> = {
            let registry = Rc::clone(&self.registry);
            let key = Rc::clone(&companion_key);
            Rc::new(move |instance: &Rc<O>| registry.event_source::<O, T>(instance, &key))
        };
        self.members.insert(
            key.clone(),
            Member::new::<T>(MemberKind::Companion, Box::new(companion)),
        );

        let accessor = match prior {
            None => self.store_accessor::<T>(&property, &companion_key),
            Some(prior) => self.layered_accessor::<T>(
                &property,
                &companion_key,
                prior,
                options.emit_raw_setter_value,
            ),
        };
        self.members.insert(
            name.to_owned(),
            Member::new::<T>(MemberKind::Accessor, Box::new(accessor.clone())),
        );

        debug!(
            ty = %self.type_name,
            property = name,
            companion = %companion_key,
            layered,
            raw = options.emit_raw_setter_value,
            "property bound"
        );

        Ok(BoundProperty::new(
            property,
            companion_key,
            accessor,
            Rc::clone(&self.registry),
            layered,
        ))
    }

    /// Accessor for a binding over a plain field.
    fn store_accessor<T: Clone + 'static>(
        &self,
        property: &Rc<str>,
        key: &Rc<str>,
    ) -> Accessor<O, T> {
        let get = {
            let registry = Rc::clone(&self.registry);
            let property = Rc::clone(property);
            move |instance: &Rc<O>| registry.value::<O, T>(instance, &property)
        };
        let registry = Rc::clone(&self.registry);
        let property = Rc::clone(property);
        let key = Rc::clone(key);
        let stored = get.clone();
        Accessor::new().getter(get).setter(move |instance, value: T| {
            registry.set_value(instance, &property, value);
            if let Some(current) = stored(instance) {
                trace!(property = %property, "bound write");
                registry.event_source::<O, T>(instance, &key).emit(current);
            }
        })
    }

    /// Accessor for a binding that wraps `prior`.
    fn layered_accessor<T: Clone + 'static>(
        &self,
        property: &Rc<str>,
        key: &Rc<str>,
        prior: Accessor<O, T>,
        emit_raw: bool,
    ) -> Accessor<O, T> {
        let emit_raw = emit_raw || !prior.has_getter();
        let registry = Rc::clone(&self.registry);
        let set_property = Rc::clone(property);
        let get_property = Rc::clone(property);
        let key = Rc::clone(key);
        let wrapped = prior.clone();

        Accessor::new()
            .try_getter(move |instance| prior.read(&get_property, instance))
            .try_setter(move |instance, value: T| {
                let raw = emit_raw.then(|| value.clone());
                wrapped.write(&set_property, instance, value)?;
                let emitted = match raw {
                    Some(raw) => Some(raw),
                    None => wrapped.read(&set_property, instance)?,
                };
                match emitted {
                    Some(value) => {
                        trace!(property = %set_property, "layered bound write");
                        registry.event_source::<O, T>(instance, &key).emit(value);
                    }
                    None => trace!(property = %set_property, "wrapped getter reported no value"),
                }
                Ok(())
            })
    }

    /// Allocate an instance and run field initializers in declaration order.
    ///
    /// Initializer writes behave exactly like runtime writes, so a bound
    /// field with an initializer has emitted once when this returns.
    pub fn instantiate(&self, value: O) -> Result<Rc<O>, BindError> {
        let instance = Rc::new(value);
        for (name, init) in &self.initializers {
            trace!(ty = %self.type_name, field = %name, "running initializer");
            init(self, &instance)?;
        }
        Ok(instance)
    }

    /// Read `name` on `instance`.
    pub fn get<T: Clone + 'static>(
        &self,
        instance: &Rc<O>,
        name: &str,
    ) -> Result<Option<T>, BindError> {
        let member = self.member(name)?;
        match member.kind {
            MemberKind::Field => {
                member.expect_type::<T>(name)?;
                Ok(self.registry.value::<O, T>(instance, name))
            }
            MemberKind::Accessor => member
                .downcast::<Accessor<O, T>, T>(name)?
                .read(name, instance),
            MemberKind::Companion => Err(wrong_kind(name, MemberKind::Accessor, member.kind)),
        }
    }

    /// Write `value` to `name` on `instance`.
    pub fn set<T: Clone + 'static>(
        &self,
        instance: &Rc<O>,
        name: &str,
        value: T,
    ) -> Result<(), BindError> {
        let member = self.member(name)?;
        match member.kind {
            MemberKind::Field => {
                member.expect_type::<T>(name)?;
                self.registry.set_value(instance, name, value);
                Ok(())
            }
            MemberKind::Accessor => member
                .downcast::<Accessor<O, T>, T>(name)?
                .write(name, instance, value),
            MemberKind::Companion => Err(wrong_kind(name, MemberKind::Accessor, member.kind)),
        }
    }

    /// The companion stream exposed under `key` on `instance`.
    pub fn companion<T: Clone + 'static>(
        &self,
        instance: &Rc<O>,
        key: &str,
    ) -> Result<EventSource<T>, BindError> {
        let member = self.member(key)?;
        if member.kind != MemberKind::Companion {
            return Err(wrong_kind(key, MemberKind::Companion, member.kind));
        }
        let source = member.downcast::<CompanionFn<O, T>, T>(key)?;
        Ok(source(instance))
    }

    fn member(&self, name: &str) -> Result<&Member, BindError> {
        self.members.get(name).ok_or_else(|| BindError::UnknownProperty {
            property: name.to_owned(),
        })
    }
}

fn wrong_kind(property: &str, expected: MemberKind, found: MemberKind) -> BindError {
    BindError::WrongKind {
        property: property.to_owned(),
        expected,
        found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BindOptions;
    use std::cell::RefCell;
    use tracing_test::traced_test;

    #[derive(Debug, Default)]
    struct Panel {
        title: RefCell<Option<String>>,
    }

    fn proto() -> Prototype<Panel> {
        Prototype::with_registry("Panel", Rc::new(InstanceRegistry::new()))
    }

    fn record<T: Clone + 'static>(
        source: &EventSource<T>,
    ) -> (Rc<RefCell<Vec<T>>>, companion_stream::Subscription) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let sub = source.subscribe(move |v: &T| sink.borrow_mut().push(v.clone()));
        (log, sub)
    }

    #[test]
    fn bind_replaces_field_with_accessor_and_companion() {
        let mut p = proto();
        p.field::<String>("title");
        assert_eq!(p.member_kind("title"), Some(MemberKind::Field));

        let bound = p.bind::<String>("title", ()).unwrap();
        assert_eq!(bound.companion_key(), "title$");
        assert!(!bound.is_layered());
        assert_eq!(p.member_kind("title"), Some(MemberKind::Accessor));
        assert_eq!(p.member_kind("title$"), Some(MemberKind::Companion));
        assert_eq!(p.member_names(), vec!["title", "title$"]);
    }

    #[test]
    fn undeclared_name_can_be_bound() {
        let mut p = proto();
        p.bind::<u32>("count", "n$").unwrap();
        let inst = p.instantiate(Panel::default()).unwrap();

        p.set(&inst, "count", 3u32).unwrap();
        assert_eq!(p.get::<u32>(&inst, "count").unwrap(), Some(3));
        assert_eq!(p.companion::<u32>(&inst, "n$").unwrap().latest(), Some(3));
        assert!(!p.has_member("count$"));
    }

    #[test]
    fn plain_write_stores_then_emits() {
        let mut p = proto();
        p.field::<String>("title");
        p.bind::<String>("title", ()).unwrap();
        let inst = p.instantiate(Panel::default()).unwrap();

        let (log, _sub) = record(&p.companion::<String>(&inst, "title$").unwrap());
        assert!(log.borrow().is_empty());

        p.set(&inst, "title", "a".to_string()).unwrap();
        p.set(&inst, "title", "b".to_string()).unwrap();
        assert_eq!(*log.borrow(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(p.get::<String>(&inst, "title").unwrap(), Some("b".to_string()));
    }

    #[test]
    fn unbound_field_write_does_not_emit() {
        let mut p = proto();
        p.field::<i32>("x");
        let inst = p.instantiate(Panel::default()).unwrap();
        p.set(&inst, "x", 5).unwrap();
        assert_eq!(p.get::<i32>(&inst, "x").unwrap(), Some(5));
        assert!(!p.has_member("x$"));
    }

    #[test]
    fn initializer_runs_through_binding() {
        let mut p = proto();
        p.field_with("title", || "init".to_string());
        p.bind::<String>("title", ()).unwrap();

        let inst = p.instantiate(Panel::default()).unwrap();
        let src = p.companion::<String>(&inst, "title$").unwrap();
        assert_eq!(src.latest(), Some("init".to_string()));
        assert_eq!(src.emission_count(), 1);
    }

    #[test]
    fn layered_emits_getter_value_by_default() {
        let mut p = proto();
        p.accessor(
            "title",
            Accessor::<Panel, String>::new()
                .getter(|panel| panel.title.borrow().clone())
                .setter(|panel, v| *panel.title.borrow_mut() = Some(v.to_uppercase())),
        );
        let bound = p.bind::<String>("title", ()).unwrap();
        assert!(bound.is_layered());

        let inst = p.instantiate(Panel::default()).unwrap();
        p.set(&inst, "title", "hello".to_string()).unwrap();

        assert_eq!(*inst.title.borrow(), Some("HELLO".to_string()));
        assert_eq!(
            p.companion::<String>(&inst, "title$").unwrap().latest(),
            Some("HELLO".to_string())
        );
    }

    #[test]
    fn layered_raw_emission() {
        let mut p = proto();
        p.accessor(
            "title",
            Accessor::<Panel, String>::new()
                .getter(|panel| panel.title.borrow().clone())
                .setter(|panel, v| *panel.title.borrow_mut() = Some(v.to_uppercase())),
        );
        p.bind::<String>("title", BindOptions::new().emit_raw_setter_value(true))
            .unwrap();

        let inst = p.instantiate(Panel::default()).unwrap();
        p.set(&inst, "title", "hello".to_string()).unwrap();
        assert_eq!(
            p.companion::<String>(&inst, "title$").unwrap().latest(),
            Some("hello".to_string())
        );
        assert_eq!(p.get::<String>(&inst, "title").unwrap(), Some("HELLO".to_string()));
    }

    #[test]
    fn layered_without_getter_emits_raw_and_fails_reads() {
        let mut p = proto();
        p.accessor(
            "title",
            Accessor::<Panel, String>::new()
                .setter(|panel, v| *panel.title.borrow_mut() = Some(v)),
        );
        p.bind::<String>("title", ()).unwrap();

        let inst = p.instantiate(Panel::default()).unwrap();
        p.set(&inst, "title", "x".to_string()).unwrap();
        assert_eq!(
            p.companion::<String>(&inst, "title$").unwrap().latest(),
            Some("x".to_string())
        );
        assert_eq!(
            p.get::<String>(&inst, "title"),
            Err(BindError::MissingGetter {
                property: "title".into()
            })
        );
    }

    #[test]
    fn layered_without_setter_fails_and_does_not_emit() {
        let mut p = proto();
        p.accessor(
            "title",
            Accessor::<Panel, String>::new().getter(|_| Some("fixed".to_string())),
        );
        p.bind::<String>("title", ()).unwrap();

        let inst = p.instantiate(Panel::default()).unwrap();
        let err = p.set(&inst, "title", "x".to_string()).unwrap_err();
        assert_eq!(
            err,
            BindError::MissingSetter {
                property: "title".into()
            }
        );
        assert!(!p.companion::<String>(&inst, "title$").unwrap().has_value());
        assert_eq!(p.get::<String>(&inst, "title").unwrap(), Some("fixed".to_string()));
    }

    #[test]
    fn layered_getter_reporting_none_skips_emission() {
        let mut p = proto();
        p.accessor(
            "title",
            Accessor::<Panel, String>::new()
                .getter(|_| None)
                .setter(|_, _| {}),
        );
        p.bind::<String>("title", ()).unwrap();

        let inst = p.instantiate(Panel::default()).unwrap();
        p.set(&inst, "title", "x".to_string()).unwrap();
        assert!(!p.companion::<String>(&inst, "title$").unwrap().has_value());
    }

    #[test]
    fn rebinding_custom_key_replaces_existing_member() {
        let mut p = proto();
        p.field::<i32>("stale$");
        p.bind::<String>("title", "stale$").unwrap();
        assert_eq!(p.member_kind("stale$"), Some(MemberKind::Companion));
    }

    #[test]
    fn type_mismatch_on_bind_and_access() {
        let mut p = proto();
        p.field::<String>("title");
        let err = p.bind::<u32>("title", ()).unwrap_err();
        assert!(matches!(err, BindError::TypeMismatch { .. }));
        // Failed binding leaves the prototype untouched.
        assert_eq!(p.member_kind("title"), Some(MemberKind::Field));
        assert!(!p.has_member("title$"));

        p.bind::<String>("title", ()).unwrap();
        let inst = p.instantiate(Panel::default()).unwrap();
        assert!(matches!(
            p.get::<u32>(&inst, "title"),
            Err(BindError::TypeMismatch { .. })
        ));
        assert!(matches!(
            p.companion::<u32>(&inst, "title$"),
            Err(BindError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn companion_is_read_only_and_kinds_are_checked() {
        let mut p = proto();
        p.bind::<String>("title", ()).unwrap();
        let inst = p.instantiate(Panel::default()).unwrap();

        assert_eq!(
            p.set(&inst, "title$", "x".to_string()),
            Err(BindError::WrongKind {
                property: "title$".into(),
                expected: MemberKind::Accessor,
                found: MemberKind::Companion,
            })
        );
        assert!(matches!(
            p.get::<String>(&inst, "title$"),
            Err(BindError::WrongKind { .. })
        ));
        assert!(matches!(
            p.companion::<String>(&inst, "title"),
            Err(BindError::WrongKind { .. })
        ));
        assert_eq!(
            p.get::<String>(&inst, "nope"),
            Err(BindError::UnknownProperty {
                property: "nope".into()
            })
        );
    }

    #[test]
    fn initializer_error_aborts_instantiation() {
        let mut p = proto();
        p.field_with("title", || "x".to_string());
        p.accessor(
            "title",
            Accessor::<Panel, String>::new().getter(|_| None),
        );
        p.bind::<String>("title", ()).unwrap();

        let err = p.instantiate(Panel::default()).unwrap_err();
        assert_eq!(err.property(), "title");
    }

    #[test]
    fn initializer_declared_after_binding_keeps_binding() {
        let mut p = proto();
        p.bind::<String>("title", ()).unwrap();
        p.field_with("title", || "init".to_string());
        assert_eq!(p.member_kind("title"), Some(MemberKind::Accessor));

        let inst = p.instantiate(Panel::default()).unwrap();
        let src = p.companion::<String>(&inst, "title$").unwrap();
        assert_eq!(src.latest(), Some("init".to_string()));

        p.set(&inst, "title", "next".to_string()).unwrap();
        assert_eq!(src.latest(), Some("next".to_string()));
        assert_eq!(src.emission_count(), 2);
    }

    #[test]
    #[traced_test]
    fn field_of_another_type_replaces_accessor() {
        let mut p = proto();
        p.bind::<String>("title", ()).unwrap();
        p.field::<u32>("title");
        assert_eq!(p.member_kind("title"), Some(MemberKind::Field));
        assert!(logs_contain("accessor replaced by field"));
    }

    #[test]
    #[traced_test]
    fn bind_logs_binding() {
        let mut p = proto();
        p.bind::<String>("title", "heading$").unwrap();
        assert!(logs_contain("property bound"));
        assert!(logs_contain("heading$"));
    }

    #[test]
    fn companion_key_equal_to_name_is_rejected() {
        let mut p = proto();
        p.field::<String>("title");
        assert_eq!(
            p.bind::<String>("title", "title").unwrap_err(),
            BindError::KeyCollision {
                property: "title".into()
            }
        );
        assert_eq!(p.member_kind("title"), Some(MemberKind::Field));
    }

    #[test]
    fn debug_lists_members() {
        let mut p = proto();
        p.field::<i32>("a");
        let dbg = format!("{p:?}");
        assert!(dbg.contains("Panel"));
        assert!(dbg.contains("Field"));
    }
}
