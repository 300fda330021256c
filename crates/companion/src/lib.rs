#![forbid(unsafe_code)]

//! Bound properties: plain fields paired with replay-latest companion streams.
//!
//! # Role
//! `companion` is the public face of the workspace. A [`Prototype`] declares
//! the members of a type; [`Prototype::bind`] rewrites a member so that every
//! write (initializers included) is emitted on a companion [`EventSource`]
//! while reads keep returning the stored value.
//!
//! # Primary responsibilities
//! - **Prototype**: declaration-time member table and property transformer.
//! - **Accessor**: getter/setter pairs, composable by explicit wrapping.
//! - **BoundProperty**: typed handle to a bound member.
//! - **BindOptions / BindArg**: the binding argument and its normalizer.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use companion::{InstanceRegistry, Prototype};
//!
//! struct Profile;
//!
//! let registry = Rc::new(InstanceRegistry::new());
//! let mut proto = Prototype::<Profile>::with_registry("Profile", registry);
//! proto.field_with("name", || "init".to_string());
//! let name = proto.bind::<String>("name", ()).unwrap();
//!
//! let profile = proto.instantiate(Profile).unwrap();
//! assert_eq!(name.get(&profile).unwrap().as_deref(), Some("init"));
//!
//! name.set(&profile, "next".to_string()).unwrap();
//! assert_eq!(name.companion(&profile).latest().as_deref(), Some("next"));
//! ```
//!
//! # Threading
//! All handles are `Rc`-based and therefore `!Send`. Each thread has its own
//! shared [`InstanceRegistry`].

pub mod accessor;
pub mod error;
pub mod logging;
pub mod options;
pub mod property;
pub mod prototype;

pub use accessor::Accessor;
pub use companion_registry::{InstanceRegistry, RegistryConfig};
pub use companion_stream::{EventSource, Subscription};
pub use error::BindError;
pub use options::{BindArg, BindOptions, normalize};
pub use property::BoundProperty;
pub use prototype::{MemberKind, Prototype};
