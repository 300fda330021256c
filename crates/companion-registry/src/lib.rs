#![forbid(unsafe_code)]

//! Per-instance side tables for bound properties.
//!
//! # Role
//! `companion-registry` is the leaf storage layer. It attaches property values
//! and companion [`EventSource`]s to arbitrary `Rc`-allocated objects without
//! touching the objects themselves and without keeping them alive.
//!
//! # Primary responsibilities
//! - **InstanceRegistry**: identity-keyed, weakly-anchored storage.
//! - **RegistryConfig**: sweep cadence for reclaimed instances.
//!
//! # How it fits in the system
//! The `companion` crate's property transformer reads and writes through a
//! registry on every property access. Nothing here knows about accessors or
//! binding options.

pub mod config;
pub mod registry;

pub use companion_stream::EventSource;
pub use config::RegistryConfig;
pub use registry::InstanceRegistry;
