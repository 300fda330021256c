#![forbid(unsafe_code)]

//! Replay-latest event sources.
//!
//! - [`EventSource`]: a shared, single-slot replay channel. New subscribers
//!   receive the most recent emission immediately, then every later one.
//! - [`Subscription`]: RAII guard that detaches its callback on drop.
//!
//! # Architecture
//!
//! `EventSource<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Subscribers are stored as `Weak` function pointers and cleaned
//! up lazily during delivery.
//!
//! # Invariants
//!
//! 1. Only the latest emitted value is retained.
//! 2. Subscribers are notified in registration order.
//! 3. Every emission is delivered, including values equal to the previous one.
//! 4. A source never completes or errors.

pub mod event_source;

pub use event_source::{EventSource, Subscription};
