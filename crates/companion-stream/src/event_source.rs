#![forbid(unsafe_code)]

//! Single-slot replay channel with synchronous delivery.
//!
//! # Design
//!
//! [`EventSource<T>`] keeps the most recently emitted value in shared,
//! reference-counted storage (`Rc<RefCell<..>>`). Each call to
//! [`emit`](EventSource::emit) replaces that slot and delivers the value to
//! all live subscribers in registration order. A new subscriber is handed the
//! slot's value (if any) before [`subscribe`](EventSource::subscribe) returns.
//!
//! # Performance
//!
//! | Operation     | Complexity                 |
//! |---------------|----------------------------|
//! | `latest()`    | O(1) + clone               |
//! | `emit()`      | O(S) where S = subscribers |
//! | `subscribe()` | O(1) amortized + replay    |
//!
//! # Failure Modes
//!
//! - **Re-entrant emit**: allowed. No borrow is held while callbacks run, so a
//!   subscriber may emit into the same source; the nested emission is
//!   delivered before the outer delivery loop resumes.
//! - **Subscriber leak**: If `Subscription` guards are stored indefinitely
//!   without being dropped, callbacks accumulate. Dead weak references are
//!   cleaned lazily during `emit()`.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

/// A subscriber callback stored as a strong `Rc` inside the guard, handed
/// out as `Weak` to the source.
type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

/// Shared interior for [`EventSource<T>`].
struct SourceInner<T> {
    /// Replay slot. `None` until the first emission.
    latest: Option<T>,
    /// Number of emissions so far.
    emissions: u64,
    /// Subscribers stored as weak references. Dead entries are pruned on emit.
    subscribers: Vec<CallbackWeak<T>>,
}

/// A replay-latest event source.
///
/// Cloning an `EventSource` creates a new handle to the **same** channel:
/// both handles share the replay slot and the subscriber list.
///
/// # Invariants
///
/// 1. `latest()` is the argument of the most recent `emit()`.
/// 2. `emission_count()` increments by exactly 1 per `emit()`.
/// 3. Subscribers are notified in registration order.
/// 4. Dead subscribers (dropped [`Subscription`] guards) are pruned lazily.
pub struct EventSource<T> {
    inner: Rc<RefCell<SourceInner<T>>>,
}

impl<T> Clone for EventSource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for EventSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("EventSource")
            .field("latest", &inner.latest)
            .field("emissions", &inner.emissions)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + 'static> Default for EventSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> EventSource<T> {
    /// Create an empty source. Subscribers get nothing until the first emit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SourceInner {
                latest: None,
                emissions: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the replay slot, or `None` if nothing was emitted yet.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.inner.borrow().latest.clone()
    }

    /// Access the replay slot by reference without cloning.
    pub fn with_latest<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        f(self.inner.borrow().latest.as_ref())
    }

    /// Whether at least one value has been emitted.
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.inner.borrow().latest.is_some()
    }

    /// Replace the replay slot and deliver `value` to every live subscriber.
    ///
    /// Delivery is synchronous: all current subscribers have run by the time
    /// this returns.
    pub fn emit(&self, value: T) {
        let callbacks: Vec<CallbackRc<T>> = {
            let mut inner = self.inner.borrow_mut();
            inner.latest = Some(value.clone());
            inner.emissions += 1;
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner
                .subscribers
                .iter()
                .filter_map(|w| w.upgrade())
                .collect()
        };

        trace!(subscribers = callbacks.len(), "event source emit");
        for cb in &callbacks {
            cb(&value);
        }
    }

    /// Subscribe to emissions.
    ///
    /// If the source already holds a value, `callback` is invoked with it
    /// before this method returns; afterwards it receives every emission.
    ///
    /// Returns a [`Subscription`] guard. Dropping the guard unsubscribes
    /// the callback (it will not be called after drop, though it may still
    /// be in the subscriber list until the next `emit()` prunes it).
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        let replay = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.push(Rc::downgrade(&strong));
            inner.latest.clone()
        };
        if let Some(value) = replay {
            strong(&value);
        }
        // Wrap in a holder struct that can be type-erased as `dyn Any`,
        // since `Rc<dyn Fn(&T)>` itself cannot directly coerce to `Rc<dyn Any>`.
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Total number of emissions. Useful for dirty-checking.
    #[must_use]
    pub fn emission_count(&self) -> u64 {
        self.inner.borrow().emissions
    }

    /// Number of currently registered subscribers (including dead ones
    /// not yet pruned).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Whether two handles refer to the same channel.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the `Subscription` causes the associated callback to become
/// unreachable (the strong `Rc` is dropped, so the `Weak` in the source's
/// subscriber list will fail to upgrade on the next delivery).
pub struct Subscription {
    /// Type-erased strong reference keeping the callback `Rc` alive.
    _guard: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
