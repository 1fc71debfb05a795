//! Sink - a single subscription record
//!
//! A sink turns a state update pair `(old, new)` into a subscriber
//! notification. Sinks are identified by a [`SinkId`] issued by the store at
//! subscribe time, never by the observer they carry, so two subscriptions with
//! identical callbacks stay two independent entries.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Callback receiving the previous value (absent on catch-up) and the new value
pub type Observer<T> = Arc<dyn Fn(Option<&T>, &T) + Send + Sync>;

fn observer<T, F>(forward: F) -> Observer<T>
where
    F: Fn(Option<&T>, &T) + Send + Sync + 'static,
{
    Arc::new(forward)
}

/// Identity token of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SinkId(u64);

impl SinkId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink#{}", self.0)
    }
}

/// Subscription record forwarding state pairs to an optional observer
pub struct Sink<T> {
    id: SinkId,
    observer: Option<Observer<T>>,
}

impl<T> Sink<T> {
    /// Create a sink forwarding to `forward`
    pub fn new<F>(id: SinkId, forward: F) -> Self
    where
        F: Fn(Option<&T>, &T) + Send + Sync + 'static,
    {
        Self {
            id,
            observer: Some(observer(forward)),
        }
    }

    /// Create a sink without an observer; forwarding to it does nothing
    pub fn detached(id: SinkId) -> Self {
        Self { id, observer: None }
    }

    pub fn id(&self) -> SinkId {
        self.id
    }

    pub fn is_detached(&self) -> bool {
        self.observer.is_none()
    }

    /// Forward a state pair to the observer, if any
    pub fn forward(&self, old: Option<&T>, new: &T) {
        if let Some(observer) = &self.observer {
            observer(old, new);
        }
    }

    /// Re-target this sink onto a larger state through `selector`
    ///
    /// The returned sink keeps this sink's identity. Its forward applies the
    /// selector to old and new independently; a missing old value stays
    /// missing after projection.
    pub fn select<S, F>(self, selector: F) -> Sink<S>
    where
        T: 'static,
        S: 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        let Some(inner) = self.observer else {
            return Sink::detached(self.id);
        };

        Sink {
            id: self.id,
            observer: Some(observer(move |old: Option<&S>, new: &S| {
                let old = old.map(&selector);
                inner(old.as_ref(), &selector(new));
            })),
        }
    }
}

impl<T> Clone for Sink<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            observer: self.observer.clone(),
        }
    }
}

impl<T> PartialEq for Sink<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Sink<T> {}

impl<T> Hash for Sink<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Sink<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("id", &self.id)
            .field("detached", &self.is_detached())
            .finish()
    }
}
