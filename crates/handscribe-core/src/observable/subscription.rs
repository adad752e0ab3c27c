use crate::sync::lock;

use std::{
    fmt,
    sync::{Arc, Mutex, Weak},
};

/// Subscriber callback receiving a borrowed snapshot of the observed value.
pub(crate) type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Subscriber set of one [`Observable`](crate::Observable).
///
/// Entries carry a unique id so a [`Subscription`] can remove exactly its own
/// callback even when the same closure was registered twice.
pub(crate) struct Subscribers<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

impl<T> Subscribers<T> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, callback: Callback<T>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Copy of the current callbacks, taken before a notification pass.
    pub(crate) fn callbacks(&self) -> Vec<Callback<T>> {
        self.entries
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect()
    }
}

/// Type-erased removal hook so [`Subscription`] is not generic over the
/// observed value.
trait SubscriberRegistry: Send + Sync {
    fn remove(&self, id: u64);
}

impl<T: 'static> SubscriberRegistry for Mutex<Subscribers<T>> {
    fn remove(&self, id: u64) {
        lock(self).remove(id);
    }
}

/// Handle returned by `subscribe`, used to stop receiving notifications.
///
/// Dropping the handle does NOT unsubscribe; call [`Subscription::unsubscribe`].
/// Unsubscribing is idempotent and stays safe after the observable itself
/// has been dropped or torn down.
#[must_use = "keep the subscription to be able to unsubscribe later"]
pub struct Subscription {
    id: u64,
    registry: Weak<dyn SubscriberRegistry>,
}

impl Subscription {
    pub(crate) fn new<T: 'static>(id: u64, subscribers: &Arc<Mutex<Subscribers<T>>>) -> Self {
        let registry: Arc<dyn SubscriberRegistry> = subscribers.clone();
        Self {
            id,
            registry: Arc::downgrade(&registry),
        }
    }

    /// Remove the callback. Calling this more than once is a no-op.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("live", &(self.registry.strong_count() > 0))
            .finish()
    }
}
