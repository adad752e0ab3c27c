use crate::{
    observable::{Subscribers, Subscription},
    sync::lock,
};

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

/// A value plus the callbacks interested in its changes.
///
/// Mutations go through [`update`](Self::update) or
/// [`try_update`](Self::try_update): the value is changed under its lock, a
/// snapshot is cloned, the lock is released, and only then are subscribers
/// called. Callbacks therefore always observe a fully-updated value and may
/// call back into the owner of the observable without deadlocking.
///
/// Each notification pass iterates a copy of the subscriber set taken before
/// the first callback runs. Subscribing or unsubscribing from inside a
/// callback takes effect from the next pass.
///
/// A mutation made from inside a callback is applied immediately, but its
/// notification is queued until the pass in progress has reached every
/// subscriber. Subscribers therefore see every state in mutation order and
/// the last state they see is the current one. A mutation made on another
/// thread while a pass is running is delivered by the thread running it.
pub struct Observable<T> {
    value: Mutex<T>,
    subscribers: Arc<Mutex<Subscribers<T>>>,
    dispatch: Mutex<Dispatch<T>>,
}

/// Snapshots waiting to be delivered, in mutation order.
struct Dispatch<T> {
    pending: VecDeque<T>,
    draining: bool,
}

/// Resets the dispatch queue if a callback unwinds mid-pass.
struct DrainGuard<'a, T> {
    dispatch: &'a Mutex<Dispatch<T>>,
    armed: bool,
}

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            let mut dispatch = lock(self.dispatch);
            dispatch.draining = false;
            dispatch.pending.clear();
        }
    }
}

impl<T: Clone + Send + 'static> Observable<T> {
    /// Create an observable holding `initial`, with no subscribers.
    pub fn new(initial: T) -> Self {
        Self {
            value: Mutex::new(initial),
            subscribers: Arc::new(Mutex::new(Subscribers::new())),
            dispatch: Mutex::new(Dispatch {
                pending: VecDeque::new(),
                draining: false,
            }),
        }
    }

    /// Clone of the current value.
    pub fn get(&self) -> T {
        lock(&self.value).clone()
    }

    /// Read the current value without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*lock(&self.value))
    }

    /// Register a callback invoked after every notifying mutation.
    ///
    /// No notification is sent for the current value; read it with
    /// [`get`](Self::get) if the initial state matters.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = lock(&self.subscribers).insert(Arc::new(callback));
        Subscription::new(id, &self.subscribers)
    }

    /// Mutate the value and notify every subscriber.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let (result, drain) = {
            let mut value = lock(&self.value);
            let result = f(&mut *value);
            (result, self.enqueue(value.clone()))
        };
        if drain {
            self.drain();
        }
        result
    }

    /// Mutate the value and notify only when `f` returns `Ok`.
    ///
    /// `f` must leave the value untouched when it returns `Err`; the check
    /// and the mutation happen under one lock, so no other caller can
    /// interleave between them.
    pub fn try_update<R, E>(&self, f: impl FnOnce(&mut T) -> Result<R, E>) -> Result<R, E> {
        let (result, drain) = {
            let mut value = lock(&self.value);
            let result = f(&mut *value)?;
            (result, self.enqueue(value.clone()))
        };
        if drain {
            self.drain();
        }
        Ok(result)
    }

    /// Replace the value without notifying anyone.
    pub fn set_silently(&self, value: T) {
        *lock(&self.value) = value;
    }

    /// Drop every subscriber. Outstanding [`Subscription`]s become no-ops.
    pub fn clear_subscribers(&self) {
        lock(&self.subscribers).clear();
    }

    /// Number of registered callbacks.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers).len()
    }

    /// Queue `snapshot` for delivery. Returns whether the caller has to
    /// drain the queue, i.e. no notification pass is already running.
    ///
    /// Called with the value lock held so snapshots queue in mutation order.
    fn enqueue(&self, snapshot: T) -> bool {
        let mut dispatch = lock(&self.dispatch);
        dispatch.pending.push_back(snapshot);
        !std::mem::replace(&mut dispatch.draining, true)
    }

    /// Deliver queued snapshots one pass at a time until none are left.
    fn drain(&self) {
        let mut guard = DrainGuard {
            dispatch: &self.dispatch,
            armed: true,
        };

        loop {
            // The draining flag is cleared under the same lock that finds the
            // queue empty, so no snapshot is left behind.
            let snapshot = {
                let mut dispatch = lock(&self.dispatch);
                match dispatch.pending.pop_front() {
                    Some(snapshot) => snapshot,
                    None => {
                        dispatch.draining = false;
                        break;
                    }
                }
            };

            let callbacks = lock(&self.subscribers).callbacks();
            for callback in callbacks {
                callback(&snapshot);
            }
        }

        guard.armed = false;
    }
}

impl<T: Clone + Send + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
