// ── Generic reactive state container ──
//
// One per entity store. Snapshot reads, synchronous listener
// notification, and a `watch` feed for async observers (the TUI data
// bridge). Mutation happens only through `patch`, only from the owning
// store's command handlers.

use std::sync::{Arc, Mutex, Weak};

use tokio::sync::watch;

type Listener<S> = Box<dyn Fn(&S) + Send + Sync>;

/// Reactive holder of one store's state snapshot.
///
/// `patch` applies a mutation, then notifies synchronous listeners with
/// the new snapshot before returning (read-your-latest-write: `get()`
/// inside a listener observes the patched state) and publishes it on the
/// watch channel. Cheap to clone; clones share the same state.
pub struct StateCell<S: Clone> {
    inner: Arc<CellInner<S>>,
}

struct CellInner<S: Clone> {
    state: Mutex<S>,
    listeners: Mutex<Vec<Weak<Listener<S>>>>,
    watch_tx: watch::Sender<S>,
}

impl<S: Clone> Clone for StateCell<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Clone + std::fmt::Debug> std::fmt::Debug for StateCell<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCell")
            .field("state", &*self.inner.state.lock().unwrap_or_else(|e| e.into_inner()))
            .finish_non_exhaustive()
    }
}

/// Listener registration handle. Dropping it unregisters the listener.
pub struct Subscription<S: Clone> {
    // Listeners are held weakly by the cell; this strong ref keeps the
    // closure alive for exactly the subscription's lifetime.
    _listener: Arc<Listener<S>>,
}

impl<S: Clone> StateCell<S> {
    pub fn new(initial: S) -> Self {
        let (watch_tx, _) = watch::channel(initial.clone());
        Self {
            inner: Arc::new(CellInner {
                state: Mutex::new(initial),
                listeners: Mutex::new(Vec::new()),
                watch_tx,
            }),
        }
    }

    /// Snapshot of the latest applied state.
    pub fn get(&self) -> S {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Apply a mutation and notify observers.
    ///
    /// Listeners run after the state lock is released, so a listener may
    /// call `get()` or register subscriptions without deadlocking.
    pub fn patch(&self, f: impl FnOnce(&mut S)) {
        let snapshot = {
            let mut state = self.inner.state.lock().unwrap_or_else(|e| e.into_inner());
            f(&mut state);
            state.clone()
        };

        // Collect live listeners under the registry lock, invoke outside it.
        let listeners: Vec<Arc<Listener<S>>> = {
            let mut registry = self
                .inner
                .listeners
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            registry.retain(|weak| weak.strong_count() > 0);
            registry.iter().filter_map(Weak::upgrade).collect()
        };
        for listener in listeners {
            listener(&snapshot);
        }

        // `send_modify` publishes even with zero receivers.
        self.inner.watch_tx.send_modify(|s| *s = snapshot);
    }

    /// Register a synchronous listener, invoked on every patch with the
    /// new snapshot. Dropping the returned [`Subscription`] unregisters.
    pub fn subscribe(&self, listener: impl Fn(&S) + Send + Sync + 'static) -> Subscription<S> {
        let listener: Arc<Listener<S>> = Arc::new(Box::new(listener));
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Arc::downgrade(&listener));
        Subscription {
            _listener: listener,
        }
    }

    /// Async observation feed. The receiver starts at the current state.
    pub fn watch(&self) -> watch::Receiver<S> {
        self.inner.watch_tx.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use super::*;

    #[test]
    fn get_returns_latest_patch() {
        let cell = StateCell::new(0);
        cell.patch(|n| *n = 5);
        assert_eq!(cell.get(), 5);
    }

    #[test]
    fn listener_sees_every_patch_in_order() {
        let cell = StateCell::new(0);
        let seen = Arc::new(StdMutex::new(Vec::new()));

        let seen_by_listener = Arc::clone(&seen);
        let _sub = cell.subscribe(move |state| {
            seen_by_listener.lock().unwrap().push(*state);
        });

        cell.patch(|n| *n = 1);
        cell.patch(|n| *n = 2);

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn listener_reads_its_own_latest_write() {
        let cell = StateCell::new(0);
        let observed = Arc::new(StdMutex::new(None));

        let cell_in_listener = cell.clone();
        let observed_in_listener = Arc::clone(&observed);
        let _sub = cell.subscribe(move |state| {
            // get() inside a listener must observe the patched state.
            *observed_in_listener.lock().unwrap() = Some((*state, cell_in_listener.get()));
        });

        cell.patch(|n| *n = 7);
        assert_eq!(*observed.lock().unwrap(), Some((7, 7)));
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let cell = StateCell::new(0);
        let calls = Arc::new(StdMutex::new(0));

        let calls_in_listener = Arc::clone(&calls);
        let sub = cell.subscribe(move |_| {
            *calls_in_listener.lock().unwrap() += 1;
        });

        cell.patch(|n| *n = 1);
        drop(sub);
        cell.patch(|n| *n = 2);

        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn clones_share_state() {
        let cell = StateCell::new(0);
        let clone = cell.clone();
        clone.patch(|n| *n = 9);
        assert_eq!(cell.get(), 9);
    }

    #[tokio::test]
    async fn watch_receives_snapshots() {
        let cell = StateCell::new(0);
        let mut rx = cell.watch();

        cell.patch(|n| *n = 3);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 3);
    }
}
