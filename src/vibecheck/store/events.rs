//! Change notification for ledger observers.
//!
//! Subscribers register explicitly with the store that owns the registry and
//! get a [`SubscriptionId`] back for unsubscribing. Delivery is best effort
//! and in-process only. Callbacks run on the thread that performed the
//! mutation, after the store has released its file lock, so a callback may
//! call back into the store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// No-payload "records changed" signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordsChanged;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Callback = Arc<dyn Fn(RecordsChanged) + Send + Sync>;

#[derive(Default)]
pub struct Observers {
    next_id: AtomicU64,
    callbacks: Mutex<BTreeMap<SubscriptionId, Callback>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(RecordsChanged) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.callbacks().insert(id, Arc::new(callback));
        id
    }

    /// Channel flavour of [`subscribe`](Self::subscribe). Signals sent after
    /// the receiver is dropped are discarded.
    pub fn subscribe_channel(&self) -> (SubscriptionId, Receiver<RecordsChanged>) {
        let (tx, rx): (Sender<RecordsChanged>, Receiver<RecordsChanged>) = mpsc::channel();
        let tx = Mutex::new(tx);
        let id = self.subscribe(move |event| {
            if let Ok(tx) = tx.lock() {
                let _ = tx.send(event);
            }
        });
        (id, rx)
    }

    /// Returns false if the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks().remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.callbacks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every registered callback in subscription order.
    pub fn publish(&self) {
        // Snapshot first so callbacks can (un)subscribe without deadlocking
        let snapshot: Vec<Callback> = self.callbacks().values().cloned().collect();
        for callback in snapshot {
            callback(RecordsChanged);
        }
    }

    fn callbacks(&self) -> MutexGuard<'_, BTreeMap<SubscriptionId, Callback>> {
        self.callbacks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
