//! Single-writer, multi-reader observable value cells.
//!
//! An [`Observable`] holds the latest value of some piece of state and fans
//! every published value out to its subscribers. Subscriptions replay the
//! latest value immediately, then receive each later value exactly once and in
//! publication order. Unlike a "latest only" watch channel, values are never
//! coalesced, so every subscriber observes the same sequence.
//!
//! The writer handle ([`Observable`]) is not `Clone`; it stays with the
//! container that owns the state. Consumers get an [`ObservableReader`], which
//! can read and subscribe but never publish.
//!
//! # Example
//!
//! ```rust
//! use slavgorod_bus::app::Observable;
//!
//! let cell = Observable::new(1);
//! let mut early = cell.subscribe();
//! cell.publish(2);
//! let mut late = cell.reader().subscribe();
//!
//! assert_eq!(early.try_recv(), Some(1));
//! assert_eq!(early.try_recv(), Some(2));
//! assert_eq!(late.try_recv(), Some(2));
//! assert_eq!(late.try_recv(), None);
//! ```

use futures_util::Stream;
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

struct Shared<T> {
    value: T,
    subscribers: Vec<mpsc::UnboundedSender<T>>,
}

impl<T: Clone> Shared<T> {
    fn attach(&mut self) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        // Cannot fail: the receiver is still in scope.
        let _ = tx.send(self.value.clone());
        self.subscribers.push(tx);
        Subscription { rx }
    }
}

/// Writer handle of an observable cell.
pub struct Observable<T> {
    shared: Arc<Mutex<Shared<T>>>,
}

impl<T: Clone> Observable<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                value: initial,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Returns a copy of the latest value.
    #[must_use]
    pub fn get(&self) -> T {
        self.shared.lock().value.clone()
    }

    /// Replaces the value and delivers it to every live subscriber.
    ///
    /// Subscribers whose [`Subscription`] has been dropped are pruned.
    pub fn publish(&self, value: T) {
        let mut shared = self.shared.lock();
        shared.subscribers.retain(|tx| tx.send(value.clone()).is_ok());
        shared.value = value;
    }

    /// Publishes the value computed from the current one and returns it.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> T {
        let mut shared = self.shared.lock();
        let next = f(&shared.value);
        shared.subscribers.retain(|tx| tx.send(next.clone()).is_ok());
        shared.value = next.clone();
        next
    }

    #[must_use]
    pub fn subscribe(&self) -> Subscription<T> {
        self.shared.lock().attach()
    }

    /// Returns a read-only handle to this cell.
    #[must_use]
    pub fn reader(&self) -> ObservableReader<T> {
        ObservableReader {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Number of subscribers still attached as of the last publish.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.lock().subscribers.len()
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = self.shared.lock();
        f.debug_struct("Observable")
            .field("value", &shared.value)
            .field("subscribers", &shared.subscribers.len())
            .finish()
    }
}

/// Read-only handle of an observable cell.
pub struct ObservableReader<T> {
    shared: Arc<Mutex<Shared<T>>>,
}

impl<T: Clone> ObservableReader<T> {
    /// Returns a copy of the latest value.
    #[must_use]
    pub fn get(&self) -> T {
        self.shared.lock().value.clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> Subscription<T> {
        self.shared.lock().attach()
    }
}

impl<T> Clone for ObservableReader<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> std::fmt::Debug for ObservableReader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableReader").finish_non_exhaustive()
    }
}

/// Ordered stream of values published to an observable cell.
///
/// The first value received is the one current at subscription time. The
/// stream ends once the owning [`Observable`] and all of its readers are
/// dropped and every pending value has been received.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Subscription<T> {
    /// Waits for the next value.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Returns the next pending value without waiting.
    pub fn try_recv(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Drains every pending value and returns them in order.
    pub fn drain(&mut self) -> Vec<T> {
        let mut values = Vec::new();
        while let Ok(value) = self.rx.try_recv() {
            values.push(value);
        }
        values
    }
}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.get_mut().rx.poll_recv(cx)
    }
}
