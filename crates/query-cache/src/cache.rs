//! Keyed cache of remote reads.
//!
//! Each entry holds the last result for its key, an optional in-flight call and
//! the listeners that want to hear about invalidation. Values are stored behind
//! `dyn Any` and recovered through the typed [`QueryKey`].

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::{self, Future};
use std::rc::{Rc, Weak};

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use tracing::debug;

use crate::key::QueryKey;
use crate::state::QueryState;

type SharedFetch<T, E> = Shared<LocalBoxFuture<'static, Result<Rc<T>, E>>>;
type Listener = Box<dyn FnMut() -> bool>;

struct InFlight {
    ticket: u64,
    /// A `SharedFetch<T, E>` for the payload type of the key
    future: Box<dyn Any>,
}

#[derive(Default)]
struct Entry {
    /// A `Result<Rc<T>, E>` for the payload type of the key
    value: Option<Box<dyn Any>>,
    stale: bool,
    in_flight: Option<InFlight>,
    listeners: Vec<Listener>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<&'static str, Entry>,
    next_ticket: u64,
}

enum Lookup<T, E> {
    Ready(Result<Rc<T>, E>),
    Join(SharedFetch<T, E>),
    Start,
}

/// Process-wide cache of remote reads, keyed by resource name.
///
/// Cloning is cheap; all clones share the same entries.
pub struct QueryCache<E> {
    inner: Rc<RefCell<Inner>>,
    _error: std::marker::PhantomData<fn() -> E>,
}

impl<E> Clone for QueryCache<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            _error: std::marker::PhantomData,
        }
    }
}

impl<E: Clone + 'static> Default for QueryCache<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone + 'static> QueryCache<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner::default())),
            _error: std::marker::PhantomData,
        }
    }

    /// Read `key`, calling `fetcher` only when the cache cannot answer.
    ///
    /// A fresh value or a failure that has not been invalidated is returned as
    /// is. A call already in flight for the key is joined instead of starting a
    /// second one.
    pub fn fetch<T, F, Fut>(
        &self,
        key: &QueryKey<T>,
        fetcher: F,
    ) -> LocalBoxFuture<'static, Result<Rc<T>, E>>
    where
        T: 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        let name = key.name();
        match self.lookup::<T>(name) {
            Lookup::Ready(result) => future::ready(result).boxed_local(),
            Lookup::Join(shared) => {
                debug!(key = name, "joining in-flight fetch");
                shared.boxed_local()
            }
            Lookup::Start => self.start(name, fetcher()).boxed_local(),
        }
    }

    /// Snapshot of `key` without triggering a fetch.
    ///
    /// An invalidated value stays visible until its refetch resolves.
    pub fn peek<T: 'static>(&self, key: &QueryKey<T>) -> QueryState<Rc<T>, E> {
        let inner = self.inner.borrow();
        inner
            .entries
            .get(key.name())
            .and_then(|entry| entry.value.as_ref())
            .and_then(|value| value.downcast_ref::<Result<Rc<T>, E>>())
            .cloned()
            .map(QueryState::from)
            .unwrap_or_default()
    }

    /// Mark `name` stale and notify its listeners.
    ///
    /// A call in flight for the key is detached: its waiters still receive the
    /// response, but the response is not written into the cache.
    pub fn invalidate(&self, name: &str) {
        let mut listeners = {
            let mut inner = self.inner.borrow_mut();
            let Some(entry) = inner.entries.get_mut(name) else {
                return;
            };
            entry.stale = true;
            entry.in_flight = None;
            std::mem::take(&mut entry.listeners)
        };
        debug!(key = name, listeners = listeners.len(), "invalidated");

        listeners.retain_mut(|listener| listener());

        let mut inner = self.inner.borrow_mut();
        if let Some(entry) = inner.entries.get_mut(name) {
            // listeners may have subscribed again while being notified
            listeners.append(&mut entry.listeners);
            entry.listeners = listeners;
        }
    }

    /// Register a listener for invalidations of `name`.
    ///
    /// The listener stays registered for as long as it returns `true`.
    pub fn subscribe(&self, name: &'static str, listener: impl FnMut() -> bool + 'static) {
        let mut inner = self.inner.borrow_mut();
        inner
            .entries
            .entry(name)
            .or_default()
            .listeners
            .push(Box::new(listener));
    }

    /// Forget every entry, listeners included.
    pub fn clear(&self) {
        let entries = std::mem::take(&mut self.inner.borrow_mut().entries);
        debug!(entries = entries.len(), "cache cleared");
        drop(entries);
    }

    fn lookup<T: 'static>(&self, name: &'static str) -> Lookup<T, E> {
        let inner = self.inner.borrow();
        let Some(entry) = inner.entries.get(name) else {
            return Lookup::Start;
        };

        let joined = entry
            .in_flight
            .as_ref()
            .and_then(|flight| flight.future.downcast_ref::<SharedFetch<T, E>>());
        if let Some(shared) = joined {
            return Lookup::Join(shared.clone());
        }

        if entry.stale {
            return Lookup::Start;
        }
        match entry
            .value
            .as_ref()
            .and_then(|value| value.downcast_ref::<Result<Rc<T>, E>>())
        {
            Some(result) => Lookup::Ready(result.clone()),
            None => Lookup::Start,
        }
    }

    fn start<T, Fut>(&self, name: &'static str, call: Fut) -> SharedFetch<T, E>
    where
        T: 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        inner.next_ticket += 1;
        let ticket = inner.next_ticket;

        let cache = Rc::downgrade(&self.inner);
        let shared = async move {
            let result = call.await.map(Rc::new);
            store(&cache, name, ticket, result.clone());
            result
        }
        .boxed_local()
        .shared();

        debug!(key = name, ticket, "fetch started");
        inner.entries.entry(name).or_default().in_flight = Some(InFlight {
            ticket,
            future: Box::new(shared.clone()),
        });
        shared
    }
}

fn store<T: 'static, E: 'static>(
    cache: &Weak<RefCell<Inner>>,
    name: &'static str,
    ticket: u64,
    result: Result<Rc<T>, E>,
) {
    let Some(inner) = cache.upgrade() else {
        return;
    };
    let mut inner = inner.borrow_mut();
    let Some(entry) = inner.entries.get_mut(name) else {
        return;
    };
    if entry.in_flight.as_ref().map(|flight| flight.ticket) != Some(ticket) {
        debug!(key = name, ticket, "discarding response from before invalidation");
        return;
    }
    entry.in_flight = None;
    entry.stale = false;
    entry.value = Some(Box::new(result));
}
