//! Resource Hooks
//!
//! Bridges the query cache into Leptos: `use_query` keeps a signal in step with
//! one cache key, `use_mutation` wraps a write with pending and error signals.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use query_cache::{MountScope, Mutation, QueryKey, QueryState};
use tracing::debug;

use crate::api::ApiClient;
use crate::context::use_app_context;
use crate::error::ApiError;
use crate::queries::Cache;

pub type Query<T> = QueryState<Rc<T>, ApiError>;

/// Keep `apply` informed about `key` for as long as `scope` is active.
///
/// The cached state is applied right away, then a fetch runs through `spawn`.
/// Every invalidation of the key starts a refetch; the previous state stays
/// applied until it resolves. Only the newest fetch may apply its result.
pub fn watch_query<T, F, Fut>(
    cache: &Cache,
    key: QueryKey<T>,
    scope: &MountScope,
    fetcher: F,
    spawn: impl Fn(LocalBoxFuture<'static, ()>) + 'static,
    apply: impl Fn(Query<T>) + 'static,
) where
    T: 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let apply = Rc::new(apply);
    apply(cache.peek(&key));

    let generation = Rc::new(Cell::new(0u64));
    let run: Rc<dyn Fn()> = {
        let cache = cache.clone();
        let scope = scope.clone();
        Rc::new(move || {
            let ticket = generation.get() + 1;
            generation.set(ticket);

            let pending = scope.guard(cache.fetch(&key, &fetcher));
            let generation = Rc::clone(&generation);
            let apply = Rc::clone(&apply);
            spawn(Box::pin(async move {
                let Some(result) = pending.await else {
                    debug!(key = key.name(), "discarding response after unmount");
                    return;
                };
                if generation.get() == ticket {
                    apply(QueryState::from(result));
                }
            }));
        })
    };

    run();
    let scope = scope.clone();
    cache.subscribe(key.name(), move || {
        if !scope.is_active() {
            return false;
        }
        run();
        true
    });
}

/// Signal tracking `key`, fetched with `load` on mount and on invalidation
pub fn use_query<T, F, Fut>(key: QueryKey<T>, load: F) -> RwSignal<Query<T>, LocalStorage>
where
    T: 'static,
    F: Fn(&ApiClient) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let ctx = use_app_context();
    let client = ctx.client();
    let state = RwSignal::new_local(QueryState::Pending);

    let scope = MountScope::new();
    on_cleanup({
        let scope = scope.clone();
        move || scope.cancel()
    });

    watch_query(
        &ctx.cache(),
        key,
        &scope,
        move || load(&client),
        |future| spawn_local(future),
        move |next| state.set(next),
    );
    state
}

/// Handle to a write with its pending and error state
pub struct MutationHandle<I: 'static, O: 'static> {
    mutation: StoredValue<Mutation<I, O, ApiError>, LocalStorage>,
    scope: StoredValue<MountScope>,
    in_flight: RwSignal<u32>,
    error: RwSignal<Option<ApiError>>,
}

impl<I: 'static, O: 'static> Clone for MutationHandle<I, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: 'static, O: 'static> Copy for MutationHandle<I, O> {}

impl<I: 'static, O: 'static> MutationHandle<I, O> {
    pub fn pending(&self) -> bool {
        self.in_flight.get() > 0
    }

    pub fn error(&self) -> Option<ApiError> {
        self.error.get()
    }

    /// Dispatch and hand the result to `on_done`, unless the view is gone.
    ///
    /// Invalidation happens either way.
    pub fn dispatch(&self, input: I, on_done: impl FnOnce(Result<O, ApiError>) + 'static) {
        let Some(future) = self.mutation.try_with_value(|mutation| mutation.dispatch(input)) else {
            return;
        };
        let scope = self.scope.get_value();
        let in_flight = self.in_flight;
        let error = self.error;

        in_flight.update(|count| *count += 1);
        error.set(None);
        spawn_local(async move {
            let result = future.await;
            if !scope.is_active() {
                return;
            }
            in_flight.update(|count| *count = count.saturating_sub(1));
            if let Err(err) = &result {
                error.set(Some(err.clone()));
            }
            on_done(result);
        });
    }

    pub fn fire(&self, input: I) {
        self.dispatch(input, |_| {});
    }
}

/// Build a mutation from the app's client and cache
pub fn use_mutation<I, O>(
    build: impl FnOnce(&ApiClient, &Cache) -> Mutation<I, O, ApiError>,
) -> MutationHandle<I, O>
where
    I: 'static,
    O: 'static,
{
    let ctx = use_app_context();
    let mutation = build(&ctx.client(), &ctx.cache());

    let scope = MountScope::new();
    on_cleanup({
        let scope = scope.clone();
        move || scope.cancel()
    });

    MutationHandle {
        mutation: StoredValue::new_local(mutation),
        scope: StoredValue::new(scope),
        in_flight: RwSignal::new(0),
        error: RwSignal::new(None),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::future::{join_all, LocalBoxFuture};

    use super::Query;

    /// Collects spawned futures and drives them on demand
    #[derive(Clone, Default)]
    pub struct Spawner {
        queue: Rc<RefCell<Vec<LocalBoxFuture<'static, ()>>>>,
    }

    impl Spawner {
        pub fn handle(&self) -> impl Fn(LocalBoxFuture<'static, ()>) + 'static {
            let queue = Rc::clone(&self.queue);
            move |future| queue.borrow_mut().push(future)
        }

        /// Run until nothing new is spawned
        pub async fn run(&self) {
            loop {
                let batch = std::mem::take(&mut *self.queue.borrow_mut());
                if batch.is_empty() {
                    break;
                }
                join_all(batch).await;
            }
        }
    }

    /// Every state applied by a watcher, in order
    pub struct Recorder<T> {
        states: Rc<RefCell<Vec<Query<T>>>>,
    }

    impl<T> Default for Recorder<T> {
        fn default() -> Self {
            Self {
                states: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl<T: 'static> Recorder<T> {
        pub fn sink(&self) -> impl Fn(Query<T>) + 'static {
            let states = Rc::clone(&self.states);
            move |state| states.borrow_mut().push(state)
        }

        pub fn last(&self) -> Option<Query<T>> {
            self.states.borrow().last().cloned()
        }

        pub fn all(&self) -> Vec<Query<T>> {
            self.states.borrow().clone()
        }
    }
}
