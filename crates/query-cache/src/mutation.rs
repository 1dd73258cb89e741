use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use tracing::{debug, warn};

use crate::cache::QueryCache;
use crate::key::QueryKey;

type Call<I, O, E> = Rc<dyn Fn(I) -> LocalBoxFuture<'static, Result<O, E>>>;

/// A remote write that invalidates the reads it affects.
pub struct Mutation<I, O, E> {
    label: &'static str,
    cache: QueryCache<E>,
    call: Call<I, O, E>,
    invalidates: Vec<&'static str>,
}

impl<I, O, E> Clone for Mutation<I, O, E> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            cache: self.cache.clone(),
            call: Rc::clone(&self.call),
            invalidates: self.invalidates.clone(),
        }
    }
}

impl<I, O, E> Mutation<I, O, E>
where
    I: 'static,
    O: 'static,
    E: Clone + fmt::Display + 'static,
{
    pub fn new<F, Fut>(label: &'static str, cache: &QueryCache<E>, call: F) -> Self
    where
        F: Fn(I) -> Fut + 'static,
        Fut: Future<Output = Result<O, E>> + 'static,
    {
        Self {
            label,
            cache: cache.clone(),
            call: Rc::new(move |input| call(input).boxed_local()),
            invalidates: Vec::new(),
        }
    }

    /// Invalidate `key` after every successful dispatch.
    pub fn invalidates<T>(mut self, key: &QueryKey<T>) -> Self {
        self.invalidates.push(key.name());
        self
    }

    pub fn invalidated_keys(&self) -> &[&'static str] {
        &self.invalidates
    }

    /// Perform the write once; on success invalidate the registered keys.
    pub fn dispatch(&self, input: I) -> impl Future<Output = Result<O, E>> {
        let call = (self.call)(input);
        let cache = self.cache.clone();
        let keys = self.invalidates.clone();
        let label = self.label;

        async move {
            let result = call.await;
            match &result {
                Ok(_) => {
                    debug!(mutation = label, ?keys, "mutation succeeded");
                    for key in &keys {
                        cache.invalidate(key);
                    }
                }
                Err(err) => warn!(mutation = label, error = %err, "mutation failed"),
            }
            result
        }
    }
}
