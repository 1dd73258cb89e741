use std::fmt;
use std::marker::PhantomData;

/// Typed cache key.
///
/// The name is the cache identity; the type parameter ties every read of that
/// name to a single payload type.
pub struct QueryKey<T> {
    name: &'static str,
    _payload: PhantomData<fn() -> T>,
}

impl<T> QueryKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _payload: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for QueryKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for QueryKey<T> {}

impl<T> PartialEq for QueryKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for QueryKey<T> {}

impl<T> fmt::Debug for QueryKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("QueryKey").field(&self.name).finish()
    }
}

impl<T> fmt::Display for QueryKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
