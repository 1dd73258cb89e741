use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{AbortHandle, Abortable};

/// Cancellation token tied to the lifetime of a view.
///
/// Futures wrapped with [`MountScope::guard`] resolve to `None` once the scope
/// is cancelled, so a response can never be applied to state that is gone.
#[derive(Clone, Debug, Default)]
pub struct MountScope {
    inner: Arc<ScopeInner>,
}

#[derive(Debug, Default)]
struct ScopeInner {
    cancelled: AtomicBool,
    next_id: AtomicU64,
    handles: Mutex<HashMap<u64, AbortHandle>>,
}

impl MountScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Cancel the scope and abort every guarded future still running.
    pub fn cancel(&self) {
        if self.inner.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        let handles = std::mem::take(&mut *self.handles());
        for handle in handles.into_values() {
            handle.abort();
        }
    }

    /// Run `future` under this scope; `None` means the scope went away first.
    pub fn guard<F: Future>(&self, future: F) -> impl Future<Output = Option<F::Output>> {
        let (handle, registration) = AbortHandle::new_pair();
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        if self.is_active() {
            self.handles().insert(id, handle);
        } else {
            handle.abort();
        }

        let scope = self.clone();
        async move {
            let output = Abortable::new(future, registration).await.ok();
            scope.handles().remove(&id);
            output.filter(|_| scope.is_active())
        }
    }

    fn handles(&self) -> MutexGuard<'_, HashMap<u64, AbortHandle>> {
        self.inner
            .handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
