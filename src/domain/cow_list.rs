//! Copy-on-append list for concurrently read, rarely written sequences
//!
//! Readers take an `Arc` snapshot and iterate without holding any lock;
//! writers clone the backing vector, push, and swap the `Arc` under a short
//! write lock. A reader enumerating a snapshot never observes a torn element
//! and never blocks a writer mid-iteration.

use parking_lot::RwLock;
use std::sync::Arc;

pub struct CowList<T> {
    inner: RwLock<Arc<Vec<T>>>,
}

impl<T: Clone> CowList<T> {
    pub fn new() -> Self {
        Self { inner: RwLock::new(Arc::new(Vec::new())) }
    }

    /// Append a value, publishing a new snapshot atomically
    pub fn push(&self, value: T) {
        let mut guard = self.inner.write();
        let mut next = Vec::with_capacity(guard.len() + 1);
        next.extend_from_slice(guard.as_slice());
        next.push(value);
        *guard = Arc::new(next);
    }

    /// Append only if `absent` holds for the current contents.
    ///
    /// Check and append happen under one write lock, so two racing callers
    /// cannot both pass the check. Returns whether the value was appended.
    pub fn push_if<F>(&self, value: T, absent: F) -> bool
    where
        F: FnOnce(&[T]) -> bool,
    {
        let mut guard = self.inner.write();
        if !absent(guard.as_slice()) {
            return false;
        }
        let mut next = Vec::with_capacity(guard.len() + 1);
        next.extend_from_slice(guard.as_slice());
        next.push(value);
        *guard = Arc::new(next);
        true
    }

    /// Current contents as a lock-free iterable snapshot
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        self.inner.read().clone()
    }

    /// Last appended element, if any
    pub fn last(&self) -> Option<T> {
        self.inner.read().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl<T: Clone> Default for CowList<T> {
    fn default() -> Self {
        Self::new()
    }
}
