//! Immutable state snapshots.
//!
//! A [`Snapshot`] is what a store hands to the outside world after every
//! committed mutation. Consumers detect change by identity with
//! [`Snapshot::ptr_eq`]: a new allocation means "re-derive your view", the same
//! allocation means nothing happened.

use serde::{Serialize, Serializer};
use std::ops::Deref;
use std::sync::Arc;

/// Shared, read-only handle to a committed state value
#[derive(Debug)]
pub struct Snapshot<T>(Arc<T>);

impl<T> Snapshot<T> {
    /// Wrap a freshly committed value
    #[must_use]
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Whether two snapshots are the same committed value (identity, not equality)
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Clone the underlying value into a mutable draft
    #[must_use]
    pub fn to_draft(&self) -> T
    where
        T: Clone,
    {
        (*self.0).clone()
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> AsRef<T> for Snapshot<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T: Default> Default for Snapshot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Serialize> Serialize for Snapshot<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
