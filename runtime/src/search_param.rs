//! Two-way binding between an in-app value and one URL query parameter.
//!
//! The URL is the single source of truth: [`SearchParamSync::value`] parses the
//! current `location.search` on every call and nothing is cached. Writes go
//! through history *replacement*, so changing the value never adds a
//! back/forward entry.
//!
//! The synchronizer owns its [`Location`]. Holding the port by value is what
//! makes it the only writer of the URL; everyone else reads through
//! [`SearchParamSync::location`].
//!
//! ```text
//!   activate() / settle() ──► param recognized? ──yes──► adopt (no write)
//!                                     │
//!                                     no
//!                                     ▼
//!                             write default (replace)
//!
//!   set(v) ──► write v (replace, other params kept) ──► notify listeners
//! ```

use crate::error::SyncError;
use std::fmt;
use todosync_core::environment::Location;
use todosync_core::query;

/// A closed set of values that can live in a query parameter
///
/// `parse` must be exact: only the strings produced by `as_str` are accepted.
pub trait SearchParam: Copy + Eq + Default + fmt::Debug {
    /// Parse a decoded parameter value
    fn parse(raw: &str) -> Option<Self>;

    /// Canonical (decoded) parameter value
    fn as_str(self) -> &'static str;
}

/// Type alias for change listeners
type Listener<V> = Box<dyn FnMut(V)>;

/// Keeps a [`SearchParam`] value and the URL query parameter `key` equal
pub struct SearchParamSync<L, V> {
    location: L,
    key: String,
    listeners: Vec<Listener<V>>,
    active: bool,
}

impl<L, V> SearchParamSync<L, V>
where
    L: Location,
    V: SearchParam,
{
    /// Create an inactive synchronizer for parameter `key`
    #[must_use]
    pub fn new(location: L, key: impl Into<String>) -> Self {
        Self {
            location,
            key: key.into(),
            listeners: Vec::new(),
            active: false,
        }
    }

    /// Parameter name this synchronizer owns
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read-only view of the location port
    #[must_use]
    pub const fn location(&self) -> &L {
        &self.location
    }

    /// Whether [`activate`](Self::activate) has run
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Value currently in the URL, if present and recognized
    fn read(&self) -> Option<V> {
        query::get(&self.location.search(), &self.key).and_then(|raw| V::parse(&raw))
    }

    /// Current value, derived from the URL on every call
    ///
    /// Absent or unrecognized parameters read as `V::default()`.
    #[must_use]
    pub fn value(&self) -> V {
        self.read().unwrap_or_default()
    }

    /// Initial read on first activation
    ///
    /// Same as [`settle`](Self::settle), and marks the synchronizer active.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Write`] if the corrective write is rejected.
    pub fn activate(&mut self) -> Result<V, SyncError> {
        self.active = true;
        self.settle()
    }

    /// Bring the URL back to a recognized value
    ///
    /// A recognized parameter is adopted as-is without touching the URL. An
    /// absent or unrecognized one is replaced by the default value. Run it
    /// after the URL changed underneath (back/forward navigation).
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Write`] if the corrective write is rejected.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub fn settle(&mut self) -> Result<V, SyncError> {
        if let Some(value) = self.read() {
            tracing::debug!(value = value.as_str(), "Adopted search parameter from URL");
            return Ok(value);
        }

        let value = V::default();
        tracing::debug!(
            value = value.as_str(),
            "Search parameter absent or unrecognized, writing default"
        );
        self.write(value)?;
        Ok(value)
    }

    /// Select a new value
    ///
    /// Replaces the parameter in the URL (every other parameter and the
    /// fragment are preserved) and then runs the change listeners. The write
    /// and the notification happen in the same call with nothing in between,
    /// so a listener reading the URL always sees `value`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Write`] if the port rejects the update; listeners
    /// are not notified in that case.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub fn set(&mut self, value: V) -> Result<(), SyncError> {
        self.write(value)?;

        for listener in &mut self.listeners {
            listener(value);
        }
        Ok(())
    }

    /// Register a callback run after every [`set`](Self::set)
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(V) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn write(&mut self, value: V) -> Result<(), SyncError> {
        let query = query::set(&self.location.search(), &self.key, value.as_str());
        let url = query::href(&self.location.pathname(), &query, &self.location.hash());

        self.location
            .replace_state(&url)
            .map_err(|source| SyncError::Write {
                key: self.key.clone(),
                source,
            })?;

        tracing::debug!(%url, "Replaced history entry");
        Ok(())
    }
}
