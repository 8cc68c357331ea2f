//! # Todosync Core
//!
//! Core traits and types for the todosync architecture.
//!
//! This crate provides the fundamental abstractions shared by the runtime and
//! the application crates. Everything here is synchronous and free of I/O: the
//! only outside world a reducer ever sees is what arrives through its
//! `Environment`.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer
//! - **Reducer**: `(State, Action, Environment) → Result<Output, Error>`
//! - **Snapshot**: Immutable, shareable view of committed state
//! - **Environment**: Injected dependencies via traits (clock, ids, location)
//!
//! ## Example
//!
//! ```ignore
//! use todosync_core::reducer::Reducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!     type Output = i64;
//!     type Error = CounterError;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> Result<i64, CounterError> {
//!         state.count += 1;
//!         Ok(state.count)
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};

/// Query-string helpers with `URLSearchParams` semantics
pub mod query;

/// Immutable state snapshots used for change detection
pub mod snapshot;

pub use snapshot::Snapshot;

/// Reducer module - The core trait for business logic
///
/// Reducers are functions `(State, Action, Environment) → Result<Output, Error>`.
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    /// - `Output`: What a successful action hands back to the caller
    /// - `Error`: Why an action was rejected
    ///
    /// # Contract
    ///
    /// `reduce` receives a *draft* of the state. When it returns `Err` the
    /// caller throws the draft away, so a reducer may validate lazily without
    /// having to roll back partial writes.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Result of a successfully applied action
        type Output;

        /// Rejection reason for an action
        type Error;

        /// Reduce an action into a state change
        ///
        /// 1. Validates the action against the draft state
        /// 2. Updates the draft in place
        /// 3. Returns the output for the caller
        ///
        /// # Errors
        ///
        /// Returns `Self::Error` when the action is invalid for the current
        /// state. The draft must then be discarded.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Result<Self::Output, Self::Error>;
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter (or, for the location port, owned by the
/// single component allowed to write to it).
pub mod environment {
    use chrono::{DateTime, Utc};
    use thiserror::Error;

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use todosync_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// assert!(clock.now().timestamp() > 0);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of fresh identifiers
    ///
    /// Implementations must never hand out the same value twice for the
    /// lifetime of the generator.
    pub trait IdGenerator: Send + Sync {
        /// Produce the next identifier
        fn next_id(&self) -> String;
    }

    /// Errors raised by a [`Location`] port
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum LocationError {
        /// The platform refused the history update
        #[error("History update rejected: {0}")]
        HistoryRejected(String),

        /// No navigable document is available
        #[error("Location unavailable: {0}")]
        Unavailable(String),
    }

    /// Location port - read/write access to the current URL
    ///
    /// Mirrors the parts of `window.location` and `window.history` the
    /// synchronizer needs. Reads are infallible: a port that cannot read its
    /// URL reports empty components.
    ///
    /// Whoever owns the value holds the write capability.
    pub trait Location {
        /// Path component, e.g. `/todos`
        fn pathname(&self) -> String;

        /// Query component including the leading `?`, or empty
        fn search(&self) -> String;

        /// Fragment including the leading `#`, or empty
        fn hash(&self) -> String;

        /// Replace the current history entry's URL without adding an entry
        ///
        /// # Errors
        ///
        /// Returns [`LocationError`] if the platform rejects the update.
        fn replace_state(&mut self, url: &str) -> Result<(), LocationError>;
    }
}
