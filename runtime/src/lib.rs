//! # Todosync Runtime
//!
//! Runtime implementation for the todosync architecture.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, runs the reducer, commits a new [`Snapshot`] per
//!   accepted action and fans it out to subscribers
//! - **`SearchParamSync`**: Keeps one URL query parameter and an in-app value
//!   in agreement, with the URL as the only copy of that value
//!
//! Everything runs synchronously inside the caller's turn. There is no
//! executor: an action is committed and announced before `send`
//! returns, so no observer can see a half-applied update.
//!
//! ## Example
//!
//! ```ignore
//! use todosync_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! let output = store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.with_state(|s| s.some_field);
//! ```

use todosync_core::{Snapshot, reducer::Reducer};

/// URL search-parameter synchronization
pub mod search_param;

/// Error types for the runtime
pub mod error {
    use thiserror::Error;
    use todosync_core::environment::LocationError;

    /// Errors raised while keeping a search parameter in sync with the URL
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum SyncError {
        /// Writing the parameter into the URL failed
        ///
        /// The in-app value is derived from the URL, so after this error the
        /// app still reports whatever the URL says.
        #[error("Failed to write search parameter `{key}`: {source}")]
        Write {
            /// Parameter name
            key: String,
            /// Underlying port failure
            #[source]
            source: LocationError,
        },
    }
}

/// Store module - the state container
pub mod store {
    use super::{Reducer, Snapshot};
    use std::fmt;

    /// Handle returned by [`Store::subscribe`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SubscriptionId(u64);

    /// Type alias for snapshot observers
    type Subscriber<S> = Box<dyn FnMut(&Snapshot<S>)>;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (as the latest committed [`Snapshot`])
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Subscribers (notified after every commit)
    ///
    /// Every accepted action produces a *new* snapshot; a rejected one leaves
    /// the current snapshot (and its identity) untouched.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Snapshot<S>,
        reducer: R,
        environment: E,
        version: u64,
        next_subscription: u64,
        subscribers: Vec<(SubscriptionId, Subscriber<S>)>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: Clone,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: Snapshot::new(initial_state),
                reducer,
                environment,
                version: 0,
                next_subscription: 0,
                subscribers: Vec::new(),
            }
        }

        /// Send an action through the reducer
        ///
        /// The reducer works on a draft copy of the current state. On success
        /// the draft becomes the new snapshot and subscribers are notified
        /// before this method returns.
        ///
        /// # Errors
        ///
        /// Returns the reducer's error when the action is rejected. The
        /// committed state is unchanged and no subscriber runs.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<R::Output, R::Error>
        where
            A: fmt::Debug,
            R::Error: fmt::Display,
        {
            tracing::debug!(?action, "Processing action");

            let mut draft = self.state.to_draft();
            match self.reducer.reduce(&mut draft, action, &self.environment) {
                Ok(output) => {
                    self.commit(draft);
                    Ok(output)
                },
                Err(error) => {
                    tracing::debug!(%error, "Action rejected, state unchanged");
                    Err(error)
                },
            }
        }

        fn commit(&mut self, next: S) {
            self.state = Snapshot::new(next);
            self.version += 1;
            tracing::debug!(version = self.version, "Committed new snapshot");

            let snapshot = self.state.clone();
            for (id, subscriber) in &mut self.subscribers {
                tracing::trace!(?id, "Notifying subscriber");
                subscriber(&snapshot);
            }
        }

        /// Latest committed snapshot
        #[must_use]
        pub fn state(&self) -> Snapshot<S> {
            self.state.clone()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let todo_count = store.with_state(|s| s.len());
        /// ```
        pub fn with_state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&*self.state)
        }

        /// Number of commits since the store was created
        #[must_use]
        pub const fn version(&self) -> u64 {
            self.version
        }

        /// Injected dependencies
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// Register a callback run with every newly committed snapshot
        pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
        where
            F: FnMut(&Snapshot<S>) + 'static,
        {
            let id = SubscriptionId(self.next_subscription);
            self.next_subscription += 1;
            self.subscribers.push((id, Box::new(subscriber)));
            id
        }

        /// Remove a subscriber; returns `false` if it was not registered
        pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
            let before = self.subscribers.len();
            self.subscribers.retain(|(existing, _)| *existing != id);
            self.subscribers.len() != before
        }

        /// Number of registered subscribers
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            self.subscribers.len()
        }
    }
}

// Re-export commonly used items
pub use error::SyncError;
pub use search_param::{SearchParam, SearchParamSync};
pub use store::{Store, SubscriptionId};

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use thiserror::Error;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct CounterState {
        count: i64,
    }

    #[derive(Clone, Debug)]
    enum CounterAction {
        Add(i64),
        Reject,
    }

    #[derive(Debug, Error)]
    #[error("rejected")]
    struct Rejected;

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = CounterState;
        type Action = CounterAction;
        type Environment = ();
        type Output = i64;
        type Error = Rejected;

        fn reduce(
            &self,
            state: &mut CounterState,
            action: CounterAction,
            _env: &(),
        ) -> Result<i64, Rejected> {
            match action {
                CounterAction::Add(n) => {
                    state.count += n;
                    Ok(state.count)
                },
                CounterAction::Reject => {
                    // Scribble on the draft to prove it gets discarded
                    state.count = -1;
                    Err(Rejected)
                },
            }
        }
    }

    fn store() -> Store<CounterState, CounterAction, (), CounterReducer> {
        Store::new(CounterState::default(), CounterReducer, ())
    }

    #[test]
    fn send_commits_new_snapshot() {
        let mut store = store();
        let before = store.state();

        let output = store.send(CounterAction::Add(2)).unwrap();

        assert_eq!(output, 2);
        assert_eq!(store.with_state(|s| s.count), 2);
        assert!(!Snapshot::ptr_eq(&before, &store.state()));
        assert_eq!(before.count, 0, "old snapshot must stay untouched");
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn rejected_action_keeps_snapshot_identity() {
        let mut store = store();
        store.send(CounterAction::Add(5)).unwrap();
        let before = store.state();

        assert!(store.send(CounterAction::Reject).is_err());

        assert!(Snapshot::ptr_eq(&before, &store.state()));
        assert_eq!(store.with_state(|s| s.count), 5);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn subscribers_see_each_commit_once() {
        let mut store = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.count));

        store.send(CounterAction::Add(1)).unwrap();
        let _ = store.send(CounterAction::Reject);
        store.send(CounterAction::Add(3)).unwrap();

        assert_eq!(*seen.borrow(), vec![1, 4]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = store();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.send(CounterAction::Add(1)).unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.send(CounterAction::Add(1)).unwrap();

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }
}
