//! # Todosync Testing
//!
//! Testing utilities and helpers for the todosync architecture.
//!
//! This crate provides:
//! - Mock implementations of environment ports (clock, ids, location)
//! - A Given-When-Then builder for reducers
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```ignore
//! use todosync_testing::{MemoryLocation, SequentialIds, test_clock};
//!
//! #[test]
//! fn filter_lands_in_url() {
//!     let location = MemoryLocation::new("/");
//!     let mut app = TodoApp::new(env(), location.clone(), TodoConfig::default());
//!     app.activate().unwrap();
//!     assert_eq!(location.href(), "/?filter=all");
//! }
//! ```

use chrono::{DateTime, Utc};
use todosync_core::environment::{Clock, IdGenerator, Location, LocationError};


/// Mock implementations of environment ports
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Location, LocationError, Utc};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todosync_testing::mocks::FixedClock;
    /// use todosync_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable ids: `<prefix>-1`, `<prefix>-2`, ...
    ///
    /// ```
    /// use todosync_testing::mocks::SequentialIds;
    /// use todosync_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIds::new("todo");
    /// assert_eq!(ids.next_id(), "todo-1");
    /// assert_eq!(ids.next_id(), "todo-2");
    /// ```
    #[derive(Debug)]
    pub struct SequentialIds {
        prefix: String,
        next: AtomicU64,
    }

    impl SequentialIds {
        /// Start a fresh sequence at 1
        #[must_use]
        pub fn new(prefix: impl Into<String>) -> Self {
            Self {
                prefix: prefix.into(),
                next: AtomicU64::new(1),
            }
        }
    }

    impl Default for SequentialIds {
        fn default() -> Self {
            Self::new("id")
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::Relaxed);
            format!("{}-{n}", self.prefix)
        }
    }

    /// Generator that always returns the same id, for collision tests
    #[derive(Debug, Clone)]
    pub struct RepeatingIds(pub String);

    impl IdGenerator for RepeatingIds {
        fn next_id(&self) -> String {
            self.0.clone()
        }
    }

    #[derive(Debug)]
    struct History {
        entries: Vec<String>,
        index: usize,
        replacements: usize,
        fail_next: Option<LocationError>,
    }

    /// In-memory browser history
    ///
    /// Clones share the same history, so a test can keep one handle for
    /// inspection (and for simulating back/forward navigation) while the code
    /// under test owns another.
    #[derive(Debug, Clone)]
    pub struct MemoryLocation {
        history: Rc<RefCell<History>>,
    }

    impl MemoryLocation {
        /// Start a history with a single entry
        #[must_use]
        pub fn new(href: impl Into<String>) -> Self {
            Self {
                history: Rc::new(RefCell::new(History {
                    entries: vec![href.into()],
                    index: 0,
                    replacements: 0,
                    fail_next: None,
                })),
            }
        }

        /// Current URL (path, query and fragment)
        #[must_use]
        pub fn href(&self) -> String {
            let history = self.history.borrow();
            history
                .entries
                .get(history.index)
                .cloned()
                .unwrap_or_default()
        }

        /// Navigate to a new entry, like following a link
        ///
        /// Forward entries are discarded.
        pub fn navigate(&self, href: impl Into<String>) {
            let mut history = self.history.borrow_mut();
            let keep = history.index + 1;
            history.entries.truncate(keep);
            history.entries.push(href.into());
            history.index = history.entries.len() - 1;
        }

        /// Step back one entry; `false` at the start of history
        pub fn back(&self) -> bool {
            let mut history = self.history.borrow_mut();
            if history.index == 0 {
                return false;
            }
            history.index -= 1;
            true
        }

        /// Step forward one entry; `false` at the end of history
        pub fn forward(&self) -> bool {
            let mut history = self.history.borrow_mut();
            if history.index + 1 >= history.entries.len() {
                return false;
            }
            history.index += 1;
            true
        }

        /// Number of navigable entries
        #[must_use]
        pub fn history_len(&self) -> usize {
            self.history.borrow().entries.len()
        }

        /// Number of successful `replace_state` calls
        #[must_use]
        pub fn replacements(&self) -> usize {
            self.history.borrow().replacements
        }

        /// Make the next `replace_state` fail with `error`
        pub fn fail_next_write(&self, error: LocationError) {
            self.history.borrow_mut().fail_next = Some(error);
        }

        fn parts(&self) -> (String, String, String) {
            let href = self.href();
            let (rest, hash) = href.find('#').map_or((href.as_str(), ""), |i| href.split_at(i));
            let (path, search) = rest.find('?').map_or((rest, ""), |i| rest.split_at(i));
            let search = if search == "?" { "" } else { search };
            let hash = if hash == "#" { "" } else { hash };
            (path.to_string(), search.to_string(), hash.to_string())
        }
    }

    impl Location for MemoryLocation {
        fn pathname(&self) -> String {
            self.parts().0
        }

        fn search(&self) -> String {
            self.parts().1
        }

        fn hash(&self) -> String {
            self.parts().2
        }

        fn replace_state(&mut self, url: &str) -> Result<(), LocationError> {
            let mut history = self.history.borrow_mut();
            if let Some(error) = history.fail_next.take() {
                return Err(error);
            }
            let index = history.index;
            if let Some(entry) = history.entries.get_mut(index) {
                *entry = url.to_string();
            }
            history.replacements += 1;
            Ok(())
        }
    }
}

/// Property-based testing strategies using proptest
pub mod properties {
    use proptest::collection::{hash_set, vec};
    use proptest::prelude::*;

    /// Non-blank todo text without surrounding whitespace
    pub fn todo_text() -> impl Strategy<Value = String> {
        "[A-Za-z0-9]([A-Za-z0-9 ]{0,30}[A-Za-z0-9])?"
    }

    /// Whitespace-only (or empty) text
    pub fn blank_text() -> impl Strategy<Value = String> {
        "[ \t\n]{0,8}"
    }

    /// Up to `max` pairwise-distinct todo texts
    pub fn distinct_texts(max: usize) -> impl Strategy<Value = Vec<String>> {
        hash_set(todo_text(), 0..=max).prop_map(|texts| texts.into_iter().collect())
    }

    /// Todo texts paired with a `done` flag
    pub fn todos_with_flags(max: usize) -> impl Strategy<Value = Vec<(String, bool)>> {
        vec((todo_text(), any::<bool>()), 0..=max)
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, MemoryLocation, RepeatingIds, SequentialIds, test_clock};
pub use reducer_test::ReducerTest;
