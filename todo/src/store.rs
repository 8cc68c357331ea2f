//! Typed facade over the runtime [`Store`] for the todo list.
//!
//! Each method maps to one [`TodoAction`]. Every accepted call commits a new
//! [`Snapshot`]; a rejected call returns the error and leaves the current
//! snapshot, identity included, as it was.

use crate::error::TodoError;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{Todo, TodoAction, TodoId, TodoList};
use todosync_core::Snapshot;
use todosync_runtime::{Store, SubscriptionId};

/// The sole owner of todo data
pub struct TodoStore {
    inner: Store<TodoList, TodoAction, TodoEnvironment, TodoReducer>,
}

impl TodoStore {
    /// Empty store
    #[must_use]
    pub fn new(env: TodoEnvironment) -> Self {
        Self::with_todos(TodoList::new(), env)
    }

    /// Store seeded with an existing list
    #[must_use]
    pub fn with_todos(todos: TodoList, env: TodoEnvironment) -> Self {
        Self {
            inner: Store::new(todos, TodoReducer::new(), env),
        }
    }

    /// Append a todo with a fresh id; returns the created record
    ///
    /// # Errors
    ///
    /// [`TodoError::Validation`] if `text` is blank.
    pub fn add(&mut self, text: impl Into<String>) -> Result<Todo, TodoError> {
        self.dispatch(TodoAction::Add { text: text.into() })
    }

    /// Replace the text of `id`
    ///
    /// # Errors
    ///
    /// [`TodoError::Validation`] if `text` is blank, [`TodoError::NotFound`]
    /// if `id` is unknown.
    pub fn update(&mut self, id: &TodoId, text: impl Into<String>) -> Result<Todo, TodoError> {
        self.dispatch(TodoAction::Update {
            id: id.clone(),
            text: text.into(),
        })
    }

    /// Flip `done` on `id`
    ///
    /// # Errors
    ///
    /// [`TodoError::NotFound`] if `id` is unknown.
    pub fn toggle(&mut self, id: &TodoId) -> Result<Todo, TodoError> {
        self.dispatch(TodoAction::Toggle { id: id.clone() })
    }

    /// Set `done` on `id` to an explicit value
    ///
    /// # Errors
    ///
    /// [`TodoError::NotFound`] if `id` is unknown.
    pub fn set_done(&mut self, id: &TodoId, done: bool) -> Result<Todo, TodoError> {
        self.dispatch(TodoAction::SetDone {
            id: id.clone(),
            done,
        })
    }

    /// Delete `id`; returns the removed record
    ///
    /// # Errors
    ///
    /// [`TodoError::NotFound`] if `id` is unknown (including already removed).
    pub fn remove(&mut self, id: &TodoId) -> Result<Todo, TodoError> {
        self.dispatch(TodoAction::Remove { id: id.clone() })
    }

    /// Send any [`TodoAction`]
    ///
    /// # Errors
    ///
    /// Whatever the reducer rejects the action with.
    pub fn dispatch(&mut self, action: TodoAction) -> Result<Todo, TodoError> {
        self.inner.send(action)
    }

    /// Latest committed list
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<TodoList> {
        self.inner.state()
    }

    /// Number of accepted mutations so far
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.inner.version()
    }

    /// Run `f` with every newly committed list
    pub fn subscribe<F>(&mut self, f: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot<TodoList>) + 'static,
    {
        self.inner.subscribe(f)
    }

    /// Stop a subscription; `false` if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.inner.unsubscribe(id)
    }
}
