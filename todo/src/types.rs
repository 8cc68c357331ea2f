//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of records that can be added, edited,
//! toggled and removed. Order is insertion order, newest last.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a todo
///
/// Opaque to everything but the generator that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Wrap an existing identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Production id generator: random v4 UUIDs
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIds;

impl todosync_core::environment::IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// A single todo record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier, never reused
    pub id: TodoId,
    /// What needs doing; never blank
    pub text: String,
    /// Whether the todo is completed
    pub done: bool,
    /// Creation date, formatted when the todo was added
    pub creation_date: String,
}

impl Todo {
    /// Creates a new, not yet done, todo
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>, creation_date: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            done: false,
            creation_date: creation_date.into(),
        }
    }
}

/// Ordered collection of todos, newest last
///
/// Ids are unique within the list; the reducer is the only code that
/// inserts, and it checks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList {
    todos: Vec<Todo>,
}

impl TodoList {
    /// Creates an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self { todos: Vec::new() }
    }

    /// Number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Whether the list has no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Number of done todos
    #[must_use]
    pub fn done_count(&self) -> usize {
        self.todos.iter().filter(|t| t.done).count()
    }

    /// Number of todos still to do
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.len() - self.done_count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn contains(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Todos in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.todos.iter()
    }

    /// Todos in insertion order, as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[Todo] {
        &self.todos
    }

    pub(crate) fn get_mut(&mut self, id: &TodoId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|t| &t.id == id)
    }

    pub(crate) fn push(&mut self, todo: Todo) {
        self.todos.push(todo);
    }

    pub(crate) fn remove(&mut self, id: &TodoId) -> Option<Todo> {
        let index = self.todos.iter().position(|t| &t.id == id)?;
        Some(self.todos.remove(index))
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.todos.iter()
    }
}

/// Commands accepted by the todo reducer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    /// Append a new todo
    Add {
        /// Text of the todo
        text: String,
    },

    /// Replace a todo's text
    Update {
        /// Todo to edit
        id: TodoId,
        /// New text
        text: String,
    },

    /// Flip a todo's `done` flag
    Toggle {
        /// Todo to toggle
        id: TodoId,
    },

    /// Set a todo's `done` flag, as a checkbox does
    SetDone {
        /// Todo to update
        id: TodoId,
        /// New flag value
        done: bool,
    },

    /// Delete a todo for good
    Remove {
        /// Todo to delete
        id: TodoId,
    },
}
