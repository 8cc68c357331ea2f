//! Reducer logic for the todo list.
//!
//! Validate the command, apply it to the draft list, hand the affected
//! record back. Rejections never touch the committed list: the store only
//! commits drafts of accepted actions.

use crate::config::DEFAULT_DATE_FORMAT;
use crate::error::{TodoError, ValidationError};
use crate::types::{Todo, TodoAction, TodoId, TodoList};
use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};
use std::fmt::{self, Write as _};
use std::sync::Arc;
use todosync_core::environment::{Clock, IdGenerator};
use todosync_core::reducer::Reducer;

/// Time zone a creation date is taken in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DateZone {
    /// The machine's local zone, like a browser's `toLocaleDateString`
    #[default]
    Local,
    /// A fixed UTC offset
    Fixed(FixedOffset),
}

impl DateZone {
    /// Zero offset
    #[must_use]
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }
}

fn format_date<Tz>(at: &DateTime<Tz>, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut date = String::new();
    if write!(date, "{}", at.format(format)).is_err() {
        tracing::warn!(format, "Invalid date format, using ISO date");
        date = at.format("%Y-%m-%d").to_string();
    }
    date
}

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for creation dates
    pub clock: Arc<dyn Clock>,
    /// Source of fresh todo ids
    pub ids: Arc<dyn IdGenerator>,
    /// `chrono` format string for [`Todo::creation_date`]
    pub date_format: String,
    /// Zone the creation date is read in
    pub zone: DateZone,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment` with the default date format
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            clock,
            ids,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            zone: DateZone::Local,
        }
    }

    /// Use a different creation date format
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Take creation dates in a different zone
    #[must_use]
    pub fn with_zone(mut self, zone: DateZone) -> Self {
        self.zone = zone;
        self
    }

    /// Today's date in the configured zone and format
    fn creation_date(&self) -> String {
        let now = self.clock.now();
        match self.zone {
            DateZone::Local => format_date(&now.with_timezone(&Local), &self.date_format),
            DateZone::Fixed(offset) => format_date(&now.with_timezone(&offset), &self.date_format),
        }
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Trimmed text, or an error if nothing is left
    fn validate_text(text: &str) -> Result<String, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(trimmed.to_string())
    }

    fn find_mut<'a>(state: &'a mut TodoList, id: &TodoId) -> Result<&'a mut Todo, TodoError> {
        state
            .get_mut(id)
            .ok_or_else(|| TodoError::NotFound(id.clone()))
    }
}

impl Reducer for TodoReducer {
    type State = TodoList;
    type Action = TodoAction;
    type Environment = TodoEnvironment;
    type Output = Todo;
    type Error = TodoError;

    fn reduce(
        &self,
        state: &mut TodoList,
        action: TodoAction,
        env: &TodoEnvironment,
    ) -> Result<Todo, TodoError> {
        match action {
            TodoAction::Add { text } => {
                let text = Self::validate_text(&text)?;

                let id = TodoId::new(env.ids.next_id());
                if state.contains(&id) {
                    return Err(TodoError::DuplicateId(id));
                }

                let todo = Todo::new(id, text, env.creation_date());
                state.push(todo.clone());
                Ok(todo)
            },

            TodoAction::Update { id, text } => {
                let text = Self::validate_text(&text)?;
                let todo = Self::find_mut(state, &id)?;
                todo.text = text;
                Ok(todo.clone())
            },

            TodoAction::Toggle { id } => {
                let todo = Self::find_mut(state, &id)?;
                todo.done = !todo.done;
                Ok(todo.clone())
            },

            TodoAction::SetDone { id, done } => {
                let todo = Self::find_mut(state, &id)?;
                todo.done = done;
                Ok(todo.clone())
            },

            TodoAction::Remove { id } => state.remove(&id).ok_or(TodoError::NotFound(id)),
        }
    }
}
