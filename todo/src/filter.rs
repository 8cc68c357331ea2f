//! Status filter for the todo list.
//!
//! The filter lives in the URL as `?filter=all|done|not+done`. Parsing is by
//! exact match against that closed set: `"Done"`, `" done"` or `"not"` are all
//! unrecognized and read as [`Filter::All`].

use crate::types::Todo;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use todosync_runtime::SearchParam;

/// Which todos to show
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Filter {
    /// Every todo
    #[default]
    #[serde(rename = "all")]
    All,
    /// Only completed todos
    #[serde(rename = "done")]
    Done,
    /// Only open todos
    #[serde(rename = "not done")]
    NotDone,
}

impl Filter {
    /// All filters, in the order the selector shows them
    pub const ALL: [Self; 3] = [Self::All, Self::Done, Self::NotDone];

    /// URL value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Done => "done",
            Self::NotDone => "not done",
        }
    }

    /// Human-readable label for the selector
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Done => "Done",
            Self::NotDone => "Not done",
        }
    }

    /// Whether `todo` is visible under this filter
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Done => todo.done,
            Self::NotDone => !todo.done,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value outside `all`, `done`, `not done`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown filter: {0:?}")]
pub struct UnknownFilter(pub String);

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str() == s)
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

impl SearchParam for Filter {
    fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn as_str(self) -> &'static str {
        Self::as_str(self)
    }
}
