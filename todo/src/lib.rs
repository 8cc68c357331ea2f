//! Todo list with a status filter mirrored in the URL.
//!
//! This crate builds a todo list on todosync. It covers:
//!
//! - Ordered todo records (add, edit, toggle, delete) owned by a single store
//! - A status filter (`all`, `done`, `not done`) whose only copy is the URL
//!   query string
//! - A pure projection from (todos, filter) to the visible list
//! - Testing with `ReducerTest` and an in-memory browser history
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use todo::{Filter, TodoApp, TodoConfig, TodoEnvironment};
//! use todosync_testing::{MemoryLocation, SequentialIds, test_clock};
//!
//! # fn main() -> anyhow::Result<()> {
//! let location = MemoryLocation::new("/");
//! let env = TodoEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIds::new("todo")));
//! let mut app = TodoApp::new(env, location.clone(), TodoConfig::default());
//!
//! // First activation writes the default filter into the URL
//! app.activate()?;
//! assert_eq!(location.href(), "/?filter=all");
//!
//! let milk = app.add("Buy milk")?;
//! app.add("Walk dog")?;
//! app.toggle(&milk.id)?;
//!
//! app.set_filter(Filter::Done)?;
//! let view = app.view();
//! assert_eq!(view.items.len(), 1);
//! assert_eq!(view.items[0].text, "Buy milk");
//! # Ok(())
//! # }
//! ```

pub mod app;
#[cfg(feature = "browser")]
pub mod browser;
pub mod config;
pub mod error;
pub mod filter;
pub mod reducer;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use app::TodoApp;
#[cfg(feature = "browser")]
pub use browser::BrowserLocation;
pub use config::TodoConfig;
pub use error::{TodoError, ValidationError};
pub use filter::{Filter, UnknownFilter};
pub use reducer::{DateZone, TodoEnvironment, TodoReducer};
pub use store::TodoStore;
pub use types::{Todo, TodoAction, TodoId, TodoList, UuidIds};
pub use view::{FilterOption, ListView, project};
