//! Composition root: the todo store, the URL-backed filter and the renderers.
//!
//! The rendering layer talks to [`TodoApp`] only through the mutators it
//! exposes and gets back [`ListView`]s through [`TodoApp::on_render`]. A view is
//! rebuilt when its inputs change: a new todo snapshot (by identity) or a
//! different filter in the URL. Selecting a filter always re-renders.

use crate::config::TodoConfig;
use crate::error::TodoError;
use crate::filter::Filter;
use crate::reducer::TodoEnvironment;
use crate::store::TodoStore;
use crate::types::{Todo, TodoId, TodoList, UuidIds};
use crate::view::ListView;
use std::sync::Arc;
use todosync_core::Snapshot;
use todosync_core::environment::{Location, SystemClock};
use todosync_runtime::{SearchParamSync, SyncError};

/// Type alias for view consumers
type Renderer = Box<dyn FnMut(&ListView)>;

/// The todo application
pub struct TodoApp<L> {
    todos: TodoStore,
    filter: SearchParamSync<L, Filter>,
    config: TodoConfig,
    renderers: Vec<Renderer>,
    rendered: Option<(Snapshot<TodoList>, Filter)>,
}

impl<L: Location> TodoApp<L> {
    /// Wire an app from explicit dependencies
    ///
    /// `config.date_format` overrides the environment's format.
    #[must_use]
    pub fn new(env: TodoEnvironment, location: L, config: TodoConfig) -> Self {
        let env = env.with_date_format(config.date_format.clone());
        Self {
            todos: TodoStore::new(env),
            filter: SearchParamSync::new(location, config.filter_param.clone()),
            config,
            renderers: Vec::new(),
            rendered: None,
        }
    }

    /// App on the system clock with random ids
    #[must_use]
    pub fn with_system_env(location: L, config: TodoConfig) -> Self {
        let env = TodoEnvironment::new(Arc::new(SystemClock), Arc::new(UuidIds));
        Self::new(env, location, config)
    }

    /// First activation: settle the filter in the URL and render once
    ///
    /// # Errors
    ///
    /// [`SyncError`] if the corrective URL write fails.
    pub fn activate(&mut self) -> Result<Filter, SyncError> {
        let filter = self.filter.activate()?;
        self.render(true);
        Ok(filter)
    }

    /// Add a todo
    ///
    /// # Errors
    ///
    /// See [`TodoStore::add`].
    pub fn add(&mut self, text: impl Into<String>) -> Result<Todo, TodoError> {
        let result = self.todos.add(text);
        self.after_mutation(result)
    }

    /// Edit a todo's text
    ///
    /// # Errors
    ///
    /// See [`TodoStore::update`].
    pub fn update(&mut self, id: &TodoId, text: impl Into<String>) -> Result<Todo, TodoError> {
        let result = self.todos.update(id, text);
        self.after_mutation(result)
    }

    /// Flip a todo's `done` flag
    ///
    /// # Errors
    ///
    /// See [`TodoStore::toggle`].
    pub fn toggle(&mut self, id: &TodoId) -> Result<Todo, TodoError> {
        let result = self.todos.toggle(id);
        self.after_mutation(result)
    }

    /// Set a todo's `done` flag (checkbox semantics)
    ///
    /// # Errors
    ///
    /// See [`TodoStore::set_done`].
    pub fn set_done(&mut self, id: &TodoId, done: bool) -> Result<Todo, TodoError> {
        let result = self.todos.set_done(id, done);
        self.after_mutation(result)
    }

    /// Delete a todo
    ///
    /// # Errors
    ///
    /// See [`TodoStore::remove`].
    pub fn remove(&mut self, id: &TodoId) -> Result<Todo, TodoError> {
        let result = self.todos.remove(id);
        self.after_mutation(result)
    }

    /// Select a filter: write it to the URL, then re-render
    ///
    /// # Errors
    ///
    /// [`SyncError`] if the URL write fails; nothing is rendered then.
    pub fn set_filter(&mut self, filter: Filter) -> Result<(), SyncError> {
        self.filter.set(filter)?;
        self.render(true);
        Ok(())
    }

    /// Pick up a URL that changed underneath us (back/forward navigation)
    ///
    /// An unrecognized filter left in the URL is replaced by the default
    /// first. Returns whether a render happened.
    ///
    /// # Errors
    ///
    /// [`SyncError`] if the corrective URL write fails; nothing is rendered then.
    pub fn refresh(&mut self) -> Result<bool, SyncError> {
        self.filter.settle()?;
        Ok(self.render(false))
    }

    /// Active filter, read from the URL
    #[must_use]
    pub fn filter(&self) -> Filter {
        self.filter.value()
    }

    /// Latest committed todo list
    #[must_use]
    pub fn todos(&self) -> Snapshot<TodoList> {
        self.todos.snapshot()
    }

    /// Current view, computed on demand
    #[must_use]
    pub fn view(&self) -> ListView {
        ListView::build(&self.todos.snapshot(), self.filter(), &self.config.empty_message)
    }

    /// Register a view consumer
    pub fn on_render<F>(&mut self, renderer: F)
    where
        F: FnMut(&ListView) + 'static,
    {
        self.renderers.push(Box::new(renderer));
    }

    /// Read-only access to the location port
    #[must_use]
    pub const fn location(&self) -> &L {
        self.filter.location()
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &TodoConfig {
        &self.config
    }

    fn after_mutation(&mut self, result: Result<Todo, TodoError>) -> Result<Todo, TodoError> {
        match &result {
            Ok(todo) => {
                tracing::debug!(id = %todo.id, "Todo mutation accepted");
                self.render(false);
            },
            Err(error) => tracing::warn!(%error, "Todo mutation rejected"),
        }
        result
    }

    fn render(&mut self, force: bool) -> bool {
        let snapshot = self.todos.snapshot();
        let filter = self.filter.value();

        let unchanged = self
            .rendered
            .as_ref()
            .is_some_and(|(last, last_filter)| Snapshot::ptr_eq(last, &snapshot) && *last_filter == filter);
        if unchanged && !force {
            tracing::trace!("View inputs unchanged, skipping render");
            return false;
        }

        let view = ListView::build(&snapshot, filter, &self.config.empty_message);
        for renderer in &mut self.renderers {
            renderer(&view);
        }
        tracing::debug!(
            filter = filter.as_str(),
            visible = view.items.len(),
            total = view.total,
            "Rendered list"
        );

        self.rendered = Some((snapshot, filter));
        true
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::reducer::DateZone;
    use todosync_core::environment::LocationError;
    use std::cell::RefCell;
    use std::rc::Rc;
    use todosync_testing::{MemoryLocation, SequentialIds, test_clock};

    fn app(url: &str) -> (MemoryLocation, TodoApp<MemoryLocation>, Rc<RefCell<Vec<ListView>>>) {
        let location = MemoryLocation::new(url);
        let env = TodoEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIds::new("todo")));
        let mut app = TodoApp::new(env, location.clone(), TodoConfig::default());
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&frames);
        app.on_render(move |view| sink.borrow_mut().push(view.clone()));
        (location, app, frames)
    }

    #[test]
    fn activate_renders_once() {
        let (location, mut app, frames) = app("/");
        assert_eq!(app.activate().unwrap(), Filter::All);
        assert_eq!(location.href(), "/?filter=all");
        assert_eq!(frames.borrow().len(), 1);
    }

    #[test]
    fn rejected_mutation_does_not_render() {
        let (_location, mut app, frames) = app("/?filter=all");
        app.activate().unwrap();

        assert!(app.add("  ").is_err());
        assert!(app.toggle(&TodoId::new("ghost")).is_err());

        assert_eq!(frames.borrow().len(), 1);
    }

    #[test]
    fn set_filter_forces_render_even_when_unchanged() {
        let (_location, mut app, frames) = app("/?filter=done");
        app.activate().unwrap();

        app.set_filter(Filter::Done).unwrap();

        assert_eq!(frames.borrow().len(), 2);
    }

    #[test]
    fn refresh_only_renders_on_url_change() {
        let (location, mut app, frames) = app("/?filter=all");
        app.activate().unwrap();
        assert!(!app.refresh().unwrap());

        location.navigate("/?filter=not+done");
        assert!(app.refresh().unwrap());
        assert_eq!(frames.borrow().last().unwrap().filter, Filter::NotDone);
        assert_eq!(frames.borrow().len(), 2);
    }

    #[test]
    fn refresh_corrects_unrecognized_filter() {
        let (location, mut app, frames) = app("/?filter=done");
        app.activate().unwrap();

        location.navigate("/?filter=xyz#list");
        assert!(app.refresh().unwrap());

        assert_eq!(location.href(), "/?filter=all#list");
        assert_eq!(location.history_len(), 2);
        assert_eq!(app.filter(), Filter::All);
        assert_eq!(frames.borrow().last().unwrap().filter, Filter::All);
    }

    #[test]
    fn refresh_reports_failed_correction() {
        let (location, mut app, frames) = app("/?filter=all");
        app.activate().unwrap();

        location.navigate("/?filter=xyz");
        location.fail_next_write(LocationError::HistoryRejected("denied".to_string()));

        assert!(app.refresh().is_err());
        assert_eq!(frames.borrow().len(), 1);
    }

    #[test]
    fn config_date_format_applies() {
        let location = MemoryLocation::new("/");
        let env = TodoEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIds::new("t")))
            .with_zone(DateZone::utc());
        let mut app = TodoApp::new(env, location, TodoConfig::default().with_date_format("%d.%m.%Y"));

        let todo = app.add("Dated").unwrap();
        assert_eq!(todo.creation_date, "01.01.2025");
    }

    #[test]
    fn custom_filter_param() {
        let location = MemoryLocation::new("/?filter=done");
        let env = TodoEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIds::new("t")));
        let mut app = TodoApp::new(env, location.clone(), TodoConfig::default().with_filter_param("status"));

        app.activate().unwrap();
        app.set_filter(Filter::NotDone).unwrap();

        assert_eq!(location.href(), "/?filter=done&status=not+done");
    }
}
