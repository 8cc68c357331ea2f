//! Property tests for the store, the projection and the URL filter.

#![allow(clippy::unwrap_used)] // Tests can unwrap

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use todo::{Filter, Todo, TodoApp, TodoConfig, TodoEnvironment, TodoId, TodoStore, project};
use todosync_core::query;
use todosync_testing::properties::{blank_text, distinct_texts, todo_text, todos_with_flags};
use todosync_testing::{MemoryLocation, SequentialIds, test_clock};

fn env() -> TodoEnvironment {
    TodoEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIds::new("todo")))
}

fn build(items: &[(String, bool)]) -> Vec<Todo> {
    items
        .iter()
        .enumerate()
        .map(|(n, (text, done))| {
            let mut todo = Todo::new(TodoId::new(format!("t{n}")), text.clone(), "1/1/2025");
            todo.done = *done;
            todo
        })
        .collect()
}

proptest! {
    #[test]
    fn adds_keep_count_order_and_unique_ids(texts in distinct_texts(20)) {
        let mut store = TodoStore::new(env());
        for text in &texts {
            store.add(text.clone()).unwrap();
        }

        let list = store.snapshot();
        prop_assert_eq!(list.len(), texts.len());

        let stored: Vec<&str> = list.iter().map(|t| t.text.as_str()).collect();
        let expected: Vec<&str> = texts.iter().map(String::as_str).collect();
        prop_assert_eq!(stored, expected);

        let ids: HashSet<&TodoId> = list.iter().map(|t| &t.id).collect();
        prop_assert_eq!(ids.len(), texts.len());
    }

    #[test]
    fn toggle_twice_is_identity(text in todo_text(), start_done in any::<bool>()) {
        let mut store = TodoStore::new(env());
        let todo = store.add(text).unwrap();
        store.set_done(&todo.id, start_done).unwrap();

        store.toggle(&todo.id).unwrap();
        let after = store.toggle(&todo.id).unwrap();

        prop_assert_eq!(after.done, start_done);
    }

    #[test]
    fn blank_text_never_changes_store(text in blank_text()) {
        let mut store = TodoStore::new(env());
        let todo = store.add("seed").unwrap();
        let version = store.version();

        prop_assert!(store.add(text.clone()).unwrap_err().is_validation());
        prop_assert!(store.update(&todo.id, text).unwrap_err().is_validation());
        prop_assert_eq!(store.version(), version);
    }

    #[test]
    fn project_all_is_identity(items in todos_with_flags(16)) {
        let todos = build(&items);
        let projected: Vec<Todo> = project(&todos, Filter::All).into_iter().cloned().collect();
        prop_assert_eq!(projected, todos);
    }

    #[test]
    fn done_and_not_done_partition(items in todos_with_flags(16)) {
        let todos = build(&items);
        let done = project(&todos, Filter::Done);
        let open = project(&todos, Filter::NotDone);

        prop_assert_eq!(done.len() + open.len(), todos.len());
        prop_assert!(done.iter().all(|t| t.done));
        prop_assert!(open.iter().all(|t| !t.done));

        // Each side is a subsequence of the input
        let position = |todo: &Todo| todos.iter().position(|t| t.id == todo.id).unwrap();
        let done_positions: Vec<usize> = done.iter().map(|t| position(t)).collect();
        let open_positions: Vec<usize> = open.iter().map(|t| position(t)).collect();
        prop_assert!(done_positions.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(open_positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn set_filter_keeps_foreign_params(
        page in 0u32..1000,
        q in "[a-z]{1,8}",
        filter in prop_oneof![Just(Filter::All), Just(Filter::Done), Just(Filter::NotDone)],
    ) {
        let location = MemoryLocation::new(format!("/?page={page}&q={q}"));
        let mut app = TodoApp::new(env(), location.clone(), TodoConfig::default());
        app.activate().unwrap();

        app.set_filter(filter).unwrap();

        let search = todosync_core::environment::Location::search(&location);
        prop_assert_eq!(query::get(&search, "filter"), Some(filter.as_str().to_string()));
        prop_assert_eq!(query::get(&search, "page"), Some(page.to_string()));
        prop_assert_eq!(query::get(&search, "q"), Some(q));
        prop_assert_eq!(app.filter(), filter);
    }
}
