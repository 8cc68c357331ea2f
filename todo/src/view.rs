//! Read side: what the rendering layer gets to see.
//!
//! [`project`] is the pure filter over an ordered list. [`ListView`] bundles
//! its result with everything else a renderer needs for one frame.

use crate::filter::Filter;
use crate::types::{Todo, TodoList};
use serde::{Deserialize, Serialize};

/// Todos visible under `filter`, in their original relative order
///
/// ```
/// use todo::{Filter, Todo, TodoId, project};
///
/// let mut done = Todo::new(TodoId::new("1"), "Buy milk", "1/1/2025");
/// done.done = true;
/// let open = Todo::new(TodoId::new("2"), "Walk dog", "1/1/2025");
/// let todos = [done, open];
///
/// assert_eq!(project(&todos, Filter::All).len(), 2);
/// assert_eq!(project(&todos, Filter::Done)[0].text, "Buy milk");
/// assert_eq!(project(&todos, Filter::NotDone)[0].text, "Walk dog");
/// ```
#[must_use]
pub fn project(todos: &[Todo], filter: Filter) -> Vec<&Todo> {
    todos.iter().filter(|todo| filter.matches(todo)).collect()
}

/// One button of the filter selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Filter this button selects
    pub filter: Filter,
    /// Whether it is the active one
    pub selected: bool,
}

/// Everything needed to draw the list once
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListView {
    /// Active filter
    pub filter: Filter,
    /// Selector buttons, in display order
    pub options: Vec<FilterOption>,
    /// Visible todos
    pub items: Vec<Todo>,
    /// Size of the whole list, regardless of filter
    pub total: usize,
    /// Open todos in the whole list
    pub remaining: usize,
    /// Set when `items` is empty
    pub empty_message: Option<String>,
}

impl ListView {
    /// Build the view of `todos` under `filter`
    #[must_use]
    pub fn build(todos: &TodoList, filter: Filter, empty_message: &str) -> Self {
        let items: Vec<Todo> = project(todos.as_slice(), filter)
            .into_iter()
            .cloned()
            .collect();

        let empty_message = items.is_empty().then(|| empty_message.to_string());

        Self {
            filter,
            options: Filter::ALL
                .into_iter()
                .map(|option| FilterOption {
                    filter: option,
                    selected: option == filter,
                })
                .collect(),
            items,
            total: todos.len(),
            remaining: todos.remaining_count(),
            empty_message,
        }
    }

    /// Whether nothing is visible
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EMPTY_MESSAGE;
    use crate::types::TodoId;

    fn todos(flags: &[bool]) -> Vec<Todo> {
        flags
            .iter()
            .enumerate()
            .map(|(n, done)| {
                let mut todo = Todo::new(TodoId::new(n.to_string()), format!("todo {n}"), "1/1/2025");
                todo.done = *done;
                todo
            })
            .collect()
    }

    fn ids(todos: &[&Todo]) -> Vec<String> {
        todos.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn all_is_identity() {
        let list = todos(&[true, false, true]);
        assert_eq!(ids(&project(&list, Filter::All)), vec!["0", "1", "2"]);
    }

    #[test]
    fn done_and_not_done_keep_order() {
        let list = todos(&[true, false, true, false, false]);
        assert_eq!(ids(&project(&list, Filter::Done)), vec!["0", "2"]);
        assert_eq!(ids(&project(&list, Filter::NotDone)), vec!["1", "3", "4"]);
    }

    #[test]
    fn project_of_empty_is_empty() {
        assert!(project(&[], Filter::Done).is_empty());
    }

    #[test]
    fn empty_view_carries_message() {
        let view = ListView::build(&TodoList::new(), Filter::All, DEFAULT_EMPTY_MESSAGE);
        assert!(view.is_empty());
        assert_eq!(view.empty_message.as_deref(), Some("There are no todos. Start adding."));
        assert_eq!(view.total, 0);
    }

    #[test]
    fn options_mark_selected_filter() {
        let view = ListView::build(&TodoList::new(), Filter::NotDone, DEFAULT_EMPTY_MESSAGE);
        let selected: Vec<_> = view
            .options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.filter)
            .collect();
        assert_eq!(selected, vec![Filter::NotDone]);
        assert_eq!(view.options.len(), 3);
    }
}
