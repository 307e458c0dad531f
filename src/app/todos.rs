//! View state for the todos table: completion filter and sorting.
//!
//! Todos are read-only in this client; the view fetches fresh and projects.
//! The sort cycle is the same as the users table (ascending → descending →
//! cleared per column), layered after the completion filter.

use crate::app::modes::SortDirection;
use crate::domain::Todo;

/// The completion filter over the todos table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TodoFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl TodoFilter {
    /// Parses a filter name as given on the CLI.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "all" => Some(Self::All),
            "completed" => Some(Self::Completed),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }

    fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Completed => todo.completed,
            Self::Pending => !todo.completed,
        }
    }
}

/// Sortable columns of the todos table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoSortField {
    Id,
    Title,
    User,
    Completed,
}

impl TodoSortField {
    /// Parses a column name as given on the CLI.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "user" => Some(Self::User),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Transient state of the todos view.
#[derive(Debug, Default)]
pub struct TodosViewState {
    filter: TodoFilter,
    sort: Option<(TodoSortField, SortDirection)>,
}

impl TodosViewState {
    /// The active filter.
    #[must_use]
    pub fn filter(&self) -> TodoFilter {
        self.filter
    }

    /// Replaces the completion filter.
    pub fn set_filter(&mut self, filter: TodoFilter) {
        self.filter = filter;
    }

    /// The active sort, if any.
    #[must_use]
    pub fn sort(&self) -> Option<(TodoSortField, SortDirection)> {
        self.sort
    }

    /// Advances the sort cycle for a column.
    ///
    /// Same column: ascending → descending → cleared. Different column:
    /// starts ascending.
    pub fn toggle_sort(&mut self, field: TodoSortField) {
        self.sort = match self.sort {
            Some((current, SortDirection::Ascending)) if current == field => {
                Some((field, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == field => None,
            _ => Some((field, SortDirection::Ascending)),
        };
    }

    /// Computes the displayed projection: filtered, then sorted.
    ///
    /// The input ordering is preserved when no sort is active.
    #[must_use]
    pub fn projection(&self, todos: &[Todo]) -> Vec<Todo> {
        let mut projected: Vec<Todo> = todos
            .iter()
            .filter(|todo| self.filter.matches(todo))
            .cloned()
            .collect();

        if let Some((field, direction)) = self.sort {
            projected.sort_by(|a, b| {
                let ordering = Self::compare(a, b, field);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        projected
    }

    fn compare(a: &Todo, b: &Todo, field: TodoSortField) -> std::cmp::Ordering {
        match field {
            TodoSortField::Id => a.id.cmp(&b.id),
            TodoSortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            TodoSortField::User => a.user_id.cmp(&b.user_id),
            // Pending before completed when ascending.
            TodoSortField::Completed => a.completed.cmp(&b.completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: u64, user_id: u64, title: &str, completed: bool) -> Todo {
        Todo {
            id,
            user_id,
            title: title.to_string(),
            completed,
        }
    }

    #[test]
    fn filter_splits_completed_and_pending() {
        let todos = vec![
            todo(1, 1, "a", true),
            todo(2, 1, "b", false),
            todo(3, 2, "c", true),
        ];

        let mut state = TodosViewState::default();
        assert_eq!(state.projection(&todos).len(), 3);

        state.set_filter(TodoFilter::Completed);
        let completed: Vec<u64> = state.projection(&todos).iter().map(|t| t.id).collect();
        assert_eq!(completed, vec![1, 3]);

        state.set_filter(TodoFilter::Pending);
        let pending: Vec<u64> = state.projection(&todos).iter().map(|t| t.id).collect();
        assert_eq!(pending, vec![2]);
    }

    #[test]
    fn sort_cycle_runs_asc_desc_cleared() {
        let mut state = TodosViewState::default();

        state.toggle_sort(TodoSortField::Completed);
        assert_eq!(
            state.sort(),
            Some((TodoSortField::Completed, SortDirection::Ascending))
        );

        state.toggle_sort(TodoSortField::Completed);
        assert_eq!(
            state.sort(),
            Some((TodoSortField::Completed, SortDirection::Descending))
        );

        state.toggle_sort(TodoSortField::Completed);
        assert!(state.sort().is_none());
    }

    #[test]
    fn completed_sort_puts_pending_first_ascending() {
        let todos = vec![todo(1, 1, "a", true), todo(2, 1, "b", false)];
        let mut state = TodosViewState::default();
        state.toggle_sort(TodoSortField::Completed);

        let ids: Vec<u64> = state.projection(&todos).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn title_sort_is_case_insensitive() {
        let todos = vec![todo(1, 1, "beta", false), todo(2, 1, "Alpha", false)];
        let mut state = TodosViewState::default();
        state.toggle_sort(TodoSortField::Title);

        let ids: Vec<u64> = state.projection(&todos).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn filter_and_sort_compose() {
        let todos = vec![
            todo(3, 2, "c", false),
            todo(1, 1, "a", false),
            todo(2, 1, "b", true),
        ];
        let mut state = TodosViewState::default();
        state.set_filter(TodoFilter::Pending);
        state.toggle_sort(TodoSortField::Id);

        let ids: Vec<u64> = state.projection(&todos).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
