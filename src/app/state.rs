//! View state for the users table: sorting, filtering, and the modal.
//!
//! This is transient UI state layered over the collection store. The
//! projection it computes is purely derived: the store's records are never
//! reordered or filtered in place, only the displayed copy is.
//!
//! # Sort Cycle
//!
//! Clicking a column cycles ascending → descending → cleared; clicking a
//! different column starts ascending on that column. String comparisons are
//! case-insensitive and records missing the sorted field sort last.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::app::modes::{FormMode, ModalState, SortDirection};
use crate::domain::{User, UserPatch};

/// Sortable columns of the users table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Username,
    Email,
    Phone,
}

impl SortField {
    /// Parses a column name as given on the CLI.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "username" => Some(Self::Username),
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            _ => None,
        }
    }
}

/// Transient state of the users view.
#[derive(Debug, Default)]
pub struct UsersViewState {
    sort: Option<(SortField, SortDirection)>,
    search_query: String,
    pub modal: ModalState<UserPatch>,
}

impl UsersViewState {
    /// The active sort, if any.
    #[must_use]
    pub fn sort(&self) -> Option<(SortField, SortDirection)> {
        self.sort
    }

    /// Advances the sort cycle for a column.
    ///
    /// Same column: ascending → descending → cleared. Different column:
    /// starts ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort = match self.sort {
            Some((current, SortDirection::Ascending)) if current == field => {
                Some((field, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == field => None,
            _ => Some((field, SortDirection::Ascending)),
        };
    }

    /// Replaces the search query.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Opens the modal with an empty create draft.
    pub fn open_create(&mut self) {
        self.modal = ModalState::Open {
            mode: FormMode::Create,
            draft: UserPatch::default(),
        };
    }

    /// Opens the modal in edit mode, seeding the draft from the record.
    pub fn open_edit(&mut self, user: &User) {
        self.modal = ModalState::Open {
            mode: FormMode::Edit(user.id),
            draft: UserPatch {
                name: Some(user.name.clone()),
                username: Some(user.username.clone()),
                email: Some(user.email.clone()),
                phone: user.phone.clone(),
                website: user.website.clone(),
            },
        };
    }

    /// Closes the modal; used for both submit-complete and cancel.
    pub fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
    }

    /// Computes the displayed projection: filtered, then sorted.
    ///
    /// All query tokens must fuzzy-match the user's name, username, or
    /// email. The store's ordering is preserved when no sort is active.
    #[must_use]
    pub fn projection(&self, users: &[User]) -> Vec<User> {
        let _span = tracing::debug_span!(
            "users_projection",
            total = users.len(),
            query_len = self.search_query.len()
        )
        .entered();

        let tokens: Vec<String> = self
            .search_query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        let matcher = if tokens.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let mut projected: Vec<User> = users
            .iter()
            .filter(|user| {
                matcher.as_ref().map_or(true, |m| {
                    let haystack = format!(
                        "{} {} {}",
                        user.name.to_lowercase(),
                        user.username.to_lowercase(),
                        user.email.to_lowercase()
                    );
                    tokens.iter().all(|token| m.fuzzy_match(&haystack, token).is_some())
                })
            })
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

    fn compare(a: &User, b: &User, field: SortField) -> std::cmp::Ordering {
        match field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Username => a.username.to_lowercase().cmp(&b.username.to_lowercase()),
            SortField::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
            // Missing phones sort last in either direction's base ordering.
            SortField::Phone => match (&a.phone, &b.phone) {
                (Some(pa), Some(pb)) => pa.to_lowercase().cmp(&pb.to_lowercase()),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, name: &str, phone: Option<&str>) -> User {
        User {
            id,
            name: name.to_string(),
            username: format!("u-{name}"),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: phone.map(str::to_string),
            website: None,
            address: None,
            company: None,
        }
    }

    #[test]
    fn sort_cycle_runs_asc_desc_cleared() {
        let mut state = UsersViewState::default();
        assert!(state.sort().is_none());

        state.toggle_sort(SortField::Name);
        assert_eq!(state.sort(), Some((SortField::Name, SortDirection::Ascending)));

        state.toggle_sort(SortField::Name);
        assert_eq!(state.sort(), Some((SortField::Name, SortDirection::Descending)));

        state.toggle_sort(SortField::Name);
        assert!(state.sort().is_none());
    }

    #[test]
    fn switching_column_restarts_ascending() {
        let mut state = UsersViewState::default();
        state.toggle_sort(SortField::Name);
        state.toggle_sort(SortField::Email);
        assert_eq!(state.sort(), Some((SortField::Email, SortDirection::Ascending)));
    }

    #[test]
    fn unsorted_projection_preserves_insertion_order() {
        let state = UsersViewState::default();
        let users = vec![user(3, "Carol", None), user(1, "Alice", None)];
        let projected = state.projection(&users);
        assert_eq!(projected[0].id, 3);
        assert_eq!(projected[1].id, 1);
    }

    #[test]
    fn sorted_projection_is_case_insensitive_and_missing_last() {
        let mut state = UsersViewState::default();
        let users = vec![
            user(1, "bob", Some("222")),
            user(2, "Alice", None),
            user(3, "carol", Some("111")),
        ];

        state.toggle_sort(SortField::Name);
        let by_name: Vec<u64> = state.projection(&users).iter().map(|u| u.id).collect();
        assert_eq!(by_name, vec![2, 1, 3]);

        let mut state = UsersViewState::default();
        state.toggle_sort(SortField::Phone);
        let by_phone: Vec<u64> = state.projection(&users).iter().map(|u| u.id).collect();
        assert_eq!(by_phone, vec![3, 1, 2]);
    }

    #[test]
    fn filter_requires_all_tokens() {
        let mut state = UsersViewState::default();
        state.set_search_query("ali exam");
        let users = vec![user(1, "Alice", None), user(2, "Bob", None)];
        let projected = state.projection(&users);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].id, 1);
    }

    #[test]
    fn modal_transitions() {
        let mut state = UsersViewState::default();
        assert!(!state.modal.is_open());

        state.open_create();
        assert!(matches!(
            state.modal,
            ModalState::Open { mode: FormMode::Create, .. }
        ));

        state.close_modal();
        assert!(!state.modal.is_open());

        let u = user(5, "Eve", None);
        state.open_edit(&u);
        match &state.modal {
            ModalState::Open { mode: FormMode::Edit(id), draft } => {
                assert_eq!(*id, 5);
                assert_eq!(draft.name.as_deref(), Some("Eve"));
            }
            other => panic!("unexpected modal state: {other:?}"),
        }
    }
}
