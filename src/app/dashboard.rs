//! Derived dashboard series.
//!
//! Single-pass, in-memory aggregations over already-materialized records:
//! totals, posts per user, the completed/pending todo split, and the per-user
//! todo split for the first five users. These feed whatever renders the
//! dashboard; no chart concerns live here.

use crate::domain::{Post, Todo, User};

/// How many users the per-user todo split covers.
const TODO_SPLIT_USER_LIMIT: usize = 5;

/// Headline counts for the stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardTotals {
    pub users: usize,
    pub posts: usize,
    pub todos: usize,
}

/// One bar of the posts-per-user series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPostCount {
    /// The user's first name.
    pub name: String,
    pub posts: usize,
}

/// The completed/pending split across all todos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoCompletion {
    pub completed: usize,
    pub pending: usize,
}

/// One row of the per-user todo split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTodoSplit {
    /// The user's first name.
    pub name: String,
    pub completed: usize,
    pub pending: usize,
}

fn first_name(user: &User) -> String {
    user.name.split(' ').next().unwrap_or(&user.name).to_string()
}

/// Headline totals.
#[must_use]
pub fn totals(users: &[User], posts: &[Post], todos: &[Todo]) -> DashboardTotals {
    DashboardTotals {
        users: users.len(),
        posts: posts.len(),
        todos: todos.len(),
    }
}

/// Post counts per user, in user order, labeled by first name.
#[must_use]
pub fn posts_per_user(users: &[User], posts: &[Post]) -> Vec<UserPostCount> {
    users
        .iter()
        .map(|user| UserPostCount {
            name: first_name(user),
            posts: posts.iter().filter(|post| post.user_id == user.id).count(),
        })
        .collect()
}

/// The completed/pending split across all todos.
#[must_use]
pub fn todo_completion(todos: &[Todo]) -> TodoCompletion {
    let completed = todos.iter().filter(|todo| todo.completed).count();
    TodoCompletion {
        completed,
        pending: todos.len() - completed,
    }
}

/// Per-user completed/pending todo counts for the first five users.
#[must_use]
pub fn todos_per_user(users: &[User], todos: &[Todo]) -> Vec<UserTodoSplit> {
    users
        .iter()
        .take(TODO_SPLIT_USER_LIMIT)
        .map(|user| {
            let mine = todos.iter().filter(|todo| todo.user_id == user.id);
            let (completed, pending) =
                mine.fold((0, 0), |(done, open), todo| {
                    if todo.completed {
                        (done + 1, open)
                    } else {
                        (done, open + 1)
                    }
                });
            UserTodoSplit {
                name: first_name(user),
                completed,
                pending,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            username: String::new(),
            email: String::new(),
            phone: None,
            website: None,
            address: None,
            company: None,
        }
    }

    fn post(id: u64, user_id: u64) -> Post {
        Post {
            id,
            user_id,
            title: String::new(),
            body: String::new(),
        }
    }

    fn todo(id: u64, user_id: u64, completed: bool) -> Todo {
        Todo {
            id,
            user_id,
            title: String::new(),
            completed,
        }
    }

    #[test]
    fn posts_per_user_counts_and_uses_first_names() {
        let users = vec![user(1, "Leanne Graham"), user(2, "Ervin Howell")];
        let posts = vec![post(1, 1), post(2, 1), post(3, 2)];

        let series = posts_per_user(&users, &posts);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "Leanne");
        assert_eq!(series[0].posts, 2);
        assert_eq!(series[1].posts, 1);
    }

    #[test]
    fn todo_completion_splits_correctly() {
        let todos = vec![todo(1, 1, true), todo(2, 1, false), todo(3, 2, true)];
        let split = todo_completion(&todos);
        assert_eq!(split.completed, 2);
        assert_eq!(split.pending, 1);
    }

    #[test]
    fn todos_per_user_caps_at_five_users() {
        let users: Vec<User> = (1..=7).map(|i| user(i, &format!("User {i}"))).collect();
        let todos = vec![todo(1, 1, true), todo(2, 6, false)];

        let series = todos_per_user(&users, &todos);

        assert_eq!(series.len(), 5);
        assert_eq!(series[0].completed, 1);
        assert_eq!(series[0].pending, 0);
    }

    #[test]
    fn empty_inputs_yield_empty_series() {
        assert!(posts_per_user(&[], &[]).is_empty());
        assert_eq!(todo_completion(&[]), TodoCompletion { completed: 0, pending: 0 });
        let t = totals(&[], &[], &[]);
        assert_eq!((t.users, t.posts, t.todos), (0, 0, 0));
    }
}
