//! Posts browsing: read-only list and per-post detail.
//!
//! Posts have no local store; every invocation fetches fresh from the
//! remote. The list can be narrowed to one author via the collection's
//! `?userId=` filter, and the detail view fetches a single record in full.

use crate::domain::error::Result;
use crate::domain::Post;
use crate::remote::api::RemoteCollection;

/// Fetches the posts to list, optionally narrowed to one author.
///
/// # Errors
///
/// Returns a network error when the fetch fails; there is no local state to
/// fall back to.
pub fn list<C: RemoteCollection<Post>>(remote: &C, author: Option<u64>) -> Result<Vec<Post>> {
    match author {
        Some(user_id) => remote.fetch_by_user(user_id),
        None => remote.fetch_all(),
    }
}

/// Fetches one post in full for the detail view.
///
/// # Errors
///
/// Returns a network error when the fetch fails or no post has this
/// identifier.
pub fn detail<C: RemoteCollection<Post>>(remote: &C, id: u64) -> Result<Post> {
    remote.fetch_by_id(id)
}

/// Truncates body text for the list's one-line preview.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::fake::FakeRemote;

    fn post(id: u64, user_id: u64, title: &str) -> Post {
        Post {
            id,
            user_id,
            title: title.to_string(),
            body: "body".to_string(),
        }
    }

    #[test]
    fn list_without_author_fetches_the_whole_collection() {
        let remote = FakeRemote::with_records(vec![post(1, 1, "a"), post(2, 2, "b")]);

        let posts = list(&remote, None).unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(remote.fetch_calls.get(), 1);
        assert_eq!(remote.fetch_by_user_calls.get(), 0);
    }

    #[test]
    fn list_with_author_uses_the_user_filter() {
        let remote = FakeRemote::with_records(vec![post(1, 1, "a")]);

        list(&remote, Some(1)).unwrap();

        assert_eq!(remote.fetch_calls.get(), 0);
        assert_eq!(remote.fetch_by_user_calls.get(), 1);
    }

    #[test]
    fn detail_fetches_the_matching_record() {
        let remote = FakeRemote::with_records(vec![post(1, 1, "a"), post(7, 2, "b")]);

        let fetched = detail(&remote, 7).unwrap();

        assert_eq!(fetched.title, "b");
        assert_eq!(remote.fetch_by_id_calls.get(), 1);
    }

    #[test]
    fn detail_of_unknown_id_is_a_network_error() {
        let remote = FakeRemote::with_records(vec![post(1, 1, "a")]);
        assert!(detail(&remote, 99).is_err());
    }

    #[test]
    fn preview_truncates_long_bodies() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("one\ntwo", 10), "one two");
        assert_eq!(preview("abcdefghij", 5), "abcde...");
    }
}
