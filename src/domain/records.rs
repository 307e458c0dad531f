//! Concrete record types for the three demo API collections.
//!
//! Field names follow the jsonplaceholder wire format (camelCase where the
//! API uses it); serde renames bridge the gap to Rust naming. The `address`
//! and `company` sub-records on [`User`] are carried opaquely: stored and
//! round-tripped, never interpreted.

use serde::{Deserialize, Serialize};

use super::resource::Resource;

/// Postal address sub-record on a [`User`]. Carried, not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
}

/// Company sub-record on a [`User`]. Carried, not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(rename = "catchPhrase")]
    pub catch_phrase: String,
    pub bs: String,
}

/// A user record from the `/users` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

/// Partial [`User`]: the create/edit form fields, all optional.
///
/// Sub-records are not editable through the form and therefore absent here;
/// an update leaves them untouched on the stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Resource for User {
    type Patch = UserPatch;

    const COLLECTION: &'static str = "users";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn apply(&mut self, patch: &UserPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(username) = &patch.username {
            self.username.clone_from(username);
        }
        if let Some(email) = &patch.email {
            self.email.clone_from(email);
        }
        if let Some(phone) = &patch.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(website) = &patch.website {
            self.website = Some(website.clone());
        }
    }

    fn from_patch(patch: UserPatch) -> Self {
        Self {
            id: 0,
            name: patch.name.unwrap_or_default(),
            username: patch.username.unwrap_or_default(),
            email: patch.email.unwrap_or_default(),
            phone: patch.phone,
            website: patch.website,
            address: None,
            company: None,
        }
    }
}

/// A post record from the `/posts` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

/// Partial [`Post`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(default, rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Resource for Post {
    type Patch = PostPatch;

    const COLLECTION: &'static str = "posts";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn apply(&mut self, patch: &PostPatch) {
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(body) = &patch.body {
            self.body.clone_from(body);
        }
    }

    fn from_patch(patch: PostPatch) -> Self {
        Self {
            id: 0,
            user_id: patch.user_id.unwrap_or_default(),
            title: patch.title.unwrap_or_default(),
            body: patch.body.unwrap_or_default(),
        }
    }
}

/// A todo record from the `/todos` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub title: String,
    pub completed: bool,
}

/// Partial [`Todo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(default, rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl Resource for Todo {
    type Patch = TodoPatch;

    const COLLECTION: &'static str = "todos";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn apply(&mut self, patch: &TodoPatch) {
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }

    fn from_patch(patch: TodoPatch) -> Self {
        Self {
            id: 0,
            user_id: patch.user_id.unwrap_or_default(),
            title: patch.title.unwrap_or_default(),
            completed: patch.completed.unwrap_or_default(),
        }
    }
}
