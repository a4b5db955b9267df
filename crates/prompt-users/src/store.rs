//! User data collaborator: the boundary between commands and the portal's
//! user storage.

use std::sync::Mutex;

use serde::Serialize;

use prompt_types::{PromptError, Result};

/// One user row as surfaced by the console commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: i32,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub roles: Vec<String>,
    pub last_login: Option<String>,
    /// Soft-deleted users are kept until purged.
    pub is_deleted: bool,
}

/// Abstraction over the portal's user storage.
///
/// Implementations may perform blocking I/O; the engine imposes no timeout
/// of its own. `page_index` is zero-based; `page_size` arrives already
/// clamped by the caller.
pub trait UserStore: Send + Sync {
    /// One display-name-sorted page of users matching `search_text`
    /// (username, display name, or email substring; `None` = everyone),
    /// plus the total record count across all pages.
    fn search(
        &self,
        portal_id: i32,
        search_text: Option<&str>,
        page_index: i32,
        page_size: i32,
    ) -> Result<(Vec<UserRecord>, usize)>;

    /// One page of users holding exactly the named role, plus the total
    /// count. Fails with a store error when the role does not exist.
    fn users_in_role(
        &self,
        portal_id: i32,
        role: &str,
        page_index: i32,
        page_size: i32,
    ) -> Result<(Vec<UserRecord>, usize)>;

    /// A single user by id.
    fn find(&self, portal_id: i32, user_id: i32) -> Result<Option<UserRecord>>;

    /// Permanently remove a soft-deleted user. `Ok(false)` when the user
    /// exists but is not deleted; a store error when there is no such user.
    fn purge(&self, portal_id: i32, user_id: i32) -> Result<bool>;
}

/// In-memory user store for tests and the demo console.
pub struct MemoryUserStore {
    inner: Mutex<Inner>,
}

struct Inner {
    users: Vec<(i32, UserRecord)>,
    roles: Vec<String>,
}

impl MemoryUserStore {
    /// An empty store with no known roles.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: Vec::new(),
                roles: Vec::new(),
            }),
        }
    }

    /// Add a user to a portal; the user's roles become known roles.
    pub fn add_user(&self, portal_id: i32, user: UserRecord) {
        let mut inner = self.lock();
        for role in &user.roles {
            if !inner.roles.contains(role) {
                inner.roles.push(role.clone());
            }
        }
        inner.users.push((portal_id, user));
    }

    /// Register a role with no members yet.
    pub fn add_role(&self, role: &str) {
        let mut inner = self.lock();
        if !inner.roles.iter().any(|r| r == role) {
            inner.roles.push(role.to_string());
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Lock poisoning only happens if a holder panicked; the data is
        // plain and still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn page(mut matches: Vec<UserRecord>, page_index: i32, page_size: i32) -> (Vec<UserRecord>, usize) {
        matches.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        let total = matches.len();
        let start = (page_index.max(0) as usize) * (page_size.max(1) as usize);
        let page: Vec<UserRecord> = matches
            .into_iter()
            .skip(start)
            .take(page_size.max(1) as usize)
            .collect();
        (page, total)
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for MemoryUserStore {
    fn search(
        &self,
        portal_id: i32,
        search_text: Option<&str>,
        page_index: i32,
        page_size: i32,
    ) -> Result<(Vec<UserRecord>, usize)> {
        let needle = search_text.map(|s| s.to_ascii_lowercase());
        let matches: Vec<UserRecord> = self
            .lock()
            .users
            .iter()
            .filter(|(p, _)| *p == portal_id)
            .map(|(_, u)| u.clone())
            .filter(|u| match &needle {
                Some(n) => {
                    u.username.to_ascii_lowercase().contains(n)
                        || u.display_name.to_ascii_lowercase().contains(n)
                        || u.email.to_ascii_lowercase().contains(n)
                },
                None => true,
            })
            .collect();
        Ok(Self::page(matches, page_index, page_size))
    }

    fn users_in_role(
        &self,
        portal_id: i32,
        role: &str,
        page_index: i32,
        page_size: i32,
    ) -> Result<(Vec<UserRecord>, usize)> {
        let inner = self.lock();
        if !inner.roles.iter().any(|r| r == role) {
            return Err(PromptError::Store(format!("role '{role}' not found")));
        }
        let matches: Vec<UserRecord> = inner
            .users
            .iter()
            .filter(|(p, u)| *p == portal_id && u.roles.iter().any(|r| r == role))
            .map(|(_, u)| u.clone())
            .collect();
        drop(inner);
        Ok(Self::page(matches, page_index, page_size))
    }

    fn find(&self, portal_id: i32, user_id: i32) -> Result<Option<UserRecord>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(p, u)| *p == portal_id && u.user_id == user_id)
            .map(|(_, u)| u.clone()))
    }

    fn purge(&self, portal_id: i32, user_id: i32) -> Result<bool> {
        let mut inner = self.lock();
        let Some(pos) = inner
            .users
            .iter()
            .position(|(p, u)| *p == portal_id && u.user_id == user_id)
        else {
            return Err(PromptError::Store(format!("no user with id {user_id}")));
        };
        if !inner.users[pos].1.is_deleted {
            return Ok(false);
        }
        inner.users.remove(pos);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i32, username: &str, display: &str, email: &str, roles: &[&str]) -> UserRecord {
        UserRecord {
            user_id: id,
            username: username.to_string(),
            display_name: display.to_string(),
            email: email.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            last_login: None,
            is_deleted: false,
        }
    }

    fn seeded() -> MemoryUserStore {
        let store = MemoryUserStore::new();
        store.add_user(0, user(1, "jdoe", "Jane Doe", "jane@example.com", &["Admin"]));
        store.add_user(0, user(2, "bsmith", "Bob Smith", "bob@example.com", &["Editor"]));
        store.add_user(0, user(3, "acme", "Acme Admin", "admin@acme.test", &["Admin"]));
        store.add_user(1, user(4, "other", "Other Portal", "other@example.com", &[]));
        store
    }

    #[test]
    fn search_is_portal_scoped_and_sorted() {
        let store = seeded();
        let (page, total) = store.search(0, None, 0, 10).unwrap();
        assert_eq!(total, 3);
        let names: Vec<&str> = page.iter().map(|u| u.display_name.as_str()).collect();
        assert_eq!(names, vec!["Acme Admin", "Bob Smith", "Jane Doe"]);
    }

    #[test]
    fn search_matches_username_display_and_email() {
        let store = seeded();
        assert_eq!(store.search(0, Some("jdoe"), 0, 10).unwrap().1, 1);
        assert_eq!(store.search(0, Some("smith"), 0, 10).unwrap().1, 1);
        assert_eq!(store.search(0, Some("example.com"), 0, 10).unwrap().1, 2);
    }

    #[test]
    fn search_pages_report_full_total() {
        let store = seeded();
        let (page, total) = store.search(0, None, 1, 2).unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].display_name, "Jane Doe");
    }

    #[test]
    fn users_in_role_exact_match() {
        let store = seeded();
        let (page, total) = store.users_in_role(0, "Admin", 0, 10).unwrap();
        assert_eq!(total, 2);
        assert!(page.iter().all(|u| u.roles.contains(&"Admin".to_string())));
    }

    #[test]
    fn unknown_role_is_a_store_error() {
        let store = seeded();
        let err = store.users_in_role(0, "Nonexistent", 0, 10).unwrap_err();
        assert!(matches!(err, PromptError::Store(_)));
    }

    #[test]
    fn find_respects_portal() {
        let store = seeded();
        assert!(store.find(0, 1).unwrap().is_some());
        assert!(store.find(0, 4).unwrap().is_none());
    }

    #[test]
    fn purge_only_removes_deleted_users() {
        let store = seeded();
        assert!(!store.purge(0, 1).unwrap());

        let mut deleted = user(9, "ghost", "Ghost", "ghost@example.com", &[]);
        deleted.is_deleted = true;
        store.add_user(0, deleted);
        assert!(store.purge(0, 9).unwrap());
        assert!(store.find(0, 9).unwrap().is_none());

        assert!(matches!(store.purge(0, 999), Err(PromptError::Store(_))));
    }
}
