//! In-memory user registry
//!
//! Read by the tracker and the reward engine on every cycle, written rarely
//! (new-user insertion). A read-write lock over a hash map keeps reads cheap;
//! users themselves carry their own concurrency discipline.

use crate::domain::user::User;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

pub struct UserRegistry {
    users: RwLock<FxHashMap<String, Arc<User>>>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self { users: RwLock::new(FxHashMap::default()) }
    }

    /// Insert a user; an existing user with the same name is kept untouched
    pub fn add_user(&self, user: Arc<User>) {
        let mut users = self.users.write();
        if users.contains_key(&user.name) {
            debug!(user = %user.name, "add_user_duplicate_ignored");
            return;
        }
        users.insert(user.name.clone(), user);
    }

    pub fn get_user(&self, name: &str) -> Option<Arc<User>> {
        self.users.read().get(name).cloned()
    }

    /// Snapshot of all users, order unspecified
    pub fn users(&self) -> Vec<Arc<User>> {
        self.users.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get_user() {
        let registry = UserRegistry::new();
        registry.add_user(Arc::new(User::new("jon", "000", "jon@tourtrack.com")));

        assert_eq!(registry.len(), 1);
        assert!(registry.get_user("jon").is_some());
        assert!(registry.get_user("jane").is_none());
    }

    #[test]
    fn test_duplicate_name_keeps_first_user() {
        let registry = UserRegistry::new();
        let first = Arc::new(User::new("jon", "000", "jon@tourtrack.com"));
        let first_id = first.id;
        registry.add_user(first);
        registry.add_user(Arc::new(User::new("jon", "111", "other@tourtrack.com")));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get_user("jon").unwrap().id, first_id);
    }
}
