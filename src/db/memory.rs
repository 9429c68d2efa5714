use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::db::{StoreError, UserStore};
use crate::models::{NewUser, User, UserId};

/// In-process user store with the same contract as the Postgres one,
/// including the schema's non-empty checks on names and email.
pub struct MemoryUserStore {
    users: DashMap<UserId, User>,
    /// email -> id; its entry lock is the uniqueness constraint
    emails: DashMap<String, UserId>,
    next_id: AtomicI64,
    available: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            emails: DashMap::new(),
            next_id: AtomicI64::new(1),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate the backend going away (or coming back).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Connection("in-memory store unavailable".to_string()))
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, user: &NewUser) -> Result<UserId, StoreError> {
        self.ensure_available()?;

        for (column, value) in [
            ("first_name", &user.first_name),
            ("last_name", &user.last_name),
            ("email", &user.email),
        ] {
            if value.is_empty() {
                return Err(StoreError::Constraint(format!("{column} must not be empty")));
            }
        }

        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateKey(format!(
                "email already exists: {}",
                user.email
            ))),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                self.users.insert(id, user.clone().into_user(id));
                slot.insert(id);
                Ok(id)
            }
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.ensure_available()?;

        let Some(id) = self.emails.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.ensure_available()?;
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }
}
