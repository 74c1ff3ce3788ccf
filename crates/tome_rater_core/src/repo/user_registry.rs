//! Insertion-ordered user storage keyed by email.

use crate::model::user::User;
use std::collections::HashMap;

/// Registry insert/rekey failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateKey(String),
    MissingKey(String),
}

/// In-memory user store preserving registration order.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: Vec<User>,
    index: HashMap<String, usize>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, email: &str) -> bool {
        self.index.contains_key(email)
    }

    /// Stores `user` under its current email.
    pub fn insert(&mut self, user: User) -> Result<(), RegistryError> {
        if self.index.contains_key(user.email()) {
            return Err(RegistryError::DuplicateKey(user.email().to_string()));
        }
        self.index.insert(user.email().to_string(), self.users.len());
        self.users.push(user);
        Ok(())
    }

    pub fn get(&self, email: &str) -> Option<&User> {
        self.index.get(email).map(|&slot| &self.users[slot])
    }

    pub fn get_mut(&mut self, email: &str) -> Option<&mut User> {
        let slot = *self.index.get(email)?;
        self.users.get_mut(slot)
    }

    /// Moves the entry at `current` to `new_email` and updates the user.
    pub fn rekey(&mut self, current: &str, new_email: &str) -> Result<(), RegistryError> {
        if self.index.contains_key(new_email) {
            return Err(RegistryError::DuplicateKey(new_email.to_string()));
        }
        let slot = self
            .index
            .remove(current)
            .ok_or_else(|| RegistryError::MissingKey(current.to_string()))?;
        self.users[slot].change_email(new_email);
        self.index.insert(new_email.to_string(), slot);
        Ok(())
    }

    /// Users in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }
}
