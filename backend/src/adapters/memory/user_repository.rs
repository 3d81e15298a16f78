//! In-memory user repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::auth::User;
use crate::domain::foundation::{DomainError, ErrorKind, UserId};
use crate::ports::UserRepository;

/// Users keyed by id. Email uniqueness is enforced among active records
/// under the write lock, on create and on update.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, including deleted ones.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        let email_taken = users
            .values()
            .any(|u| u.is_active() && u.email.eq_ignore_ascii_case(&user.email));
        if email_taken || users.contains_key(&user.id) {
            return Err(DomainError::new(
                ErrorKind::UserAlreadyExists,
                "A user with this email already exists",
            ));
        }

        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        let email_taken = users.values().any(|u| {
            u.id != user.id && u.is_active() && u.email.eq_ignore_ascii_case(&user.email)
        });
        if email_taken {
            return Err(DomainError::new(
                ErrorKind::UserAlreadyExists,
                "A user with this email already exists",
            ));
        }

        match users.get_mut(&user.id) {
            Some(existing) if existing.is_active() => {
                *existing = user.clone();
                Ok(())
            }
            _ => Err(DomainError::not_found("User", &user.id)),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .get(id)
            .filter(|u| u.is_active())
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.is_active() && u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}
