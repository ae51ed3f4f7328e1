//! In-memory user repository for tests and local development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use secondhand_application::UserRepository;
use secondhand_core::{AppError, AppResult};
use secondhand_domain::{User, UserId};

/// In-memory user repository implementation.
///
/// Mirrors the Postgres adapter's semantics: store-assigned ids, a unique
/// mail constraint surfaced as [`AppError::Conflict`], and listing in id
/// order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<i64, User>>,
    id_sequence: AtomicI64,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            id_sequence: AtomicI64::new(0),
        }
    }

    fn next_id(&self) -> i64 {
        self.id_sequence.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let mut listed: Vec<(i64, User)> = users
            .iter()
            .map(|(id, user)| (*id, user.clone()))
            .collect();
        listed.sort_by_key(|(id, _)| *id);

        Ok(listed.into_iter().map(|(_, user)| user).collect())
    }

    async fn find_by_mail(&self, mail: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.mail() == mail)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id.as_i64()).cloned())
    }

    async fn exists_by_id(&self, id: UserId) -> AppResult<bool> {
        Ok(self.users.read().await.contains_key(&id.as_i64()))
    }

    async fn save(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        let id = match user.id() {
            Some(id) => {
                // A save with an id replaces an existing row; a row deleted
                // underneath the caller is reported, never silently dropped.
                if !users.contains_key(&id.as_i64()) {
                    return Err(AppError::NotFound(format!(
                        "user couldn't be found by following id: {id}"
                    )));
                }
                id.as_i64()
            }
            None => self.next_id(),
        };

        let mail_taken = users
            .iter()
            .any(|(stored_id, stored)| *stored_id != id && stored.mail() == user.mail());
        if mail_taken {
            return Err(AppError::Conflict(
                "a user with this mail already exists".to_owned(),
            ));
        }

        let stored = User::from_parts(
            Some(UserId::from_i64(id)),
            user.mail(),
            user.first_name(),
            user.last_name(),
            user.middle_name(),
            user.is_active(),
        );
        users.insert(id, stored.clone());

        Ok(stored)
    }

    async fn delete_by_id(&self, id: UserId) -> AppResult<()> {
        self.users.write().await.remove(&id.as_i64());
        Ok(())
    }
}
