//! User management port and application service.
//!
//! Owns the user lifecycle: creation, lookup by mail, name updates gated on
//! the active flag, activation toggling, and deletion. All shared state
//! lives behind the repository port; concurrent updates on the same mail are
//! read-then-write with last write winning.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use secondhand_core::{AppError, AppResult};
use secondhand_domain::{MailAddress, User, UserId};

use crate::UserDto;


// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// Repository port for user persistence.
///
/// Mail uniqueness is enforced by the store behind this port, not by the
/// service.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns every stored record, in store-defined order.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Finds a user by mail address. Zero-or-one result.
    async fn find_by_mail(&self, mail: &str) -> AppResult<Option<User>>;

    /// Finds a user by their store-assigned identifier. Zero-or-one result.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Returns whether a row with the given identifier exists.
    async fn exists_by_id(&self, id: UserId) -> AppResult<bool>;

    /// Upserts a record. A record without an id is inserted and returned
    /// with the store-assigned id populated; a record with an id replaces
    /// the existing row.
    async fn save(&self, user: User) -> AppResult<User>;

    /// Removes the row with the given identifier. The service confirms
    /// existence before calling this.
    async fn delete_by_id(&self, id: UserId) -> AppResult<()>;
}

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// Parameters for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    /// Mail address for the new user; validated and lowercased on create.
    pub mail: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Middle name, empty when not supplied.
    pub middle_name: String,
}

/// Parameters for updating a user's name fields. The mail comes from the
/// request path, never from the body.
#[derive(Debug, Clone)]
pub struct UpdateUserParams {
    /// Replacement first name.
    pub first_name: String,
    /// Replacement last name.
    pub last_name: String,
    /// Replacement middle name.
    pub middle_name: String,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for user record management.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Returns the external representation of every stored user, in store
    /// order.
    pub async fn list_users(&self) -> AppResult<Vec<UserDto>> {
        let users = self.user_repository.find_all().await?;
        Ok(UserDto::from_records(&users))
    }

    /// Returns the user with the given mail address. The mail is
    /// canonicalized the same way create canonicalizes it, so the caller's
    /// own casing always matches.
    pub async fn get_user_by_mail(&self, mail: &str) -> AppResult<UserDto> {
        let mail = canonical_mail(mail);
        let user = self.find_by_mail_or_not_found(&mail).await?;
        Ok(UserDto::from_record(&user))
    }

    /// Creates a new user. The record always enters the active state and the
    /// store assigns its identifier. A duplicate mail surfaces as the
    /// store's conflict error, untouched.
    pub async fn create_user(&self, params: CreateUserParams) -> AppResult<UserDto> {
        let mail = MailAddress::new(&params.mail)?;
        let user = User::new(
            mail,
            params.first_name,
            params.last_name,
            params.middle_name,
        );

        let saved = self.user_repository.save(user).await?;
        Ok(UserDto::from_record(&saved))
    }

    /// Replaces the name fields of the user with the given mail. Only
    /// permitted while the user is active; `id`, `mail`, and `active` are
    /// preserved in the persisted row.
    pub async fn update_user(&self, mail: &str, params: UpdateUserParams) -> AppResult<UserDto> {
        let mail = canonical_mail(mail);
        let user = self.find_by_mail_or_not_found(&mail).await?;

        if !user.is_active() {
            warn!(%mail, "rejected update of inactive user");
            return Err(AppError::NotActive(format!(
                "user with mail '{mail}' is not active"
            )));
        }

        let updated = user.with_names(params.first_name, params.last_name, params.middle_name);
        let saved = self.user_repository.save(updated).await?;
        Ok(UserDto::from_record(&saved))
    }

    /// Marks the user with the given id inactive. Idempotent at the flag
    /// level: the row is re-read and re-saved even if already inactive.
    pub async fn deactivate_user(&self, id: UserId) -> AppResult<()> {
        self.change_active_flag(id, false).await
    }

    /// Marks the user with the given id active. Symmetric to
    /// [`Self::deactivate_user`].
    pub async fn activate_user(&self, id: UserId) -> AppResult<()> {
        self.change_active_flag(id, true).await
    }

    /// Removes the user with the given id. Deletion is a real removal and is
    /// permitted from either lifecycle state.
    pub async fn delete_user(&self, id: UserId) -> AppResult<()> {
        if !self.user_repository.exists_by_id(id).await? {
            return Err(AppError::NotFound(format!(
                "user couldn't be found by following id: {id}"
            )));
        }

        self.user_repository.delete_by_id(id).await
    }

    async fn find_by_mail_or_not_found(&self, mail: &str) -> AppResult<User> {
        self.user_repository
            .find_by_mail(mail)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("user couldn't be found by following mail: {mail}"))
            })
    }

    async fn find_by_id_or_not_found(&self, id: UserId) -> AppResult<User> {
        self.user_repository.find_by_id(id).await?.ok_or_else(|| {
            AppError::NotFound(format!("user couldn't be found by following id: {id}"))
        })
    }

    async fn change_active_flag(&self, id: UserId, active: bool) -> AppResult<()> {
        let user = self.find_by_id_or_not_found(id).await?;
        self.user_repository.save(user.with_active(active)).await?;
        Ok(())
    }
}

/// Stored mails are canonical (trimmed, lowercased) because create persists
/// through [`MailAddress`]; mail-keyed lookups canonicalize the same way.
fn canonical_mail(mail: &str) -> String {
    mail.trim().to_lowercase()
}
