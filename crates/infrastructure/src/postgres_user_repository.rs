//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use sqlx::PgPool;

use secondhand_application::UserRepository;
use secondhand_core::{AppError, AppResult};
use secondhand_domain::{User, UserId};

/// PostgreSQL implementation of the user repository port.
///
/// The `users` table carries the unique index on `mail`; a violated index
/// surfaces as [`AppError::Conflict`] and propagates through the service
/// untouched.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    mail: String,
    first_name: String,
    last_name: String,
    middle_name: String,
    active: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::from_parts(
            Some(UserId::from_i64(row.id)),
            row.mail,
            row.first_name,
            row.last_name,
            row.middle_name,
            row.active,
        )
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, mail, first_name, last_name, middle_name, active
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list users: {error}")))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_mail(&self, mail: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, mail, first_name, last_name, middle_name, active
            FROM users
            WHERE mail = $1
            LIMIT 1
            "#,
        )
        .bind(mail)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user by mail: {error}")))?;

        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, mail, first_name, last_name, middle_name, active
            FROM users
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user by id: {error}")))?;

        Ok(row.map(User::from))
    }

    async fn exists_by_id(&self, id: UserId) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)
            "#,
        )
        .bind(id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to check user existence: {error}")))?;

        Ok(exists)
    }

    async fn save(&self, user: User) -> AppResult<User> {
        match user.id() {
            None => self.insert(user).await,
            Some(id) => self.replace(id, user).await,
        }
    }

    async fn delete_by_id(&self, id: UserId) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete user: {error}")))?;

        Ok(())
    }
}

impl PostgresUserRepository {
    async fn insert(&self, user: User) -> AppResult<User> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (mail, first_name, last_name, middle_name, active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(user.mail())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.middle_name())
        .bind(user.is_active())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| mail_conflict_or_internal(error, "create user"))?;

        Ok(User::from_parts(
            Some(UserId::from_i64(id)),
            user.mail(),
            user.first_name(),
            user.last_name(),
            user.middle_name(),
            user.is_active(),
        ))
    }

    async fn replace(&self, id: UserId, user: User) -> AppResult<User> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET mail = $2, first_name = $3, last_name = $4, middle_name = $5,
                active = $6, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(user.mail())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.middle_name())
        .bind(user.is_active())
        .execute(&self.pool)
        .await
        .map_err(|error| mail_conflict_or_internal(error, "update user"))?;

        // A save racing a concurrent delete matches zero rows; report that
        // instead of claiming the replacement was persisted.
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "user couldn't be found by following id: {id}"
            )));
        }

        Ok(user)
    }
}

fn mail_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("a user with this mail already exists".to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
