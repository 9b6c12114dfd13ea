//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::StoredPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{ProfileUpdate, UserCredentials, UserProfile};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{IdentityError, IdentityResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn find_credentials_by_email(
        &self,
        email: &Email,
    ) -> IdentityResult<Option<UserCredentials>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password, created_at, updated_at
            FROM users
            WHERE lower(email) = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_credentials).transpose()
    }

    async fn find_credentials_by_id(
        &self,
        user_id: &UserId,
    ) -> IdentityResult<Option<UserCredentials>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_credentials).transpose()
    }

    async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRow::into_profile))
    }

    async fn update(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> IdentityResult<Option<UserProfile>> {
        // NULL keeps the stored password
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE users
            SET name = $2,
                email = $3,
                password = COALESCE($4, password),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, email, created_at, updated_at
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(&update.name)
        .bind(update.email.as_str())
        .bind(update.password_hash.as_ref().map(StoredPassword::as_str))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                IdentityError::EmailTaken
            } else {
                IdentityError::Database(e)
            }
        })?;

        Ok(row.map(ProfileRow::into_profile))
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self) -> UserProfile {
        UserProfile {
            id: UserId::from_uuid(self.id),
            name: self.name,
            email: Email::from_db(self.email),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_credentials(self) -> IdentityResult<UserCredentials> {
        let password_hash = StoredPassword::parse(self.password)
            .map_err(|e| IdentityError::Internal(format!("Stored password for {}: {e}", self.id)))?;

        Ok(UserCredentials {
            profile: UserProfile {
                id: UserId::from_uuid(self.id),
                name: self.name,
                email: Email::from_db(self.email),
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            password_hash,
        })
    }
}
