use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewUser, User, UserChanges};
use crate::db::RepoError;

/// Credential side of the users table: what register and login need.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Profile side of the users table, keyed by the authenticated id.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_detail(&self, id: Uuid) -> Result<Option<User>, RepoError>;
    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, RepoError>;
    async fn delete(&self, id: Uuid) -> Result<Option<User>, RepoError>;
}

const USER_COLUMNS: &str = "id, email, password_hash, role, image, full_name, phone_number, \
                            address, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let sql = format!(
            "INSERT INTO users (email, password_hash, role) VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(user.password_hash.as_str())
            .bind(user.role)
            .fetch_one(&self.db)
            .await?;
        Ok(row)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.db)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_detail(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, RepoError> {
        let sql = format!(
            r#"
            UPDATE users SET
                email         = COALESCE($2, email),
                password_hash = COALESCE($3, password_hash),
                full_name     = COALESCE($4, full_name),
                phone_number  = COALESCE($5, phone_number),
                address       = COALESCE($6, address),
                image         = COALESCE($7, image),
                updated_at    = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(changes.email)
            .bind(changes.password_hash.as_ref().map(|h| h.as_str()))
            .bind(changes.full_name)
            .bind(changes.phone_number)
            .bind(changes.address)
            .bind(changes.image)
            .fetch_optional(&self.db)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let sql = format!("DELETE FROM users WHERE id = $1 RETURNING {USER_COLUMNS}");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(row)
    }
}
