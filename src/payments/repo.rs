use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::db::RepoError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PaymentMethod {
    pub id: i32,
    pub name: Option<String>,
    pub image: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn count(&self) -> Result<i64, RepoError>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<PaymentMethod>, RepoError>;
}

#[derive(Clone)]
pub struct PgPaymentRepository {
    db: PgPool,
}

impl PgPaymentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn count(&self) -> Result<i64, RepoError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM payment_methods")
            .fetch_one(&self.db)
            .await?;
        Ok(total)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<PaymentMethod>, RepoError> {
        let rows = sqlx::query_as::<_, PaymentMethod>(
            r#"
            SELECT id, name, image, created_at, updated_at
              FROM payment_methods
             ORDER BY id ASC
             LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
