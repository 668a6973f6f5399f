use crate::auth::{jwt::JwtKeys, repo::PgUserRepository, services::AuthService};
use crate::config::AppConfig;
use crate::payments::repo::{PaymentRepository, PgPaymentRepository};
use crate::storage::{Storage, StorageClient};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub keys: JwtKeys,
    pub auth: AuthService,
    pub payments: Arc<dyn PaymentRepository>,
}

impl AppState {
    pub async fn init(config: AppConfig, db: PgPool) -> anyhow::Result<Self> {
        // S3 / MinIO
        let storage = Arc::new(Storage::new(&config.storage).await?) as Arc<dyn StorageClient>;

        let users = Arc::new(PgUserRepository::new(db.clone()));
        let payments = Arc::new(PgPaymentRepository::new(db)) as Arc<dyn PaymentRepository>;

        let keys = JwtKeys::new(&config.jwt);
        let auth = AuthService::new(users.clone(), users, storage, keys.clone());

        Ok(Self::from_parts(Arc::new(config), keys, auth, payments))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        keys: JwtKeys,
        auth: AuthService,
        payments: Arc<dyn PaymentRepository>,
    ) -> Self {
        Self {
            config,
            keys,
            auth,
            payments,
        }
    }
}
