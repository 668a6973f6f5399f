use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use validator::Validate;

use super::{
    claims::{Identity, Role},
    dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest, SettingsForm, UpdateUserRequest},
    errors::AuthError,
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo::{AuthRepository, UserRepository},
    repo_types::{NewUser, User, UserChanges},
};
use crate::{
    images::services::{object_key, upload_image, StoredImage},
    storage::StorageClient,
};

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn is_valid_phone(phone: &str) -> bool {
    lazy_static! {
        static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9]{8,15}$").unwrap();
    }
    PHONE_RE.is_match(phone)
}

/// Account workflows. Each operation runs its stages in order and stops at
/// the first failing one.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    credentials: Arc<dyn AuthRepository>,
    storage: Arc<dyn StorageClient>,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        credentials: Arc<dyn AuthRepository>,
        storage: Arc<dyn StorageClient>,
        keys: JwtKeys,
    ) -> Self {
        Self {
            users,
            credentials,
            storage,
            keys,
        }
    }

    pub async fn register(&self, mut req: RegisterRequest) -> Result<User, AuthError> {
        req.email = normalize_email(&req.email);
        req.validate()?;

        let password_hash = hash_password(&req.password)?;
        let user = self
            .credentials
            .create(NewUser {
                email: req.email,
                password_hash,
                role: Role::User,
            })
            .await
            .map_err(|e| {
                warn!(error = %e, "create user failed");
                AuthError::from(e)
            })?;

        info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(user)
    }

    pub async fn login(&self, mut req: LoginRequest) -> Result<LoginResponse, AuthError> {
        req.email = normalize_email(&req.email);
        req.validate()?;

        let user = match self.credentials.get_by_email(&req.email).await? {
            Some(u) => u,
            None => {
                warn!(email = %req.email, "login unknown email");
                return Err(AuthError::NotFound);
            }
        };

        if let Err(e) = verify_password(&user.password_hash, &req.password) {
            warn!(user_id = %user.id, error = %e, "login rejected");
            return Err(e.into());
        }

        let token = self.keys.sign(&Identity {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        })?;

        info!(user_id = %user.id, "user logged in");
        Ok(LoginResponse {
            token,
            user: PublicUser::from(&user),
        })
    }

    pub async fn update(
        &self,
        identity: Option<&Identity>,
        form: SettingsForm,
    ) -> Result<User, AuthError> {
        let who = identity.ok_or(AuthError::Unauthenticated)?;
        let SettingsForm { mut changes, image } = form;

        if let Some(email) = changes.email.as_mut() {
            *email = normalize_email(email);
        }
        changes.validate()?;
        if let Some(phone) = changes.phone_number.as_deref() {
            if !is_valid_phone(phone) {
                return Err(AuthError::Validation(format!("invalid phone number: {phone}")));
            }
        }

        let stored = match image {
            Some(image) => {
                let key = {
                    let mut rng = rand::thread_rng();
                    object_key(&mut rng, &image.content_type)
                };
                Some(upload_image(self.storage.as_ref(), image, key).await?)
            }
            None => None,
        };

        let outcome = self.apply_changes(who, changes, stored.as_ref()).await;
        if let (Err(_), Some(s)) = (&outcome, &stored) {
            self.discard_upload(s).await;
        }
        outcome
    }

    async fn apply_changes(
        &self,
        who: &Identity,
        changes: UpdateUserRequest,
        image: Option<&StoredImage>,
    ) -> Result<User, AuthError> {
        let password_hash = changes.password.as_deref().map(hash_password).transpose()?;

        let user = self
            .users
            .update(
                who.id,
                UserChanges {
                    email: changes.email,
                    password_hash,
                    full_name: changes.full_name,
                    phone_number: changes.phone_number,
                    address: changes.address,
                    image: image.map(|s| s.url.clone()),
                },
            )
            .await?
            .ok_or(AuthError::NotFound)?;

        info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    async fn discard_upload(&self, image: &StoredImage) {
        if let Err(e) = self.storage.delete_object(&image.key).await {
            warn!(error = %e, key = %image.key, "failed to remove orphaned upload");
        }
    }

    pub async fn fetch_detail(&self, identity: Option<&Identity>) -> Result<User, AuthError> {
        let who = identity.ok_or(AuthError::Unauthenticated)?;
        self.users
            .get_detail(who.id)
            .await?
            .ok_or(AuthError::NotFound)
    }

    pub async fn delete(&self, identity: Option<&Identity>) -> Result<User, AuthError> {
        let who = identity.ok_or(AuthError::Unauthenticated)?;
        let user = self
            .users
            .delete(who.id)
            .await?
            .ok_or(AuthError::NotFound)?;
        info!(user_id = %user.id, "user deleted");
        Ok(user)
    }
}
