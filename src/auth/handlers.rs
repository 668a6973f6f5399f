use axum::{
    async_trait,
    extract::{
        rejection::JsonRejection, DefaultBodyLimit, FromRequest, Multipart, Request, State,
    },
    http::header::CONTENT_TYPE,
    middleware,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use tracing::{error, instrument, warn};

use super::{
    claims::Identity,
    dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest, SettingsForm, UpdateUserRequest},
    extractors::{require_member, require_user},
    repo_types::User,
};
use crate::{
    images::ImageUpload,
    response::{ApiError, ApiSuccess},
    state::AppState,
};

/// Leaves room for a full-size image plus form overhead so the upload gate,
/// not the framework, reports oversized files.
const SETTINGS_BODY_LIMIT: usize = 8 * 1024 * 1024;

pub fn user_routes(state: &AppState) -> Router<AppState> {
    let settings = Router::new()
        .route("/user/settings", patch(update))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user))
        .layer(DefaultBodyLimit::max(SETTINGS_BODY_LIMIT));

    let profile = Router::new()
        .route("/user/profile", get(fetch_detail))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_member));

    Router::new()
        .route("/user/register", post(register))
        .route("/user/login", post(login))
        .merge(settings)
        .merge(profile)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<PublicUser>, ApiError> {
    let Json(payload) =
        payload.map_err(|e| ApiError::bad_request("Register failed", e.body_text()))?;

    let user = state
        .auth
        .register(payload)
        .await
        .map_err(|e| e.into_api("Register failed"))?;

    Ok(ApiSuccess::created("Register success", PublicUser::from(&user)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponse>, ApiError> {
    let Json(payload) =
        payload.map_err(|e| ApiError::bad_request("Login failed", e.body_text()))?;

    let res = state
        .auth
        .login(payload)
        .await
        .map_err(|e| e.into_api("Login failed"))?;

    Ok(ApiSuccess::ok("Login success", res))
}

#[instrument(skip(state, identity, form))]
pub async fn update(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
    SettingsPayload(form): SettingsPayload,
) -> Result<ApiSuccess<User>, ApiError> {
    let user = state
        .auth
        .update(identity.as_deref(), form)
        .await
        .map_err(|e| {
            if e.is_server_fault() {
                error!(error = %e, "update user failed");
            } else {
                warn!(error = %e, "update user rejected");
            }
            e.into_api("Update data failed")
        })?;

    Ok(ApiSuccess::ok("Update data success", user))
}

#[instrument(skip(state, identity))]
pub async fn fetch_detail(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
) -> Result<ApiSuccess<User>, ApiError> {
    let user = state
        .auth
        .fetch_detail(identity.as_deref())
        .await
        .map_err(|e| e.into_api("Get data failed"))?;

    Ok(ApiSuccess::ok("Get data success", user))
}

/// Body of `PATCH /user/settings`: JSON, or multipart with an optional `image` file.
pub struct SettingsPayload(pub SettingsForm);

#[async_trait]
impl<S> FromRequest<S> for SettingsPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bad = |detail: String| ApiError::bad_request("Update data failed", detail);

        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Json(changes) = Json::<UpdateUserRequest>::from_request(req, state)
                .await
                .map_err(|e| bad(e.body_text()))?;
            return Ok(Self(SettingsForm {
                changes,
                image: None,
            }));
        }

        let mut mp = Multipart::from_request(req, state)
            .await
            .map_err(|e| bad(e.body_text()))?;
        let mut form = SettingsForm::default();

        while let Some(field) = mp.next_field().await.map_err(|e| bad(e.body_text()))? {
            let name = field.name().unwrap_or_default().to_string();
            if name == "image" {
                let has_name = field.file_name().is_some_and(|n| !n.is_empty());
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let body = field.bytes().await.map_err(|e| bad(e.body_text()))?;
                if body.is_empty() && !has_name {
                    continue;
                }
                form.image = Some(ImageUpload { body, content_type });
                continue;
            }

            let value = field.text().await.map_err(|e| bad(e.body_text()))?;
            let value = (!value.is_empty()).then_some(value);
            let changes = &mut form.changes;
            match name.as_str() {
                "email" => changes.email = value,
                "password" => changes.password = value,
                "full_name" => changes.full_name = value,
                "phone_number" => changes.phone_number = value,
                "address" => changes.address = value,
                other => warn!(field = %other, "ignoring unknown settings field"),
            }
        }

        Ok(Self(form))
    }
}
