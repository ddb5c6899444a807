//! Authentication request handlers.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};

/// `POST /login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let auth = state.auth.login(&body.email, &body.password).await?;
    Ok(Json(AuthResponse::session(auth)))
}

/// `POST /register` — create a new account. Returns the user without a
/// token; the portal sends new users to the sign-in form.
pub async fn register_handler(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let auth = state
        .auth
        .register(&body.email, &body.password, &body.full_name, body.role)
        .await?;
    Ok(Json(AuthResponse::registered(auth.user)))
}
