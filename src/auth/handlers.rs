use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, SignupRequest, SignupResponse},
        error::AuthError,
        jwt::AuthUser,
        services,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn bad_body(rejection: JsonRejection) -> AuthError {
    warn!(error = %rejection, "unreadable auth request body");
    AuthError::Validation("Invalid request body".into())
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), AuthError> {
    let Json(req) = payload.map_err(bad_body)?;
    services::signup(&state, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User registered successfully",
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthError> {
    let Json(req) = payload.map_err(bad_body)?;
    let token = services::login(&state, req).await?;
    Ok(Json(LoginResponse {
        message: "Login successful",
        token,
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, AuthError> {
    Ok(Json(services::current_user(&state, user_id).await?))
}
