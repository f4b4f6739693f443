use anyhow::Context;
use tracing::{info, warn};

use crate::{
    auth::{
        dto::{required, LoginRequest, PublicUser, SignupRequest},
        error::AuthError,
        repo::StoreError,
        repo_types::{NewUser, User},
    },
    state::AppState,
};

/// Registers a user. The uniqueness check is repeated atomically by the
/// store, so a concurrent signup for the same email loses with `Conflict`.
pub async fn signup(state: &AppState, req: SignupRequest) -> Result<User, AuthError> {
    let (Some(name), Some(email), Some(password)) = (
        required(req.name),
        required(req.email),
        required(req.password),
    ) else {
        warn!("signup with missing fields");
        return Err(AuthError::missing_fields());
    };

    if state.users.find_by_email(&email).await.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AuthError::Conflict);
    }

    let hasher = state.hasher.clone();
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .context("password hashing task failed")??;

    let user = state
        .users
        .insert(NewUser {
            name,
            email,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            StoreError::DuplicateEmail => {
                warn!("email registered concurrently");
                AuthError::Conflict
            }
        })?;

    let total_users = state.users.count().await;
    info!(user_id = user.id, email = %user.email, total_users, "user registered");
    Ok(user)
}

/// Checks credentials and issues a session token.
pub async fn login(state: &AppState, req: LoginRequest) -> Result<String, AuthError> {
    let (Some(email), Some(password)) = (required(req.email), required(req.password)) else {
        warn!("login with missing fields");
        return Err(AuthError::missing_fields());
    };

    let Some(user) = state.users.find_by_email(&email).await else {
        warn!(email = %email, "login unknown email");
        return Err(AuthError::NotFound);
    };

    let hasher = state.hasher.clone();
    let stored = user.password_hash.clone();
    let ok = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
        .await
        .context("password verification task failed")??;

    if !ok {
        warn!(user_id = user.id, "login invalid password");
        return Err(AuthError::InvalidCredentials);
    }

    let token = state.jwt.sign(user.id).context("jwt sign failed")?;
    info!(user_id = user.id, "user logged in");
    Ok(token)
}

pub async fn current_user(state: &AppState, user_id: u64) -> Result<PublicUser, AuthError> {
    let user = state.users.find_by_id(user_id).await.ok_or_else(|| {
        warn!(user_id, "token for unknown user");
        AuthError::Unauthorized("User not found".into())
    })?;
    Ok(PublicUser {
        id: user.id,
        name: user.name,
        email: user.email,
    })
}
