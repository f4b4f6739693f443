use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    cards::{
        dto::{CreateCardRequest, ListQuery, UpdateCardRequest},
        error::CardError,
        repo_types::Card,
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/api/cards", get(list_cards))
        .route("/api/cards/:id", get(get_card))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/api/cards", post(create_card))
        .route("/api/cards/:id", put(update_card).delete(delete_card))
}

fn bad_body(rejection: JsonRejection) -> CardError {
    warn!(error = %rejection, "unreadable card request body");
    CardError::Validation("Invalid request body".into())
}

/// A path segment that is not a UUID cannot name a card.
fn card_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, CardError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        warn!(error = %rejection, "card id is not a uuid");
        CardError::NotFound
    })
}

#[instrument(skip(state))]
pub async fn list_cards(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Json<Vec<Card>> {
    let category = q.category.as_deref().filter(|c| !c.is_empty());
    Json(state.cards.list(category).await)
}

#[instrument(skip(state))]
pub async fn get_card(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Card>, CardError> {
    let id = card_id(id)?;
    state.cards.get(id).await.map(Json).ok_or(CardError::NotFound)
}

#[instrument(skip(state, payload))]
pub async fn create_card(
    State(state): State<AppState>,
    payload: Result<Json<CreateCardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Card>), CardError> {
    let Json(req) = payload.map_err(bad_body)?;
    let new_card = req.validate().map_err(|e| {
        warn!(error = %e, "invalid card");
        e
    })?;
    let card = state.cards.insert(new_card).await;
    info!(card_id = %card.id, title = %card.title, "card created");
    Ok((StatusCode::CREATED, Json(card)))
}

#[instrument(skip(state, payload))]
pub async fn update_card(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateCardRequest>, JsonRejection>,
) -> Result<Json<Card>, CardError> {
    let id = card_id(id)?;
    let Json(req) = payload.map_err(bad_body)?;
    let changes = req.validate()?;
    let card = state
        .cards
        .update(id, changes)
        .await
        .ok_or(CardError::NotFound)?;
    info!(card_id = %card.id, "card updated");
    Ok(Json(card))
}

#[instrument(skip(state))]
pub async fn delete_card(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, CardError> {
    let id = card_id(id)?;
    if state.cards.remove(id).await {
        info!(card_id = %id, "card deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CardError::NotFound)
    }
}
