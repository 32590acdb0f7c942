//! Player handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::{Path, Query, ValidatedJson};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{NewPlayer, PlayerResponse};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// Full replacement of a player. Omitting `teamId` leaves the player
/// without a team.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    #[schema(example = 1)]
    pub team_id: Option<i64>,
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    #[schema(example = "Andrei")]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    #[schema(example = "Kirilenko")]
    pub last_name: String,
    #[validate(length(max = 50))]
    #[schema(example = "SF")]
    pub position: Option<String>,
    #[schema(example = 24)]
    pub age: Option<i32>,
    /// Centimetres
    #[schema(example = 206)]
    pub height: Option<i32>,
    /// Kilograms
    #[schema(example = 102)]
    pub weight: Option<i32>,
}

impl From<PlayerRequest> for NewPlayer {
    fn from(request: PlayerRequest) -> Self {
        Self {
            team_id: request.team_id,
            first_name: request.first_name,
            last_name: request.last_name,
            position: request.position,
            age: request.age,
            height: request.height,
            weight: request.weight,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PlayerQuery {
    /// Only players of this team
    pub team_id: Option<i64>,
}

pub fn player_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_players).post(create_player))
        .route(
            "/:id",
            get(get_player).put(update_player).delete(delete_player),
        )
}

#[utoipa::path(
    get,
    path = "/players",
    tag = "Players",
    security(("bearer_auth" = [])),
    params(PlayerQuery),
    responses(
        (status = 200, description = "Players", body = Vec<PlayerResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_players(
    State(state): State<AppState>,
    Query(query): Query<PlayerQuery>,
) -> AppResult<Json<Vec<PlayerResponse>>> {
    let players = state.services.players().list_players(query.team_id).await?;
    Ok(Json(players.into_iter().map(PlayerResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/players/{id}",
    tag = "Players",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Player ID")),
    responses(
        (status = 200, description = "Player", body = PlayerResponse),
        (status = 404, description = "Player not found")
    )
)]
pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PlayerResponse>> {
    let player = state.services.players().get_player(id).await?;
    Ok(Json(PlayerResponse::from(player)))
}

#[utoipa::path(
    post,
    path = "/players",
    tag = "Players",
    security(("bearer_auth" = [])),
    request_body = PlayerRequest,
    responses(
        (status = 201, description = "Player created", body = PlayerResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Team not found")
    )
)]
pub async fn create_player(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PlayerRequest>,
) -> AppResult<Created<PlayerResponse>> {
    require_admin(&current_user)?;
    let player = state.services.players().create_player(payload.into()).await?;
    Ok(Created(PlayerResponse::from(player)))
}

#[utoipa::path(
    put,
    path = "/players/{id}",
    tag = "Players",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Player ID")),
    request_body = PlayerRequest,
    responses(
        (status = 200, description = "Player updated", body = PlayerResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Player or team not found")
    )
)]
pub async fn update_player(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<PlayerRequest>,
) -> AppResult<Json<PlayerResponse>> {
    require_admin(&current_user)?;
    let player = state
        .services
        .players()
        .update_player(id, payload.into())
        .await?;
    Ok(Json(PlayerResponse::from(player)))
}

#[utoipa::path(
    delete,
    path = "/players/{id}",
    tag = "Players",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Player ID")),
    responses(
        (status = 204, description = "Player deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Player not found")
    )
)]
pub async fn delete_player(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state.services.players().delete_player(id).await?;
    Ok(NoContent)
}
