//! Per-match player statistics, including CSV import and export.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Extension, State},
    http::header,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{Path, ValidatedJson};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::config::MAX_CSV_UPLOAD_BYTES;
use crate::domain::{PlayerStatsResponse, StatLine};
use crate::errors::AppResult;
use crate::types::{Created, ImportSummary, NoContent};

/// One player's box score. Omitted counters are 0.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatLineRequest {
    #[schema(example = 7)]
    pub player_id: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    #[schema(example = 32)]
    pub minutes: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    #[schema(example = 21)]
    pub points: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    #[schema(example = 8)]
    pub rebounds: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    #[schema(example = 5)]
    pub assists: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub steals: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub blocks: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub turnovers: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub fouls: i32,
}

impl From<StatLineRequest> for StatLine {
    fn from(request: StatLineRequest) -> Self {
        Self {
            player_id: request.player_id,
            minutes: request.minutes,
            points: request.points,
            rebounds: request.rebounds,
            assists: request.assists,
            steals: request.steals,
            blocks: request.blocks,
            turnovers: request.turnovers,
            fouls: request.fouls,
        }
    }
}

/// Routes under `/matches/:id/stats`, merged into the match router.
pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/stats", get(list_stats).post(record_stats))
        .route("/:id/stats/export", get(export_stats))
        .route(
            "/:id/stats/import",
            post(import_stats).layer(DefaultBodyLimit::max(MAX_CSV_UPLOAD_BYTES)),
        )
        .route("/:id/stats/:player_id", delete(delete_stats))
}

#[utoipa::path(
    get,
    path = "/matches/{id}/stats",
    tag = "Stats",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Match ID")),
    responses(
        (status = 200, description = "Stat lines of the match", body = Vec<PlayerStatsResponse>),
        (status = 404, description = "Match not found")
    )
)]
pub async fn list_stats(
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
) -> AppResult<Json<Vec<PlayerStatsResponse>>> {
    let stats = state.services.stats().list_stats(match_id).await?;
    Ok(Json(stats.into_iter().map(PlayerStatsResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/matches/{id}/stats",
    tag = "Stats",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Match ID")),
    request_body = StatLineRequest,
    responses(
        (status = 201, description = "Stat line recorded", body = PlayerStatsResponse),
        (status = 400, description = "Negative counter"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Match or player not found"),
        (status = 409, description = "Player already has a line for this match")
    )
)]
pub async fn record_stats(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<StatLineRequest>,
) -> AppResult<Created<PlayerStatsResponse>> {
    require_admin(&current_user)?;
    let stats = state
        .services
        .stats()
        .record_stats(match_id, payload.into())
        .await?;
    Ok(Created(PlayerStatsResponse::from(stats)))
}

#[utoipa::path(
    delete,
    path = "/matches/{id}/stats/{player_id}",
    tag = "Stats",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Match ID"),
        ("player_id" = i64, Path, description = "Player ID")
    ),
    responses(
        (status = 204, description = "Stat line deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "No stat line for this player")
    )
)]
pub async fn delete_stats(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path((match_id, player_id)): Path<(i64, i64)>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state
        .services
        .stats()
        .delete_stats(match_id, player_id)
        .await?;
    Ok(NoContent)
}

/// Download the match box score as CSV
#[utoipa::path(
    get,
    path = "/matches/{id}/stats/export",
    tag = "Stats",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Match ID")),
    responses(
        (status = 200, description = "CSV with a header row", body = String, content_type = "text/csv"),
        (status = 404, description = "Match not found")
    )
)]
pub async fn export_stats(
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let csv = state.services.stats().export_csv(match_id).await?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"match-{}-stats.csv\"", match_id),
        ),
    ];

    Ok((headers, csv))
}

/// Upsert stat lines from a CSV body; all rows or none are written
#[utoipa::path(
    post,
    path = "/matches/{id}/stats/import",
    tag = "Stats",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Match ID")),
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Rows imported", body = ImportSummary),
        (status = 400, description = "CSV error naming the offending line"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Match not found")
    )
)]
pub async fn import_stats(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
    body: Bytes,
) -> AppResult<Json<ImportSummary>> {
    require_admin(&current_user)?;
    let imported = state.services.stats().import_csv(match_id, &body).await?;
    tracing::info!(match_id, imported, user = %current_user.username, "Stats CSV imported");
    Ok(Json(ImportSummary { imported }))
}
