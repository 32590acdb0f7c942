//! Match handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::stats_handler::stats_routes;
use crate::api::extractors::{Path, Query, ValidatedJson};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{MatchResponse, NewMatch};
use crate::errors::AppResult;
use crate::services::MatchFilter;
use crate::types::{Created, NoContent};

/// Full replacement of a match. Missing scores are stored as 0.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[schema(example = 1)]
    pub season_id: i64,
    #[schema(value_type = String, format = Date, example = "2024-11-02")]
    pub date: NaiveDate,
    #[schema(example = 1)]
    pub home_team_id: i64,
    #[schema(example = 2)]
    pub away_team_id: i64,
    #[validate(range(min = 0, message = "must not be negative"))]
    #[schema(example = 88)]
    pub home_team_score: Option<i32>,
    #[validate(range(min = 0, message = "must not be negative"))]
    #[schema(example = 79)]
    pub away_team_score: Option<i32>,
}

impl From<MatchRequest> for NewMatch {
    fn from(request: MatchRequest) -> Self {
        Self {
            season_id: request.season_id,
            date: request.date,
            home_team_id: request.home_team_id,
            away_team_id: request.away_team_id,
            home_team_score: request.home_team_score,
            away_team_score: request.away_team_score,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MatchQuery {
    /// Only matches played on this day (YYYY-MM-DD)
    #[param(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,
    /// Only matches of this season
    pub season_id: Option<i64>,
}

impl From<MatchQuery> for MatchFilter {
    fn from(query: MatchQuery) -> Self {
        Self {
            date: query.date,
            season_id: query.season_id,
        }
    }
}

pub fn match_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_matches).post(create_match))
        .route("/:id", get(get_match).put(update_match).delete(delete_match))
        .merge(stats_routes())
}

#[utoipa::path(
    get,
    path = "/matches",
    tag = "Matches",
    security(("bearer_auth" = [])),
    params(MatchQuery),
    responses(
        (status = 200, description = "Matches, oldest first", body = Vec<MatchResponse>),
        (status = 400, description = "Malformed filter"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_matches(
    State(state): State<AppState>,
    Query(query): Query<MatchQuery>,
) -> AppResult<Json<Vec<MatchResponse>>> {
    let matches = state.services.matches().list_matches(query.into()).await?;
    Ok(Json(matches.into_iter().map(MatchResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/matches/{id}",
    tag = "Matches",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Match ID")),
    responses(
        (status = 200, description = "Match", body = MatchResponse),
        (status = 404, description = "Match not found")
    )
)]
pub async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MatchResponse>> {
    let m = state.services.matches().get_match(id).await?;
    Ok(Json(MatchResponse::from(m)))
}

#[utoipa::path(
    post,
    path = "/matches",
    tag = "Matches",
    security(("bearer_auth" = [])),
    request_body = MatchRequest,
    responses(
        (status = 201, description = "Match created", body = MatchResponse),
        (status = 400, description = "Same teams, date outside season or negative score"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Season or team not found")
    )
)]
pub async fn create_match(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<MatchRequest>,
) -> AppResult<Created<MatchResponse>> {
    require_admin(&current_user)?;
    let m = state.services.matches().create_match(payload.into()).await?;
    Ok(Created(MatchResponse::from(m)))
}

#[utoipa::path(
    put,
    path = "/matches/{id}",
    tag = "Matches",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Match ID")),
    request_body = MatchRequest,
    responses(
        (status = 200, description = "Match updated", body = MatchResponse),
        (status = 400, description = "Same teams, date outside season or negative score"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Match, season or team not found")
    )
)]
pub async fn update_match(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<MatchRequest>,
) -> AppResult<Json<MatchResponse>> {
    require_admin(&current_user)?;
    let m = state
        .services
        .matches()
        .update_match(id, payload.into())
        .await?;
    Ok(Json(MatchResponse::from(m)))
}

#[utoipa::path(
    delete,
    path = "/matches/{id}",
    tag = "Matches",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Match ID")),
    responses(
        (status = 204, description = "Match deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Match not found")
    )
)]
pub async fn delete_match(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state.services.matches().delete_match(id).await?;
    Ok(NoContent)
}
