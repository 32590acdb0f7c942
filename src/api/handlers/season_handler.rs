//! Season handlers, including the standings table.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{Path, ValidatedJson};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{NewSeason, SeasonResponse, Standing};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};
use crate::utils::validation::not_blank;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRequest {
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    #[schema(example = "2024/25")]
    pub name: String,
    #[schema(value_type = String, format = Date, example = "2024-10-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2025-05-31")]
    pub end_date: NaiveDate,
}

impl From<SeasonRequest> for NewSeason {
    fn from(request: SeasonRequest) -> Self {
        Self {
            name: request.name.trim().to_string(),
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }
}

pub fn season_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_seasons).post(create_season))
        .route(
            "/:id",
            get(get_season).put(update_season).delete(delete_season),
        )
        .route("/:id/standings", get(get_standings))
}

#[utoipa::path(
    get,
    path = "/seasons",
    tag = "Seasons",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All seasons", body = Vec<SeasonResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_seasons(State(state): State<AppState>) -> AppResult<Json<Vec<SeasonResponse>>> {
    let seasons = state.services.seasons().list_seasons().await?;
    Ok(Json(seasons.into_iter().map(SeasonResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/seasons/{id}",
    tag = "Seasons",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Season ID")),
    responses(
        (status = 200, description = "Season", body = SeasonResponse),
        (status = 404, description = "Season not found")
    )
)]
pub async fn get_season(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<SeasonResponse>> {
    let season = state.services.seasons().get_season(id).await?;
    Ok(Json(SeasonResponse::from(season)))
}

#[utoipa::path(
    post,
    path = "/seasons",
    tag = "Seasons",
    security(("bearer_auth" = [])),
    request_body = SeasonRequest,
    responses(
        (status = 201, description = "Season created", body = SeasonResponse),
        (status = 400, description = "Invalid dates"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Duplicate name or overlapping dates")
    )
)]
pub async fn create_season(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SeasonRequest>,
) -> AppResult<Created<SeasonResponse>> {
    require_admin(&current_user)?;
    let season = state.services.seasons().create_season(payload.into()).await?;
    Ok(Created(SeasonResponse::from(season)))
}

#[utoipa::path(
    put,
    path = "/seasons/{id}",
    tag = "Seasons",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Season ID")),
    request_body = SeasonRequest,
    responses(
        (status = 200, description = "Season updated", body = SeasonResponse),
        (status = 400, description = "Invalid dates"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Season not found"),
        (status = 409, description = "Duplicate name or overlapping dates")
    )
)]
pub async fn update_season(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<SeasonRequest>,
) -> AppResult<Json<SeasonResponse>> {
    require_admin(&current_user)?;
    let season = state
        .services
        .seasons()
        .update_season(id, payload.into())
        .await?;
    Ok(Json(SeasonResponse::from(season)))
}

#[utoipa::path(
    delete,
    path = "/seasons/{id}",
    tag = "Seasons",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Season ID")),
    responses(
        (status = 204, description = "Season deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Season not found"),
        (status = 409, description = "Season still has matches")
    )
)]
pub async fn delete_season(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state.services.seasons().delete_season(id).await?;
    Ok(NoContent)
}

/// Win/loss table for one season
#[utoipa::path(
    get,
    path = "/seasons/{id}/standings",
    tag = "Seasons",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Season ID")),
    responses(
        (status = 200, description = "Standings, best team first", body = Vec<Standing>),
        (status = 404, description = "Season not found")
    )
)]
pub async fn get_standings(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Standing>>> {
    let standings = state.services.standings().standings(id).await?;
    Ok(Json(standings))
}
