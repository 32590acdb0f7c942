//! Team handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{Path, ValidatedJson};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{NewTeam, TeamResponse};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};
use crate::utils::validation::not_blank;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TeamRequest {
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    #[schema(example = "Minsk Bisons")]
    pub name: String,
}

impl From<TeamRequest> for NewTeam {
    fn from(request: TeamRequest) -> Self {
        Self {
            name: request.name.trim().to_string(),
        }
    }
}

pub fn team_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teams).post(create_team))
        .route("/:id", get(get_team).put(update_team).delete(delete_team))
}

#[utoipa::path(
    get,
    path = "/teams",
    tag = "Teams",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All teams", body = Vec<TeamResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_teams(State(state): State<AppState>) -> AppResult<Json<Vec<TeamResponse>>> {
    let teams = state.services.teams().list_teams().await?;
    Ok(Json(teams.into_iter().map(TeamResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/teams/{id}",
    tag = "Teams",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team", body = TeamResponse),
        (status = 404, description = "Team not found")
    )
)]
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TeamResponse>> {
    let team = state.services.teams().get_team(id).await?;
    Ok(Json(TeamResponse::from(team)))
}

#[utoipa::path(
    post,
    path = "/teams",
    tag = "Teams",
    security(("bearer_auth" = [])),
    request_body = TeamRequest,
    responses(
        (status = 201, description = "Team created", body = TeamResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Team name already taken")
    )
)]
pub async fn create_team(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TeamRequest>,
) -> AppResult<Created<TeamResponse>> {
    require_admin(&current_user)?;
    let team = state.services.teams().create_team(payload.into()).await?;
    Ok(Created(TeamResponse::from(team)))
}

#[utoipa::path(
    put,
    path = "/teams/{id}",
    tag = "Teams",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Team ID")),
    request_body = TeamRequest,
    responses(
        (status = 200, description = "Team updated", body = TeamResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Team not found"),
        (status = 409, description = "Team name already taken")
    )
)]
pub async fn update_team(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<TeamRequest>,
) -> AppResult<Json<TeamResponse>> {
    require_admin(&current_user)?;
    let team = state.services.teams().update_team(id, payload.into()).await?;
    Ok(Json(TeamResponse::from(team)))
}

#[utoipa::path(
    delete,
    path = "/teams/{id}",
    tag = "Teams",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Team ID")),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Team not found"),
        (status = 409, description = "Team still plays in matches")
    )
)]
pub async fn delete_team(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state.services.teams().delete_team(id).await?;
    Ok(NoContent)
}
