//! OpenAPI document served by the Swagger UI.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, health_handler, match_handler, player_handler, season_handler, stats_handler,
    team_handler, user_handler,
};
use crate::domain::{
    MatchResponse, PlayerResponse, PlayerStatsResponse, Role, SeasonResponse, Standing,
    TeamResponse, UserResponse,
};
use crate::services::TokenResponse;
use crate::types::{ImportSummary, SuccessResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Basketball League API",
        version = "0.1.0",
        description = "Seasons, teams, players, matches, box scores and standings",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        health_handler::health,
        health_handler::start,
        auth_handler::sign_up,
        auth_handler::sign_in,
        user_handler::get_current_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        season_handler::list_seasons,
        season_handler::get_season,
        season_handler::create_season,
        season_handler::update_season,
        season_handler::delete_season,
        season_handler::get_standings,
        team_handler::list_teams,
        team_handler::get_team,
        team_handler::create_team,
        team_handler::update_team,
        team_handler::delete_team,
        player_handler::list_players,
        player_handler::get_player,
        player_handler::create_player,
        player_handler::update_player,
        player_handler::delete_player,
        match_handler::list_matches,
        match_handler::get_match,
        match_handler::create_match,
        match_handler::update_match,
        match_handler::delete_match,
        stats_handler::list_stats,
        stats_handler::record_stats,
        stats_handler::delete_stats,
        stats_handler::export_stats,
        stats_handler::import_stats,
    ),
    components(
        schemas(
            Role,
            UserResponse,
            SeasonResponse,
            TeamResponse,
            PlayerResponse,
            MatchResponse,
            PlayerStatsResponse,
            Standing,
            TokenResponse,
            SuccessResponse,
            ImportSummary,
            health_handler::HealthResponse,
            health_handler::ServiceHealth,
            health_handler::ServiceStatus,
            auth_handler::SignUpRequest,
            auth_handler::SignInRequest,
            user_handler::UpdateUserRequest,
            season_handler::SeasonRequest,
            team_handler::TeamRequest,
            player_handler::PlayerRequest,
            match_handler::MatchRequest,
            stats_handler::StatLineRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Sign-up and sign-in"),
        (name = "Users", description = "User accounts"),
        (name = "Seasons", description = "Seasons and standings"),
        (name = "Teams", description = "Teams"),
        (name = "Players", description = "Players"),
        (name = "Matches", description = "Matches and scores"),
        (name = "Stats", description = "Per-match player statistics"),
        (name = "Health", description = "Service status")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /auth/sign-in or /auth/sign-up"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/auth/sign-in",
            "/users/{id}",
            "/seasons/{id}/standings",
            "/teams",
            "/players/{id}",
            "/matches",
            "/matches/{id}/stats/import",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
