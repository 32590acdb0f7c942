//! Authentication: sign-up, sign-in and bearer token verification.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::Config;
use crate::domain::{Password, Role, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    pub id: i64,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Token returned by sign-up and sign-in
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed HS256 JWT
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a `USER` account and return a token for it.
    async fn sign_up(&self, username: String, password: String) -> AppResult<TokenResponse>;

    async fn sign_in(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Check signature and expiry and return the claims.
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::seconds(config.jwt_expiration_seconds);

    let claims = Claims {
        sub: user.username.clone(),
        id: user.id,
        role: user.role.to_string(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse { token })
}

fn decode_token(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(token_data.claims)
}

pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn sign_up(&self, username: String, password: String) -> AppResult<TokenResponse> {
        if self.uow.users().exists_by_username(&username).await? {
            return Err(AppError::conflict(format!(
                "User with username '{}' already exists",
                username
            )));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self
            .uow
            .users()
            .create(username, password_hash, Role::User)
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User signed up");
        generate_token(&user, &self.config)
    }

    async fn sign_in(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_username(&username).await?;

        // Hash work happens whether or not the user exists.
        let password_valid = Password::verify_optional(
            user.as_ref().map(|u| u.password_hash.as_str()),
            &password,
        );

        match user {
            Some(user) if password_valid => generate_token(&user, &self.config),
            _ => {
                tracing::debug!(username = %username, "Rejected sign-in");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        decode_token(token, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::MockRepos;

    fn config() -> Config {
        Config::with_secret("an-integration-test-secret-of-32+chars").unwrap()
    }

    fn user(password: &str) -> User {
        User {
            id: 42,
            username: "jordan".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            first_name: None,
            last_name: None,
            role: Role::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_rejects_taken_username() {
        let mut repos = MockRepos::default();
        repos
            .users
            .expect_exists_by_username()
            .returning(|_| Ok(true));
        repos.users.expect_create().never();

        let service = Authenticator::new(repos.into_uow(), config());
        let err = service
            .sign_up("jordan".to_string(), "password123".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref m) if m == "User with username 'jordan' already exists"));
    }

    #[tokio::test]
    async fn test_sign_up_creates_user_role_and_returns_token() {
        let mut repos = MockRepos::default();
        repos
            .users
            .expect_exists_by_username()
            .returning(|_| Ok(false));
        repos
            .users
            .expect_create()
            .withf(|username, hash, role| {
                username == "rookie" && hash.starts_with("$argon2") && *role == Role::User
            })
            .returning(|username, password_hash, role| {
                Ok(User {
                    id: 7,
                    username,
                    password_hash,
                    first_name: None,
                    last_name: None,
                    role,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let service = Authenticator::new(repos.into_uow(), config());
        let token = service
            .sign_up("rookie".to_string(), "password123".to_string())
            .await
            .unwrap();

        let claims = service.verify_token(&token.token).unwrap();
        assert_eq!(claims.sub, "rookie");
        assert_eq!(claims.id, 7);
        assert_eq!(claims.role, "USER");
    }

    #[tokio::test]
    async fn test_sign_up_rejects_short_password() {
        let mut repos = MockRepos::default();
        repos
            .users
            .expect_exists_by_username()
            .returning(|_| Ok(false));

        let service = Authenticator::new(repos.into_uow(), config());
        let err = service
            .sign_up("rookie".to_string(), "short".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let mut repos = MockRepos::default();
        let stored = user("password123");
        repos
            .users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(stored.clone())));

        let service = Authenticator::new(repos.into_uow(), config());
        let token = service
            .sign_in("jordan".to_string(), "password123".to_string())
            .await
            .unwrap();

        let claims = service.verify_token(&token.token).unwrap();
        assert_eq!(claims.sub, "jordan");
        assert_eq!(claims.role, "ADMIN");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let mut repos = MockRepos::default();
        let stored = user("password123");
        repos
            .users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(stored.clone())));

        let service = Authenticator::new(repos.into_uow(), config());
        let err = service
            .sign_in("jordan".to_string(), "wrong-password".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_sign_in_unknown_user() {
        let mut repos = MockRepos::default();
        repos
            .users
            .expect_find_by_username()
            .returning(|_| Ok(None));

        let service = Authenticator::new(repos.into_uow(), config());
        let err = service
            .sign_in("nobody".to_string(), "password123".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut expired = config();
        expired.jwt_expiration_seconds = -3600;
        let token = generate_token(&user("password123"), &expired).unwrap();

        assert!(matches!(
            decode_token(&token.token, &config()),
            Err(AppError::Jwt(_))
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = generate_token(&user("password123"), &config()).unwrap();
        let other = Config::with_secret("a-completely-different-secret-value!!").unwrap();

        assert!(decode_token(&token.token, &other).is_err());

        let mut forged = token.token.clone();
        forged.push('x');
        assert!(decode_token(&forged, &config()).is_err());
    }
}
