//! `Path` and `Query` wrappers whose rejections use the JSON error body.

use axum::extract::FromRequestParts;

use crate::errors::AppError;

/// [`axum::extract::Path`] rejecting with [`AppError::BadRequest`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

/// [`axum::extract::Query`] rejecting with [`AppError::BadRequest`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Filter {
        #[allow(dead_code)]
        season_id: i64,
    }

    #[tokio::test]
    async fn test_query_rejection_is_bad_request() {
        let (mut parts, _) = Request::builder()
            .uri("/matches?season_id=abc")
            .body(())
            .unwrap()
            .into_parts();

        let err = Query::<Filter>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("season_id")));
    }

    #[tokio::test]
    async fn test_query_accepts_valid_params() {
        let (mut parts, _) = Request::builder()
            .uri("/matches?season_id=4")
            .body(())
            .unwrap()
            .into_parts();

        let Query(filter) = Query::<Filter>::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(filter.season_id, 4);
    }
}
