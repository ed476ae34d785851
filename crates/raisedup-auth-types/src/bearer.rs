//! `Authorization: Bearer` extractor.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use raisedup_core::error::ErrorBody;

use crate::token::validate_access_token;

/// HMAC secret used to verify identity-provider tokens.
///
/// Services expose it to the extractor by implementing `FromRef<AppState>`.
#[derive(Clone)]
pub struct JwtSecret(pub Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }
}

/// Authenticated caller, resolved from a valid bearer token.
///
/// Handlers that take `AuthUser` reject the request with 401 before running
/// when the header is absent or the token does not validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = match self {
            Self::MissingToken => ErrorBody::new("UNAUTHORIZED", "No token provided"),
            Self::InvalidToken => ErrorBody::new("UNAUTHORIZED", "Invalid token"),
        };
        body.into_response_with(StatusCode::UNAUTHORIZED)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = AuthRejection;

    // Validation is synchronous; resolve it before building the future so the
    // returned future borrows nothing from `parts` or `state`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = match parts.headers.typed_get::<Authorization<Bearer>>() {
            None => Err(AuthRejection::MissingToken),
            Some(Authorization(bearer)) => {
                let JwtSecret(secret) = JwtSecret::from_ref(state);
                validate_access_token(bearer.token(), &secret)
                    .map(|info| Self {
                        user_id: info.user_id,
                        email: info.email,
                    })
                    .map_err(|e| {
                        tracing::debug!(error = %e, "bearer token rejected");
                        AuthRejection::InvalidToken
                    })
            }
        };
        async move { result }
    }
}
