//! Identity-provider access-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
#[cfg(any(feature = "issuer", test))]
use serde::Serialize;
use serde::Deserialize;
use uuid::Uuid;

/// Audience the identity provider stamps on tokens of signed-in users.
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// Caller identity extracted from a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub exp: u64,
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("wrong audience")]
    WrongAudience,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims issued by the identity provider.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user id (UUID string), equal to the profile id |
/// | `aud` | `aud` | `"authenticated"` for signed-in users |
/// | `email` | custom | account email, absent for anonymous users |
/// | `role` | custom | provider role (`"authenticated"`), not the profile role |
/// | `exp` | `exp` | expiry, seconds since UNIX epoch |
///
/// [`Serialize`] is only derived with the **`issuer`** feature.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "issuer", test), derive(Serialize))]
pub struct JwtClaims {
    pub sub: String,
    pub aud: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: u64,
}

/// Validation: HS256, `exp` checked with the default 60s leeway, `aud` must
/// be [`AUTHENTICATED_AUDIENCE`], `exp` and `sub` required.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_audience(&[AUTHENTICATED_AUDIENCE]);
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub", "aud"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidAudience => AuthError::WrongAudience,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a bearer access token, returning the caller's identity.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        email: claims.email,
        exp: claims.exp,
    })
}

/// Sign an access token the way the identity provider does.
///
/// Requires the `issuer` feature; used by test tooling to exercise
/// authenticated endpoints without a live identity provider.
#[cfg(any(feature = "issuer", test))]
pub fn issue_access_token(
    user_id: Uuid,
    email: Option<&str>,
    exp: u64,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let claims = JwtClaims {
        sub: user_id.to_string(),
        aud: AUTHENTICATED_AUDIENCE.to_owned(),
        email: email.map(str::to_owned),
        role: Some(AUTHENTICATED_AUDIENCE.to_owned()),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
