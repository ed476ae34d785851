//! Mock auth helpers for integration tests.
//!
//! The API trusts HS256 access tokens signed with the identity provider's
//! secret. In tests, `MockAuth` signs tokens with [`TEST_JWT_SECRET`] so no
//! live identity provider is needed; configure the app under test with the
//! same secret.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use raisedup_auth_types::token::issue_access_token;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "raisedup-test-jwt-secret";

/// Configurable identity for test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub ttl: Duration,
}

impl MockAuth {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            email: None,
            ttl: Duration::from_secs(3600),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Signed access token for this identity.
    pub fn token(&self) -> String {
        let exp = SystemTime::now()
            .checked_add(self.ttl)
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
            .unwrap_or(u64::MAX / 2);
        issue_access_token(self.user_id, self.email.as_deref(), exp, TEST_JWT_SECRET)
            .unwrap_or_else(|e| panic!("failed to sign test token: {e}"))
    }

    /// `Authorization` header value, `Bearer <token>`.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token())
    }

    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        let value = HeaderValue::from_str(&self.bearer())
            .unwrap_or_else(|e| panic!("invalid bearer header: {e}"));
        map.insert(AUTHORIZATION, value);
        map
    }
}
