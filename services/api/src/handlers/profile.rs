use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use raisedup_auth_types::bearer::AuthUser;
use raisedup_domain::role::ProfileRole;

use crate::domain::types::Profile;
use crate::error::ApiError;
use crate::handlers::extract::ApiJson;
use crate::state::AppState;
use crate::usecase::profile::{
    EnsureProfileInput, EnsureProfileUseCase, GetProfileUseCase, ListProfilesUseCase,
    UpdateProfileInput, UpdateProfileUseCase,
};

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: ProfileRole,
    pub avatar_url: Option<String>,
    #[serde(serialize_with = "raisedup_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            email: p.email,
            name: p.name,
            role: p.role,
            avatar_url: p.avatar_url,
            created_at: p.created_at,
        }
    }
}

// ── POST /api/auth/ensure-profile ────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsureProfileRequest {
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

pub async fn ensure_profile(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<EnsureProfileRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), ApiError> {
    let usecase = EnsureProfileUseCase {
        repo: state.profile_repo(),
    };
    let ensured = usecase
        .execute(EnsureProfileInput {
            user_id: body.user_id,
            email: body.email,
            name: body.name,
            role: body.role,
        })
        .await?;
    let status = if ensured.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(ensured.profile.into())))
}

// ── GET /api/auth/profile ────────────────────────────────────────────────────

pub async fn get_profile(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let usecase = GetProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase.execute(user.user_id).await?;
    Ok(Json(profile.into()))
}

// ── PATCH /api/auth/profile ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub avatar_url: Option<String>,
}

pub async fn update_profile(
    user: AuthUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let usecase = UpdateProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase
        .execute(
            user.user_id,
            UpdateProfileInput {
                email: body.email,
                name: body.name,
                role: body.role,
                avatar_url: body.avatar_url,
            },
        )
        .await?;
    Ok(Json(profile.into()))
}

// ── GET /api/auth/users ──────────────────────────────────────────────────────

pub async fn list_users(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let usecase = ListProfilesUseCase {
        repo: state.profile_repo(),
    };
    let profiles = usecase.execute().await?;
    Ok(Json(profiles.into_iter().map(Into::into).collect()))
}
