use chrono::Utc;
use uuid::Uuid;

use raisedup_domain::role::ProfileRole;

use crate::domain::repository::ProfileRepository;
use crate::domain::types::{Profile, ProfilePatch};
use crate::error::ApiError;

fn parse_role(role: Option<String>) -> Result<Option<ProfileRole>, ApiError> {
    match role.filter(|r| !r.is_empty()) {
        None => Ok(None),
        Some(r) => r
            .parse()
            .map(Some)
            .map_err(|_| ApiError::InvalidRole(r)),
    }
}

/// Local part of an email address, used as the default display name.
fn default_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_owned()
}

// ── EnsureProfile ────────────────────────────────────────────────────────────

pub struct EnsureProfileInput {
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

/// Stored profile and whether this call created it.
pub struct EnsuredProfile {
    pub profile: Profile,
    pub created: bool,
}

pub struct EnsureProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> EnsureProfileUseCase<R> {
    pub async fn execute(&self, input: EnsureProfileInput) -> Result<EnsuredProfile, ApiError> {
        let (Some(user_id), Some(email)) = (input.user_id, input.email.filter(|e| !e.is_empty()))
        else {
            return Err(ApiError::MissingData("Missing userId or email"));
        };
        if let Some(profile) = self.repo.find_by_id(user_id).await? {
            return Ok(EnsuredProfile {
                profile,
                created: false,
            });
        }
        let role = parse_role(input.role)?.unwrap_or_default();
        let profile = Profile {
            id: user_id,
            name: input
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| default_name(&email)),
            email,
            role,
            avatar_url: None,
            created_at: Utc::now(),
        };
        if self.repo.create_if_absent(&profile).await? {
            return Ok(EnsuredProfile {
                profile,
                created: true,
            });
        }
        // Lost a creation race; the concurrent insert wins.
        let profile = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("profile {user_id} missing after insert conflict"))?;
        Ok(EnsuredProfile {
            profile,
            created: false,
        })
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> GetProfileUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Profile, ApiError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::ProfileNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub avatar_url: Option<String>,
}

pub struct UpdateProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> UpdateProfileUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<Profile, ApiError> {
        let patch = ProfilePatch {
            email: input.email,
            name: input.name,
            role: parse_role(input.role)?,
            avatar_url: input.avatar_url,
        };
        if patch.is_empty() {
            return Err(ApiError::MissingData("No profile fields to update"));
        }
        self.repo
            .update(user_id, &patch)
            .await?
            .ok_or(ApiError::ProfileNotFound)
    }
}

// ── ListProfiles ─────────────────────────────────────────────────────────────

pub struct ListProfilesUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> ListProfilesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Profile>, ApiError> {
        self.repo.list().await
    }
}
