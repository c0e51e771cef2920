//! Wire types for the management API.
//!
//! Field names follow the server's JSON exactly (`user_type`, `first_name`,
//! …); every response carries a `status` discriminator alongside the data.

use chrono::{DateTime, Utc};
use rolegate_rbac::Role;
use rolegate_types::{PermissionId, RoleId, SessionToken, UserId};
use serde::{Deserialize, Serialize};

/// A user account as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub user_type: Role,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Full display name, falling back to the username.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.username.clone(),
        }
    }
}

/// A role record (the server-side role catalog, distinct from the fixed
/// hierarchy the authorization core reasons about).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<Permission>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A permission record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub resource: String,
    pub action: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Request payloads
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Partial update; only modified fields are sent, as the original console
/// diffed the form against the fetched record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleChangeRequest {
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct RolePayload {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordReset {
    pub token: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResendVerificationRequest {
    pub email: String,
}

// ============================================================================
// Response envelopes
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub status: String,
    pub token: SessionToken,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub status: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct UsersResponse {
    pub status: String,
    pub users: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub struct RolesResponse {
    #[serde(default)]
    pub status: Option<String>,
    pub roles: Vec<RoleRecord>,
}

#[derive(Debug, Deserialize)]
pub struct PermissionResponse {
    pub status: String,
    pub permission: Permission,
}

#[derive(Debug, Deserialize)]
pub struct PermissionsResponse {
    pub status: String,
    pub permissions: Vec<Permission>,
}

/// Error body the server attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
