//! # rolegate-client: REST client for the management API
//!
//! A thin blocking client over the user/role/permission API the console
//! administers. It owns transport concerns only: bearer-token auth,
//! endpoint paths, envelope decoding, error surfacing. Authorization
//! decisions live in `rolegate-rbac` and are made by the dispatcher
//! *before* any method here is called; the server independently
//! re-validates every request.
//!
//! ## Examples
//!
//! ```no_run
//! use rolegate_client::Client;
//! use std::time::Duration;
//!
//! let client = Client::new("http://localhost:8080", Duration::from_secs(30))?;
//! let session = client.login("root@example.com", "hunter2")?;
//!
//! let client = client.with_token(session.token.clone());
//! for user in client.list_users()? {
//!     println!("{} ({})", user.username, user.user_type);
//! }
//! # Ok::<(), rolegate_client::ClientError>(())
//! ```

use reqwest::blocking::RequestBuilder;
use rolegate_rbac::Role;
use rolegate_types::{PermissionId, RoleId, SessionToken, UserId};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

mod error;
pub mod session;
pub mod types;

pub use error::{ClientError, Result};
pub use session::{Session, SessionError, SessionStore};
pub use types::{Permission, RoleRecord, User, UserUpdate};

use types::{
    ErrorBody, LoginRequest, LoginResponse, MessageResponse, PasswordReset, PasswordResetRequest,
    PermissionResponse, PermissionsResponse, RegisterRequest, ResendVerificationRequest,
    RoleChangeRequest, RolePayload, RolesResponse, UserResponse, UsersResponse,
};

/// Blocking client for the management API.
pub struct Client {
    http: reqwest::blocking::Client,
    base_url: String,
    token: Option<SessionToken>,
}

impl Client {
    /// Creates a client against `base_url` (without the `/api/v1` suffix).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attaches the bearer token used for authenticated endpoints.
    pub fn with_token(mut self, token: SessionToken) -> Self {
        self.token = Some(token);
        self
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// Signs in and returns the new session; the caller persists it.
    pub fn login(&self, email: &str, password: &str) -> Result<Session> {
        let resp: LoginResponse = self.execute(self.post("/auth/login").json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }))?;
        ensure_success(&resp.status)?;

        Ok(Session {
            token: resp.token,
            user: resp.user,
        })
    }

    /// Registers a new account; verification happens out of band.
    pub fn register(&self, email: &str, username: &str, password: &str) -> Result<Option<String>> {
        self.execute_message(self.post("/auth/register").json(&RegisterRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }))
    }

    /// Invalidates the server-side session; the caller clears the local one.
    pub fn logout(&self) -> Result<Option<String>> {
        self.execute_message(self.post("/auth/logout"))
    }

    pub fn request_password_reset(&self, email: &str) -> Result<Option<String>> {
        self.execute_message(self.post("/auth/password-reset-request").json(
            &PasswordResetRequest {
                email: email.to_string(),
            },
        ))
    }

    pub fn reset_password(&self, token: &str, password: &str) -> Result<Option<String>> {
        self.execute_message(self.post("/auth/password-reset").json(&PasswordReset {
            token: token.to_string(),
            password: password.to_string(),
        }))
    }

    pub fn resend_verification(&self, email: &str) -> Result<Option<String>> {
        self.execute_message(self.post("/auth/resend-verification").json(
            &ResendVerificationRequest {
                email: email.to_string(),
            },
        ))
    }

    /// The account behind the current token.
    pub fn me(&self) -> Result<User> {
        let resp: UserResponse = self.execute(self.get("/me"))?;
        ensure_success(&resp.status)?;
        Ok(resp.user)
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub fn list_users(&self) -> Result<Vec<User>> {
        let resp: UsersResponse = self.execute(self.get("/users"))?;
        ensure_success(&resp.status)?;
        Ok(resp.users)
    }

    pub fn get_user(&self, id: &UserId) -> Result<User> {
        let resp: UserResponse = self.execute(self.get(&format!("/users/{id}")))?;
        ensure_success(&resp.status)?;
        Ok(resp.user)
    }

    pub fn update_user(&self, id: &UserId, update: &UserUpdate) -> Result<Option<String>> {
        self.execute_message(self.put(&format!("/users/{id}")).json(update))
    }

    pub fn delete_user(&self, id: &UserId) -> Result<Option<String>> {
        self.execute_message(self.delete(&format!("/users/{id}")))
    }

    /// Sets the user's role. Callers must have passed the role-change
    /// decision (current role and destination) first.
    pub fn change_role(&self, id: &UserId, role: Role) -> Result<Option<String>> {
        self.execute_message(
            self.post(&format!("/users/{id}/role"))
                .json(&RoleChangeRequest { role }),
        )
    }

    pub fn promote_to_moderator(&self, id: &UserId) -> Result<Option<String>> {
        self.execute_message(self.post(&format!("/users/{id}/promote/moderator")))
    }

    pub fn promote_to_admin(&self, id: &UserId) -> Result<Option<String>> {
        self.execute_message(self.post(&format!("/users/{id}/promote/admin")))
    }

    pub fn demote(&self, id: &UserId) -> Result<Option<String>> {
        self.execute_message(self.post(&format!("/users/{id}/demote")))
    }

    // ========================================================================
    // Roles
    // ========================================================================

    pub fn list_roles(&self) -> Result<Vec<RoleRecord>> {
        let resp: RolesResponse = self.execute(self.get("/roles"))?;
        Ok(resp.roles)
    }

    /// The role detail endpoint returns the record directly, without an
    /// envelope.
    pub fn get_role(&self, id: &RoleId) -> Result<RoleRecord> {
        self.execute(self.get(&format!("/roles/{id}")))
    }

    pub fn create_role(&self, name: &str, description: &str) -> Result<Option<String>> {
        self.execute_message(self.post("/roles").json(&RolePayload {
            name: name.to_string(),
            description: description.to_string(),
        }))
    }

    pub fn update_role(&self, id: &RoleId, name: &str, description: &str) -> Result<Option<String>> {
        self.execute_message(self.put(&format!("/roles/{id}")).json(&RolePayload {
            name: name.to_string(),
            description: description.to_string(),
        }))
    }

    pub fn delete_role(&self, id: &RoleId) -> Result<Option<String>> {
        self.execute_message(self.delete(&format!("/roles/{id}")))
    }

    // ========================================================================
    // Permissions
    // ========================================================================

    pub fn list_permissions(&self) -> Result<Vec<Permission>> {
        let resp: PermissionsResponse = self.execute(self.get("/permissions"))?;
        ensure_success(&resp.status)?;
        Ok(resp.permissions)
    }

    pub fn get_permission(&self, id: &PermissionId) -> Result<Permission> {
        let resp: PermissionResponse = self.execute(self.get(&format!("/permissions/{id}")))?;
        ensure_success(&resp.status)?;
        Ok(resp.permission)
    }

    // ========================================================================
    // Plumbing
    // ========================================================================

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authed(self.http.get(self.endpoint(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authed(self.http.post(self.endpoint(path)))
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.authed(self.http.put(self.endpoint(path)))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.authed(self.http.delete(self.endpoint(path)))
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        }
    }

    /// Sends the request and decodes the body, mapping non-2xx responses to
    /// [`ClientError::Api`] with the server's own message.
    fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        debug!(status = status.as_u16(), "api response");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| status.to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|err| ClientError::UnexpectedResponse(err.to_string()))
    }

    /// Variant of [`Client::execute`] for mutations: checks the `status`
    /// discriminator and hands back the server's message for display.
    fn execute_message(&self, request: RequestBuilder) -> Result<Option<String>> {
        let resp: MessageResponse = self.execute(request)?;
        ensure_success(&resp.status)?;
        Ok(resp.message)
    }
}

fn ensure_success(status: &str) -> Result<()> {
    if status == "success" {
        Ok(())
    } else {
        Err(ClientError::UnexpectedResponse(format!(
            "status '{status}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        let client = Client::new("http://localhost:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.endpoint("/users/u-1/role"),
            "http://localhost:8080/api/v1/users/u-1/role"
        );
    }

    #[test]
    fn ensure_success_rejects_other_statuses() {
        assert!(ensure_success("success").is_ok());
        let err = ensure_success("fail").unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedResponse(_)));
    }
}
