//! Shared command context: configuration, session, client and the
//! authorization guard.
//!
//! Every privileged command goes through [`App::authorize`] (or
//! [`App::authorize_role_change`]) before any request is built. This is the
//! single place where a `Denied` decision becomes a user-facing error, so
//! no command re-derives access rules.

use anyhow::{anyhow, Context, Result};
use rolegate_client::{Client, Session, SessionStore};
use rolegate_config::{ColorMode, RolegateConfig};
use rolegate_rbac::{AccessGate, Action, DenyReason, Role};
use std::time::Duration;

pub struct App {
    pub config: RolegateConfig,
    pub store: SessionStore,
    session: Option<Session>,
}

impl App {
    /// Loads configuration and the current session.
    ///
    /// A corrupt session file reads as signed out rather than aborting the
    /// command; `rolegate login` rewrites it.
    pub fn load(server: Option<&str>) -> Result<Self> {
        let mut config = RolegateConfig::load().context("failed to load configuration")?;
        if let Some(server) = server {
            config.api.url = server.to_string();
        }

        if config.output.color == ColorMode::Never {
            crate::style::set_no_color(true);
        }

        let store = SessionStore::new(config.session_file()?);
        let session = store.load().unwrap_or(None);

        Ok(Self {
            config,
            store,
            session,
        })
    }

    /// Returns the signed-in session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Builds the gate from the current session snapshot.
    pub fn gate(&self) -> AccessGate {
        AccessGate::new(self.session.as_ref().map(Session::actor))
    }

    /// Checks `action` and turns a refusal into a command error.
    pub fn authorize(&self, action: Action, target: Option<Role>) -> Result<()> {
        self.gate().check(action, target).map_err(denied)
    }

    /// Checks a full role change (target's current role and destination).
    pub fn authorize_role_change(&self, current: Role, new_role: Role) -> Result<()> {
        self.gate()
            .check_role_change(current, new_role)
            .map_err(denied)
    }

    /// Builds an API client, attaching the session token when signed in.
    pub fn client(&self) -> Result<Client> {
        let client = Client::new(
            self.config.api.url.clone(),
            Duration::from_secs(self.config.api.timeout),
        )?;

        Ok(match &self.session {
            Some(session) => client.with_token(session.token.clone()),
            None => client,
        })
    }
}

fn denied(reason: DenyReason) -> anyhow::Error {
    match reason {
        DenyReason::NotAuthenticated => {
            anyhow!("not signed in. Run `rolegate login` first")
        }
        DenyReason::ProtectedRole => anyhow!(
            "{reason}. Assignable roles: {}",
            Role::ASSIGNABLE.map(Role::as_str).join(", ")
        ),
        other => anyhow!("{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denied_not_authenticated_hints_at_login() {
        let err = denied(DenyReason::NotAuthenticated);
        assert!(err.to_string().contains("rolegate login"));
    }

    #[test]
    fn denied_protected_role_lists_the_allow_list() {
        let err = denied(DenyReason::ProtectedRole);
        let text = err.to_string();
        assert!(text.contains("basic_user"));
        assert!(text.contains("premium_user"));
    }
}
