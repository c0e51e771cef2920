//! The enforcement seam between dispatchers and the decision function.
//!
//! `AccessGate` holds the actor snapshot (or its absence) for one dispatch
//! and turns decisions into `Result`s, emitting a structured audit event for
//! every grant and refusal.

use crate::action::Action;
use crate::actor::Actor;
use crate::decision::{authorize, authorize_role_change, DenyReason};
use crate::roles::Role;
use tracing::{info, warn};

/// Per-dispatch authorization gate.
///
/// Build one from the session collaborator's output; an absent actor fails
/// every check with [`DenyReason::NotAuthenticated`] without consulting the
/// catalog.
pub struct AccessGate {
    actor: Option<Actor>,

    /// Whether grant/deny events are logged.
    audit_enabled: bool,
}

impl AccessGate {
    /// Creates a gate from an optional actor snapshot.
    pub fn new(actor: Option<Actor>) -> Self {
        Self {
            actor,
            audit_enabled: true,
        }
    }

    /// Creates a gate for a known actor.
    pub fn for_actor(actor: Actor) -> Self {
        Self::new(Some(actor))
    }

    /// Disables audit logging (for testing).
    pub fn without_audit(mut self) -> Self {
        self.audit_enabled = false;
        self
    }

    /// Returns the actor snapshot, if signed in.
    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }

    /// Checks `action` against the catalog, logging the outcome.
    pub fn check(&self, action: Action, target: Option<Role>) -> Result<(), DenyReason> {
        let Some(actor) = &self.actor else {
            if self.audit_enabled {
                warn!(action = %action, "access denied: not signed in");
            }
            return Err(DenyReason::NotAuthenticated);
        };

        let decision = authorize(actor, action, target);
        self.audit(actor, action.as_str(), decision.reason());
        decision.require()
    }

    /// Checks a full role change (current role and destination).
    pub fn check_role_change(&self, current: Role, new_role: Role) -> Result<(), DenyReason> {
        let Some(actor) = &self.actor else {
            if self.audit_enabled {
                warn!(action = %Action::ChangeUserRole, "access denied: not signed in");
            }
            return Err(DenyReason::NotAuthenticated);
        };

        let decision = authorize_role_change(actor, current, new_role);
        self.audit(actor, Action::ChangeUserRole.as_str(), decision.reason());
        decision.require()
    }

    fn audit(&self, actor: &Actor, action: &str, denied: Option<DenyReason>) {
        if !self.audit_enabled {
            return;
        }
        match denied {
            None => info!(
                actor = %actor.id,
                role = %actor.role,
                action = %action,
                "access granted"
            ),
            Some(reason) => warn!(
                actor = %actor.id,
                role = %actor.role,
                action = %action,
                reason = %reason,
                "access denied"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_types::UserId;

    fn gate(role: Role) -> AccessGate {
        AccessGate::for_actor(Actor::new(UserId::new("actor-1"), role)).without_audit()
    }

    #[test]
    fn signed_out_gate_denies_everything_first() {
        let gate = AccessGate::new(None).without_audit();
        assert_eq!(
            gate.check(Action::ListUsers, None),
            Err(DenyReason::NotAuthenticated)
        );
        assert_eq!(
            gate.check_role_change(Role::User, Role::BasicUser),
            Err(DenyReason::NotAuthenticated)
        );
    }

    #[test]
    fn gate_forwards_catalog_decisions() {
        assert!(gate(Role::Admin).check(Action::ListUsers, None).is_ok());
        assert_eq!(
            gate(Role::User).check(Action::ListUsers, None),
            Err(DenyReason::InsufficientRole)
        );
    }

    #[test]
    fn gate_checks_role_changes_end_to_end() {
        assert!(gate(Role::Admin)
            .check_role_change(Role::User, Role::PremiumUser)
            .is_ok());
        assert_eq!(
            gate(Role::Admin).check_role_change(Role::User, Role::Admin),
            Err(DenyReason::ProtectedRole)
        );
        assert_eq!(
            gate(Role::Admin).check_role_change(Role::Moderator, Role::User),
            Err(DenyReason::ProtectedRole)
        );
    }

    #[test]
    fn gate_exposes_the_actor() {
        let gate = gate(Role::Admin);
        assert_eq!(gate.actor().unwrap().role, Role::Admin);
        assert!(AccessGate::new(None).actor().is_none());
    }
}
