//! The actor snapshot supplied to every authorization decision.

use crate::roles::Role;
use rolegate_types::UserId;
use serde::{Deserialize, Serialize};

/// The authenticated caller, as of the moment the decision is made.
///
/// Established at sign-in and cleared at sign-out by the session
/// collaborator; the core never caches or mutates it. Callers supply a fresh
/// snapshot on each call, so a role change takes effect on the next
/// decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The caller's account ID.
    pub id: UserId,

    /// The caller's role at snapshot time.
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<UserId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

/// Source of the current actor snapshot.
///
/// Implemented by the session store; `None` means unauthenticated, which
/// the access gate maps to [`crate::DenyReason::NotAuthenticated`] before
/// the catalog is ever consulted.
pub trait ActorSource {
    fn current_actor(&self) -> Option<Actor>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_serializes_with_wire_role_name() {
        let actor = Actor::new("u-1", Role::SystemAdmin);
        let json = serde_json::to_value(&actor).unwrap();
        assert_eq!(json["id"], "u-1");
        assert_eq!(json["role"], "system_admin");
    }
}
