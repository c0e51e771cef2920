//! The decision function.
//!
//! `authorize` is a pure predicate over (actor role, action, target role).
//! It never performs I/O, never panics, and returns a structured reason for
//! every refusal. Callers consult it before issuing the network request;
//! the API server independently re-validates, so a client-side `Allowed` is
//! advisory and a client-side `Denied` is purely a UX short-circuit.

use crate::action::{Action, TargetConstraint};
use crate::actor::Actor;
use crate::roles::Role;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a decision came back [`Decision::Denied`].
///
/// The display strings are the user-facing phrasing; dispatchers render
/// them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No actor snapshot was available (signed out or session expired).
    #[error("not signed in")]
    NotAuthenticated,

    /// The action name is outside the closed action set.
    #[error("unknown action")]
    UnknownAction,

    /// The actor's rank is below the action's minimum (or below the
    /// target's rank where the catalog compares them).
    #[error("current role does not permit this action")]
    InsufficientRole,

    /// The action needs the target's current role and none was supplied.
    #[error("target role is required for this action")]
    MissingTarget,

    /// The target (or requested destination role) is moderator, admin or
    /// system admin.
    #[error("moderator, admin and system admin roles cannot be targeted")]
    ProtectedRole,

    /// Only a system admin may perform this action on this target.
    #[error("only system admins may do this")]
    SystemAdminOnly,

    /// The target already sits on the lowest tier.
    #[error("user already has the lowest role level")]
    AlreadyLowestRole,
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allowed,
    Denied(DenyReason),
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allowed)
    }

    /// Returns the denial reason, if any.
    pub fn reason(self) -> Option<DenyReason> {
        match self {
            Decision::Allowed => None,
            Decision::Denied(reason) => Some(reason),
        }
    }

    /// Converts the decision into a `Result` for `?`-style dispatch.
    pub fn require(self) -> Result<(), DenyReason> {
        match self {
            Decision::Allowed => Ok(()),
            Decision::Denied(reason) => Err(reason),
        }
    }
}

/// Decides whether `actor` may invoke `action`, optionally against a
/// principal whose current role is `target`.
///
/// The checks run in a fixed order so that the reason is deterministic:
/// minimum rank, target presence, catalog target constraint, then the
/// action-specific rules for `promote_to_admin` and `demote_user`.
pub fn authorize(actor: &Actor, action: Action, target: Option<Role>) -> Decision {
    let entry = action.entry();

    if !actor.role.is_at_least(entry.min_actor_role) {
        return Decision::Denied(DenyReason::InsufficientRole);
    }

    let target = match (entry.requires_target, target) {
        (true, None) => return Decision::Denied(DenyReason::MissingTarget),
        (_, target) => target,
    };

    if let Some(target_role) = target {
        match entry.target_constraint {
            TargetConstraint::None => {}
            TargetConstraint::MustNotBeProtected => {
                if target_role.is_protected() {
                    return Decision::Denied(DenyReason::ProtectedRole);
                }
            }
            TargetConstraint::OutrankedByActor => {
                if actor.role.rank() < target_role.rank() {
                    return Decision::Denied(DenyReason::InsufficientRole);
                }
            }
        }
    }

    // Stricter than the minimum-rank check: promotion to admin is reserved
    // for system admins exactly.
    if action == Action::PromoteToAdmin && actor.role != Role::SystemAdmin {
        return Decision::Denied(DenyReason::SystemAdminOnly);
    }

    if action == Action::DemoteUser {
        // requires_target guarantees Some here.
        let Some(target_role) = target else {
            return Decision::Denied(DenyReason::MissingTarget);
        };
        if target_role == Role::SystemAdmin && actor.role != Role::SystemAdmin {
            return Decision::Denied(DenyReason::SystemAdminOnly);
        }
        if target_role.next_lower().is_err() {
            return Decision::Denied(DenyReason::AlreadyLowestRole);
        }
    }

    Decision::Allowed
}

/// String-keyed variant of [`authorize`] for dispatchers indexed by route
/// or action name; names outside the closed set come back as
/// `Denied(UnknownAction)`.
pub fn authorize_named(actor: &Actor, action: &str, target: Option<Role>) -> Decision {
    match action.parse::<Action>() {
        Ok(action) => authorize(actor, action, target),
        Err(_) => Decision::Denied(DenyReason::UnknownAction),
    }
}

/// Decides a full role change: `change_user_role` against the target's
/// current role, plus the fixed allow-list on the destination.
///
/// The destination must be one of the base tiers ([`Role::ASSIGNABLE`]);
/// requests to assign moderator, admin or system admin are refused with
/// `ProtectedRole` regardless of the actor.
pub fn authorize_role_change(actor: &Actor, current: Role, new_role: Role) -> Decision {
    if new_role.is_protected() {
        return Decision::Denied(DenyReason::ProtectedRole);
    }
    authorize(actor, Action::ChangeUserRole, Some(current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_types::UserId;

    fn actor(role: Role) -> Actor {
        Actor::new(UserId::new("actor-1"), role)
    }

    #[test]
    fn promote_to_admin_is_system_admin_only() {
        assert_eq!(
            authorize(&actor(Role::Admin), Action::PromoteToAdmin, None),
            Decision::Denied(DenyReason::SystemAdminOnly)
        );
        assert_eq!(
            authorize(&actor(Role::SystemAdmin), Action::PromoteToAdmin, None),
            Decision::Allowed
        );
        // Below the catalog minimum the generic rank reason wins.
        assert_eq!(
            authorize(&actor(Role::Moderator), Action::PromoteToAdmin, None),
            Decision::Denied(DenyReason::InsufficientRole)
        );
    }

    #[test]
    fn change_role_refuses_protected_targets() {
        assert_eq!(
            authorize(
                &actor(Role::Admin),
                Action::ChangeUserRole,
                Some(Role::Moderator)
            ),
            Decision::Denied(DenyReason::ProtectedRole)
        );
        assert_eq!(
            authorize(&actor(Role::Admin), Action::ChangeUserRole, Some(Role::User)),
            Decision::Allowed
        );
    }

    #[test]
    fn change_role_requires_the_target_role() {
        assert_eq!(
            authorize(&actor(Role::Admin), Action::ChangeUserRole, None),
            Decision::Denied(DenyReason::MissingTarget)
        );
    }

    #[test]
    fn demoting_a_system_admin_needs_a_system_admin() {
        assert_eq!(
            authorize(
                &actor(Role::Admin),
                Action::DemoteUser,
                Some(Role::SystemAdmin)
            ),
            Decision::Denied(DenyReason::SystemAdminOnly)
        );
        assert_eq!(
            authorize(
                &actor(Role::SystemAdmin),
                Action::DemoteUser,
                Some(Role::SystemAdmin)
            ),
            Decision::Allowed
        );
    }

    #[test]
    fn demoting_a_base_tier_user_is_refused() {
        assert_eq!(
            authorize(&actor(Role::SystemAdmin), Action::DemoteUser, Some(Role::User)),
            Decision::Denied(DenyReason::AlreadyLowestRole)
        );
        assert_eq!(
            authorize(&actor(Role::Admin), Action::DemoteUser, Some(Role::Admin)),
            Decision::Allowed
        );
    }

    #[test]
    fn moderators_can_delete_ordinary_users_only() {
        assert_eq!(
            authorize(
                &actor(Role::Moderator),
                Action::DeleteUser,
                Some(Role::PremiumUser)
            ),
            Decision::Allowed
        );
        assert_eq!(
            authorize(&actor(Role::Moderator), Action::DeleteUser, Some(Role::Admin)),
            Decision::Denied(DenyReason::InsufficientRole)
        );
        assert_eq!(
            authorize(&actor(Role::User), Action::DeleteUser, Some(Role::User)),
            Decision::Denied(DenyReason::InsufficientRole)
        );
    }

    #[test]
    fn read_only_actions_need_admin() {
        for action in [
            Action::ListUsers,
            Action::ListRoles,
            Action::ListPermissions,
            Action::ViewPermission,
        ] {
            assert_eq!(
                authorize(&actor(Role::Moderator), action, None),
                Decision::Denied(DenyReason::InsufficientRole)
            );
            assert_eq!(authorize(&actor(Role::Admin), action, None), Decision::Allowed);
        }
    }

    #[test]
    fn named_dispatch_maps_unknown_actions() {
        assert_eq!(
            authorize_named(&actor(Role::Admin), "list_users", None),
            Decision::Allowed
        );
        assert_eq!(
            authorize_named(&actor(Role::Admin), "drop_everything", None),
            Decision::Denied(DenyReason::UnknownAction)
        );
    }

    #[test]
    fn role_change_allow_list_is_fixed() {
        for destination in Role::ASSIGNABLE {
            assert_eq!(
                authorize_role_change(&actor(Role::Admin), Role::User, destination),
                Decision::Allowed
            );
        }
        for destination in [Role::Moderator, Role::Admin, Role::SystemAdmin] {
            assert_eq!(
                authorize_role_change(&actor(Role::SystemAdmin), Role::User, destination),
                Decision::Denied(DenyReason::ProtectedRole)
            );
        }
    }

    #[test]
    fn decisions_are_idempotent() {
        let a = actor(Role::Admin);
        let first = authorize(&a, Action::ChangeUserRole, Some(Role::Moderator));
        let second = authorize(&a, Action::ChangeUserRole, Some(Role::Moderator));
        assert_eq!(first, second);
    }

    #[test]
    fn require_converts_to_result() {
        assert!(Decision::Allowed.require().is_ok());
        assert_eq!(
            Decision::Denied(DenyReason::ProtectedRole).require(),
            Err(DenyReason::ProtectedRole)
        );
    }

    mod properties {
        use super::*;
        use crate::action::Action;
        use proptest::prelude::*;

        fn any_role() -> impl Strategy<Value = Role> {
            prop::sample::select(Role::ALL.to_vec())
        }

        fn any_action() -> impl Strategy<Value = Action> {
            prop::sample::select(Action::ALL.to_vec())
        }

        proptest! {
            /// Identical inputs always yield identical decisions.
            #[test]
            fn authorize_is_deterministic(
                role in any_role(),
                action in any_action(),
                target in prop::option::of(any_role()),
            ) {
                let a = actor(role);
                prop_assert_eq!(
                    authorize(&a, action, target),
                    authorize(&a, action, target)
                );
            }

            /// Every Allowed decision implies the actor met the catalog
            /// minimum; privilege can never be exercised below it.
            #[test]
            fn allowed_implies_minimum_rank(
                role in any_role(),
                action in any_action(),
                target in prop::option::of(any_role()),
            ) {
                let a = actor(role);
                if authorize(&a, action, target).is_allowed() {
                    prop_assert!(role.is_at_least(action.entry().min_actor_role));
                }
            }

            /// Protected roles can never be the target of a role change or
            /// moderator promotion.
            #[test]
            fn protected_targets_never_pass(
                role in any_role(),
                target in any_role().prop_filter("protected", |r| r.is_protected()),
            ) {
                let a = actor(role);
                prop_assert!(!authorize(&a, Action::ChangeUserRole, Some(target)).is_allowed());
                prop_assert!(!authorize(&a, Action::PromoteToModerator, Some(target)).is_allowed());
            }
        }
    }
}
