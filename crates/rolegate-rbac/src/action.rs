//! The closed set of administrative actions and the catalog that governs
//! them.
//!
//! The catalog is the single source of truth for who may invoke what:
//! adding an action means adding one enum variant and one [`Action::entry`]
//! arm. Page-level code must never re-derive these rules.

use crate::roles::Role;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// An administrative operation the console can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ListUsers,
    ViewUser,
    UpdateUser,
    DeleteUser,
    PromoteToModerator,
    PromoteToAdmin,
    DemoteUser,
    ChangeUserRole,
    ListRoles,
    ViewRole,
    CreateRole,
    UpdateRole,
    DeleteRole,
    ListPermissions,
    ViewPermission,
}

/// Constraint applied to the target's role when an action acts on another
/// principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetConstraint {
    /// The target's role is irrelevant.
    None,

    /// The target must not hold a protected role
    /// (`moderator`, `admin`, `system_admin`).
    MustNotBeProtected,

    /// The actor's rank must be at least the target's rank.
    OutrankedByActor,
}

/// One row of the action catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Minimum actor role required to invoke the action at all.
    pub min_actor_role: Role,

    /// Whether the caller must supply the target's current role.
    pub requires_target: bool,

    /// Constraint on the target's role, checked only when a target is given.
    pub target_constraint: TargetConstraint,
}

impl CatalogEntry {
    const fn open(min_actor_role: Role) -> Self {
        Self {
            min_actor_role,
            requires_target: false,
            target_constraint: TargetConstraint::None,
        }
    }

    const fn targeted(min_actor_role: Role, target_constraint: TargetConstraint) -> Self {
        Self {
            min_actor_role,
            requires_target: true,
            target_constraint,
        }
    }
}

impl Action {
    /// Returns the catalog entry governing this action.
    ///
    /// `promote_to_admin` and `demote_user` carry extra rules beyond their
    /// entries; those live in [`crate::authorize`].
    pub fn entry(self) -> CatalogEntry {
        match self {
            Action::ListUsers => CatalogEntry::open(Role::Admin),
            Action::ViewUser => CatalogEntry::open(Role::Admin),
            Action::UpdateUser => CatalogEntry::open(Role::Admin),
            Action::DeleteUser => {
                CatalogEntry::targeted(Role::Moderator, TargetConstraint::OutrankedByActor)
            }
            Action::PromoteToModerator => {
                CatalogEntry::targeted(Role::Admin, TargetConstraint::MustNotBeProtected)
            }
            // Minimum rank admin so that an admin caller is refused with the
            // exact-role reason rather than a generic rank failure.
            Action::PromoteToAdmin => CatalogEntry::open(Role::Admin),
            Action::DemoteUser => CatalogEntry::targeted(Role::Admin, TargetConstraint::None),
            Action::ChangeUserRole => {
                CatalogEntry::targeted(Role::Admin, TargetConstraint::MustNotBeProtected)
            }
            Action::ListRoles => CatalogEntry::open(Role::Admin),
            Action::ViewRole => CatalogEntry::open(Role::Admin),
            Action::CreateRole => CatalogEntry::open(Role::Admin),
            Action::UpdateRole => CatalogEntry::open(Role::Admin),
            Action::DeleteRole => CatalogEntry::open(Role::Admin),
            Action::ListPermissions => CatalogEntry::open(Role::Admin),
            Action::ViewPermission => CatalogEntry::open(Role::Admin),
        }
    }

    /// Returns the snake_case wire name of this action.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::ListUsers => "list_users",
            Action::ViewUser => "view_user",
            Action::UpdateUser => "update_user",
            Action::DeleteUser => "delete_user",
            Action::PromoteToModerator => "promote_to_moderator",
            Action::PromoteToAdmin => "promote_to_admin",
            Action::DemoteUser => "demote_user",
            Action::ChangeUserRole => "change_user_role",
            Action::ListRoles => "list_roles",
            Action::ViewRole => "view_role",
            Action::CreateRole => "create_role",
            Action::UpdateRole => "update_role",
            Action::DeleteRole => "delete_role",
            Action::ListPermissions => "list_permissions",
            Action::ViewPermission => "view_permission",
        }
    }

    /// All actions, in catalog order.
    pub const ALL: [Action; 15] = [
        Action::ListUsers,
        Action::ViewUser,
        Action::UpdateUser,
        Action::DeleteUser,
        Action::PromoteToModerator,
        Action::PromoteToAdmin,
        Action::DemoteUser,
        Action::ChangeUserRole,
        Action::ListRoles,
        Action::ViewRole,
        Action::CreateRole,
        Action::UpdateRole,
        Action::DeleteRole,
        Action::ListPermissions,
        Action::ViewPermission,
    ];
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an action name outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_has_an_entry() {
        for action in Action::ALL {
            // entry() is total; this pins the catalog's basic shape.
            let entry = action.entry();
            assert!(entry.min_actor_role.is_at_least(Role::Moderator));
        }
    }

    #[test]
    fn privilege_mutations_require_a_target() {
        for action in [
            Action::DeleteUser,
            Action::PromoteToModerator,
            Action::DemoteUser,
            Action::ChangeUserRole,
        ] {
            assert!(action.entry().requires_target, "{action} must need a target");
        }
        assert!(!Action::ListUsers.entry().requires_target);
        assert!(!Action::PromoteToAdmin.entry().requires_target);
    }

    #[test]
    fn delete_user_is_open_to_moderators() {
        let entry = Action::DeleteUser.entry();
        assert_eq!(entry.min_actor_role, Role::Moderator);
        assert_eq!(entry.target_constraint, TargetConstraint::OutrankedByActor);
    }

    #[test]
    fn role_changes_protect_staff_targets() {
        assert_eq!(
            Action::ChangeUserRole.entry().target_constraint,
            TargetConstraint::MustNotBeProtected
        );
        assert_eq!(
            Action::PromoteToModerator.entry().target_constraint,
            TargetConstraint::MustNotBeProtected
        );
    }

    #[test]
    fn wire_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
        assert_eq!(
            "drop_database".parse::<Action>(),
            Err(UnknownAction("drop_database".to_string()))
        );
    }

    #[test]
    fn serde_uses_snake_case_wire_names() {
        assert_eq!(
            serde_json::to_string(&Action::ChangeUserRole).unwrap(),
            "\"change_user_role\""
        );
    }
}
