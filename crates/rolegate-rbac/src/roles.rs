//! Role definitions and the role hierarchy.
//!
//! Six roles across four tiers:
//! - `user`, `basic_user`, `premium_user`: the base tiers. They differ only
//!   in product entitlements, not in administrative privilege, so all three
//!   share rank 0 and are mutually non-comparable.
//! - `moderator` (rank 1) < `admin` (rank 2) < `system_admin` (rank 3).

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// A role held by a user account.
///
/// Hierarchy comparisons go through [`Role::rank`] / [`Role::is_at_least`];
/// the enum deliberately does not implement `Ord` because the three base
/// tiers are equal in rank without being equal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Standard account, lowest privilege.
    User,

    /// Base-tier account with the entry-level product plan.
    BasicUser,

    /// Base-tier account with the paid product plan.
    PremiumUser,

    /// Can act on ordinary users (e.g. delete accounts) but not on staff.
    Moderator,

    /// Full management access to users, roles and permissions.
    Admin,

    /// Top of the hierarchy; the only role that can mint new admins.
    SystemAdmin,
}

/// Returned by [`Role::next_lower`] when the role is already a base tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("role '{0}' has no lower tier")]
pub struct NoLowerRole(pub Role);

impl Role {
    /// The only roles [`crate::Action::ChangeUserRole`] may assign.
    ///
    /// Fixed allow-list; role lists fetched from the server must be filtered
    /// through [`Role::is_protected`] before being offered as destinations.
    pub const ASSIGNABLE: [Role; 3] = [Role::User, Role::BasicUser, Role::PremiumUser];

    /// Returns the rank of this role in the hierarchy (0 = base tier).
    ///
    /// All three base tiers share rank 0.
    pub fn rank(self) -> u8 {
        match self {
            Role::User | Role::BasicUser | Role::PremiumUser => 0,
            Role::Moderator => 1,
            Role::Admin => 2,
            Role::SystemAdmin => 3,
        }
    }

    /// Returns whether this role meets the given minimum.
    pub fn is_at_least(self, min: Role) -> bool {
        self.rank() >= min.rank()
    }

    /// Returns whether this role is protected from being the target of
    /// ordinary role-change and promotion actions.
    ///
    /// Protected roles: `moderator`, `admin`, `system_admin`.
    pub fn is_protected(self) -> bool {
        self.rank() >= Role::Moderator.rank()
    }

    /// Returns the role one tier down the fixed demotion chain
    /// `system_admin -> admin -> moderator -> user`.
    ///
    /// Demotion out of the staff tiers always lands on plain `user`; the
    /// base product tiers are not demotion steps.
    pub fn next_lower(self) -> Result<Role, NoLowerRole> {
        match self {
            Role::SystemAdmin => Ok(Role::Admin),
            Role::Admin => Ok(Role::Moderator),
            Role::Moderator => Ok(Role::User),
            Role::User | Role::BasicUser | Role::PremiumUser => Err(NoLowerRole(self)),
        }
    }

    /// Returns the snake_case wire name of this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::BasicUser => "basic_user",
            Role::PremiumUser => "premium_user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
            Role::SystemAdmin => "system_admin",
        }
    }

    /// All roles, base tiers first.
    pub const ALL: [Role; 6] = [
        Role::User,
        Role::BasicUser,
        Role::PremiumUser,
        Role::Moderator,
        Role::Admin,
        Role::SystemAdmin,
    ];
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a role name that is not one of the six wire names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "basic_user" => Ok(Role::BasicUser),
            "premium_user" => Ok(Role::PremiumUser),
            "moderator" => Ok(Role::Moderator),
            "admin" => Ok(Role::Admin),
            "system_admin" => Ok(Role::SystemAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn base_tiers_share_rank_zero() {
        assert_eq!(Role::User.rank(), 0);
        assert_eq!(Role::BasicUser.rank(), 0);
        assert_eq!(Role::PremiumUser.rank(), 0);
    }

    #[test]
    fn staff_tiers_are_strictly_ordered() {
        assert!(Role::Moderator.rank() < Role::Admin.rank());
        assert!(Role::Admin.rank() < Role::SystemAdmin.rank());
        assert!(Role::User.rank() < Role::Moderator.rank());
    }

    #[test]
    fn is_at_least_follows_rank() {
        assert!(Role::Admin.is_at_least(Role::Moderator));
        assert!(Role::Admin.is_at_least(Role::Admin));
        assert!(!Role::Admin.is_at_least(Role::SystemAdmin));

        // Base tiers satisfy each other's minimum.
        assert!(Role::BasicUser.is_at_least(Role::PremiumUser));
        assert!(Role::PremiumUser.is_at_least(Role::User));
    }

    #[test]
    fn protected_roles_are_moderator_and_above() {
        assert!(!Role::User.is_protected());
        assert!(!Role::BasicUser.is_protected());
        assert!(!Role::PremiumUser.is_protected());
        assert!(Role::Moderator.is_protected());
        assert!(Role::Admin.is_protected());
        assert!(Role::SystemAdmin.is_protected());
    }

    #[test]
    fn demotion_chain_is_fixed() {
        assert_eq!(Role::SystemAdmin.next_lower(), Ok(Role::Admin));
        assert_eq!(Role::Admin.next_lower(), Ok(Role::Moderator));
        assert_eq!(Role::Moderator.next_lower(), Ok(Role::User));
    }

    #[test_case(Role::User)]
    #[test_case(Role::BasicUser)]
    #[test_case(Role::PremiumUser)]
    fn base_tiers_cannot_be_demoted(role: Role) {
        assert_eq!(role.next_lower(), Err(NoLowerRole(role)));
    }

    #[test]
    fn wire_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert_eq!(
            "superuser".parse::<Role>(),
            Err(UnknownRole("superuser".to_string()))
        );
    }

    #[test]
    fn serde_uses_snake_case_wire_names() {
        assert_eq!(
            serde_json::to_string(&Role::SystemAdmin).unwrap(),
            "\"system_admin\""
        );
        let role: Role = serde_json::from_str("\"premium_user\"").unwrap();
        assert_eq!(role, Role::PremiumUser);
    }

    #[test]
    fn assignable_roles_are_exactly_the_base_tiers() {
        for role in Role::ASSIGNABLE {
            assert!(!role.is_protected());
        }
        assert_eq!(Role::ASSIGNABLE.len(), 3);
    }
}
