//! Kani bounded model checking proofs for the authorization core.
//!
//! These proofs verify the invariants the decision function must never
//! violate, exhaustively over the closed role and action sets:
//! - Protected targets: role changes and moderator promotions never pass
//!   against moderator/admin/system_admin targets.
//! - Admin minting: `promote_to_admin` passes for system_admin exactly.
//! - Demotion: always one tier down the fixed chain; base tiers refused.
//! - Minimum rank: `Allowed` implies the actor met the catalog minimum.

use crate::{authorize, Action, Actor, DenyReason, Decision, Role};
use rolegate_types::UserId;

#[cfg(kani)]
fn any_role() -> Role {
    let idx: usize = kani::any();
    kani::assume(idx < Role::ALL.len());
    Role::ALL[idx]
}

#[cfg(kani)]
fn any_action() -> Action {
    let idx: usize = kani::any();
    kani::assume(idx < Action::ALL.len());
    Action::ALL[idx]
}

/// Verifies that no protected role is ever an acceptable target of a role
/// change or moderator promotion.
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(20)]
fn verify_protected_targets_never_pass() {
    let actor = Actor::new(UserId::new("a"), any_role());
    let target = any_role();
    kani::assume(target.is_protected());

    assert!(!authorize(&actor, Action::ChangeUserRole, Some(target)).is_allowed());
    assert!(!authorize(&actor, Action::PromoteToModerator, Some(target)).is_allowed());
}

/// Verifies that only system_admin can mint admins, and that the refusal
/// reason for an admin caller is the exact-role one.
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(20)]
fn verify_admin_minting_is_exact() {
    let role = any_role();
    let actor = Actor::new(UserId::new("a"), role);
    let decision = authorize(&actor, Action::PromoteToAdmin, None);

    if role == Role::SystemAdmin {
        assert!(decision.is_allowed());
    } else {
        assert!(!decision.is_allowed());
    }
    if role == Role::Admin {
        assert_eq!(decision, Decision::Denied(DenyReason::SystemAdminOnly));
    }
}

/// Verifies the demotion rules: a permitted demotion target always has a
/// lower tier, and system_admin targets require a system_admin actor.
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(20)]
fn verify_demotion_rules() {
    let actor_role = any_role();
    let target = any_role();
    let actor = Actor::new(UserId::new("a"), actor_role);

    if authorize(&actor, Action::DemoteUser, Some(target)).is_allowed() {
        assert!(target.next_lower().is_ok());
        if target == Role::SystemAdmin {
            assert_eq!(actor_role, Role::SystemAdmin);
        }
    }
}

/// Verifies that every Allowed decision satisfies the catalog minimum.
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(20)]
fn verify_minimum_rank_is_enforced() {
    let role = any_role();
    let action = any_action();
    let target: Option<Role> = if kani::any() { Some(any_role()) } else { None };
    let actor = Actor::new(UserId::new("a"), role);

    if authorize(&actor, action, target).is_allowed() {
        assert!(role.is_at_least(action.entry().min_actor_role));
    }
}
