//! # rolegate-rbac: the authorization core
//!
//! Decides, for a given actor role and action/target pair, whether the
//! action is permitted, independent of any UI or transport. Every
//! privileged dispatch in the console passes through this crate before a
//! request is issued; the API server re-validates everything server-side,
//! so client-side denial is advisory/UX-only and never the sole
//! enforcement point.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Dispatcher (CLI command, route handler)     │
//! └─────────────────┬───────────────────────────┘
//!                   │ actor snapshot + action + target role
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  AccessGate                                  │
//! │  ├─ unauthenticated short-circuit            │
//! │  └─ audit logging (grant/deny)               │
//! └─────────────────┬───────────────────────────┘
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  authorize()                                 │
//! │  ├─ catalog lookup (min role, target rule)   │
//! │  └─ action-specific rules                    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Roles
//!
//! | Role          | Rank | Protected target |
//! |---------------|------|------------------|
//! | user          | 0    | no               |
//! | basic_user    | 0    | no               |
//! | premium_user  | 0    | no               |
//! | moderator     | 1    | yes              |
//! | admin         | 2    | yes              |
//! | system_admin  | 3    | yes              |
//!
//! ## Examples
//!
//! ```
//! use rolegate_rbac::{authorize, Action, Actor, Decision, DenyReason, Role};
//!
//! let admin = Actor::new("u-1", Role::Admin);
//!
//! // Admins manage users...
//! assert_eq!(authorize(&admin, Action::ListUsers, None), Decision::Allowed);
//!
//! // ...but cannot touch staff roles,
//! assert_eq!(
//!     authorize(&admin, Action::ChangeUserRole, Some(Role::Moderator)),
//!     Decision::Denied(DenyReason::ProtectedRole)
//! );
//!
//! // and only a system admin mints new admins.
//! assert_eq!(
//!     authorize(&admin, Action::PromoteToAdmin, None),
//!     Decision::Denied(DenyReason::SystemAdminOnly)
//! );
//! ```
//!
//! The decision function is pure and synchronous: no I/O, no hidden state,
//! no panics. Identical inputs yield identical decisions, so it is safe to
//! call from any thread or callback.

pub mod action;
pub mod actor;
pub mod decision;
pub mod gate;
pub mod roles;

// Re-export commonly used types
pub use action::{Action, CatalogEntry, TargetConstraint, UnknownAction};
pub use actor::{Actor, ActorSource};
pub use decision::{authorize, authorize_named, authorize_role_change, Decision, DenyReason};
pub use gate::AccessGate;
pub use roles::{NoLowerRole, Role, UnknownRole};

// Kani proofs for bounded model checking
#[cfg(kani)]
mod kani_proofs;
