//! Ownership rules for notes and comments.
//!
//! A record may be viewed or changed only by its owner. Everybody else is
//! told the record does not exist, so a non-owner cannot even learn that a
//! slug or id is in use. Anonymous viewers never reach this check: they are
//! sent to the login page first.

use crate::domain::UserId;

/// Records that belong to exactly one user.
pub trait Owned {
    fn owner(&self) -> UserId;
}

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    /// Answered as 404, never as 403.
    DenyNotFound,
}

/// Decides whether `viewer` may act on `record`.
pub fn check<R: Owned + ?Sized>(viewer: UserId, record: &R) -> Access {
    if record.owner() == viewer {
        Access::Allow
    } else {
        Access::DenyNotFound
    }
}

/// Looks up a record and applies the ownership check in one step.
///
/// Missing records and records owned by someone else both come back as
/// `None`, which keeps callers from treating the two cases differently.
pub fn owned_by<R: Owned>(viewer: UserId, record: Option<R>) -> Option<R> {
    record.filter(|r| check(viewer, r) == Access::Allow)
}
