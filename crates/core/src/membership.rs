//! Project membership reconciliation.
//!
//! The binding screen shows the users currently bound to a project and lets
//! the operator pick a new selection. [`reconcile`] turns the two sets into
//! the add/remove operations that converge the backend onto the selection.
//! The project owner is always a member and is never part of either set.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::project::DirectoryUser;
use crate::types::DbId;

/// Operations needed to move a project's membership to a new selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MembershipPlan {
    pub to_add: BTreeSet<DbId>,
    pub to_remove: BTreeSet<DbId>,
}

impl MembershipPlan {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Compute `selected - current` (to add) and `current - selected` (to remove).
///
/// Callers are expected to strip `owner_id` from both inputs. If they do not,
/// the owner is still filtered out of the result.
pub fn reconcile(
    current: &BTreeSet<DbId>,
    selected: &BTreeSet<DbId>,
    owner_id: DbId,
) -> MembershipPlan {
    let to_add = selected
        .difference(current)
        .copied()
        .filter(|&id| id != owner_id)
        .collect();
    let to_remove = current
        .difference(selected)
        .copied()
        .filter(|&id| id != owner_id)
        .collect();

    MembershipPlan { to_add, to_remove }
}

/// Ids of the given members, minus the owner.
pub fn members_excluding_owner(members: &[DirectoryUser], owner_id: DbId) -> BTreeSet<DbId> {
    members
        .iter()
        .map(|u| u.id)
        .filter(|&id| id != owner_id)
        .collect()
}
