//! Role-based proposal visibility.

use crate::models::proposal::Proposal;
use crate::models::user::{User, UserRole};

/// Project the proposals a user may see. Pure read-time filter: never mutates
/// the inputs, idempotent, and preserves the relative order of `proposals`.
///
/// Matching is a case-insensitive *substring* test of the acting user's name
/// (and, for supervisors, each team member's name) against each proposal's
/// denormalized `manager_name`. That is deliberate fidelity to the system
/// this replaces, false positives included: a manager named "Ana" sees
/// proposals for "Ana Vendas" but also for "Mariana Costa". Tightening this
/// to an exact or id-based match would change who sees what, so it stays.
pub fn filter_proposals(user: &User, directory: &[User], proposals: Vec<Proposal>) -> Vec<Proposal> {
    // Admins see everything.
    if user.is_admin || user.role == UserRole::Admin {
        return proposals;
    }

    if user.role == UserRole::Supervisor {
        let own_name = user.name.to_lowercase();
        let team_names: Vec<String> = directory
            .iter()
            .filter(|u| user.team_members.contains(&u.id))
            .map(|u| u.name.to_lowercase())
            .collect();

        return proposals
            .into_iter()
            .filter(|proposal| {
                let manager = proposal.manager_name.to_lowercase();
                manager.contains(&own_name)
                    || team_names.iter().any(|name| manager.contains(name))
            })
            .collect();
    }

    // Managers (and any future default) see only their own attributions.
    let own_name = user.name.to_lowercase();
    proposals
        .into_iter()
        .filter(|proposal| proposal.manager_name.to_lowercase().contains(&own_name))
        .collect()
}
