use crate::models::{ConsentDecision, PairState};

/// Derive the state of a (freelancer, project) pair from the two consent
/// sides and the ledger.
///
/// An existing Match is terminal: consent rows may later flip but the ledger
/// is append-only, so the pair never downgrades. With no Match, a decline on
/// either side reads as Rejected; the other side may still approve later, but
/// no Match is created while the recorded state is negative.
pub fn derive_pair_state(
    freelancer_side: Option<ConsentDecision>,
    client_side: Option<ConsentDecision>,
    matched: bool,
) -> PairState {
    use ConsentDecision::{Approved, Declined};

    if matched {
        return PairState::Matched;
    }

    match (freelancer_side, client_side) {
        (Some(Declined), _) | (_, Some(Declined)) => PairState::Rejected,
        // Both approved without a ledger row is only observable between a
        // consent write and its ledger insert; the next approval on either
        // side converges it.
        (Some(Approved), _) => PairState::FreelancerInterested,
        (None, Some(Approved)) => PairState::ClientApproved,
        (None, None) => PairState::Undecided,
    }
}
