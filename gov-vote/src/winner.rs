use crate::proposal::Proposal;

/// index of the choice whose score is strictly greater than every other
/// score of the proposal.
///
/// Ties for the maximum, including the all-equal case, have no winner.
/// Every pair is compared: beating the next element is not enough.
pub fn compute_winner(proposal: &Proposal) -> Option<usize> {
    strict_maximum(&proposal.scores)
}

/// the winner to highlight in a view: only closed proposals have one.
pub fn display_winner(proposal: &Proposal) -> Option<usize> {
    if proposal.is_closed() {
        compute_winner(proposal)
    } else {
        None
    }
}

fn strict_maximum(scores: &[f64]) -> Option<usize> {
    scores.iter().enumerate().position(|(i, score)| {
        scores
            .iter()
            .enumerate()
            .all(|(j, other)| i == j || score > other)
    })
}
