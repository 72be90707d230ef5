use crate::proposal::{ProposalId, ProposalState, VotingType};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum VoteError {
    /// The selection cannot be turned into a vote for this proposal. Always
    /// detected locally, before anything is sent to the hub.
    #[error("invalid choice for proposal {proposal}: {reason}")]
    InvalidChoice {
        proposal: ProposalId,
        reason: InvalidChoiceReason,
    },

    #[error("proposal {id} has {choices} choices but {scores} scores")]
    InvalidProposal {
        id: ProposalId,
        choices: usize,
        scores: usize,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidChoiceReason {
    #[error("choice index {index} is out of range ({choices} choices)")]
    OutOfRange { index: usize, choices: usize },

    #[error("proposal is not active (state: {0})")]
    NotActive(ProposalState),

    #[error("allocation row has {actual} entries, expected {expected}")]
    RowLength { expected: usize, actual: usize },

    #[error("selection does not match the {0} voting type")]
    TypeMismatch(VotingType),

    #[error("voting type {0} is not supported")]
    UnsupportedType(VotingType),
}

impl VoteError {
    pub(crate) fn invalid_choice(proposal: &ProposalId, reason: InvalidChoiceReason) -> Self {
        VoteError::InvalidChoice {
            proposal: proposal.clone(),
            reason,
        }
    }
}
