//! Proposal view model for an NFT-gated governance dashboard.
//!
//! Everything in this crate is synchronous and side-effect free: it turns
//! proposal records fetched from the governance hub (and the voter's local
//! selections) into the values a view needs, and into validated vote
//! submissions ready to be signed and sent.

mod allocation;
pub mod display;
mod error;
mod proposal;
mod record;
mod submission;
mod view;
mod winner;

#[cfg(any(test, feature = "property-test-api"))]
pub mod testing;

pub use crate::{
    allocation::{adjust_allocation, AllocationMap, Delta},
    error::{InvalidChoiceReason, VoteError},
    proposal::{Proposal, ProposalId, ProposalState, SpaceRef, VotingType},
    record::{RecordedVote, VoteRecord, VoteStatus},
    submission::{build_submission, Choice, QuadraticChoice, Selection, VoteSubmission},
    view::{ChoiceView, ProposalView},
    winner::{compute_winner, display_winner},
};
