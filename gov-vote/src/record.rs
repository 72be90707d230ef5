use crate::proposal::{Proposal, ProposalId};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteStatus {
    /// the submission was handed to the hub and did not resolve yet
    Pending,
    /// the hub accepted the vote; the tally only reflects it after a refetch
    Accepted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedVote {
    /// one-based choice number, as sent to the hub
    pub choice: u32,
    pub status: VoteStatus,
}

/// Local echo of the single-choice votes cast from this session.
///
/// This is never a tally: displayed scores always come from the hub.
#[derive(Debug, Clone, Default)]
pub struct VoteRecord {
    votes: HashMap<ProposalId, RecordedVote>,
}

impl VoteRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// returns the vote it replaces, to put it back with
    /// [`restore`](Self::restore) if the new one does not go through
    pub fn mark_pending(&mut self, proposal: ProposalId, choice: u32) -> Option<RecordedVote> {
        self.votes.insert(
            proposal,
            RecordedVote {
                choice,
                status: VoteStatus::Pending,
            },
        )
    }

    pub fn restore(&mut self, proposal: ProposalId, vote: RecordedVote) {
        self.votes.insert(proposal, vote);
    }

    /// returns false if there was no pending vote for the proposal
    pub fn accept(&mut self, proposal: &ProposalId) -> bool {
        match self.votes.get_mut(proposal) {
            Some(vote) => {
                vote.status = VoteStatus::Accepted;
                true
            }
            None => false,
        }
    }

    pub fn discard(&mut self, proposal: &ProposalId) -> Option<RecordedVote> {
        self.votes.remove(proposal)
    }

    pub fn get(&self, proposal: &ProposalId) -> Option<&RecordedVote> {
        self.votes.get(proposal)
    }

    pub fn retain_proposals(&mut self, proposals: &[Proposal]) {
        let listed: HashSet<&ProposalId> = proposals.iter().map(|p| &p.id).collect();
        self.votes.retain(|id, _| listed.contains(id));
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}
