use crate::error::DashboardError;
use gov_hub::{Address, Eligibility, VotingPower};
use gov_vote::{
    build_submission, AllocationMap, Proposal, ProposalId, ProposalView, Selection, VoteRecord,
    VoteSubmission, VotingType,
};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Outcome of the last vote, shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    VoteAccepted,
    VoteFailed(String),
    Ineligible,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProposalCard {
    pub view: ProposalView,
    pub voting_power: Option<f64>,
    /// a vote for the proposal is being submitted, voting controls are
    /// disabled
    pub in_flight: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    ConnectWallet,
    Proposals {
        address: Address,
        /// `None` when no NFT holdings are configured
        eligibility: Option<Eligibility>,
        /// the last refresh failed, the proposals section is empty
        data_unavailable: bool,
        proposals: Vec<ProposalCard>,
    },
}

/// What the voter picks, resolved against the state when the vote is
/// built.
#[derive(Debug, Clone, Copy)]
pub(crate) enum SelectionKind {
    Single(usize),
    /// the voter's allocation row for the proposal
    Allocated,
}

#[derive(Debug, Default)]
pub(crate) struct DashboardState {
    pub(crate) proposals: Vec<Proposal>,
    pub(crate) data_unavailable: bool,
    pub(crate) allocations: AllocationMap,
    pub(crate) records: VoteRecord,
    pub(crate) in_flight: HashSet<ProposalId>,
    pub(crate) voting_power: HashMap<ProposalId, VotingPower>,
    pub(crate) notice: Option<Notice>,
    /// NFT balances of the last address they were read for
    pub(crate) eligibility: Option<(Address, Eligibility)>,
}

impl DashboardState {
    pub(crate) fn proposal(&self, id: &ProposalId) -> Option<&Proposal> {
        self.proposals.iter().find(|proposal| &proposal.id == id)
    }

    /// replace the listed proposals, forgetting everything kept for the
    /// proposals that are gone.
    ///
    /// Untallied proposals get a zero score per choice; proposals whose
    /// scores do not match their choices are left out.
    pub(crate) fn replace_proposals(&mut self, proposals: Vec<Proposal>) {
        let proposals: Vec<Proposal> = proposals
            .into_iter()
            .filter_map(|proposal| match proposal.validate() {
                Ok(proposal) => Some(proposal),
                Err(error) => {
                    warn!(%error, "skipping malformed proposal");
                    None
                }
            })
            .collect();

        self.allocations.retain_proposals(&proposals);
        self.records.retain_proposals(&proposals);
        self.voting_power
            .retain(|id, _| proposals.iter().any(|proposal| &proposal.id == id));

        for proposal in &proposals {
            if proposal.voting_type == VotingType::Quadratic {
                self.allocations.ensure_row(proposal);
            }
        }

        self.proposals = proposals;
        self.data_unavailable = false;
    }

    /// the listing could not be fetched. Allocations are kept so that
    /// the voter's edits survive a transient failure.
    pub(crate) fn mark_unavailable(&mut self) {
        self.proposals.clear();
        self.data_unavailable = true;
    }

    pub(crate) fn submission(
        &self,
        id: &ProposalId,
        kind: SelectionKind,
    ) -> Result<VoteSubmission, DashboardError> {
        let proposal = self.proposal(id).ok_or(DashboardError::UnknownProposal)?;
        let selection = match kind {
            SelectionKind::Single(index) => Selection::Single(index),
            SelectionKind::Allocated => {
                Selection::Quadratic(self.allocations.row_or_zeros(proposal))
            }
        };
        Ok(build_submission(proposal, &selection)?)
    }

    pub(crate) fn cards(&self, explorer_block_url: &str) -> Vec<ProposalCard> {
        self.proposals
            .iter()
            .map(|proposal| ProposalCard {
                view: ProposalView::new(
                    proposal,
                    &self.records,
                    &self.allocations,
                    explorer_block_url,
                ),
                voting_power: self.voting_power.get(&proposal.id).map(|power| power.vp),
                in_flight: self.in_flight.contains(&proposal.id),
            })
            .collect()
    }
}
