use crate::{
    allocation::AllocationMap,
    display,
    proposal::{Proposal, ProposalId, VotingType},
    record::VoteRecord,
    winner::display_winner,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    pub label: String,
    /// formatted score of the choice
    pub votes: String,
    /// the voter picked this choice from this session, or it won the
    /// (closed) proposal
    pub highlighted: bool,
    /// voting controls are only enabled while the proposal is active
    pub interactive: bool,
    /// points allocated by the voter, quadratic proposals only
    pub allocated: Option<u32>,
}

/// Everything a view shows for one proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalView {
    pub id: ProposalId,
    pub title: String,
    pub body: String,
    pub author: String,
    pub badge: String,
    pub voting_type: VotingType,
    pub winner: Option<usize>,
    pub choices: Vec<ChoiceView>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub snapshot: String,
    pub snapshot_link: String,
}

impl ProposalView {
    pub fn new(
        proposal: &Proposal,
        record: &VoteRecord,
        allocations: &AllocationMap,
        explorer_block_url: &str,
    ) -> Self {
        let winner = display_winner(proposal);
        let recorded = record.get(&proposal.id).map(|vote| vote.choice);
        let quadratic = proposal.voting_type == VotingType::Quadratic;
        let row = if quadratic {
            Some(allocations.row_or_zeros(proposal))
        } else {
            None
        };

        let choices = proposal
            .choices
            .iter()
            .zip(proposal.scores.iter())
            .enumerate()
            .map(|(index, (label, score))| {
                let number = index as u32 + 1;
                ChoiceView {
                    label: label.clone(),
                    votes: if quadratic {
                        display::format_quadratic_score(*score)
                    } else {
                        display::format_count(*score, 1)
                    },
                    highlighted: recorded == Some(number) || winner == Some(index),
                    interactive: proposal.is_active(),
                    allocated: row.as_ref().and_then(|row| row.get(index).copied()),
                }
            })
            .collect();

        ProposalView {
            id: proposal.id.clone(),
            title: proposal.title.clone(),
            body: proposal.body.clone(),
            author: display::shorten_address(&proposal.author),
            badge: display::state_badge(proposal.state.as_str()),
            voting_type: proposal.voting_type.clone(),
            winner,
            choices,
            start: display::format_timestamp(proposal.start),
            end: display::format_timestamp(proposal.end),
            snapshot: proposal.snapshot.clone(),
            snapshot_link: display::snapshot_link(explorer_block_url, &proposal.snapshot),
        }
    }
}
