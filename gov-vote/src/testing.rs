//! Builders and generators for proposals, shared with the crates that test
//! against this one.

use crate::proposal::{Proposal, ProposalId, ProposalState, SpaceRef, VotingType};
use quickcheck::{Arbitrary, Gen};

pub const TEST_AUTHOR: &str = "0x1234567890abcdef1234567890abcdef12345678";
pub const TEST_START: i64 = 1_792_249_440;
pub const TEST_SPACE: &str = "jonomnom.eth";

pub struct ProposalBuilder {
    proposal: Proposal,
}

impl ProposalBuilder {
    pub fn new(choices: &[&str]) -> Self {
        ProposalBuilder {
            proposal: Proposal {
                id: ProposalId::new("proposal-0"),
                title: "Test proposal".to_string(),
                body: "Should the DAO do the thing?".to_string(),
                choices: choices.iter().map(|c| c.to_string()).collect(),
                voting_type: VotingType::SingleChoice,
                start: TEST_START,
                end: TEST_START + 7 * 24 * 3600,
                state: ProposalState::Active,
                scores: vec![0.0; choices.len()],
                scores_total: 0.0,
                scores_updated: TEST_START,
                snapshot: "18500000".to_string(),
                author: TEST_AUTHOR.to_string(),
                space: Some(SpaceRef {
                    id: TEST_SPACE.to_string(),
                    name: "Bots of Cog".to_string(),
                }),
            },
        }
    }

    pub fn with_choices(count: usize) -> Self {
        let labels: Vec<String> = (1..=count).map(|i| format!("Option {}", i)).collect();
        let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
        Self::new(&labels)
    }

    pub fn id(mut self, id: &str) -> Self {
        self.proposal.id = ProposalId::new(id);
        self
    }

    pub fn scores(mut self, scores: &[f64]) -> Self {
        self.proposal.scores = scores.to_vec();
        self.proposal.scores_total = scores.iter().sum();
        self
    }

    pub fn state(mut self, state: ProposalState) -> Self {
        self.proposal.state = state;
        self
    }

    pub fn voting_type(mut self, voting_type: VotingType) -> Self {
        self.proposal.voting_type = voting_type;
        self
    }

    pub fn quadratic(self) -> Self {
        self.voting_type(VotingType::Quadratic)
    }

    pub fn build(self) -> Proposal {
        self.proposal
    }
}

impl Arbitrary for ProposalState {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        match u8::arbitrary(g) % 4 {
            0 => ProposalState::Pending,
            1 => ProposalState::Active,
            2 => ProposalState::Closed,
            _ => ProposalState::Other("archived".to_string()),
        }
    }
}

impl Arbitrary for VotingType {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        match u8::arbitrary(g) % 3 {
            0 => VotingType::SingleChoice,
            1 => VotingType::Quadratic,
            _ => VotingType::Other("weighted".to_string()),
        }
    }
}

/// a well formed proposal: one score per choice, at least one choice
impl Arbitrary for Proposal {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let choices = 1 + usize::arbitrary(g) % 8;
        let scores: Vec<f64> = (0..choices).map(|_| u32::arbitrary(g) as f64).collect();
        ProposalBuilder::with_choices(choices)
            .id(&format!("0x{:08x}", u32::arbitrary(g)))
            .scores(&scores)
            .state(ProposalState::arbitrary(g))
            .voting_type(VotingType::arbitrary(g))
            .build()
    }
}
