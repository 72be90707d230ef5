use crate::{error::HubError, session::Address};
use async_trait::async_trait;
use gov_vote::{Proposal, ProposalId, ProposalState};
use serde::Deserialize;

/// Which proposals of a space to list. The hub orders them by creation
/// date, most recent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalFilter {
    pub first: u32,
    pub skip: u32,
    pub state: Option<ProposalState>,
}

impl ProposalFilter {
    /// the `first` most recent proposals, whatever their state
    pub fn latest(first: u32) -> Self {
        ProposalFilter {
            first,
            skip: 0,
            state: None,
        }
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = skip;
        self
    }

    pub fn state(mut self, state: ProposalState) -> Self {
        self.state = Some(state);
        self
    }
}

/// Weight of a voter for one proposal, as computed by the hub from the
/// space's strategies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VotingPower {
    pub vp: f64,
    #[serde(default)]
    pub vp_by_strategy: Vec<f64>,
    /// `final` once the proposal's snapshot block is settled
    #[serde(default)]
    pub vp_state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Space {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

/// Read access to the governance hub.
#[async_trait]
pub trait GovernanceDataSource: Send + Sync {
    async fn list_proposals(
        &self,
        space: &str,
        filter: &ProposalFilter,
    ) -> Result<Vec<Proposal>, HubError>;

    async fn get_voting_power(
        &self,
        space: &str,
        voter: &Address,
        proposal: &ProposalId,
    ) -> Result<VotingPower, HubError>;

    /// `None` if the hub does not know the space
    async fn get_space(&self, space: &str) -> Result<Option<Space>, HubError>;
}
