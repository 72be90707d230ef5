use crate::error::VoteError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a proposal as assigned by the governance hub.
///
/// Usually a `0x` prefixed 32 bytes hash, but older spaces use ipfs
/// hashes, so this is kept as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(String);

impl ProposalId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        ProposalId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProposalId {
    fn from(id: &str) -> Self {
        ProposalId::new(id)
    }
}

/// Voting system of a proposal. Tags this crate does not know how to build
/// votes for are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VotingType {
    SingleChoice,
    Quadratic,
    Other(String),
}

impl VotingType {
    pub fn as_str(&self) -> &str {
        match self {
            VotingType::SingleChoice => "single-choice",
            VotingType::Quadratic => "quadratic",
            VotingType::Other(tag) => tag,
        }
    }
}

impl From<String> for VotingType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "single-choice" => VotingType::SingleChoice,
            "quadratic" => VotingType::Quadratic,
            _ => VotingType::Other(tag),
        }
    }
}

impl From<VotingType> for String {
    fn from(voting_type: VotingType) -> Self {
        voting_type.as_str().to_string()
    }
}

impl fmt::Display for VotingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state reported by the hub.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProposalState {
    Pending,
    Active,
    Closed,
    Other(String),
}

impl ProposalState {
    pub fn as_str(&self) -> &str {
        match self {
            ProposalState::Pending => "pending",
            ProposalState::Active => "active",
            ProposalState::Closed => "closed",
            ProposalState::Other(state) => state,
        }
    }
}

impl From<String> for ProposalState {
    fn from(state: String) -> Self {
        match state.as_str() {
            "pending" => ProposalState::Pending,
            "active" => ProposalState::Active,
            "closed" => ProposalState::Closed,
            _ => ProposalState::Other(state),
        }
    }
}

impl From<ProposalState> for String {
    fn from(state: ProposalState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for ProposalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpaceRef {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A proposal as listed by the governance hub. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    pub choices: Vec<String>,
    #[serde(rename = "type")]
    pub voting_type: VotingType,
    pub start: i64,
    pub end: i64,
    pub state: ProposalState,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scores: Vec<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scores_total: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scores_updated: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub snapshot: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default)]
    pub space: Option<SpaceRef>,
}

impl Proposal {
    pub fn is_active(&self) -> bool {
        self.state == ProposalState::Active
    }

    pub fn is_closed(&self) -> bool {
        self.state == ProposalState::Closed
    }

    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }

    /// check the one structural invariant of a proposal: there is exactly
    /// one score per choice.
    ///
    /// Proposals that were not tallied yet come back from the hub without
    /// any score; those are given a zero score per choice.
    pub fn validate(mut self) -> Result<Self, VoteError> {
        if self.scores.is_empty() {
            self.scores = vec![0.0; self.choices.len()];
        }
        if self.scores.len() != self.choices.len() {
            return Err(VoteError::InvalidProposal {
                id: self.id,
                choices: self.choices.len(),
                scores: self.scores.len(),
            });
        }
        Ok(self)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
