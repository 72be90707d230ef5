use crate::{
    error::{InvalidChoiceReason, VoteError},
    proposal::{Proposal, ProposalId, VotingType},
};
use serde::{
    ser::{SerializeMap, Serializer},
    Serialize,
};

/// What the voter picked, before validation against the proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// zero-based index of the chosen option
    Single(usize),
    /// the full allocation row of the proposal, one entry per choice
    Quadratic(Vec<u32>),
}

/// Choice value of a vote, in the shape the hub expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Choice {
    /// one-based choice number
    Single(u32),
    Quadratic(QuadraticChoice),
}

/// Points allocated per choice, serialised as a map from the one-based
/// choice number (as a string) to the points, in choice order. Choices
/// with no points are part of the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadraticChoice(Vec<u32>);

impl QuadraticChoice {
    pub fn get(&self, choice_number: &str) -> Option<u32> {
        let number: usize = choice_number.parse().ok()?;
        number
            .checked_sub(1)
            .and_then(|index| self.0.get(index))
            .copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = (String, u32)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(index, points)| ((index + 1).to_string(), *points))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for QuadraticChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (number, points) in self.entries() {
            map.serialize_entry(&number, &points)?;
        }
        map.end()
    }
}

/// A validated vote, ready to be signed and handed to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteSubmission {
    proposal: ProposalId,
    #[serde(rename = "type")]
    voting_type: VotingType,
    choice: Choice,
}

impl VoteSubmission {
    pub fn proposal(&self) -> &ProposalId {
        &self.proposal
    }

    pub fn voting_type(&self) -> &VotingType {
        &self.voting_type
    }

    pub fn choice(&self) -> &Choice {
        &self.choice
    }
}

/// validate the selection against the proposal and build the vote.
///
/// This is the only gate before a vote leaves for the hub; it has no side
/// effect and the same inputs always give the same submission.
///
/// # errors
///
/// fails with `InvalidChoice` if:
///
/// * the proposal is not active;
/// * a single choice index is out of range;
/// * a quadratic row does not have one entry per choice;
/// * the selection does not match the voting type of the proposal.
///
pub fn build_submission(
    proposal: &Proposal,
    selection: &Selection,
) -> Result<VoteSubmission, VoteError> {
    let invalid = |reason| VoteError::invalid_choice(&proposal.id, reason);

    if !proposal.is_active() {
        return Err(invalid(InvalidChoiceReason::NotActive(
            proposal.state.clone(),
        )));
    }

    let choices = proposal.choice_count();
    let choice = match (&proposal.voting_type, selection) {
        (VotingType::SingleChoice, Selection::Single(index)) => {
            if *index >= choices {
                return Err(invalid(InvalidChoiceReason::OutOfRange {
                    index: *index,
                    choices,
                }));
            }
            let number = u32::try_from(*index + 1).map_err(|_| {
                invalid(InvalidChoiceReason::OutOfRange {
                    index: *index,
                    choices,
                })
            })?;
            Choice::Single(number)
        }
        (VotingType::Quadratic, Selection::Quadratic(row)) => {
            if row.len() != choices {
                return Err(invalid(InvalidChoiceReason::RowLength {
                    expected: choices,
                    actual: row.len(),
                }));
            }
            Choice::Quadratic(QuadraticChoice(row.clone()))
        }
        (VotingType::Other(_), _) => {
            return Err(invalid(InvalidChoiceReason::UnsupportedType(
                proposal.voting_type.clone(),
            )))
        }
        (voting_type, _) => {
            return Err(invalid(InvalidChoiceReason::TypeMismatch(
                voting_type.clone(),
            )))
        }
    };

    Ok(VoteSubmission {
        proposal: proposal.id.clone(),
        voting_type: proposal.voting_type.clone(),
        choice,
    })
}
