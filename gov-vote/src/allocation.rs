use crate::{
    error::{InvalidChoiceReason, VoteError},
    proposal::{Proposal, ProposalId},
};
use std::collections::{BTreeMap, HashSet};

/// Direction of a single allocation edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    Increment,
    Decrement,
}

/// Points a voter distributed over the choices of quadratic proposals.
///
/// Rows are keyed by proposal identifier, one non-negative entry per
/// choice. A row is created (all zeros) the first time its proposal is
/// encountered and dropped when the proposal is no longer listed.
///
/// There is no total points budget nor per choice ceiling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationMap {
    rows: BTreeMap<ProposalId, Vec<u32>>,
}

impl AllocationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self, proposal: &ProposalId) -> Option<&[u32]> {
        self.rows.get(proposal).map(Vec::as_slice)
    }

    /// the row of the proposal, or a zero row sized to its choices if the
    /// voter has not allocated anything yet.
    pub fn row_or_zeros(&self, proposal: &Proposal) -> Vec<u32> {
        self.rows
            .get(&proposal.id)
            .cloned()
            .unwrap_or_else(|| vec![0; proposal.choice_count()])
    }

    /// create the zero row of the proposal if it does not exist yet
    pub fn ensure_row(&mut self, proposal: &Proposal) -> &mut Vec<u32> {
        self.rows
            .entry(proposal.id.clone())
            .or_insert_with(|| vec![0; proposal.choice_count()])
    }

    /// apply the edit in place, see [`adjust_allocation`]
    pub fn adjust(
        &mut self,
        proposal: &Proposal,
        choice: usize,
        delta: Delta,
    ) -> Result<u32, VoteError> {
        let choices = proposal.choice_count();
        if choice >= choices {
            return Err(VoteError::invalid_choice(
                &proposal.id,
                InvalidChoiceReason::OutOfRange {
                    index: choice,
                    choices,
                },
            ));
        }

        let row = self.ensure_row(proposal);
        if row.len() != choices {
            // the proposal changed shape since the row was created
            row.resize(choices, 0);
        }

        let cell = &mut row[choice];
        *cell = match delta {
            Delta::Increment => cell.saturating_add(1),
            Delta::Decrement => cell.saturating_sub(1),
        };
        Ok(*cell)
    }

    /// forget the rows of every proposal that is not part of `proposals`
    pub fn retain_proposals(&mut self, proposals: &[Proposal]) {
        let listed: HashSet<&ProposalId> = proposals.iter().map(|p| &p.id).collect();
        self.rows.retain(|id, _| listed.contains(id));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProposalId, &[u32])> {
        self.rows.iter().map(|(id, row)| (id, row.as_slice()))
    }
}

/// move one cell of the allocation map by one point.
///
/// The given map is not modified, a new map is returned. Decrementing a
/// cell that is already at zero leaves it at zero; increments are not
/// bounded.
///
/// # errors
///
/// * the choice index is not one of the proposal's choices
///
#[must_use = "This function does not modify the map, the result contains the updated allocations"]
pub fn adjust_allocation(
    map: &AllocationMap,
    proposal: &Proposal,
    choice: usize,
    delta: Delta,
) -> Result<AllocationMap, VoteError> {
    let mut map = map.clone();
    map.adjust(proposal, choice, delta)?;
    Ok(map)
}
