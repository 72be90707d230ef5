//! Interaction controller of the governance dashboard.
//!
//! [`Dashboard`] ties the proposal view model of `gov-vote` to the hub
//! collaborators of `gov-hub`: it loads the proposals of the space, keeps
//! the voter's quadratic allocations, casts votes one at a time per
//! proposal and refetches the tallies once a vote is accepted.

mod dashboard;
mod error;
mod state;

pub use crate::{
    dashboard::Dashboard,
    error::DashboardError,
    state::{Notice, Page, ProposalCard},
};
