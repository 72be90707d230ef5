//! Client side of the governance hub: the interfaces of the collaborators
//! the dashboard talks to (proposal source, wallet session, vote submitter,
//! NFT holdings) and their implementations over the hub's HTTP APIs.

pub mod config;
mod eligibility;
mod error;
pub mod graphql;
mod session;
mod source;
mod submitter;
pub mod typed_data;

pub use crate::{
    config::{ConfigError, HubConfig, NftCollection},
    eligibility::{Eligibility, NftHoldings},
    error::HubError,
    graphql::GraphqlDataSource,
    session::{Address, Signature, VoteSigner, WalletSession},
    source::{GovernanceDataSource, ProposalFilter, Space, VotingPower},
    submitter::{HubSubmitter, Receipt, VoteSubmitter},
    typed_data::TypedVote,
};
