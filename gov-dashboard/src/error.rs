use gov_hub::HubError;
use gov_vote::VoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    InvalidChoice(#[from] VoteError),

    #[error("the vote was not accepted")]
    SubmissionFailed(#[source] HubError),

    #[error("proposals are not available")]
    DataUnavailable(#[source] HubError),

    #[error("no wallet connected")]
    NotConnected,

    #[error("a vote for this proposal is already being submitted")]
    SubmissionInFlight,

    #[error("the proposal is not listed")]
    UnknownProposal,

    #[error("the wallet holds none of the gating collections")]
    Ineligible,
}
