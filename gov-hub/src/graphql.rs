//! [`GovernanceDataSource`] over the hub's GraphQL endpoint.

use crate::{
    config::HubConfig,
    error::HubError,
    session::Address,
    source::{GovernanceDataSource, ProposalFilter, Space, VotingPower},
};
use async_trait::async_trait;
use gov_vote::{Proposal, ProposalId};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

pub const PROPOSALS_QUERY: &str = r#"query Proposals($space: String!, $first: Int!, $skip: Int!, $state: String) {
  proposals(
    first: $first
    skip: $skip
    where: { space_in: [$space], state: $state }
    orderBy: "created"
    orderDirection: desc
  ) {
    id
    title
    body
    choices
    start
    end
    snapshot
    state
    scores
    scores_total
    scores_updated
    author
    space {
      id
      name
    }
    type
  }
}"#;

pub const VOTING_POWER_QUERY: &str = r#"query VotingPower($space: String!, $voter: String!, $proposal: String!) {
  vp(space: $space, voter: $voter, proposal: $proposal) {
    vp
    vp_by_strategy
    vp_state
  }
}"#;

pub const SPACE_QUERY: &str = r#"query Space($id: String!) {
  space(id: $id) {
    id
    name
    about
    network
    symbol
    members
  }
}"#;

#[derive(Serialize)]
struct Request<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Deserialize)]
struct Response<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ErrorMessage>,
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: String,
}

#[derive(Deserialize)]
struct ProposalsData {
    proposals: Option<Vec<Proposal>>,
}

#[derive(Deserialize)]
struct VotingPowerData {
    vp: Option<VotingPower>,
}

#[derive(Deserialize)]
struct SpaceData {
    space: Option<Space>,
}

pub struct GraphqlDataSource {
    client: Client,
    endpoint: String,
}

impl GraphqlDataSource {
    pub fn new(config: &HubConfig) -> Result<Self, HubError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config.graphql_url.clone()))
    }

    pub fn with_client(client: Client, endpoint: String) -> Self {
        GraphqlDataSource { client, endpoint }
    }

    async fn query<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: Value,
    ) -> Result<T, HubError> {
        debug!(operation, endpoint = %self.endpoint, "querying the hub");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&Request { query, variables })
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return decode_response(&body);
        }

        // query errors may come with a 4xx, keep the hub's own messages
        match decode_response::<T>(&body) {
            Err(HubError::Graphql(errors)) => Err(HubError::Graphql(errors)),
            _ => Err(HubError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            }),
        }
    }
}

#[async_trait]
impl GovernanceDataSource for GraphqlDataSource {
    async fn list_proposals(
        &self,
        space: &str,
        filter: &ProposalFilter,
    ) -> Result<Vec<Proposal>, HubError> {
        let variables = proposals_variables(space, filter);
        let data: ProposalsData = self.query("proposals", PROPOSALS_QUERY, variables).await?;
        Ok(keep_well_formed(data.proposals.unwrap_or_default()))
    }

    async fn get_voting_power(
        &self,
        space: &str,
        voter: &Address,
        proposal: &ProposalId,
    ) -> Result<VotingPower, HubError> {
        let variables = json!({
            "space": space,
            "voter": voter.as_str(),
            "proposal": proposal.as_str(),
        });
        let data: VotingPowerData = self
            .query("voting_power", VOTING_POWER_QUERY, variables)
            .await?;
        data.vp.ok_or(HubError::MissingData)
    }

    async fn get_space(&self, space: &str) -> Result<Option<Space>, HubError> {
        let data: SpaceData = self
            .query("space", SPACE_QUERY, json!({ "id": space }))
            .await?;
        Ok(data.space)
    }
}

pub(crate) fn proposals_variables(space: &str, filter: &ProposalFilter) -> Value {
    json!({
        "space": space,
        "first": filter.first,
        "skip": filter.skip,
        "state": filter.state.as_ref().map(|state| state.as_str()),
    })
}

/// decode a GraphQL response body: the `data` member, unless the hub
/// reported errors.
pub(crate) fn decode_response<T: DeserializeOwned>(body: &[u8]) -> Result<T, HubError> {
    let response: Response<T> = serde_json::from_slice(body)?;
    if !response.errors.is_empty() {
        return Err(HubError::Graphql(
            response.errors.into_iter().map(|e| e.message).collect(),
        ));
    }
    response.data.ok_or(HubError::MissingData)
}

/// drop, with a warning, the proposals that do not have one score per
/// choice
pub(crate) fn keep_well_formed(proposals: Vec<Proposal>) -> Vec<Proposal> {
    proposals
        .into_iter()
        .filter_map(|proposal| match proposal.validate() {
            Ok(proposal) => Some(proposal),
            Err(error) => {
                warn!(%error, "skipping malformed proposal");
                None
            }
        })
        .collect()
}
