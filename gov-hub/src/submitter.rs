use crate::{
    config::HubConfig,
    error::HubError,
    session::{Address, Signature, VoteSigner},
    typed_data::TypedVote,
};
use async_trait::async_trait;
use chrono::Utc;
use gov_vote::VoteSubmission;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Acknowledgement of an accepted vote.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Receipt {
    pub id: String,
    #[serde(default)]
    pub ipfs: Option<String>,
}

/// Casts signed votes on the governance network.
///
/// A call is a single attempt: implementations must not retry on their
/// own, the voter decides whether to try again.
#[async_trait]
pub trait VoteSubmitter: Send + Sync {
    async fn submit(
        &self,
        signer: &dyn VoteSigner,
        voter: &Address,
        space: &str,
        submission: &VoteSubmission,
    ) -> Result<Receipt, HubError>;
}

#[derive(Serialize)]
struct Envelope<'a> {
    address: &'a Address,
    sig: &'a Signature,
    data: &'a TypedVote,
}

#[derive(Deserialize)]
struct Rejection {
    error: Option<String>,
    error_description: Option<String>,
}

/// Posts signed votes to the hub's message endpoint.
pub struct HubSubmitter {
    client: Client,
    msg_url: String,
    app: String,
}

impl HubSubmitter {
    pub fn new(config: &HubConfig) -> Result<Self, HubError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config.msg_url(), config.app.clone()))
    }

    pub fn with_client(client: Client, msg_url: String, app: String) -> Self {
        HubSubmitter {
            client,
            msg_url,
            app,
        }
    }
}

#[async_trait]
impl VoteSubmitter for HubSubmitter {
    async fn submit(
        &self,
        signer: &dyn VoteSigner,
        voter: &Address,
        space: &str,
        submission: &VoteSubmission,
    ) -> Result<Receipt, HubError> {
        let timestamp = Utc::now().timestamp().max(0) as u64;
        let typed = TypedVote::new(voter, space, timestamp, submission, &self.app)?;
        let sig = signer.sign_vote(&typed).await?;

        debug!(proposal = %submission.proposal(), %voter, "posting vote");
        let response = self
            .client
            .post(&self.msg_url)
            .json(&Envelope {
                address: voter,
                sig: &sig,
                data: &typed,
            })
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let error = rejection(status, &body);
            warn!(proposal = %submission.proposal(), %error, "vote rejected");
            return Err(error);
        }

        let receipt: Receipt = serde_json::from_slice(&body)?;
        info!(proposal = %submission.proposal(), receipt = %receipt.id, "vote accepted");
        Ok(receipt)
    }
}

/// the hub explains refusals as `{"error": .., "error_description": ..}`
fn rejection(status: StatusCode, body: &[u8]) -> HubError {
    match serde_json::from_slice::<Rejection>(body) {
        Ok(Rejection {
            error_description: Some(description),
            ..
        }) => HubError::Rejected(description),
        Ok(Rejection {
            error: Some(error), ..
        }) => HubError::Rejected(error),
        _ => HubError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        },
    }
}
