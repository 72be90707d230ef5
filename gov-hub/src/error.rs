use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubError {
    #[error("request to the hub failed")]
    Http(#[from] reqwest::Error),

    #[error("hub answered with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("hub reported errors: {}", .0.join("; "))]
    Graphql(Vec<String>),

    #[error("hub response carries no data")]
    MissingData,

    #[error("cannot decode the hub response")]
    Decode(#[from] serde_json::Error),

    #[error("vote rejected by the hub: {0}")]
    Rejected(String),

    #[error("the wallet did not sign the vote: {0}")]
    Signer(String),

    #[error("invalid address {0:?}")]
    InvalidAddress(String),
}
