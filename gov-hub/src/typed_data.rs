//! The structured vote message handed to the wallet for signing.
//!
//! The document follows the hub's EIP-712 layout (domain, types, message);
//! hashing and signing it is left to the wallet.

use crate::{error::HubError, session::Address};
use gov_vote::{Choice, VoteSubmission};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const DOMAIN_NAME: &str = "snapshot";
pub const DOMAIN_VERSION: &str = "0.1.4";
pub const PRIMARY_TYPE: &str = "Vote";

const PROPOSAL_HASH_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Domain {
    pub name: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedField {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoteMessage {
    pub from: Address,
    pub space: String,
    pub timestamp: u64,
    pub proposal: String,
    pub choice: Value,
    pub reason: String,
    pub app: String,
    pub metadata: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedVote {
    pub domain: Domain,
    pub types: BTreeMap<&'static str, Vec<TypedField>>,
    pub message: VoteMessage,
}

impl TypedVote {
    /// describe the vote of `voter` for signing.
    ///
    /// Single choice votes carry the one-based choice as a `uint32`;
    /// quadratic votes carry the allocation map serialised as a JSON
    /// `string`. Proposal identifiers that are 32 bytes hashes are typed
    /// `bytes32`, anything else is a `string`.
    pub fn new(
        voter: &Address,
        space: &str,
        timestamp: u64,
        submission: &VoteSubmission,
        app: &str,
    ) -> Result<Self, HubError> {
        let (choice, choice_kind) = match submission.choice() {
            Choice::Single(number) => (Value::from(*number), "uint32"),
            Choice::Quadratic(points) => (Value::from(serde_json::to_string(points)?), "string"),
        };

        let proposal = submission.proposal().as_str();
        let proposal_kind = if is_proposal_hash(proposal) {
            "bytes32"
        } else {
            "string"
        };

        let fields = vec![
            field("from", "address"),
            field("space", "string"),
            field("timestamp", "uint64"),
            field("proposal", proposal_kind),
            field("choice", choice_kind),
            field("reason", "string"),
            field("app", "string"),
            field("metadata", "string"),
        ];

        let mut types = BTreeMap::new();
        types.insert(PRIMARY_TYPE, fields);

        Ok(TypedVote {
            domain: Domain {
                name: DOMAIN_NAME,
                version: DOMAIN_VERSION,
            },
            types,
            message: VoteMessage {
                from: voter.clone(),
                space: space.to_string(),
                timestamp,
                proposal: proposal.to_string(),
                choice,
                reason: String::new(),
                app: app.to_string(),
                metadata: "{}".to_string(),
            },
        })
    }
}

fn field(name: &'static str, kind: &'static str) -> TypedField {
    TypedField { name, kind }
}

fn is_proposal_hash(proposal: &str) -> bool {
    proposal
        .strip_prefix("0x")
        .and_then(|hex_part| hex::decode(hex_part).ok())
        .map(|bytes| bytes.len() == PROPOSAL_HASH_SIZE)
        .unwrap_or(false)
}
