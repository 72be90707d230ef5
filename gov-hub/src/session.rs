use crate::{error::HubError, typed_data::TypedVote};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr, sync::Arc};

const ADDRESS_SIZE: usize = 20;

/// An account address, `0x` followed by 20 hex encoded bytes.
///
/// The textual form is kept as given, checksum casing included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s
            .strip_prefix("0x")
            .ok_or_else(|| HubError::InvalidAddress(s.to_string()))?;
        match hex::decode(hex_part) {
            Ok(bytes) if bytes.len() == ADDRESS_SIZE => Ok(Address(s.to_string())),
            _ => Err(HubError::InvalidAddress(s.to_string())),
        }
    }
}

impl TryFrom<String> for Address {
    type Error = HubError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// hex encoded signature as produced by the wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Signature(pub String);

/// The wallet capability of signing typed data. The signature scheme is
/// entirely the wallet's business.
#[async_trait]
pub trait VoteSigner: Send + Sync {
    async fn sign_vote(&self, vote: &TypedVote) -> Result<Signature, HubError>;
}

/// The connected wallet, if any.
#[async_trait]
pub trait WalletSession: Send + Sync {
    /// `None` when no wallet is connected, the dashboard then only offers
    /// to connect one.
    async fn current_address(&self) -> Option<Address>;

    async fn signer(&self) -> Option<Arc<dyn VoteSigner>>;
}
