use crate::{config::NftCollection, error::HubError, session::Address};
use async_trait::async_trait;
use tracing::warn;

/// Read access to NFT balances.
#[async_trait]
pub trait NftHoldings: Send + Sync {
    async fn balance_of(&self, collection: &NftCollection, owner: &Address)
        -> Result<u64, HubError>;
}

/// Balances of a voter in each of the gating collections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Eligibility {
    balances: Vec<(NftCollection, u64)>,
}

impl Eligibility {
    /// read the balance of `owner` in every collection. A balance that
    /// cannot be read counts as zero.
    pub async fn check<H: NftHoldings + ?Sized>(
        holdings: &H,
        collections: &[NftCollection],
        owner: &Address,
    ) -> Self {
        let mut balances = Vec::with_capacity(collections.len());
        for collection in collections {
            let balance = match holdings.balance_of(collection, owner).await {
                Ok(balance) => balance,
                Err(error) => {
                    warn!(collection = %collection.name, %error, "cannot read NFT balance");
                    0
                }
            };
            balances.push((collection.clone(), balance));
        }
        Eligibility { balances }
    }

    /// holds at least one token of any of the collections
    pub fn is_eligible(&self) -> bool {
        self.balances.iter().any(|(_, balance)| *balance > 0)
    }

    pub fn balances(&self) -> &[(NftCollection, u64)] {
        &self.balances
    }
}
