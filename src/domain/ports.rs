use super::account::AccountSnapshot;
use crate::error::Result;
use async_trait::async_trait;

/// Read side of the external account data layer.
///
/// The engine never calls this; the application service resolves account
/// references through it before a request reaches the engine.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn store(&self, account: AccountSnapshot) -> Result<()>;
    async fn get(&self, account_id: &str) -> Result<Option<AccountSnapshot>>;
}

pub type AccountStoreBox = Box<dyn AccountStore>;
