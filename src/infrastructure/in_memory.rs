use crate::domain::account::AccountSnapshot;
use crate::domain::ports::AccountStore;
use crate::error::{Result, ScenarioError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store of account snapshots keyed by `account_id`.
///
/// Clones share the same map.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<String, AccountSnapshot>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn store(&self, account: AccountSnapshot) -> Result<()> {
        let Some(id) = account.account_id.clone() else {
            return Err(ScenarioError::validation(
                "only accounts with an account_id can be stored",
            ));
        };
        let mut accounts = self.accounts.write().await;
        accounts.insert(id, account);
        Ok(())
    }

    async fn get(&self, account_id: &str) -> Result<Option<AccountSnapshot>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(account_id).cloned())
    }
}
