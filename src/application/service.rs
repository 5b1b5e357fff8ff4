use crate::domain::account::AccountRef;
use crate::domain::ports::AccountStoreBox;
use crate::domain::scenario::{ScenarioRequest, ScenarioResult};
use crate::engine::ScenarioEngine;
use crate::error::{Result, ScenarioError};

/// Entry point for callers that name accounts by id.
pub struct ScenarioService {
    accounts: AccountStoreBox,
    engine: ScenarioEngine,
}

impl ScenarioService {
    pub fn new(accounts: AccountStoreBox, engine: ScenarioEngine) -> Self {
        Self { accounts, engine }
    }

    /// Resolves account references, then runs the request.
    ///
    /// Fails with `NotFound` before any computation if a referenced account is
    /// missing from the store.
    pub async fn run(&self, mut request: ScenarioRequest) -> Result<ScenarioResult> {
        for account in request.account_refs_mut() {
            if let AccountRef::ById { account_id } = account {
                let snapshot = self
                    .accounts
                    .get(account_id)
                    .await?
                    .ok_or_else(|| ScenarioError::NotFound(format!("account '{account_id}'")))?;
                *account = AccountRef::Inline(snapshot);
            }
        }
        self.engine.run(&request)
    }
}
