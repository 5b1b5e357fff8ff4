use super::money::{Money, Percent};
use crate::error::{Result, ScenarioError};
use serde::{Deserialize, Serialize};

/// A read-only view of a revolving debt account, owned by the external account store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Identifier in the external account store, when the snapshot came from one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Current outstanding balance.
    pub balance: Money,
    /// Annual percentage rate, e.g. `18.99`.
    pub apr: Percent,
    /// Current minimum monthly payment.
    pub minimum_payment: Money,
    /// Credit limit, used only for the utilization timeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<Money>,
}

impl AccountSnapshot {
    pub fn new(balance: Money, apr: Percent, minimum_payment: Money) -> Self {
        Self {
            account_id: None,
            balance,
            apr,
            minimum_payment,
            credit_limit: None,
        }
    }

    pub fn with_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn with_credit_limit(mut self, credit_limit: Money) -> Self {
        self.credit_limit = Some(credit_limit);
        self
    }

    /// Checks the snapshot against the engine's input rules.
    pub fn validate(&self, max_apr: Percent, max_amount: Money) -> Result<()> {
        Money::bounded(self.balance.value(), max_amount, "account.balance")?;
        Money::bounded(self.minimum_payment.value(), max_amount, "account.minimum_payment")?;
        Percent::bounded(self.apr.value(), max_apr, "account.apr")?;
        if let Some(limit) = self.credit_limit {
            Money::bounded(limit.value(), max_amount, "account.credit_limit")?;
        }
        Ok(())
    }
}

/// How a debt scenario names its account: inline, or by id in the account store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountRef {
    Inline(AccountSnapshot),
    ById { account_id: String },
}

impl AccountRef {
    /// Returns the snapshot, or `NotFound` if the reference was never resolved.
    pub fn snapshot(&self) -> Result<&AccountSnapshot> {
        match self {
            AccountRef::Inline(snapshot) => Ok(snapshot),
            AccountRef::ById { account_id } => Err(ScenarioError::NotFound(format!(
                "no account snapshot available for account '{account_id}'"
            ))),
        }
    }
}

impl From<AccountSnapshot> for AccountRef {
    fn from(snapshot: AccountSnapshot) -> Self {
        AccountRef::Inline(snapshot)
    }
}

/// A recurring charge the user is considering cancelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionItem {
    pub name: String,
    pub monthly_amount: Money,
}

impl SubscriptionItem {
    pub fn new(name: impl Into<String>, monthly_amount: Money) -> Self {
        Self {
            name: name.into(),
            monthly_amount,
        }
    }

    pub fn validate(&self, max_amount: Money) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ScenarioError::validation("subscription name must not be blank"));
        }
        Money::bounded(
            self.monthly_amount.value(),
            max_amount,
            &format!("subscription '{}' monthly_amount", self.name),
        )?;
        Ok(())
    }
}
