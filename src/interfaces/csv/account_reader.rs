use crate::domain::account::AccountSnapshot;
use crate::domain::money::{Money, Percent};
use crate::error::{Result, ScenarioError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct AccountRecord {
    account_id: String,
    balance: Money,
    apr: Percent,
    minimum_payment: Money,
    #[serde(default)]
    credit_limit: Option<Money>,
}

impl TryFrom<AccountRecord> for AccountSnapshot {
    type Error = ScenarioError;

    fn try_from(record: AccountRecord) -> Result<Self> {
        if record.account_id.is_empty() {
            return Err(ScenarioError::validation("account_id must not be blank"));
        }
        let snapshot = AccountSnapshot::new(record.balance, record.apr, record.minimum_payment)
            .with_id(record.account_id);
        Ok(match record.credit_limit {
            Some(limit) => snapshot.with_credit_limit(limit),
            None => snapshot,
        })
    }
}

/// Reads account snapshots from a CSV source with the header
/// `account_id, balance, apr, minimum_payment[, credit_limit]`.
///
/// Whitespace is trimmed and the trailing `credit_limit` column may be left
/// out or empty.
pub struct AccountReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> AccountReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes one snapshot per row.
    pub fn accounts(self) -> impl Iterator<Item = Result<AccountSnapshot>> {
        self.reader
            .into_deserialize::<AccountRecord>()
            .map(|record| record.map_err(ScenarioError::from).and_then(AccountSnapshot::try_from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "account_id, balance, apr, minimum_payment, credit_limit\n\
                    visa, 5000, 18.99, 150, 10000\n\
                    amex, 3400.50, 22, 102,";
        let accounts: Vec<Result<AccountSnapshot>> =
            AccountReader::new(data.as_bytes()).accounts().collect();

        assert_eq!(accounts.len(), 2);
        let visa = accounts[0].as_ref().unwrap();
        assert_eq!(visa.account_id.as_deref(), Some("visa"));
        assert_eq!(visa.apr, Percent::new(dec!(18.99)));
        assert_eq!(visa.credit_limit, Some(Money::new(dec!(10000))));

        let amex = accounts[1].as_ref().unwrap();
        assert_eq!(amex.balance, Money::new(dec!(3400.50)));
        assert_eq!(amex.credit_limit, None);
    }

    #[test]
    fn test_reader_without_credit_limit_column() {
        let data = "account_id,balance,apr,minimum_payment\nvisa,5000,18.99,150";
        let accounts: Vec<_> = AccountReader::new(data.as_bytes()).accounts().collect();
        assert!(accounts[0].as_ref().unwrap().credit_limit.is_none());
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "account_id,balance,apr,minimum_payment\nvisa,lots,18.99,150\n,100,1,1";
        let accounts: Vec<_> = AccountReader::new(data.as_bytes()).accounts().collect();

        assert!(matches!(accounts[0], Err(ScenarioError::Csv(_))));
        assert!(matches!(accounts[1], Err(ScenarioError::Validation(_))));
    }
}
