//! The transaction types, and the boundary where loosely typed wire rows
//! become validated records.

use crate::error::InvalidTransaction;
use crate::model::{Amount, Period, TransactionKind};
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A transaction row exactly as the external store returns it: string-typed
/// fields and a bare JSON number for the amount.
///
/// This is the only shape in which unvalidated data exists. Everything
/// downstream works on [`Transaction`], produced by the fallible `TryFrom`
/// conversion below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionRecord {
    #[serde(rename = "TransactionID", default)]
    pub transaction_id: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(default)]
    pub category: String,
}

/// One validated financial event.
///
/// Invariant: `amount >= 0`. Direction is carried by `kind`, never by the
/// sign of the amount. An empty `category` is legal and groups under the
/// reserved "Uncategorized" key at aggregation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    /// Opaque identifier assigned by the external store.
    #[serde(rename = "TransactionID")]
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub amount: Amount,
    #[serde(rename = "Type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: String,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = InvalidTransaction;

    fn try_from(record: TransactionRecord) -> std::result::Result<Self, Self::Error> {
        let date = record
            .date
            .parse::<NaiveDate>()
            .map_err(|_| InvalidTransaction::BadDate {
                id: record.transaction_id.clone(),
                value: record.date.clone(),
            })?;
        let kind =
            record
                .kind
                .parse::<TransactionKind>()
                .map_err(|_| InvalidTransaction::UnknownKind {
                    id: record.transaction_id.clone(),
                    value: record.kind.clone(),
                })?;
        let value =
            Decimal::try_from(record.amount).map_err(|_| InvalidTransaction::BadAmount {
                id: record.transaction_id.clone(),
                value: record.amount,
            })?;
        let amount = Amount::new(value);
        if amount.is_negative() {
            return Err(InvalidTransaction::NegativeAmount {
                id: record.transaction_id,
                amount: value,
            });
        }
        Ok(Transaction {
            id: record.transaction_id,
            date,
            description: record.description,
            amount,
            kind,
            category: record.category,
        })
    }
}

/// An owned collection of validated transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transactions {
    data: Vec<Transaction>,
}

impl Transactions {
    /// Validates a batch of wire records.
    ///
    /// All-or-nothing: the first malformed row fails the whole batch, with
    /// the row index in the error context and the [`InvalidTransaction`]
    /// underneath it.
    pub fn from_records(records: impl IntoIterator<Item = TransactionRecord>) -> Result<Self> {
        let mut data = Vec::new();
        for (row_ix, record) in records.into_iter().enumerate() {
            let transaction = Transaction::try_from(record)
                .with_context(|| format!("Invalid transaction at row {row_ix}"))?;
            data.push(transaction);
        }
        debug!("validated {} transaction records", data.len());
        Ok(Self { data })
    }

    /// Parses the store's list response: a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<TransactionRecord> =
            serde_json::from_str(json).context("Failed to parse transaction list JSON")?;
        Self::from_records(records)
    }

    pub fn data(&self) -> &[Transaction] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The month/year of the most recent transaction, if any.
    ///
    /// The dashboard's overview defaults its reporting period to this.
    pub fn latest_period(&self) -> Option<Period> {
        self.data.iter().map(|t| t.date).max().map(Period::of)
    }
}

impl From<Vec<Transaction>> for Transactions {
    fn from(data: Vec<Transaction>) -> Self {
        Self { data }
    }
}

impl<'a> IntoIterator for &'a Transactions {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
