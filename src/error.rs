//! Error plumbing for the crate.
//!
//! Composite operations (batch validation, JSON ingestion) use the crate-wide
//! `anyhow` alias. The aggregation core itself fails in exactly one way, with
//! the concrete [`InvalidTransaction`] type, so callers can match on it.

use rust_decimal::Decimal;
use std::fmt;
use std::fmt::{Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// A malformed transaction record, rejected at the validation boundary.
///
/// Raised synchronously and local to a single call. There is no partial
/// success: one bad record fails the whole batch or summary, and callers that
/// want best-effort behavior must pre-filter their input.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidTransaction {
    /// The amount was negative. Direction of cash flow is carried by the kind
    /// field, never by the sign of the amount.
    NegativeAmount { id: String, amount: Decimal },
    /// The wire amount was not a finite number and cannot become a `Decimal`.
    BadAmount { id: String, value: f64 },
    /// The date string was not a calendar date.
    BadDate { id: String, value: String },
    /// The kind was neither `Income` nor `Expense`.
    UnknownKind { id: String, value: String },
}

impl Display for InvalidTransaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidTransaction::NegativeAmount { id, amount } => {
                write!(f, "transaction '{id}' has negative amount {amount}")
            }
            InvalidTransaction::BadAmount { id, value } => {
                write!(f, "transaction '{id}' has non-finite amount {value}")
            }
            InvalidTransaction::BadDate { id, value } => {
                write!(f, "transaction '{id}' has unparseable date '{value}'")
            }
            InvalidTransaction::UnknownKind { id, value } => {
                write!(
                    f,
                    "transaction '{id}' has unknown kind '{value}' (expected 'Income' or 'Expense')"
                )
            }
        }
    }
}

impl std::error::Error for InvalidTransaction {}
