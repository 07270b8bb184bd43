use serde::{Deserialize, Serialize};

/// The direction of a transaction's cash flow.
///
/// The store spells these exactly as the variants are written: `"Income"` and
/// `"Expense"`. Direction lives here and only here; amounts are unsigned
/// magnitudes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionKind);
serde_plain::derive_fromstr_from_deserialize!(TransactionKind);
