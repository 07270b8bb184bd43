//! Types that represent the core data model, such as `Transaction` and `Period`.
mod amount;
mod kind;
mod period;
mod transaction;

pub use amount::{Amount, ParseAmountError};
pub use kind::TransactionKind;
pub use period::Period;
pub use transaction::{Transaction, TransactionRecord, Transactions};
