//! Pure aggregation core for a finance dashboard: turns transaction records
//! fetched from an external store into period summaries (headline totals,
//! per-category expense groupings, and a daily volume series) without
//! performing any I/O of its own.

mod error;
pub mod model;
pub mod summary;

pub use error::Error;
pub use error::InvalidTransaction;
pub use error::Result;
pub use model::{Amount, Period, Transaction, TransactionKind, TransactionRecord, Transactions};
pub use summary::{filter_by_period, summarize, DailyTotal, PeriodSummary, UNCATEGORIZED};
