pub mod ledger;
pub mod record;

pub use ledger::{ExpenseLedger, Mode, Notice};
pub use record::ExpenseId;
