pub mod category;
pub mod common;
pub mod ledger;
pub mod transaction;

pub use category::Category;
pub use common::Displayable;
pub use ledger::{Ledger, MonthKey};
pub use transaction::{Transaction, TransactionType};
