//! Domain entities - the core business objects.

mod category;
mod period;
mod summary;
mod transaction;
mod user;

pub use category::Category;
pub use period::Period;
pub use summary::{CategorySummary, MonthlyTotals, TransactionSummary, monthly_totals, summarize};
pub use transaction::{Transaction, TransactionType};
pub use user::User;
