//! Period reports
//!
//! Pure aggregations over a slice of transactions. Transfers move money
//! between the user's own accounts, so every report here leaves them out.

pub mod summary;

pub use summary::{category_summaries, daily_summaries, period_totals};
pub use summary::{CategorySummary, DailySummary, PeriodTotals};
