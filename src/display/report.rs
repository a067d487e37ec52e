//! Report display formatting

use chrono::{DateTime, Utc};

use crate::reports::{CategorySummary, DailySummary, PeriodTotals};

use super::format_date;

/// Format period totals
pub fn format_totals(totals: &PeriodTotals, from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Period: {} to {}\n",
        from.format("%Y-%m-%d"),
        to.format("%Y-%m-%d")
    ));
    output.push_str(&format!("  Income:   {:>14}\n", totals.income));
    output.push_str(&format!("  Expenses: {:>14}\n", totals.expenses));
    output.push_str(&format!("  {}\n", "-".repeat(24)));
    output.push_str(&format!("  Net:      {:>14}\n", totals.net));

    output
}

/// Format one row per day
pub fn format_daily_summary(days: &[DailySummary], date_format: &str) -> String {
    if days.is_empty() {
        return "No income or expenses in this period.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10}  {:>12}  {:>12}  {:>12}\n",
        "Date", "Income", "Expenses", "Net"
    ));
    output.push_str(&"-".repeat(52));
    output.push('\n');

    for day in days {
        output.push_str(&format!(
            "{:10}  {:>12}  {:>12}  {:>12}\n",
            format_date(day.date, date_format),
            day.income,
            day.expenses,
            day.net()
        ));
    }

    output
}

/// Format per-category totals, largest first
pub fn format_category_summary(summaries: &[CategorySummary]) -> String {
    if summaries.is_empty() {
        return "No categorized transactions in this period.\n".to_string();
    }

    let name_width = summaries
        .iter()
        .map(|s| s.category_name.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<8}  {:>12}\n",
        "Category",
        "Type",
        "Total",
        name_width = name_width
    ));
    output.push_str(&"-".repeat(name_width + 24));
    output.push('\n');

    for summary in summaries {
        output.push_str(&format!(
            "{:<name_width$}  {:<8}  {:>12}\n",
            summary.category_name,
            summary.category_type.to_string(),
            summary.total,
            name_width = name_width
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryType, Money};
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn test_format_totals() {
        let totals = PeriodTotals {
            income: Money::from_units(100),
            expenses: Money::from_units(40),
            net: Money::from_units(60),
        };
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();

        let output = format_totals(&totals, from, to);
        assert!(output.contains("2024-01-01 to 2024-01-31"));
        assert!(output.contains("60.00"));
    }

    #[test]
    fn test_format_daily_summary() {
        let days = vec![DailySummary {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            income: Money::from_units(10),
            expenses: Money::from_units(25),
        }];

        let output = format_daily_summary(&days, "%d.%m.%Y");
        assert!(output.contains("02.01.2024"));
        assert!(output.contains("-15.00"));
    }

    #[test]
    fn test_daily_summary_with_time_pattern_uses_iso_dates() {
        let days = vec![DailySummary {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            income: Money::from_units(10),
            expenses: Money::zero(),
        }];

        let output = format_daily_summary(&days, "%Y-%m-%d %H:%M");
        assert!(output.contains("2024-01-02"));
        assert!(output.contains("10.00"));
    }

    #[test]
    fn test_format_category_summary() {
        let summaries = vec![CategorySummary {
            category_id: CategoryId::new(),
            category_name: "Groceries".into(),
            category_type: CategoryType::Expense,
            total: Money::from_cents(4_299),
        }];

        let output = format_category_summary(&summaries);
        assert!(output.contains("Groceries"));
        assert!(output.contains("42.99"));
        assert!(format_category_summary(&[]).contains("No categorized"));
    }
}
