//! Income/expense summaries

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::{Category, CategoryId, CategoryType, Money, Transaction, TransactionType};

/// Income and expense totals for a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodTotals {
    /// Sum of income amounts
    pub income: Money,
    /// Sum of expense magnitudes (non-negative)
    pub expenses: Money,
    /// `income - expenses`
    pub net: Money,
}

/// Income and expenses of one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub income: Money,
    pub expenses: Money,
}

impl DailySummary {
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }
}

/// Total moved through one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category_id: CategoryId,
    pub category_name: String,
    pub category_type: CategoryType,
    pub total: Money,
}

/// Split a transaction into its (income, expense) contribution
fn contribution(txn: &Transaction) -> (Money, Money) {
    match txn.transaction_type() {
        TransactionType::Income => (txn.amount(), Money::zero()),
        TransactionType::Expense => (Money::zero(), txn.absolute_amount()),
        TransactionType::Transfer => (Money::zero(), Money::zero()),
    }
}

/// Totals over the given transactions, transfers excluded
pub fn period_totals(transactions: &[Transaction]) -> PeriodTotals {
    let (income, expenses) = transactions
        .iter()
        .filter(|t| !t.is_transfer())
        .map(contribution)
        .fold((Money::zero(), Money::zero()), |(i, e), (di, de)| (i + di, e + de));

    PeriodTotals {
        income,
        expenses,
        net: income - expenses,
    }
}

/// One summary per UTC calendar day that has income or expenses, oldest first
pub fn daily_summaries(transactions: &[Transaction]) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, (Money, Money)> = BTreeMap::new();

    for txn in transactions.iter().filter(|t| !t.is_transfer()) {
        let (income, expenses) = contribution(txn);
        let entry = days
            .entry(txn.occurred_on().date_naive())
            .or_insert((Money::zero(), Money::zero()));
        entry.0 += income;
        entry.1 += expenses;
    }

    days.into_iter()
        .map(|(date, (income, expenses))| DailySummary {
            date,
            income,
            expenses,
        })
        .collect()
}

/// Totals per category, largest first
///
/// Income categories sum signed amounts, everything else sums magnitudes.
/// Transactions whose category no longer exists are dropped.
pub fn category_summaries(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<CategorySummary> {
    let lookup: HashMap<CategoryId, &Category> = categories.iter().map(|c| (c.id(), c)).collect();
    let mut totals: HashMap<CategoryId, Money> = HashMap::new();

    for txn in transactions.iter().filter(|t| !t.is_transfer()) {
        let Some(category) = txn.category_id().and_then(|id| lookup.get(&id)) else {
            continue;
        };
        let value = match category.category_type() {
            CategoryType::Income => txn.amount(),
            CategoryType::Expense | CategoryType::Transfer => txn.absolute_amount(),
        };
        *totals.entry(category.id()).or_default() += value;
    }

    let mut summaries: Vec<CategorySummary> = totals
        .into_iter()
        .map(|(id, total)| {
            let category = lookup[&id];
            CategorySummary {
                category_id: id,
                category_name: category.name().to_string(),
                category_type: category.category_type(),
                total,
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, TransferGroupId};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn income(category: &Category, cents: i64, when: DateTime<Utc>) -> Transaction {
        Transaction::income(AccountId::new(), category.id(), Money::from_cents(cents), when, None)
            .unwrap()
    }

    fn expense(category: &Category, cents: i64, when: DateTime<Utc>) -> Transaction {
        Transaction::expense(AccountId::new(), category.id(), Money::from_cents(-cents), when, None)
            .unwrap()
    }

    fn transfer_leg(cents: i64, when: DateTime<Utc>) -> Transaction {
        Transaction::transfer_leg(
            AccountId::new(),
            AccountId::new(),
            TransferGroupId::new(),
            Money::from_cents(cents),
            when,
            None,
        )
        .unwrap()
    }

    fn fixtures() -> (Category, Category, Category) {
        (
            Category::new("Salary", CategoryType::Income, None).unwrap(),
            Category::new("Food", CategoryType::Expense, None).unwrap(),
            Category::new("Rent", CategoryType::Expense, None).unwrap(),
        )
    }

    #[test]
    fn test_period_totals_exclude_transfers() {
        let (salary, food, _) = fixtures();
        let transactions = vec![
            income(&salary, 100_000, at(1, 9)),
            expense(&food, 20_000, at(1, 12)),
            transfer_leg(-50_000, at(2, 9)),
            transfer_leg(50_000, at(2, 9)),
        ];

        let totals = period_totals(&transactions);
        assert_eq!(totals.income, Money::from_cents(100_000));
        assert_eq!(totals.expenses, Money::from_cents(20_000));
        assert_eq!(totals.net, totals.income - totals.expenses);
    }

    #[test]
    fn test_period_totals_empty() {
        assert_eq!(period_totals(&[]), PeriodTotals::default());
    }

    #[test]
    fn test_daily_summaries_group_and_sort() {
        let (salary, food, _) = fixtures();
        let transactions = vec![
            expense(&food, 500, at(3, 18)),
            income(&salary, 10_000, at(1, 9)),
            expense(&food, 1_500, at(1, 20)),
            transfer_leg(700, at(2, 9)),
        ];

        let days = daily_summaries(&transactions);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(days[0].income, Money::from_cents(10_000));
        assert_eq!(days[0].expenses, Money::from_cents(1_500));
        assert_eq!(days[0].net(), Money::from_cents(8_500));
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    }

    #[test]
    fn test_category_summaries_sorted_descending() {
        let (salary, food, rent) = fixtures();
        let transactions = vec![
            expense(&food, 3_000, at(1, 9)),
            expense(&food, 2_000, at(2, 9)),
            expense(&rent, 40_000, at(1, 9)),
            income(&salary, 90_000, at(1, 9)),
        ];

        let summaries = category_summaries(&transactions, &[salary, food, rent]);
        let names: Vec<_> = summaries.iter().map(|s| s.category_name.as_str()).collect();
        assert_eq!(names, ["Salary", "Rent", "Food"]);
        assert_eq!(summaries[2].total, Money::from_cents(5_000));
    }

    #[test]
    fn test_category_summaries_drop_deleted_categories() {
        let (salary, food, _) = fixtures();
        let transactions = vec![income(&salary, 1_000, at(1, 9)), expense(&food, 500, at(1, 9))];

        let summaries = category_summaries(&transactions, &[salary]);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].category_type, CategoryType::Income);
    }
}
