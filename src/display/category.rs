//! Category display formatting

use crate::models::Category;

use super::truncate;

/// Format categories as a table, one row per category
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<24}  {:<8}  {:<40}  {}\n",
        "Name", "Type", "ID", "Description"
    ));
    output.push_str(&"-".repeat(90));
    output.push('\n');

    for category in categories {
        output.push_str(&format!(
            "{}  {:<8}  {:<40}  {}\n",
            truncate(category.name(), 24),
            category.category_type().to_string(),
            category.id().to_string(),
            category.description().unwrap_or("")
        ));
    }

    output
}

/// Format category details
pub fn format_category_details(category: &Category, transaction_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name()));
    output.push_str(&format!("  ID:           {}\n", category.id()));
    output.push_str(&format!("  Type:         {}\n", category.category_type()));
    if let Some(description) = category.description() {
        output.push_str(&format!("  Description:  {}\n", description));
    }
    output.push_str(&format!("  Transactions: {}\n", transaction_count));

    output
}
