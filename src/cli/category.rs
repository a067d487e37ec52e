//! Category CLI commands

use clap::Subcommand;

use super::{find_category, parse_category_type};
use crate::display::category::{format_category_details, format_category_list};
use crate::error::LedgerResult;
use crate::services::{CategoryService, TransactionService};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Category type (income, expense, transfer)
        #[arg(short = 't', long = "type", default_value = "expense")]
        category_type: String,
        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List categories
    List {
        /// Only categories whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },
    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        category_type: Option<String>,
        /// New description (empty to clear)
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a category no transaction uses
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub async fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> LedgerResult<()> {
    let service = CategoryService::from_storage(storage);

    match cmd {
        CategoryCommands::Create {
            name,
            category_type,
            description,
        } => {
            let category_type = parse_category_type(&category_type)?;
            let category = service
                .create(&name, category_type, description.as_deref())
                .await?;

            println!("Created category: {}", category);
            println!("  ID: {}", category.id());
        }

        CategoryCommands::List { search } => {
            let categories = match search {
                Some(term) => service.search_by_name(&term).await?,
                None => service.get_all().await?,
            };
            println!("{}", format_category_list(&categories));
        }

        CategoryCommands::Show { category } => {
            let found = find_category(&service.get_all().await?, &category, None)?;
            let count = TransactionService::from_storage(storage)
                .get_by_category(found.id())
                .await?
                .len();
            print!("{}", format_category_details(&found, count));
        }

        CategoryCommands::Edit {
            category,
            name,
            category_type,
            description,
        } => {
            let found = find_category(&service.get_all().await?, &category, None)?;

            let category_type = match category_type {
                Some(t) => parse_category_type(&t)?,
                None => found.category_type(),
            };
            let description = match &description {
                Some(d) => Some(d.as_str()),
                None => found.description(),
            };

            let updated = service
                .update(
                    found.id(),
                    name.as_deref().unwrap_or(found.name()),
                    category_type,
                    description,
                )
                .await?;
            println!("Updated category: {}", updated);
        }

        CategoryCommands::Delete { category } => {
            let found = find_category(&service.get_all().await?, &category, None)?;
            service.delete(found.id()).await?;
            println!("Deleted category: {}", found);
        }
    }

    Ok(())
}
