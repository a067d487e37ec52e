//! Wallet - a personal finance ledger
//!
//! Tracks money across accounts, records income, expenses and transfers
//! against categories, keeps every account balance non-negative, and
//! summarizes activity over a period.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, categories, transactions, money)
//! - `storage`: Repository traits and the JSON file store
//! - `services`: Business logic layer
//! - `reports`: Period totals and summaries
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `wallet` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use wallet::config::LedgerPaths;
//! use wallet::models::Money;
//! use wallet::services::AccountService;
//! use wallet::storage::Storage;
//!
//! let storage = Storage::new(LedgerPaths::new()?)?;
//! let accounts = AccountService::from_storage(&storage);
//! let main = accounts.create("Main", "UAH", Money::from_units(100)).await?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
