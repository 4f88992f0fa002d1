//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the database functions for storing, listing,
//!   updating and deleting transactions
//! - Request bodies that coerce loosely typed client input
//! - The JSON endpoints for the transaction collection and single transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;
mod input;
mod list_endpoint;
mod state;

pub use core::{Transaction, TransactionId, create_transaction_table, list_transactions};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;

#[cfg(test)]
pub use core::create_transaction;
