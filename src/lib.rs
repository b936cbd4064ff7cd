//! Spendlog is a personal finance tracker: users record expenses and income
//! items, attach receipt images, and browse their transaction history.
//!
//! This library implements the transaction-list engine behind the history
//! screens: it owns the in-memory collection fetched from the remote API,
//! projects it into a filtered and sorted view, and keeps it consistent
//! with optimistic user actions (delete, edit, expand/collapse,
//! refresh-on-focus), rolling back when a mutation fails server-side.

#![warn(missing_docs)]

mod controller;
mod error;
mod expansion;
mod source;
mod transaction;

pub use controller::{
    Action, Command, DeleteTicket, EditorRoute, FetchTicket, ListController, ListState,
};
pub use error::Error;
pub use expansion::ExpansionState;
pub use source::{AuthToken, HttpTransactionSource, TransactionSource};
pub use transaction::{
    Category, SortKey, TimeWindow, Timestamp, Transaction, TransactionDraft, TransactionId, UserId,
    sort_transactions,
};
