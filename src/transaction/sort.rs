//! Sort order helpers for the transaction list.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::core::Transaction;

/// The order to sort the transaction list in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Most recently created first.
    DateLatest,
    /// Oldest first.
    DateEarliest,
    /// Largest amount first.
    AmountHighLow,
    /// Smallest amount first.
    AmountLowHigh,
}

impl SortKey {
    /// The sort order to use when the user has not picked one.
    pub fn default_preset() -> Self {
        Self::DateLatest
    }

    /// The kebab-case value used in queries and saved preferences.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::DateLatest => "date-latest",
            Self::DateEarliest => "date-earliest",
            Self::AmountHighLow => "amount-high-low",
            Self::AmountLowHigh => "amount-low-high",
        }
    }

    /// The label shown on the sort button for this key.
    pub fn label(self) -> &'static str {
        match self {
            Self::DateLatest => "Date (latest)",
            Self::DateEarliest => "Date (earliest)",
            Self::AmountHighLow => "Amount (high to low)",
            Self::AmountLowHigh => "Amount (low to high)",
        }
    }
}

/// Sort `transactions` by `key`, keeping the original order for ties.
///
/// The sort is stable, so sorting an already-sorted slice again with the
/// same key leaves it unchanged.
pub fn sort_transactions(transactions: &mut [&Transaction], key: SortKey) {
    transactions.sort_by(|a, b| compare(a, b, key));
}

/// Compare two transactions under `key`.
///
/// Records whose `created_at` does not parse order after every record whose
/// date is valid, so malformed records sink to the end rather than crashing
/// the sort. NaN amounts compare via IEEE total ordering for the same
/// reason.
fn compare(a: &Transaction, b: &Transaction, key: SortKey) -> Ordering {
    match key {
        SortKey::DateLatest | SortKey::DateEarliest => {
            match (a.created_at.datetime(), b.created_at.datetime()) {
                (Some(a), Some(b)) if key == SortKey::DateLatest => b.cmp(&a),
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }
        SortKey::AmountHighLow => b.amount.total_cmp(&a.amount),
        SortKey::AmountLowHigh => a.amount.total_cmp(&b.amount),
    }
}
