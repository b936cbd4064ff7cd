//! Defines the core data models for transaction records fetched from the
//! remote API.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    format_description::well_known::{Iso8601, Rfc3339},
};

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// Alias for the integer type used for user IDs.
pub type UserId = i64;

/// The category string the remote API uses to mark income records.
const INCOME_CATEGORY: &str = "income";

/// What a transaction was for.
///
/// The remote API stores the category as a free-form string where the
/// literal `"income"` marks money earned and every other value is an
/// expense label, e.g. "Groceries" or "Transport". Modelling this as a
/// closed variant keeps the income/expense branching in one place instead
/// of scattering string comparisons around the codebase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Money earned.
    Income,
    /// Money spent, labelled with the expense category name.
    Expense(String),
}

impl Category {
    /// Whether this is the income category.
    pub fn is_income(&self) -> bool {
        matches!(self, Category::Income)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        if value == INCOME_CATEGORY {
            Category::Income
        } else {
            Category::Expense(value)
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Income => INCOME_CATEGORY.to_owned(),
            Category::Expense(label) => label,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Income => write!(f, "{INCOME_CATEGORY}"),
            Category::Expense(label) => write!(f, "{label}"),
        }
    }
}

/// A date-time as received from the remote API.
///
/// The raw wire string is kept as-is so that records round-trip through the
/// API unchanged. [Timestamp::datetime] is `Some` only when the string
/// parses as a valid date-time; records with invalid timestamps still flow
/// through filtering and sorting, they are just excluded from date windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Timestamp {
    raw: String,
    parsed: Option<OffsetDateTime>,
}

impl Timestamp {
    /// Create a timestamp from a wire string.
    pub fn new(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }

    /// The parsed date-time, or `None` if the wire string is invalid.
    pub fn datetime(&self) -> Option<OffsetDateTime> {
        self.parsed
    }

    /// The calendar date of the timestamp, or `None` if invalid.
    pub fn date(&self) -> Option<Date> {
        self.parsed.map(|datetime| datetime.date())
    }

    /// The raw wire string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<String> for Timestamp {
    fn from(raw: String) -> Self {
        // Servers in the wild send both offset-qualified RFC 3339 strings
        // and bare ISO 8601 date-times. Bare date-times are assumed UTC.
        let parsed = OffsetDateTime::parse(&raw, &Rfc3339).ok().or_else(|| {
            PrimitiveDateTime::parse(&raw, &Iso8601::DEFAULT)
                .ok()
                .map(|datetime| datetime.assume_utc())
        });

        Self { raw, parsed }
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.raw
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(datetime: OffsetDateTime) -> Self {
        let raw = datetime
            .format(&Rfc3339)
            .expect("invalid RFC 3339 date-time");

        Self {
            raw,
            parsed: Some(datetime),
        }
    }
}

/// An expense or income item, i.e. an event where money was either spent or
/// earned, as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction. Unique and stable for the lifetime of the
    /// record.
    pub id: TransactionId,
    /// The ID of the user who owns this transaction.
    #[serde(rename = "user_id")]
    pub owner_id: UserId,
    /// A short human-readable name for the transaction.
    pub title: String,
    /// A longer text description of what the transaction was for.
    pub description: String,
    /// Whether this is income or an expense, and the expense label.
    pub category: Category,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// The ISO-like currency code, e.g. "NZD".
    pub currency: String,
    /// A link to the attached receipt image, if one was uploaded.
    #[serde(default)]
    pub receipt_image_url: Option<String>,
    /// When the transaction was recorded.
    pub created_at: Timestamp,
    /// When the transaction was last modified.
    pub updated_at: Timestamp,
}

/// The fields of a transaction the user can edit.
///
/// `id` is `None` for a record that has not been created on the server yet.
/// The remote source creates a new record for drafts without an ID and
/// updates the existing record otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    /// The ID of the record being edited, or `None` to create a new one.
    #[serde(skip)]
    pub id: Option<TransactionId>,
    /// A short human-readable name for the transaction.
    pub title: String,
    /// A longer text description of what the transaction was for.
    pub description: String,
    /// Whether this is income or an expense, and the expense label.
    pub category: Category,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// The ISO-like currency code, e.g. "NZD".
    pub currency: String,
    /// A link to the attached receipt image, if one was uploaded.
    pub receipt_image_url: Option<String>,
}

impl TransactionDraft {
    /// Create a draft pre-filled from an existing record, ready for editing.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            id: Some(transaction.id),
            title: transaction.title.clone(),
            description: transaction.description.clone(),
            category: transaction.category.clone(),
            amount: transaction.amount,
            currency: transaction.currency.clone(),
            receipt_image_url: transaction.receipt_image_url.clone(),
        }
    }
}
