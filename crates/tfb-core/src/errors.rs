use rust_decimal::Decimal;

use crate::taxonomy::{Category, Direction};

/// Process-level error type.
///
/// Adapter crates (transport, ledger) should map their specific errors into
/// this type so failures can be handled consistently at the bot boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a message could not be turned into a transaction.
///
/// Every variant is recoverable at the message level: the pipeline returns it
/// as a value and the response collaborator picks the user-facing wording.
/// Parsing is deterministic, so none of these are worth retrying.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no amount found in message")]
    NoAmountFound,

    #[error("message mentions amounts in more than one currency")]
    AmbiguousAmount,

    #[error("invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("amount {amount} is above the limit of {limit}")]
    AmountOutOfRange { amount: Decimal, limit: Decimal },

    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("category {category:?} does not belong to direction {direction:?}")]
    CategoryMismatch {
        category: Category,
        direction: Direction,
    },
}

impl ParseError {
    /// Stable discriminant for collaborators that key wording off the kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoAmountFound => "no_amount_found",
            Self::AmbiguousAmount => "ambiguous_amount",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::AmountOutOfRange { .. } => "amount_out_of_range",
            Self::UnknownCurrency(_) => "unknown_currency",
            Self::CategoryMismatch { .. } => "category_mismatch",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinct() {
        let errs = [
            ParseError::NoAmountFound,
            ParseError::AmbiguousAmount,
            ParseError::InvalidAmount {
                reason: "x".to_string(),
            },
            ParseError::AmountOutOfRange {
                amount: Decimal::ONE,
                limit: Decimal::ZERO,
            },
            ParseError::UnknownCurrency("XYZ".to_string()),
            ParseError::CategoryMismatch {
                category: Category::Salary,
                direction: Direction::Expense,
            },
        ];
        let mut kinds: Vec<&str> = errs.iter().map(|e| e.kind()).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errs.len());
    }
}
