//! The transaction record handed to collaborators.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Currency, MessageId, UserId},
    taxonomy::{Category, Direction},
};

/// One confirmed financial event.
///
/// Built exactly once per successfully parsed message and never mutated;
/// ownership moves to the ledger collaborator right after construction.
/// Construction goes through [`crate::validate::build_transaction`], which
/// enforces the amount/currency/category invariants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub direction: Direction,
    /// Strictly positive magnitude; the sign lives in `direction`.
    pub amount: Decimal,
    pub currency: Currency,
    pub category: Category,
    /// What remains of the message once amount and keyword tokens are
    /// stripped. May be empty.
    pub description: String,
    pub sender: UserId,
    pub timestamp: DateTime<Utc>,
    /// Transport id of the message this record came from.
    pub message_id: MessageId,
}

impl Transaction {
    /// Amount with the conventional sign: negative for expenses.
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Expense => -self.amount,
            Direction::Income => self.amount,
        }
    }

    /// Ledger worksheet key, one sheet per calendar month.
    pub fn month_key(&self) -> String {
        self.timestamp.format("%Y-%m").to_string()
    }

    /// The row appended to the monthly sheet. Column order is part of the
    /// persistence contract: timestamp, sender, direction, amount, category,
    /// description, source message id.
    pub fn to_ledger_row(&self) -> [String; 7] {
        [
            self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            self.sender.0.to_string(),
            self.direction.as_str().to_string(),
            self.amount.to_string(),
            self.category.label().to_string(),
            self.description.clone(),
            self.message_id.0.to_string(),
        ]
    }
}
