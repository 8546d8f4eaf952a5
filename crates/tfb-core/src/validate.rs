//! Final checks and construction of the immutable transaction record.

use rust_decimal::Decimal;

use crate::{
    config::Config,
    domain::{Currency, RawMessage},
    errors::ParseError,
    extract::ParsedAmount,
    taxonomy::{Category, Direction},
    transaction::Transaction,
    utils::truncate_chars,
};

/// Validate the parsed pieces and assemble the transaction.
///
/// Checks run in a fixed order: amount bounds, currency resolution, then the
/// category/direction invariant. The first failure wins.
pub fn build_transaction(
    raw: &RawMessage,
    parsed: &ParsedAmount,
    direction: Direction,
    category: Category,
    description: String,
    config: &Config,
) -> Result<Transaction, ParseError> {
    let amount = check_amount(parsed.amount, config)?;
    let currency = resolve_currency(parsed.currency, config)?;

    // A category outside its direction's set means the classifier broke its
    // own contract; surfaced as a typed error instead of a panic so one bad
    // message cannot take the bot down.
    if category.direction() != direction {
        return Err(ParseError::CategoryMismatch {
            category,
            direction,
        });
    }

    Ok(Transaction {
        direction,
        amount,
        currency,
        category,
        description: truncate_chars(description.trim(), config.max_description_len),
        sender: raw.sender,
        timestamp: raw.received_at,
        message_id: raw.message_id,
    })
}

fn check_amount(amount: Decimal, config: &Config) -> Result<Decimal, ParseError> {
    if amount <= Decimal::ZERO {
        return Err(ParseError::InvalidAmount {
            reason: format!("amount must be positive, got {amount}"),
        });
    }
    if amount < config.min_amount {
        return Err(ParseError::InvalidAmount {
            reason: format!("amount {amount} is below the minimum of {}", config.min_amount),
        });
    }
    // The ceiling itself is still a valid amount.
    if amount > config.max_amount {
        return Err(ParseError::AmountOutOfRange {
            amount,
            limit: config.max_amount,
        });
    }
    Ok(amount)
}

fn resolve_currency(unit: Option<Currency>, config: &Config) -> Result<Currency, ParseError> {
    match unit {
        Some(currency) => Ok(currency),
        None => config
            .default_currency
            .parse::<Currency>()
            .map_err(|_| ParseError::UnknownCurrency(config.default_currency.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessageId, UserId},
        extract::SignHint,
    };
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn raw(text: &str) -> RawMessage {
        RawMessage {
            text: text.to_string(),
            sender: UserId(7),
            message_id: MessageId(99),
            received_at: Utc::now(),
        }
    }

    fn parsed(amount: Decimal, currency: Option<Currency>) -> ParsedAmount {
        ParsedAmount {
            amount,
            currency,
            sign: SignHint::None,
            span: 0..0,
        }
    }

    fn build(
        amount: Decimal,
        currency: Option<Currency>,
        config: &Config,
    ) -> Result<Transaction, ParseError> {
        build_transaction(
            &raw("x"),
            &parsed(amount, currency),
            Direction::Expense,
            Category::Groceries,
            String::new(),
            config,
        )
    }

    #[test]
    fn zero_amount_is_invalid() {
        let err = build(dec!(0), Some(Currency::Rub), &Config::default()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAmount { .. }));
    }

    #[test]
    fn ceiling_is_inclusive() {
        let cfg = Config::default();
        let tx = build(cfg.max_amount, Some(Currency::Rub), &cfg).unwrap();
        assert_eq!(tx.amount, cfg.max_amount);

        let err = build(cfg.max_amount + dec!(1), Some(Currency::Rub), &cfg).unwrap_err();
        assert_eq!(
            err,
            ParseError::AmountOutOfRange {
                amount: cfg.max_amount + dec!(1),
                limit: cfg.max_amount,
            }
        );
    }

    #[test]
    fn below_minimum_is_invalid() {
        let err = build(dec!(0.001), Some(Currency::Rub), &Config::default()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAmount { .. }));
    }

    #[test]
    fn missing_unit_falls_back_to_default_currency() {
        let tx = build(dec!(100), None, &Config::default()).unwrap();
        assert_eq!(tx.currency, Currency::Rub);
    }

    #[test]
    fn unresolvable_default_currency_is_reported() {
        let cfg = Config {
            default_currency: "XYZ".to_string(),
            ..Config::default()
        };
        let err = build(dec!(100), None, &cfg).unwrap_err();
        assert_eq!(err, ParseError::UnknownCurrency("XYZ".to_string()));

        // An explicit unit does not touch the default at all.
        let tx = build(dec!(100), Some(Currency::Usd), &cfg).unwrap();
        assert_eq!(tx.currency, Currency::Usd);
    }

    #[test]
    fn category_outside_direction_is_an_internal_error() {
        let err = build_transaction(
            &raw("x"),
            &parsed(dec!(100), Some(Currency::Rub)),
            Direction::Income,
            Category::Groceries,
            String::new(),
            &Config::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ParseError::CategoryMismatch {
                category: Category::Groceries,
                direction: Direction::Income,
            }
        );
    }

    #[test]
    fn long_descriptions_are_cut_not_rejected() {
        let cfg = Config::default();
        let long = "о".repeat(cfg.max_description_len + 50);
        let tx = build_transaction(
            &raw("x"),
            &parsed(dec!(100), Some(Currency::Rub)),
            Direction::Expense,
            Category::OtherExpense,
            long,
            &cfg,
        )
        .unwrap();
        assert_eq!(tx.description.chars().count(), cfg.max_description_len);
    }
}
