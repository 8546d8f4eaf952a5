//! Amount and currency extraction from normalized message text.

use std::ops::Range;

use regex::Regex;
use rust_decimal::Decimal;

use crate::{
    domain::Currency,
    errors::ParseError,
    taxonomy::Taxonomy,
};

/// Explicit sign found directly on the amount token.
///
/// A leading `+` is a strong income signal; a leading `-` only reinforces
/// the expense default. The magnitude itself stays non-negative either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignHint {
    Plus,
    Minus,
    None,
}

/// The amount token chosen from a message, before validation.
///
/// Lives only inside the pipeline and is dropped once the transaction is
/// built.
#[derive(Clone, Debug)]
pub struct ParsedAmount {
    /// Non-negative magnitude.
    pub amount: Decimal,
    /// Currency resolved from a unit token next to the number, if any.
    /// `None` means "use the configured default".
    pub currency: Option<Currency>,
    pub sign: SignHint,
    /// Byte range of the amount plus its unit in the normalized text.
    /// The description step cuts this range out.
    pub span: Range<usize>,
}

/// Currency unit tokens accepted directly after a number.
///
/// Longest alias first, so "рублей" is not eaten by "руб". A match must end
/// at a letter boundary: "р" fires in "150р" but not in "рядом".
const CURRENCY_ALIASES: &[(&str, Currency)] = &[
    ("рублей", Currency::Rub),
    ("рублями", Currency::Rub),
    ("рубля", Currency::Rub),
    ("рубли", Currency::Rub),
    ("рубль", Currency::Rub),
    ("руб", Currency::Rub),
    ("р", Currency::Rub),
    ("₽", Currency::Rub),
    ("долларов", Currency::Usd),
    ("доллара", Currency::Usd),
    ("доллары", Currency::Usd),
    ("доллар", Currency::Usd),
    ("долл", Currency::Usd),
    ("usd", Currency::Usd),
    ("$", Currency::Usd),
    ("евро", Currency::Eur),
    ("eur", Currency::Eur),
    ("€", Currency::Eur),
];

/// How many filler characters (whitespace, punctuation) may sit between the
/// number and its unit token.
const MAX_UNIT_GAP: usize = 3;

#[derive(Clone, Debug)]
struct NumberToken {
    digits: String,
    sign: SignHint,
    span: Range<usize>,
    unit: Option<Currency>,
}

/// Find the amount in normalized text, or explain why there is none.
///
/// Token selection: the first number with a currency unit wins; numbers with
/// units in two different currencies make the message ambiguous; when no
/// number carries a unit, the first number wins, but only if the message
/// shows financial context elsewhere (a direction marker or category stem),
/// so that bare quantities and dates are not mistaken for money.
pub fn extract_amount(text: &str, taxonomy: &Taxonomy) -> Result<ParsedAmount, ParseError> {
    let tokens = scan_numbers(text);
    if tokens.is_empty() {
        return Err(ParseError::NoAmountFound);
    }

    let mut with_unit = tokens.iter().filter(|t| t.unit.is_some());
    let chosen = match with_unit.next() {
        Some(first) => {
            let first_unit = first.unit;
            if with_unit.any(|t| t.unit != first_unit) {
                return Err(ParseError::AmbiguousAmount);
            }
            first
        }
        None => {
            if !taxonomy.has_financial_keyword(text) {
                return Err(ParseError::NoAmountFound);
            }
            &tokens[0]
        }
    };

    Ok(ParsedAmount {
        amount: parse_magnitude(&chosen.digits)?,
        currency: chosen.unit,
        sign: chosen.sign,
        span: chosen.span.clone(),
    })
}

fn scan_numbers(text: &str) -> Vec<NumberToken> {
    // Optional sign, grouped thousands ("1 500") or plain digits, optional
    // fraction with "." or ",".
    let number_re = Regex::new(r"[+-]?(?:\d{1,3}(?: \d{3})+|\d+)(?:[.,]\d+)?").expect("valid regex");

    let mut tokens = Vec::new();
    for m in number_re.find_iter(text) {
        let raw = m.as_str();
        let (sign, digits) = match raw.as_bytes()[0] {
            b'+' => (SignHint::Plus, &raw[1..]),
            b'-' => (SignHint::Minus, &raw[1..]),
            _ => (SignHint::None, raw),
        };

        let (unit, unit_end) = match find_unit(text, m.end()) {
            Some((currency, end)) => (Some(currency), end),
            None => (None, m.end()),
        };

        tokens.push(NumberToken {
            digits: digits.to_string(),
            sign,
            span: m.start()..unit_end,
            unit,
        });
    }
    tokens
}

/// Look for a currency alias just after a number, skipping at most
/// [`MAX_UNIT_GAP`] filler characters. Returns the currency and the byte
/// offset right past the alias.
fn find_unit(text: &str, from: usize) -> Option<(Currency, usize)> {
    let mut skipped = 0usize;
    let mut pos = from;
    for (off, ch) in text[from..].char_indices() {
        pos = from + off;
        if ch.is_alphanumeric() || ch == '₽' || ch == '$' || ch == '€' {
            break;
        }
        skipped += 1;
        if skipped > MAX_UNIT_GAP {
            return None;
        }
    }
    if pos >= text.len() {
        return None;
    }

    let rest = &text[pos..];
    for (alias, currency) in CURRENCY_ALIASES {
        if let Some(after) = rest.strip_prefix(alias) {
            let boundary_ok = match after.chars().next() {
                Some(c) => !c.is_alphabetic(),
                None => true,
            };
            if boundary_ok {
                return Some((*currency, pos + alias.len()));
            }
        }
    }
    None
}

fn parse_magnitude(digits: &str) -> Result<Decimal, ParseError> {
    let cleaned = digits.replace(' ', "").replace(',', ".");

    if let Some((_, frac)) = cleaned.split_once('.') {
        if frac.len() > 2 {
            return Err(ParseError::InvalidAmount {
                reason: format!("more than two decimal places in {cleaned:?}"),
            });
        }
    }

    cleaned
        .parse::<Decimal>()
        .map_err(|_| ParseError::InvalidAmount {
            reason: format!("not a representable number: {cleaned:?}"),
        })
}
