//! The message-to-transaction pipeline.
//!
//! One pure, synchronous pass per message: normalize, extract the amount,
//! classify, derive the description, validate and build. No shared state, no
//! I/O; concurrent calls need no coordination.

use crate::{
    classify::classify,
    config::Config,
    domain::RawMessage,
    errors::ParseError,
    extract::{extract_amount, ParsedAmount},
    taxonomy::{Category, Direction, Taxonomy},
    transaction::Transaction,
    utils::normalize_text,
    validate::build_transaction,
};

/// Words dropped from descriptions: prepositions and conjunctions that carry
/// no meaning once the amount and keywords are gone.
const STOP_WORDS: &[&str] = &[
    "на", "в", "за", "для", "с", "по", "от", "до", "из", "к", "у", "о", "об", "и", "а", "но",
    "или", "что", "это",
];

/// Parse one message into a transaction, or a typed rejection.
///
/// The only entry point collaborators need. Deterministic: the same text
/// always yields the same outcome, so failures are never retried here.
pub fn parse_message(
    raw: &RawMessage,
    config: &Config,
    taxonomy: &Taxonomy,
) -> Result<Transaction, ParseError> {
    let text = normalize_text(&raw.text);
    let parsed = extract_amount(&text, taxonomy)?;
    let (direction, category) = classify(&text, parsed.sign, taxonomy);
    let description = clean_description(&text, &parsed, direction, category, taxonomy);
    build_transaction(raw, &parsed, direction, category, description, config)
}

/// What's left of the message once the amount span, the direction markers,
/// the matched category stems and the stop words are removed. Often empty,
/// and that's fine; the ledger shows the category either way.
fn clean_description(
    text: &str,
    parsed: &ParsedAmount,
    direction: Direction,
    category: Category,
    taxonomy: &Taxonomy,
) -> String {
    let mut remainder = String::with_capacity(text.len());
    remainder.push_str(&text[..parsed.span.start]);
    remainder.push(' ');
    remainder.push_str(&text[parsed.span.end..]);

    let markers = match direction {
        Direction::Income => taxonomy.income_markers(),
        Direction::Expense => taxonomy.expense_markers(),
    };
    let stems = taxonomy
        .categories(direction)
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, stems)| *stems)
        .unwrap_or(&[]);

    let kept: Vec<&str> = remainder
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .filter(|w| !STOP_WORDS.contains(w))
        .filter(|w| !markers.iter().any(|stem| w.starts_with(stem)))
        .filter(|w| !stems.iter().any(|stem| w.starts_with(stem)))
        .collect();

    let description = kept.join(" ");
    if description.chars().count() < 2 {
        return String::new();
    }
    description
}
