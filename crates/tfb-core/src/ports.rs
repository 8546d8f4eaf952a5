//! Hexagonal ports for the collaborators around the parsing core.
//!
//! The core owns no transport, storage or user-facing text. Adapter crates
//! (Telegram, Google Sheets) implement these traits and map their own
//! failures into [`crate::errors::Error`].

use crate::{
    config::Config,
    domain::RawMessage,
    errors::{ParseError, Result},
    pipeline::parse_message,
    taxonomy::Taxonomy,
    transaction::Transaction,
};

/// Persistence collaborator.
///
/// Contract: one worksheet per [`Transaction::month_key`], each transaction
/// appended as the seven columns of [`Transaction::to_ledger_row`]. The core
/// hands over ownership of the record and never reads it back.
pub trait LedgerPort {
    fn append(&mut self, tx: &Transaction) -> Result<()>;
}

/// User-feedback collaborator.
///
/// Picks the wording for both outcomes; [`ParseError::kind`] gives it a
/// stable key per failure. The core never formats chat text itself.
pub trait ResponsePort {
    fn confirm(&mut self, tx: &Transaction) -> Result<()>;
    fn reject(&mut self, message: &RawMessage, error: &ParseError) -> Result<()>;
}

/// Route one authorized message through the pipeline and out to the
/// collaborators: parsed transactions go to the ledger and get confirmed,
/// rejections go straight to the responder.
pub fn handle_message(
    raw: &RawMessage,
    config: &Config,
    taxonomy: &Taxonomy,
    ledger: &mut dyn LedgerPort,
    responder: &mut dyn ResponsePort,
) -> Result<()> {
    match parse_message(raw, config, taxonomy) {
        Ok(tx) => {
            ledger.append(&tx)?;
            responder.confirm(&tx)
        }
        Err(error) => responder.reject(raw, &error),
    }
}
