//! Core domain + application logic for the Telegram Finance Bot (Rust port).
//!
//! Turns free-form Russian chat messages ("потратил 500 руб на продукты")
//! into structured transaction records. This crate is intentionally
//! framework-agnostic: the Telegram transport and the spreadsheet ledger
//! live behind ports (traits) implemented in adapter crates.

pub mod classify;
pub mod config;
pub mod domain;
pub mod errors;
pub mod extract;
pub mod logging;
pub mod pipeline;
pub mod ports;
pub mod taxonomy;
pub mod transaction;
pub mod utils;
pub mod validate;

pub use errors::{Error, ParseError, Result};
pub use pipeline::parse_message;
