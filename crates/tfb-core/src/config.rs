use std::{env, fs, path::Path};

use rust_decimal::Decimal;

use crate::{errors::Error, Result};

/// Typed configuration for the parsing core.
///
/// Loaded once at process start and shared by reference; the pipeline never
/// mutates it. Every field has a built-in default, so `Config::default()`
/// works without any environment at all.
#[derive(Clone, Debug)]
pub struct Config {
    /// Currency assumed when a message carries no unit token. Kept as a raw
    /// code string; resolution to a known currency happens in validation, so
    /// a bad value surfaces as a typed parse failure rather than a panic.
    pub default_currency: String,

    /// Smallest accepted amount.
    pub min_amount: Decimal,

    /// Sanity ceiling. Catches misplaced decimal separators; the ceiling
    /// value itself is still accepted.
    pub max_amount: Decimal,

    /// Ledger descriptions longer than this are cut, not rejected.
    pub max_description_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_currency: "RUB".to_string(),
            min_amount: Decimal::new(1, 2),
            max_amount: Decimal::from(1_000_000),
            max_description_len: 200,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let defaults = Config::default();

        let default_currency = env_str("DEFAULT_CURRENCY")
            .and_then(non_empty)
            .map(|s| s.trim().to_uppercase())
            .unwrap_or(defaults.default_currency);
        let min_amount = env_decimal("MIN_AMOUNT").unwrap_or(defaults.min_amount);
        let max_amount = env_decimal("MAX_AMOUNT").unwrap_or(defaults.max_amount);
        let max_description_len =
            env_usize("MAX_DESCRIPTION_LENGTH").unwrap_or(defaults.max_description_len);

        if max_amount <= min_amount {
            return Err(Error::Config(format!(
                "MAX_AMOUNT ({max_amount}) must be greater than MIN_AMOUNT ({min_amount})"
            )));
        }

        Ok(Self {
            default_currency,
            min_amount,
            max_amount,
            max_description_len,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_decimal(key: &str) -> Option<Decimal> {
    env_str(key).and_then(|s| s.trim().parse::<Decimal>().ok())
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_match_ledger_rules() {
        let cfg = Config::default();
        assert_eq!(cfg.default_currency, "RUB");
        assert_eq!(cfg.min_amount, dec!(0.01));
        assert_eq!(cfg.max_amount, dec!(1000000));
        assert_eq!(cfg.max_description_len, 200);
    }

    #[test]
    fn inverted_bounds_are_a_config_error() {
        env::set_var("MIN_AMOUNT", "10");
        env::set_var("MAX_AMOUNT", "5");
        let err = Config::load().unwrap_err();
        env::remove_var("MIN_AMOUNT");
        env::remove_var("MAX_AMOUNT");
        assert!(matches!(err, Error::Config(_)));
    }
}
