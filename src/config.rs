use anyhow::{Result, anyhow};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://mandrillapp.com/api/1.0/";

/// Maximum number of results requested from `messages/search.json`.
pub const SEARCH_LIMIT: u32 = 100;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

/// Table width used when stdout is not attached to a terminal.
pub const DEFAULT_TABLE_WIDTH: usize = 80;

pub const BASE_URL_ENV: &str = "MANDRILL_API_URL";
pub const API_KEY_ENV: &str = "MANDRILL_API_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub table_width: usize,
}

impl Config {
    /// Read the process environment once; nothing here is mutated afterwards.
    pub fn from_env() -> Result<Self> {
        let base_url = match std::env::var(BASE_URL_ENV) {
            Ok(raw) if !raw.trim().is_empty() => parse_base_url(raw.trim())?,
            _ => parse_base_url(DEFAULT_BASE_URL)?,
        };

        Ok(Self {
            base_url,
            table_width: terminal_width(),
        })
    }
}

/// Parse a base URL, making sure endpoint paths join beneath it.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut s = raw.to_string();
    if !s.ends_with('/') {
        s.push('/');
    }
    Url::parse(&s).map_err(|e| anyhow!("Invalid base URL '{raw}': {e}"))
}

fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((cols, _rows)) if cols > 0 => cols as usize,
        _ => DEFAULT_TABLE_WIDTH,
    }
}
