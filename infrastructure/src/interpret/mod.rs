//! Output interpretation for external tool stdout
//!
//! The wallet tool's free-text output format drifts between releases, so the
//! scraping logic is behind the [`OutputInterpreter`] trait and selected by
//! the tool's declared version. Interpretation never fails: when nothing
//! structured matches, callers fall back to raw-text passthrough.

mod default;

pub use default::DefaultInterpreter;

use serde_json::Value;
use std::sync::Arc;

/// Satoshis per bitcoin.
pub const SATS_PER_BTC: f64 = 100_000_000.0;

/// Sub-balances scraped from balance-style output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceReading {
    pub total_sats: Option<f64>,
    pub cardinal_sats: Option<f64>,
    pub ordinal_sats: Option<f64>,
}

impl BalanceReading {
    /// Total converted to bitcoin, when a total was found.
    pub fn total_btc(&self) -> Option<f64> {
        self.total_sats.map(|sats| sats / SATS_PER_BTC)
    }

    pub fn is_empty(&self) -> bool {
        self.total_sats.is_none() && self.cardinal_sats.is_none() && self.ordinal_sats.is_none()
    }
}

/// Free-text output split on blank-line boundaries and truncated.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySplit {
    /// The (possibly truncated) text.
    pub text: String,
    /// Whether entries were dropped to honor the limit.
    pub truncated: bool,
    /// Number of entries before truncation.
    pub total: usize,
}

/// Structured reading of captured stdout.
///
/// All methods are pure: interpreting the same text twice yields identical
/// results, and absence of a match is never an error.
pub trait OutputInterpreter: Send + Sync {
    /// Parse the entire stdout as a JSON document. Sequences are truncated
    /// to `limit` entries; the returned count is taken after truncation.
    fn parse_json(&self, stdout: &str, limit: Option<usize>) -> Option<(Value, usize)>;

    /// Scrape balance-style output (`N sat` totals, `cardinal:`/`ordinal:`
    /// sub-balances).
    fn parse_balance(&self, stdout: &str) -> BalanceReading;

    /// Split free-text output on blank-line boundaries and truncate to
    /// `limit` entries.
    fn split_entries(&self, stdout: &str, limit: usize) -> EntrySplit;

    /// Extract a 64-character hex transaction id following `txid:` or
    /// `transaction id:` (case-insensitive).
    fn extract_txid(&self, stdout: &str) -> Option<String>;

    /// Extract an inscription id (`<hex>i<index>`) following `inscription:`.
    fn extract_inscription_id(&self, stdout: &str) -> Option<String>;
}

/// Select the interpreter strategy for a wallet tool version.
///
/// Every release seen so far scrapes identically; when a release changes its
/// output format, its quirks get their own strategy here instead of leaking
/// pattern edits across the tools.
pub fn interpreter_for_version(_version: Option<&str>) -> Arc<dyn OutputInterpreter> {
    Arc::new(DefaultInterpreter)
}
