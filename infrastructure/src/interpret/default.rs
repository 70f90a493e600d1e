//! Default scraping strategy for current wallet tool releases

use super::{BalanceReading, EntrySplit, OutputInterpreter};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static TOTAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s+sat").expect("total balance pattern")
});

static CARDINAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)cardinal:\s*(\d+(?:\.\d+)?)\s+sat").expect("cardinal balance pattern")
});

static ORDINAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bordinal:\s*(\d+(?:\.\d+)?)\s+sat").expect("ordinal balance pattern")
});

static TXID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:txid:|transaction id:)\s*([a-f0-9]{64})").expect("txid pattern")
});

static INSCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)inscription:?\s*([a-f0-9]+i\d+)").expect("inscription id pattern")
});

static ENTRY_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("entry split pattern"));

/// Scraper matching the output of current wallet tool releases.
#[derive(Debug, Clone, Default)]
pub struct DefaultInterpreter;

impl OutputInterpreter for DefaultInterpreter {
    fn parse_json(&self, stdout: &str, limit: Option<usize>) -> Option<(Value, usize)> {
        let value: Value = serde_json::from_str(stdout.trim()).ok()?;
        match value {
            Value::Array(mut entries) => {
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                let count = entries.len();
                Some((Value::Array(entries), count))
            }
            other => Some((other, 1)),
        }
    }

    fn parse_balance(&self, stdout: &str) -> BalanceReading {
        let capture_f64 = |re: &Regex| {
            re.captures(stdout)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse::<f64>().ok())
        };

        BalanceReading {
            total_sats: capture_f64(&TOTAL_RE),
            cardinal_sats: capture_f64(&CARDINAL_RE),
            ordinal_sats: capture_f64(&ORDINAL_RE),
        }
    }

    fn split_entries(&self, stdout: &str, limit: usize) -> EntrySplit {
        let entries: Vec<&str> = ENTRY_SPLIT_RE.split(stdout).collect();
        let total = entries.len();
        if total > limit {
            EntrySplit {
                text: entries[..limit].join("\n\n"),
                truncated: true,
                total,
            }
        } else {
            EntrySplit {
                text: stdout.to_string(),
                truncated: false,
                total,
            }
        }
    }

    fn extract_txid(&self, stdout: &str) -> Option<String> {
        TXID_RE
            .captures(stdout)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn extract_inscription_id(&self, stdout: &str) -> Option<String> {
        INSCRIPTION_RE
            .captures(stdout)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}
