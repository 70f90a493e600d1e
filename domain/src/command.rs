//! External command assembly
//!
//! A [`CommandSpec`] is the ordered argument vector for one invocation of an
//! external CLI collaborator (the ord wallet tool or the node's RPC client).
//! It is built once from validated parameters and is immutable afterwards;
//! the argument order is fixed: network selector, subcommand words,
//! `--fee-rate`, `--dry-run`, `--file`, then positional arguments.

use crate::network::Network;
use std::path::PathBuf;

/// Ordered argument vector for one external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    executable: String,
    network: Option<Network>,
    subcommand: Vec<String>,
    fee_rate: Option<u64>,
    dry_run: bool,
    file: Option<PathBuf>,
    positional: Vec<String>,
}

impl CommandSpec {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            network: None,
            subcommand: Vec::new(),
            fee_rate: None,
            dry_run: false,
            file: None,
            positional: Vec::new(),
        }
    }

    /// Select the network. Mainnet renders no flag.
    pub fn network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    /// Append subcommand words (e.g. `["wallet", "send"]`).
    pub fn subcommand<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subcommand.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn fee_rate(mut self, rate: u64) -> Self {
        self.fee_rate = Some(rate);
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Append a positional argument (e.g. address, amount, block hash).
    pub fn positional(mut self, value: impl Into<String>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Arguments in the fixed order, excluding the executable itself.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(network) = self.network {
            if let Some(flag) = network.flag() {
                args.push(flag.to_string());
            }
        }
        args.extend(self.subcommand.iter().cloned());
        if let Some(rate) = self.fee_rate {
            args.push("--fee-rate".to_string());
            args.push(rate.to_string());
        }
        if self.dry_run {
            args.push("--dry-run".to_string());
        }
        if let Some(file) = &self.file {
            args.push("--file".to_string());
            args.push(file.display().to_string());
        }
        args.extend(self.positional.iter().cloned());
        args
    }

    /// Full command line for diagnostics and error envelopes.
    pub fn display_line(&self) -> String {
        let mut line = self.executable.clone();
        for arg in self.args() {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_line())
    }
}
