//! Minimal flag parsing: positionals, `--flag value` / `--flag=value`, and
//! a fixed set of boolean switches.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use thiserror::Error;

/// Flags that never take a value.
const SWITCHES: &[&str] = &["json", "save", "help"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("unknown command {0:?}; run `destiny help`")]
    UnknownCommand(String),
    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),
    #[error("missing required flag --{0}")]
    MissingFlag(&'static str),
    #[error("flag --{0} expects a value")]
    MissingValue(String),
    #[error("invalid value for --{flag}: {value:?}")]
    BadValue { flag: &'static str, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    positional: Vec<String>,
    values: HashMap<String, String>,
    switches: HashSet<String>,
}

impl Args {
    pub fn parse<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut out = Self::default();
        let mut args = args.into_iter();
        while let Some(a) = args.next() {
            let Some(flag) = a.strip_prefix("--") else {
                out.positional.push(a);
                continue;
            };
            if let Some((name, value)) = flag.split_once('=') {
                out.values.insert(name.to_string(), value.to_string());
            } else if SWITCHES.contains(&flag) {
                out.switches.insert(flag.to_string());
            } else {
                let value = args
                    .next()
                    .ok_or_else(|| UsageError::MissingValue(flag.to_string()))?;
                out.values.insert(flag.to_string(), value);
            }
        }
        Ok(out)
    }

    pub fn positional(&self, idx: usize) -> Option<&str> {
        self.positional.get(idx).map(String::as_str)
    }

    pub fn require_positional(&self, idx: usize, name: &'static str) -> Result<&str, UsageError> {
        self.positional(idx).ok_or(UsageError::MissingArgument(name))
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn required(&self, name: &'static str) -> Result<&str, UsageError> {
        self.value(name).ok_or(UsageError::MissingFlag(name))
    }

    pub fn switch(&self, name: &str) -> bool {
        self.switches.contains(name)
    }

    /// Parsed value of `--name`, or `default` when absent.
    pub fn parsed_or<T: FromStr>(&self, name: &'static str, default: T) -> Result<T, UsageError> {
        match self.value(name) {
            Some(raw) => raw.trim().parse().map_err(|_| UsageError::BadValue {
                flag: name,
                value: raw.to_string(),
            }),
            None => Ok(default),
        }
    }
}
