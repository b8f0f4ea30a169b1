//! destiny-cli: the command-line front end for the destiny matrix engine.
//!
//! Validates raw input, runs the calculator, renders reports and keeps
//! client history in the ledger.

pub mod args;
pub mod commands;
pub mod intake;
pub mod report;

pub use args::{Args, UsageError};
pub use commands::{App, CliError, USAGE};
pub use intake::{build_input, parse_birth_date, parse_gender, parse_name, IntakeError};
pub use report::{render_grid, render_history, render_text_report, Augmentation, ReportWriter};
