//! # destiny-ledger
//!
//! Client records and calculation history for the destiny matrix. The engine
//! knows nothing about storage; front ends compute a result and hand it here
//! together with a client identity.

mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::{CalculationRow, Client, FeedbackRow, Ledger, NewClient};
