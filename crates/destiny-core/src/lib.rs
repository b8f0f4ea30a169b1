//! destiny-core: the destiny matrix engine.
//!
//! A pure pipeline from `(name, birth date)` to a [`MatrixResult`]: digit
//! reductions over the date, Cyrillic letter values over the name, a 3x3
//! matrix, karmic numbers, and interpretation texts looked up by number.
//! No I/O happens in the engine; the corpus is read once and shared.

pub mod alphabet;
mod calculator;
mod config;
mod error;
pub mod interpretations;
pub mod karmic;
pub mod matrix;
mod models;
pub mod reduce;

pub use alphabet::{letter_value, NameNumbers, CONSONANTS, LETTER_VALUES, VOWELS};
pub use calculator::{destiny_number, MatrixCalculator};
pub use config::CoreConfig;
pub use error::CoreError;
pub use interpretations::{number_key, InterpretationCorpus, InterpretationKey, Interpretations};
pub use karmic::{find_karmic_numbers, KARMIC_NUMBERS};
pub use matrix::{DestinyMatrix, MatrixPosition};
pub use models::{Gender, MatrixInput, MatrixResult};
pub use reduce::{reduce_number, MASTER_NUMBERS};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
