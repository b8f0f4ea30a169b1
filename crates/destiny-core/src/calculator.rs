//! Matrix calculator: the engine entry point.

use std::sync::Arc;

use chrono::Datelike;

use crate::alphabet::NameNumbers;
use crate::interpretations::{InterpretationCorpus, InterpretationKey, Interpretations};
use crate::karmic::find_karmic_numbers;
use crate::matrix::DestinyMatrix;
use crate::models::{MatrixInput, MatrixResult};
use crate::reduce::{digit_sum_str, reduce_number};

/// Stateless calculator. Cheap to clone; the corpus is shared read-only.
#[derive(Debug, Clone)]
pub struct MatrixCalculator {
    corpus: Arc<InterpretationCorpus>,
}

impl Default for MatrixCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixCalculator {
    /// Calculator backed by the built-in corpus.
    pub fn new() -> Self {
        Self::with_corpus(Arc::new(InterpretationCorpus::builtin().clone()))
    }

    pub fn with_corpus(corpus: Arc<InterpretationCorpus>) -> Self {
        Self { corpus }
    }

    pub fn corpus(&self) -> &InterpretationCorpus {
        &self.corpus
    }

    pub fn calculate(&self, input: &MatrixInput) -> MatrixResult {
        let day = input.birth_date.day();
        let month = input.birth_date.month();
        // Year is >= 1900 by intake validation; pre-CE dates are out of range.
        let year = input.birth_date.year().max(0) as u32;
        let year_reduced = reduce_number(year);

        let personal_number = reduce_number(day + month);
        let destiny_number = destiny_number(day, month, year);

        let names = NameNumbers::from_name(&input.name);
        let life_path = reduce_number(day + month + year_reduced);

        let matrix = DestinyMatrix {
            top_left: reduce_number(day),
            top_center: reduce_number(month),
            top_right: reduce_number(year_reduced),
            middle_left: personal_number,
            center: destiny_number,
            middle_right: names.expression,
            bottom_left: names.soul,
            bottom_center: names.personality,
            bottom_right: life_path,
        };

        let karmic_numbers = find_karmic_numbers(day, month, year, personal_number, destiny_number);

        let interpretations = self.interpretations([
            (InterpretationKey::PersonalNumber, personal_number),
            (InterpretationKey::DestinyNumber, destiny_number),
            (InterpretationKey::SoulNumber, names.soul),
            (InterpretationKey::PersonalityNumber, names.personality),
            (InterpretationKey::LifePath, life_path),
            (InterpretationKey::Expression, names.expression),
            (InterpretationKey::MatrixCenter, matrix.center),
        ]);

        tracing::debug!(
            birth_date = %input.birth_date,
            center = matrix.center,
            karmic = karmic_numbers.len(),
            "matrix calculated"
        );

        MatrixResult {
            day,
            month,
            year,
            year_reduced,
            personal_number,
            destiny_number,
            soul_number: names.soul,
            personality_number: names.personality,
            matrix,
            karmic_numbers,
            life_path,
            expression: names.expression,
            interpretations,
        }
    }

    fn interpretations(&self, values: [(InterpretationKey, u32); 7]) -> Interpretations {
        values
            .into_iter()
            .map(|(key, n)| (key, self.corpus.for_number(n).to_string()))
            .collect()
    }
}

/// Digit sum of day, month and year as written (no zero padding), reduced.
///
/// 15.03.1990 -> "15" "3" "1990" -> 28 -> 1. Not the same as reducing day + month + year.
pub fn destiny_number(day: u32, month: u32, year: u32) -> u32 {
    let written = format!("{day}{month}{year}");
    reduce_number(digit_sum_str(&written))
}
