//! Engine input and output records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::interpretations::Interpretations;
use crate::matrix::DestinyMatrix;

/// Carried through for reporting; never used in computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Parse the stored form (`male` / `female`).
    pub fn from_stored(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    /// Label used in reports.
    pub fn label_ru(&self) -> &'static str {
        match self {
            Self::Male => "Мужской",
            Self::Female => "Женский",
        }
    }
}

/// What the engine is asked to compute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixInput {
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub gender: Option<Gender>,
}

impl MatrixInput {
    pub fn new(name: impl Into<String>, birth_date: NaiveDate, gender: Option<Gender>) -> Self {
        Self {
            name: name.into(),
            birth_date,
            gender,
        }
    }
}

/// Everything the engine derives from one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixResult {
    pub day: u32,
    pub month: u32,
    pub year: u32,
    pub year_reduced: u32,

    /// reduce(day + month)
    pub personal_number: u32,
    /// reduce(digit sum of day, month and year written out)
    pub destiny_number: u32,
    /// reduce(vowel values)
    pub soul_number: u32,
    /// reduce(consonant values)
    pub personality_number: u32,

    pub matrix: DestinyMatrix,
    pub karmic_numbers: Vec<u32>,

    /// reduce(day + month + year_reduced)
    pub life_path: u32,
    /// reduce(all letter values)
    pub expression: u32,

    pub interpretations: Interpretations,
}
