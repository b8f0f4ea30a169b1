//! Raw user input -> engine input.
//!
//! The engine trusts its input; every range and format rule lives here.
//! Error messages are user-facing.

use chrono::{Datelike, NaiveDate};
use destiny_core::{Gender, MatrixInput};
use thiserror::Error;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const MIN_BIRTH_YEAR: i32 = 1900;
pub const MAX_AGE_YEARS: i64 = 120;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Имя слишком короткое: минимум 2 символа")]
    NameTooShort,
    #[error("Имя слишком длинное: максимум 100 символов")]
    NameTooLong,
    #[error("Имя не должно содержать цифры")]
    NameHasDigits,
    #[error("Неверный формат даты {0:?}: используйте ДД.ММ.ГГГГ")]
    BadDateFormat(String),
    #[error("Дата рождения не может быть в будущем")]
    FutureDate,
    #[error("Год рождения должен быть не ранее 1900")]
    YearTooEarly,
    #[error("Возраст не может превышать 120 лет")]
    TooOld,
    #[error("Неизвестное значение пола {0:?}: male, female или skip")]
    UnknownGender(String),
}

/// Trimmed name, 2–100 characters, no digits.
pub fn parse_name(raw: &str) -> Result<String, IntakeError> {
    let name = raw.trim();
    let len = name.chars().count();
    if len < NAME_MIN_CHARS {
        return Err(IntakeError::NameTooShort);
    }
    if len > NAME_MAX_CHARS {
        return Err(IntakeError::NameTooLong);
    }
    if name.chars().any(|c| c.to_digit(10).is_some()) {
        return Err(IntakeError::NameHasDigits);
    }
    Ok(name.to_string())
}

/// `DD.MM.YYYY`; `/` and `-` also work as separators and spaces are ignored.
///
/// Checked in order: calendar validity, not after `today`, year >= 1900,
/// age (whole days / 365) <= 120.
pub fn parse_birth_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, IntakeError> {
    let bad = || IntakeError::BadDateFormat(raw.trim().to_string());
    let normalized: String = raw
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| if c == '/' || c == '-' { '.' } else { c })
        .collect();

    let parts: Vec<&str> = normalized.split('.').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(bad());
    };
    let day: u32 = day.parse().map_err(|_| bad())?;
    let month: u32 = month.parse().map_err(|_| bad())?;
    let year: i32 = year.parse().map_err(|_| bad())?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(bad)?;

    if date > today {
        return Err(IntakeError::FutureDate);
    }
    if date.year() < MIN_BIRTH_YEAR {
        return Err(IntakeError::YearTooEarly);
    }
    if (today - date).num_days() / 365 > MAX_AGE_YEARS {
        return Err(IntakeError::TooOld);
    }
    Ok(date)
}

/// `None` means the step was skipped.
pub fn parse_gender(raw: &str) -> Result<Option<Gender>, IntakeError> {
    match raw.trim().to_lowercase().as_str() {
        "male" | "m" | "м" | "мужской" => Ok(Some(Gender::Male)),
        "female" | "f" | "ж" | "женский" => Ok(Some(Gender::Female)),
        "" | "skip" | "-" => Ok(None),
        other => Err(IntakeError::UnknownGender(other.to_string())),
    }
}

/// Validate all three fields and build the engine input.
pub fn build_input(
    name: &str,
    birth_date: &str,
    gender: Option<&str>,
    today: NaiveDate,
) -> Result<MatrixInput, IntakeError> {
    let name = parse_name(name)?;
    let birth_date = parse_birth_date(birth_date, today)?;
    let gender = match gender {
        Some(g) => parse_gender(g)?,
        None => None,
    };
    Ok(MatrixInput::new(name, birth_date, gender))
}
