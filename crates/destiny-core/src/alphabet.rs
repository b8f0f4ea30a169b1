//! Cyrillic letter values and the three name numbers.
//!
//! The table is the published Russian numerology table, not a formula. Only
//! uppercase letters are listed; names are uppercased before lookup.

use serde::{Deserialize, Serialize};

use crate::reduce::reduce_number;

/// The 33-letter alphabet with its values, in alphabet order.
pub const LETTER_VALUES: [(char, u32); 33] = [
    ('А', 1),
    ('Б', 2),
    ('В', 6),
    ('Г', 3),
    ('Д', 4),
    ('Е', 5),
    ('Ё', 5),
    ('Ж', 2),
    ('З', 7),
    ('И', 1),
    ('Й', 1),
    ('К', 2),
    ('Л', 3),
    ('М', 4),
    ('Н', 5),
    ('О', 7),
    ('П', 8),
    ('Р', 2),
    ('С', 3),
    ('Т', 4),
    ('У', 6),
    ('Ф', 8),
    ('Х', 5),
    ('Ц', 3),
    ('Ч', 7),
    ('Ш', 2),
    ('Щ', 9),
    ('Ъ', 1),
    ('Ы', 1),
    ('Ь', 1),
    ('Э', 6),
    ('Ю', 7),
    ('Я', 2),
];

/// Letters summed into the soul number.
pub const VOWELS: &str = "АЕЁИОУЫЭЮЯ";

/// Letters summed into the personality number.
///
/// A literal list, not "alphabet minus vowels": Ъ and Ь are in neither set and
/// only ever count towards the expression number.
pub const CONSONANTS: &str = "БВГДЖЗЙКЛМНПРСТФХЦЧШЩ";

/// Value of an uppercase letter; anything outside the table is 0.
pub fn letter_value(c: char) -> u32 {
    LETTER_VALUES
        .iter()
        .find(|(letter, _)| *letter == c)
        .map(|(_, v)| *v)
        .unwrap_or(0)
}

pub fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

pub fn is_consonant(c: char) -> bool {
    CONSONANTS.contains(c)
}

/// Uppercase the name and drop space characters.
///
/// Only `' '` is removed; other whitespace stays and simply scores 0.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .flat_map(char::to_uppercase)
        .filter(|c| *c != ' ')
        .collect()
}

/// The three numbers derived from a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameNumbers {
    /// Reduced sum over vowels.
    pub soul: u32,
    /// Reduced sum over consonants.
    pub personality: u32,
    /// Reduced sum over every character.
    pub expression: u32,
}

impl NameNumbers {
    pub fn from_name(name: &str) -> Self {
        let normalized = normalize_name(name);
        let mut vowels = 0;
        let mut consonants = 0;
        let mut total = 0;
        for c in normalized.chars() {
            let v = letter_value(c);
            total += v;
            if is_vowel(c) {
                vowels += v;
            } else if is_consonant(c) {
                consonants += v;
            }
        }
        Self {
            soul: reduce_number(vowels),
            personality: reduce_number(consonants),
            expression: reduce_number(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_letter_maps_into_one_to_nine() {
        for (letter, value) in LETTER_VALUES {
            assert!((1..=9).contains(&value), "{letter} = {value}");
            assert_eq!(letter_value(letter), value);
        }
    }

    #[test]
    fn published_letter_values() {
        let table: Vec<String> = LETTER_VALUES.iter().map(|(c, v)| format!("{c}={v}")).collect();
        assert_eq!(
            table.join(" "),
            "А=1 Б=2 В=6 Г=3 Д=4 Е=5 Ё=5 Ж=2 З=7 И=1 Й=1 К=2 Л=3 М=4 Н=5 О=7 П=8 \
             Р=2 С=3 Т=4 У=6 Ф=8 Х=5 Ц=3 Ч=7 Ш=2 Щ=9 Ъ=1 Ы=1 Ь=1 Э=6 Ю=7 Я=2"
        );
    }

    #[test]
    fn unmapped_characters_score_zero() {
        for c in ['A', 'z', '7', '-', '.', ' ', '\t', 'ä'] {
            assert_eq!(letter_value(c), 0, "{c:?}");
        }
    }

    #[test]
    fn vowel_and_consonant_sets_are_disjoint_and_leave_two_letters_out() {
        assert_eq!(VOWELS.chars().count(), 10);
        assert_eq!(CONSONANTS.chars().count(), 21);
        assert!(VOWELS.chars().all(|c| !is_consonant(c)));
        let unclassified: Vec<char> = LETTER_VALUES
            .iter()
            .map(|(c, _)| *c)
            .filter(|c| !is_vowel(*c) && !is_consonant(*c))
            .collect();
        assert_eq!(unclassified, vec!['Ъ', 'Ь']);
    }

    #[test]
    fn normalize_uppercases_and_strips_spaces() {
        assert_eq!(normalize_name("иван иванов"), "ИВАНИВАНОВ");
        assert_eq!(normalize_name("  Пётр "), "ПЁТР");
    }

    #[test]
    fn ivan_ivanov_name_numbers() {
        let n = NameNumbers::from_name("ИВАН ИВАНОВ");
        // vowels И+А+И+А+О = 11 (master)
        assert_eq!(n.soul, 11);
        // consonants В+Н+В+Н+В = 28 -> 10 -> 1
        assert_eq!(n.personality, 1);
        // 39 -> 12 -> 3
        assert_eq!(n.expression, 3);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(
            NameNumbers::from_name("мария петрова"),
            NameNumbers::from_name("МАРИЯ ПЕТРОВА")
        );
    }

    #[test]
    fn hard_and_soft_signs_only_reach_expression() {
        // Ь = 1, outside both sets
        let n = NameNumbers::from_name("Ь");
        assert_eq!(n.soul, 0);
        assert_eq!(n.personality, 0);
        assert_eq!(n.expression, 1);
    }

    #[test]
    fn empty_name_is_all_zero() {
        let n = NameNumbers::from_name("");
        assert_eq!((n.soul, n.personality, n.expression), (0, 0, 0));
    }
}
