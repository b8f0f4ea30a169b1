//! Karmic number detection.

use std::collections::BTreeSet;

/// Values flagged when they appear literally among the raw checked numbers.
pub const KARMIC_NUMBERS: [u32; 4] = [13, 14, 16, 19];

pub fn is_karmic(n: u32) -> bool {
    KARMIC_NUMBERS.contains(&n)
}

/// Karmic hits among the raw day, month, year, personal and destiny values.
///
/// Deduplicated, ascending. `year` is four digits for any supported date and
/// never matches, but it stays in the checked set.
pub fn find_karmic_numbers(
    day: u32,
    month: u32,
    year: u32,
    personal: u32,
    destiny: u32,
) -> Vec<u32> {
    [day, month, year, personal, destiny]
        .into_iter()
        .filter(|n| is_karmic(*n))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
