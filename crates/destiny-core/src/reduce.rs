//! Digit reduction: the primitive every derived number goes through.

/// Master numbers stop the reduction as soon as they appear.
pub const MASTER_NUMBERS: [u32; 2] = [11, 22];

/// True for 11 and 22.
pub fn is_master(n: u32) -> bool {
    MASTER_NUMBERS.contains(&n)
}

/// Sum of the decimal digits of `n`.
pub fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Reduce `n` to a single digit by repeated digit sums, keeping master numbers.
///
/// `0` stays `0`; any other input lands in `1..=9`, `11` or `22`.
pub fn reduce_number(mut n: u32) -> u32 {
    while n > 9 && !is_master(n) {
        n = digit_sum(n);
    }
    n
}

/// Digit sum over the characters of a decimal string; non-digits are skipped.
pub(crate) fn digit_sum_str(s: &str) -> u32 {
    s.chars().filter_map(|c| c.to_digit(10)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_digits_unchanged() {
        for n in 0..=9 {
            assert_eq!(reduce_number(n), n);
        }
    }

    #[test]
    fn master_numbers_preserved() {
        assert_eq!(reduce_number(11), 11);
        assert_eq!(reduce_number(22), 22);
        assert_eq!(reduce_number(29), 11);
        assert_eq!(reduce_number(38), 11);
        assert_eq!(reduce_number(2002), 4);
    }

    #[test]
    fn multi_step_reduction() {
        // 1991 -> 20 -> 2
        assert_eq!(reduce_number(1991), 2);
        // 1990 -> 19 -> 10 -> 1
        assert_eq!(reduce_number(1990), 1);
        assert_eq!(reduce_number(10), 1);
        assert_eq!(reduce_number(20), 2);
        assert_eq!(reduce_number(99), 9);
        // 49 -> 13 -> 4; 13 is not a stop value here
        assert_eq!(reduce_number(49), 4);
    }

    #[test]
    fn output_range_is_closed() {
        for n in 0..10_000 {
            let r = reduce_number(n);
            assert!(r <= 9 || is_master(r), "reduce({n}) = {r}");
            if n > 0 {
                assert_ne!(r, 0, "reduce({n}) must not be 0");
            }
        }
    }

    #[test]
    fn string_digit_sum_ignores_non_digits() {
        assert_eq!(digit_sum_str("1531990"), 28);
        assert_eq!(digit_sum_str("1.5-3"), 9);
        assert_eq!(digit_sum_str(""), 0);
    }
}
