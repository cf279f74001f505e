//! Three ways to compute the triangular number `1 + 2 + ... + n`.
//!
//! All three return `0` for `n <= 0` and agree for every `n` up to
//! [`MAX_SUMMABLE`], the largest input whose sum fits in an `i64`. Larger
//! inputs overflow in all three.

/// Largest `n` with `1 + 2 + ... + n <= i64::MAX`.
pub const MAX_SUMMABLE: i64 = 4_294_967_295;

/// Closed form `n * (n + 1) / 2`. O(1).
///
/// The even factor is halved before multiplying, so the product only
/// overflows when the sum itself does.
pub fn sum_to_n_a(n: i64) -> i64 {
    if n <= 0 {
        return 0;
    }
    if n % 2 == 0 {
        (n / 2) * (n + 1)
    } else {
        n * ((n + 1) / 2)
    }
}

/// Running total in a loop. O(n) time, O(1) space.
pub fn sum_to_n_b(n: i64) -> i64 {
    if n <= 0 {
        return 0;
    }
    let mut total = 0;
    for current in 1..=n {
        total += current;
    }
    total
}

/// Fold over the range `1..=n`. O(n) time.
pub fn sum_to_n_c(n: i64) -> i64 {
    if n <= 0 {
        return 0;
    }
    (1..=n).fold(0, |total, value| total + value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        for sum in [sum_to_n_a, sum_to_n_b, sum_to_n_c] {
            assert_eq!(sum(5), 15);
            assert_eq!(sum(1), 1);
            assert_eq!(sum(0), 0);
            assert_eq!(sum(100), 5050);
        }
    }

    #[test]
    fn non_positive_input_sums_to_zero() {
        for n in [-1, -100, i64::MIN] {
            assert_eq!(sum_to_n_a(n), 0);
            assert_eq!(sum_to_n_b(n), 0);
            assert_eq!(sum_to_n_c(n), 0);
        }
    }

    fn widened(n: i64) -> i128 {
        let n = i128::from(n);
        n * (n + 1) / 2
    }

    #[test]
    fn closed_form_handles_large_inputs() {
        assert_eq!(sum_to_n_a(3_037_000_500), 4_611_686_020_018_625_250);
        assert_eq!(i128::from(sum_to_n_a(3_037_000_499)), widened(3_037_000_499));
        assert_eq!(sum_to_n_a(MAX_SUMMABLE), 9_223_372_034_707_292_160);
        assert_eq!(i128::from(sum_to_n_a(MAX_SUMMABLE)), widened(MAX_SUMMABLE));
    }

    #[test]
    fn max_summable_is_the_last_input_that_fits() {
        assert!(widened(MAX_SUMMABLE) <= i128::from(i64::MAX));
        assert!(widened(MAX_SUMMABLE + 1) > i128::from(i64::MAX));
    }

    #[test]
    fn implementations_agree() {
        for n in 0..=2_000 {
            let expected = sum_to_n_a(n);
            assert_eq!(sum_to_n_b(n), expected, "n = {}", n);
            assert_eq!(sum_to_n_c(n), expected, "n = {}", n);
        }
    }
}
