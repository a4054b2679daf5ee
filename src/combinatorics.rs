use num_bigint::BigUint;

use crate::error::CombinatoricsError;
use crate::width::CountWidth;

/// Reject cases that no operation accepts.
pub(crate) fn validate_case(
    num_items: usize,
    group_size: usize,
) -> Result<(), CombinatoricsError> {
    if group_size < 1 {
        return Err(CombinatoricsError::InvalidArgument(
            "group size must be at least 1",
        ));
    }
    if num_items < group_size {
        return Err(CombinatoricsError::InvalidArgument(
            "number of items must be at least the group size",
        ));
    }
    Ok(())
}

/// Number of combinations for `num_items` choose `group_size`, computed with
/// the incremental multiplicative formula instead of a lookup table.
///
/// Returns zero for `group_size > num_items` and for a zero `num_items` or
/// `group_size`, and [`CombinatoricsError::Overflow`] when a multiplication
/// step exceeds the width `T`. The `BigUint` instantiation cannot overflow.
pub fn choose<T: CountWidth>(
    num_items: usize,
    group_size: usize,
) -> Result<T, CombinatoricsError> {
    if group_size > num_items || group_size == 0 || num_items == 0 {
        return Ok(T::zero());
    }
    if group_size == 1 || num_items - group_size == 1 {
        return T::from_usize(num_items).ok_or(CombinatoricsError::Overflow);
    }
    // C(n, k) = C(n, n - k), so run the shorter of the two products.
    let group_size = group_size.min(num_items - group_size);
    let mut result = T::one();
    let mut n = num_items;
    for i in 1..=group_size {
        let factor = T::from_usize(n).ok_or(CombinatoricsError::Overflow)?;
        let divisor = T::from_usize(i).ok_or(CombinatoricsError::Overflow)?;
        n -= 1;
        // The running product of i consecutive factors is divisible by i!,
        // so the division after each step is exact.
        result = result
            .checked_mul(&factor)
            .and_then(|r| r.checked_div(&divisor))
            .ok_or(CombinatoricsError::Overflow)?;
    }
    Ok(result)
}

/// Rank of a descending combination, evaluated term by term as
/// `sum of C(c_i, k - i)` without a precomputed table.
pub fn rank_combination<T: CountWidth>(
    combination: &[usize],
    num_items: usize,
    group_size: usize,
) -> Result<T, CombinatoricsError> {
    if combination.len() < group_size {
        return Err(CombinatoricsError::InvalidArgument(
            "combination is shorter than the group size",
        ));
    }
    if group_size == 1 {
        return T::from_usize(combination[0]).ok_or(CombinatoricsError::Overflow);
    }
    if group_size == num_items {
        return Ok(T::zero());
    }
    let mut rank = T::zero();
    for (i, &c) in combination.iter().take(group_size).enumerate() {
        let k = group_size - i;
        // Once a digit drops below its slot's group count, this digit and
        // every later one contribute nothing.
        if c == 0 || k > c {
            return Ok(rank);
        }
        let term = choose::<T>(c, k)?;
        rank = rank
            .checked_add(&term)
            .ok_or(CombinatoricsError::Overflow)?;
    }
    Ok(rank)
}

/// Combination at `rank`, recovered digit by digit with a binary search over
/// the counting function. Inverse of [`rank_combination`].
pub fn unrank_combination<T: CountWidth>(
    rank: &T,
    num_items: usize,
    group_size: usize,
) -> Result<Vec<usize>, CombinatoricsError> {
    if num_items == 0 || group_size == 0 {
        return Err(CombinatoricsError::InvalidArgument(
            "num_items and group_size must be nonzero",
        ));
    }
    if group_size == 1 {
        let digit = rank
            .to_usize()
            .ok_or(CombinatoricsError::InvalidArgument("rank out of range"))?;
        return Ok(vec![digit]);
    }
    if num_items == group_size {
        return Ok((0..group_size).rev().collect());
    }
    let mut combination = vec![0usize; group_size];
    let mut remainder = rank.clone();
    let mut k = group_size;
    let mut lowest = group_size - 1;
    let mut highest = num_items;
    for i in 0..group_size - 1 {
        combination[i] = find_next_value(&mut remainder, k, lowest, highest)?;
        k -= 1;
        lowest -= 1;
        highest -= 1;
        // A remainder of zero or one pins down the whole tail: the remaining
        // slots take the smallest still-available digits, with the next slot
        // bumped by one when the remainder is one.
        if remainder <= T::one() {
            let mut next = i + 1;
            if remainder.is_one() {
                combination[next] = group_size - next;
                next += 1;
            }
            for slot in next..group_size {
                combination[slot] = group_size - 1 - slot;
            }
            return Ok(combination);
        }
    }
    combination[group_size - 1] = remainder
        .to_usize()
        .ok_or(CombinatoricsError::Overflow)?;
    Ok(combination)
}

/// Binary-search the digit range `[lowest, highest]` for the largest value
/// `v` with `C(v, group_size) <= remainder`, subtract that count from the
/// remainder and return `v`.
///
/// Probes that overflow the width `T` are retried with arbitrary precision;
/// only a probe whose true value exceeds `T` fails.
pub fn find_next_value<T: CountWidth>(
    remainder: &mut T,
    group_size: usize,
    lowest: usize,
    highest: usize,
) -> Result<usize, CombinatoricsError> {
    let mut low = lowest;
    let mut high = highest;
    let mut mid = 0usize;
    let mut best = 0usize;
    let mut mid_value = T::zero();
    let mut best_value = T::zero();
    while low <= high {
        // Remember the closest undershooting probe seen so far.
        if mid_value < *remainder && mid_value > best_value {
            best = mid;
            best_value = mid_value.clone();
        }
        mid = low + (high - low) / 2;
        mid_value = if mid < group_size {
            T::zero()
        } else {
            probe(mid, group_size)?
        };
        if mid_value < *remainder {
            low = mid + 1;
        } else if mid_value > *remainder {
            match mid.checked_sub(1) {
                Some(h) => high = h,
                None => break,
            }
        } else {
            *remainder = T::zero();
            return Ok(mid);
        }
    }
    // No exact hit: take the last probe if it undershot, otherwise the best
    // undershooting probe recorded along the way.
    if mid_value > *remainder {
        mid = best;
        mid_value = best_value;
    }
    *remainder = remainder
        .checked_sub(&mid_value)
        .ok_or(CombinatoricsError::Overflow)?;
    Ok(mid)
}

fn probe<T: CountWidth>(n: usize, k: usize) -> Result<T, CombinatoricsError> {
    match choose::<T>(n, k) {
        Err(CombinatoricsError::Overflow) => {
            let big = choose::<BigUint>(n, k)?;
            T::from_big(&big).ok_or(CombinatoricsError::Overflow)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_values() {
        assert_eq!(choose::<u32>(0, 0), Ok(0));
        assert_eq!(choose::<u32>(5, 2), Ok(10));
        assert_eq!(choose::<u32>(5, 3), Ok(10));
        assert_eq!(choose::<u32>(5, 6), Ok(0));
        assert_eq!(choose::<u32>(13, 5), Ok(1287));
        assert_eq!(choose::<u64>(50, 25), Ok(126_410_606_437_752));
    }

    #[test]
    fn binomial_overflow_boundary() {
        // The incremental formula multiplies before it divides, so its last
        // intermediate product is roughly the result times the final factor.
        // 62 choose 31 stays under that bar; 68 choose 33 does not fit u64
        // at all.
        let exact = choose::<u64>(62, 31).unwrap();
        let big = choose::<BigUint>(62, 31).unwrap();
        assert_eq!(u64::from_big(&big), Some(exact));
        assert_eq!(choose::<u64>(68, 33), Err(CombinatoricsError::Overflow));
        assert_eq!(choose::<u64>(100, 50), Err(CombinatoricsError::Overflow));
        let big = choose::<BigUint>(100, 50).unwrap();
        assert_eq!(big.to_string(), "100891344545564193334812497256");
    }

    #[test]
    fn combination_roundtrip() {
        let n = 8;
        let k = 3;
        let total: u32 = choose(n, k).unwrap();
        for rank in 0..total {
            let combo = unrank_combination(&rank, n, k).unwrap();
            assert_eq!(combo.len(), k);
            assert!(combo.windows(2).all(|w| w[0] > w[1]));
            let reranked = rank_combination(&combo, n, k).unwrap();
            assert_eq!(rank, reranked);
        }
    }

    #[test]
    fn unrank_digit_by_digit() {
        // Worked example for the binary-search unranking: rank 72 of the
        // 10 choose 5 case.
        let combo = unrank_combination(&72u32, 10, 5).unwrap();
        assert_eq!(combo, vec![8, 6, 3, 1, 0]);
        assert_eq!(rank_combination::<u32>(&combo, 10, 5), Ok(72));
    }

    #[test]
    fn exact_probe_pins_the_remaining_digits() {
        // Rank 126 is exactly C(9, 5), so the first binary search lands on
        // its probe dead-on, zeroes the remainder and the rest of the
        // combination collapses to the minimal tail.
        let combo = unrank_combination(&126u32, 10, 5).unwrap();
        assert_eq!(combo, vec![9, 3, 2, 1, 0]);
        assert_eq!(rank_combination::<u32>(&combo, 10, 5), Ok(126));
    }

    #[test]
    fn unrank_escalates_probes_past_the_width() {
        // 67 choose 33 fits u64, but the u64 probes for it overflow on an
        // intermediate product and must be retried at arbitrary precision.
        let rank: u64 = 14_226_520_737_620_288_369;
        let combo = unrank_combination(&rank, 67, 33).unwrap();
        let expected: Vec<usize> = (34..=66).rev().collect();
        assert_eq!(combo, expected);
    }
}
