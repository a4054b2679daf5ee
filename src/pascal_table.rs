use crate::combinatorics;
use crate::error::CombinatoricsError;
use crate::width::{CountWidth, Width};

/// Precomputed Pascal's-triangle rows for one `n choose k` case.
///
/// The table is built once and is read-only afterwards. Row `i` holds
/// `C(column, k - i)` for every column in `[0, n)`, so ranking a combination
/// is one lookup per digit and unranking is one binary search per digit.
/// Sub-cases `(n' <= n, k' <= k)` are answered from the same rows without
/// rebuilding.
///
/// `k == 1` and `k == n` cases are computed directly and carry no rows.
#[derive(Clone, Debug)]
pub struct PascalTable<T> {
    num_items: usize,
    group_size: usize,
    rows: Option<Vec<Vec<T>>>,
    sub_case_overflow: bool,
}

impl<T: CountWidth> PascalTable<T> {
    /// Build the triangle for `num_items` choose `group_size`.
    ///
    /// Construction only fails on a malformed case. Rows whose entries would
    /// exceed the width are truncated to their valid prefix and the
    /// [`sub_case_overflow`](Self::sub_case_overflow) flag is raised; the
    /// main case itself stays fully answerable whenever its count fits.
    pub fn new(num_items: usize, group_size: usize) -> Result<Self, CombinatoricsError> {
        combinatorics::validate_case(num_items, group_size)?;
        let mut table = Self {
            num_items,
            group_size,
            rows: None,
            sub_case_overflow: false,
        };
        if group_size != 1 && group_size != num_items {
            table.build_rows();
        }
        Ok(table)
    }

    fn build_rows(&mut self) {
        let num_rows = self.group_size - 1;
        let mut rows = vec![vec![T::zero(); self.num_items]; num_rows];

        // The least significant row holds the triangular numbers C(n, 2),
        // seeded with C(2, 2) = 1 and grown by pure addition.
        let last = &mut rows[num_rows - 1];
        let mut value = T::one();
        for n in 2..self.num_items {
            last[n] = value.clone();
            let step = T::from_usize(n).and_then(|s| value.checked_add(&s));
            match step {
                Some(next) => value = next,
                None => {
                    // Overflow on the lookahead past the last column leaves
                    // the row complete; only a genuine shortening counts.
                    if n + 1 < self.num_items {
                        last.truncate(n + 1);
                        self.sub_case_overflow = true;
                    }
                    break;
                }
            }
        }

        // Each row above is the Pascal recurrence over the row below:
        // C(n, k) = C(n - 1, k) + C(n - 1, k - 1). A row is cut short when
        // an addition would overflow or when the row below was itself cut
        // short of the needed addend.
        for i in (0..num_rows - 1).rev() {
            let k = self.group_size - i;
            let (head, tail) = rows.split_at_mut(i + 1);
            let row = &mut head[i];
            let below = &tail[0];
            row[k] = T::one();
            let mut truncate_at = None;
            for n in k + 1..self.num_items {
                match below.get(n - 1).and_then(|b| row[n - 1].checked_add(b)) {
                    Some(entry) => row[n] = entry,
                    None => {
                        truncate_at = Some(n);
                        break;
                    }
                }
            }
            if let Some(n) = truncate_at {
                row.truncate(n);
                self.sub_case_overflow = true;
            }
        }

        self.rows = Some(rows);
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    pub fn width(&self) -> Width {
        T::WIDTH
    }

    /// True if at least one row was truncated during construction, meaning
    /// some sub-case queries may overflow. This is a conservative advisory;
    /// every query still performs its own checks.
    pub fn sub_case_overflow(&self) -> bool {
        self.sub_case_overflow
    }

    /// The triangle rows, or `None` for the `k == 1` and `k == n` cases.
    /// Exposed for inspection and testing.
    pub fn rows(&self) -> Option<&[Vec<T>]> {
        self.rows.as_deref()
    }

    /// Total number of combinations of this case.
    pub fn num_combinations(&self) -> Result<T, CombinatoricsError> {
        self.num_combinations_for(self.num_items, self.group_size)
    }

    /// Number of combinations of the sub-case `num_items` choose
    /// `group_size`, answered from this table's rows.
    ///
    /// Sums one diagonal entry per row from the sub-case's start row, using
    /// `C(n, k) = C(n, n - k)` to start from the cheaper side. Every
    /// addition is checked; a truncated row or a failed addition reports
    /// [`CombinatoricsError::Overflow`] rather than a wrong count.
    pub fn num_combinations_for(
        &self,
        num_items: usize,
        group_size: usize,
    ) -> Result<T, CombinatoricsError> {
        if num_items == 0 || group_size == 0 {
            return Err(CombinatoricsError::InvalidArgument(
                "num_items and group_size must be nonzero",
            ));
        }
        if num_items > self.num_items || group_size > self.group_size {
            return Err(CombinatoricsError::InvalidArgument(
                "sub-case exceeds the case this table was built for",
            ));
        }
        if group_size == 1 || num_items == group_size + 1 {
            return T::from_usize(num_items).ok_or(CombinatoricsError::Overflow);
        }
        if group_size == num_items {
            return Ok(T::one());
        }
        let Some(rows) = &self.rows else {
            // No triangle for this case; fall back to the closed formula.
            return combinatorics::choose(num_items, group_size);
        };
        let start_row = self.group_size - group_size.min(num_items - group_size);
        let mut column = num_items - 1;
        let mut count = T::zero();
        for row in &rows[start_row..] {
            let entry = row.get(column).ok_or(CombinatoricsError::Overflow)?;
            count = count
                .checked_add(entry)
                .ok_or(CombinatoricsError::Overflow)?;
            column -= 1;
        }
        let tail = T::from_usize(column + 1).ok_or(CombinatoricsError::Overflow)?;
        count.checked_add(&tail).ok_or(CombinatoricsError::Overflow)
    }

    /// Rank of `combination` within this case.
    ///
    /// The combination must be in strictly descending order; pass
    /// `sorted = false` to have it sorted in place first.
    pub fn rank(
        &self,
        combination: &mut [usize],
        sorted: bool,
    ) -> Result<T, CombinatoricsError> {
        self.rank_for(combination, sorted, self.group_size)
    }

    /// Rank of `combination` within the sub-case with the given
    /// `group_size`, answered from this table's rows.
    pub fn rank_for(
        &self,
        combination: &mut [usize],
        sorted: bool,
        group_size: usize,
    ) -> Result<T, CombinatoricsError> {
        if group_size == 0 {
            return Err(CombinatoricsError::InvalidArgument(
                "group_size must be nonzero",
            ));
        }
        if group_size > self.group_size {
            return Err(CombinatoricsError::InvalidArgument(
                "sub-case exceeds the case this table was built for",
            ));
        }
        if combination.len() != group_size {
            return Err(CombinatoricsError::InvalidArgument(
                "combination length must equal the group size",
            ));
        }
        if !sorted {
            combination.sort_unstable_by(|a, b| b.cmp(a));
        }
        if group_size == 1 {
            return T::from_usize(combination[0]).ok_or(CombinatoricsError::Overflow);
        }
        if group_size == self.num_items {
            return Ok(T::zero());
        }
        let rows = self.rows.as_ref().ok_or(CombinatoricsError::TableNotBuilt)?;
        let start_row = self.group_size - group_size;
        let mut rank = T::zero();
        for (row, &digit) in rows[start_row..].iter().zip(combination.iter()) {
            let entry = row.get(digit).ok_or(CombinatoricsError::Overflow)?;
            rank = rank
                .checked_add(entry)
                .ok_or(CombinatoricsError::Overflow)?;
        }
        // The last slot indexes the implicit C(n, 1) = n identity row.
        let last = T::from_usize(combination[group_size - 1])
            .ok_or(CombinatoricsError::Overflow)?;
        rank.checked_add(&last).ok_or(CombinatoricsError::Overflow)
    }

    /// Combination at `rank` within this case, in descending order.
    pub fn unrank(&self, rank: &T) -> Result<Vec<usize>, CombinatoricsError> {
        self.unrank_for(rank, self.num_items, self.group_size)
    }

    /// Combination at `rank` within the sub-case `num_items` choose
    /// `group_size`, answered from this table's rows. Inverse of
    /// [`rank_for`](Self::rank_for); `num_items` only distinguishes the
    /// full-set `num_items == group_size` edge case and bounds the rank.
    pub fn unrank_for(
        &self,
        rank: &T,
        num_items: usize,
        group_size: usize,
    ) -> Result<Vec<usize>, CombinatoricsError> {
        if num_items == 0 || group_size == 0 {
            return Err(CombinatoricsError::InvalidArgument(
                "num_items and group_size must be nonzero",
            ));
        }
        if num_items > self.num_items || group_size > self.group_size {
            return Err(CombinatoricsError::InvalidArgument(
                "sub-case exceeds the case this table was built for",
            ));
        }
        // Range-check the rank whenever the sub-case count is representable.
        // When the count itself overflows the width, every representable
        // rank is below it and the check is vacuous.
        match self.num_combinations_for(num_items, group_size) {
            Ok(total) => {
                if *rank >= total {
                    return Err(CombinatoricsError::InvalidArgument(
                        "rank out of range for this case",
                    ));
                }
            }
            Err(CombinatoricsError::Overflow) => {}
            Err(err) => return Err(err),
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
        let rows = self.rows.as_ref().ok_or(CombinatoricsError::TableNotBuilt)?;
        let start_row = self.group_size - group_size;
        let mut combination = vec![0usize; group_size];
        let mut remainder = rank.clone();
        for (slot, row) in rows[start_row..].iter().enumerate() {
            let column = if remainder.is_zero() {
                // The row starts with a zero run; the digit is the last zero
                // entry, just before C(k, k) = 1.
                row.iter()
                    .position(|entry| !entry.is_zero())
                    .map(|first| first - 1)
                    .ok_or(CombinatoricsError::Overflow)?
            } else {
                // Greatest entry not exceeding the remainder. Truncated
                // entries would all exceed the width, hence the remainder,
                // so the answer always lies within the kept prefix.
                row.partition_point(|entry| entry <= &remainder) - 1
            };
            combination[slot] = column;
            remainder = remainder
                .checked_sub(&row[column])
                .ok_or(CombinatoricsError::Overflow)?;
        }
        combination[group_size - 1] = remainder
            .to_usize()
            .ok_or(CombinatoricsError::Overflow)?;
        Ok(combination)
    }
}
