use num_bigint::BigUint;

use crate::error::CombinatoricsError;
use crate::pascal_table::PascalTable;
use crate::width::{CountWidth, Width, WidthTracker, width_for_case};

/// A [`PascalTable`] behind the width chosen by the arithmetic policy.
///
/// Callers that do not want to pick a numeric width themselves build through
/// here; answers are returned at arbitrary precision regardless of the width
/// the table runs at internally.
pub enum AnyWidthTable {
    U32(PascalTable<u32>),
    U64(PascalTable<u64>),
    Big(PascalTable<BigUint>),
}

impl AnyWidthTable {
    /// Build a table at the smallest width that holds the case's count.
    pub fn build(num_items: usize, group_size: usize) -> Result<Self, CombinatoricsError> {
        let width = width_for_case(num_items, group_size)?;
        Self::build_with(num_items, group_size, width)
    }

    /// Build a table at an explicit width.
    pub fn build_with(
        num_items: usize,
        group_size: usize,
        width: Width,
    ) -> Result<Self, CombinatoricsError> {
        Ok(match width {
            Width::U32 => Self::U32(PascalTable::new(num_items, group_size)?),
            Width::U64 => Self::U64(PascalTable::new(num_items, group_size)?),
            Width::Big => Self::Big(PascalTable::new(num_items, group_size)?),
        })
    }

    /// Build a table through a [`WidthTracker`], so that a caller working
    /// through many cases never drops back below a width it already needed.
    pub fn build_tracked(
        num_items: usize,
        group_size: usize,
        tracker: &mut WidthTracker,
    ) -> Result<Self, CombinatoricsError> {
        let width = tracker.require(width_for_case(num_items, group_size)?);
        Self::build_with(num_items, group_size, width)
    }

    pub fn width(&self) -> Width {
        match self {
            Self::U32(_) => Width::U32,
            Self::U64(_) => Width::U64,
            Self::Big(_) => Width::Big,
        }
    }

    pub fn num_items(&self) -> usize {
        match self {
            Self::U32(table) => table.num_items(),
            Self::U64(table) => table.num_items(),
            Self::Big(table) => table.num_items(),
        }
    }

    pub fn group_size(&self) -> usize {
        match self {
            Self::U32(table) => table.group_size(),
            Self::U64(table) => table.group_size(),
            Self::Big(table) => table.group_size(),
        }
    }

    pub fn sub_case_overflow(&self) -> bool {
        match self {
            Self::U32(table) => table.sub_case_overflow(),
            Self::U64(table) => table.sub_case_overflow(),
            Self::Big(table) => table.sub_case_overflow(),
        }
    }

    pub fn num_combinations(&self) -> Result<BigUint, CombinatoricsError> {
        self.num_combinations_for(self.num_items(), self.group_size())
    }

    pub fn num_combinations_for(
        &self,
        num_items: usize,
        group_size: usize,
    ) -> Result<BigUint, CombinatoricsError> {
        match self {
            Self::U32(table) => table
                .num_combinations_for(num_items, group_size)
                .map(|count| count.to_big()),
            Self::U64(table) => table
                .num_combinations_for(num_items, group_size)
                .map(|count| count.to_big()),
            Self::Big(table) => table.num_combinations_for(num_items, group_size),
        }
    }

    pub fn rank(
        &self,
        combination: &mut [usize],
        sorted: bool,
    ) -> Result<BigUint, CombinatoricsError> {
        self.rank_for(combination, sorted, self.group_size())
    }

    pub fn rank_for(
        &self,
        combination: &mut [usize],
        sorted: bool,
        group_size: usize,
    ) -> Result<BigUint, CombinatoricsError> {
        match self {
            Self::U32(table) => table
                .rank_for(combination, sorted, group_size)
                .map(|rank| rank.to_big()),
            Self::U64(table) => table
                .rank_for(combination, sorted, group_size)
                .map(|rank| rank.to_big()),
            Self::Big(table) => table.rank_for(combination, sorted, group_size),
        }
    }

    pub fn unrank(&self, rank: &BigUint) -> Result<Vec<usize>, CombinatoricsError> {
        self.unrank_for(rank, self.num_items(), self.group_size())
    }

    pub fn unrank_for(
        &self,
        rank: &BigUint,
        num_items: usize,
        group_size: usize,
    ) -> Result<Vec<usize>, CombinatoricsError> {
        match self {
            Self::U32(table) => {
                let rank = narrow::<u32>(rank)?;
                table.unrank_for(&rank, num_items, group_size)
            }
            Self::U64(table) => {
                let rank = narrow::<u64>(rank)?;
                table.unrank_for(&rank, num_items, group_size)
            }
            Self::Big(table) => table.unrank_for(rank, num_items, group_size),
        }
    }
}

/// A rank that does not fit the table's width is past the case's count,
/// because the width was chosen to hold it.
fn narrow<T: CountWidth>(rank: &BigUint) -> Result<T, CombinatoricsError> {
    T::from_big(rank).ok_or(CombinatoricsError::InvalidArgument(
        "rank out of range for this case",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_smallest_sufficient_width() {
        assert_eq!(AnyWidthTable::build(35, 16).unwrap().width(), Width::U32);
        assert_eq!(AnyWidthTable::build(35, 17).unwrap().width(), Width::U64);
        assert_eq!(AnyWidthTable::build(100, 50).unwrap().width(), Width::Big);
    }

    #[test]
    fn answers_match_across_widths() {
        let table = AnyWidthTable::build(13, 5).unwrap();
        assert_eq!(table.num_combinations(), Ok(BigUint::from(1287u32)));
        let combo = table.unrank(&BigUint::from(1286u32)).unwrap();
        assert_eq!(combo, vec![12, 11, 10, 9, 8]);
        let mut digits = combo.clone();
        assert_eq!(
            table.rank(&mut digits, true),
            Ok(BigUint::from(1286u32))
        );
    }

    #[test]
    fn tracked_builds_hold_the_high_water_mark() {
        let mut tracker = WidthTracker::new();
        let big = AnyWidthTable::build_tracked(100, 50, &mut tracker).unwrap();
        assert_eq!(big.width(), Width::Big);
        // A later, smaller case keeps the escalated width.
        let small = AnyWidthTable::build_tracked(13, 5, &mut tracker).unwrap();
        assert_eq!(small.width(), Width::Big);
        assert_eq!(tracker.current(), Width::Big);
    }

    #[test]
    fn out_of_width_rank_is_rejected() {
        let table = AnyWidthTable::build(13, 5).unwrap();
        let too_big = BigUint::from(u64::MAX) + 1u32;
        assert!(matches!(
            table.unrank(&too_big),
            Err(CombinatoricsError::InvalidArgument(_))
        ));
    }
}
