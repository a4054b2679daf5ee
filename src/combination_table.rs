use num_traits::ToPrimitive;

use crate::error::CombinatoricsError;
use crate::pascal_table::PascalTable;
use crate::width::CountWidth;

/// Dense per-rank storage for one case.
///
/// The rank bijection makes a plain `Vec` a perfect-hash map over the case's
/// combinations; this wraps one together with the [`PascalTable`] that
/// translates between combinations and slots. The table's count must fit in
/// memory, so construction requires it to be representable as an index.
pub struct CombinationTable<T, V> {
    index: PascalTable<T>,
    data: Vec<V>,
}

impl<T: CountWidth, V: Clone + Default> CombinationTable<T, V> {
    pub fn new(num_items: usize, group_size: usize) -> Result<Self, CombinatoricsError> {
        let index: PascalTable<T> = PascalTable::new(num_items, group_size)?;
        let total = index
            .num_combinations()?
            .to_usize()
            .ok_or(CombinatoricsError::Overflow)?;
        Ok(Self {
            index,
            data: vec![V::default(); total],
        })
    }
}

impl<T: CountWidth, V> CombinationTable<T, V> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The rank/unrank table backing this storage.
    pub fn index(&self) -> &PascalTable<T> {
        &self.index
    }

    pub fn get(&self, rank: usize) -> Option<&V> {
        self.data.get(rank)
    }

    pub fn get_mut(&mut self, rank: usize) -> Option<&mut V> {
        self.data.get_mut(rank)
    }

    pub fn set(&mut self, rank: usize, value: V) -> Result<(), CombinatoricsError> {
        let slot = self
            .data
            .get_mut(rank)
            .ok_or(CombinatoricsError::InvalidArgument(
                "rank out of range for this case",
            ))?;
        *slot = value;
        Ok(())
    }

    /// Look up the value stored for a combination.
    pub fn get_by_combination(
        &self,
        combination: &mut [usize],
        sorted: bool,
    ) -> Result<&V, CombinatoricsError> {
        let rank = self.rank_index(combination, sorted)?;
        Ok(&self.data[rank])
    }

    /// Store a value for a combination.
    pub fn set_by_combination(
        &mut self,
        combination: &mut [usize],
        sorted: bool,
        value: V,
    ) -> Result<(), CombinatoricsError> {
        let rank = self.rank_index(combination, sorted)?;
        self.data[rank] = value;
        Ok(())
    }

    fn rank_index(
        &self,
        combination: &mut [usize],
        sorted: bool,
    ) -> Result<usize, CombinatoricsError> {
        let rank = self.index.rank(combination, sorted)?;
        let rank = rank.to_usize().ok_or(CombinatoricsError::Overflow)?;
        if rank >= self.data.len() {
            return Err(CombinatoricsError::InvalidArgument(
                "combination does not belong to this case",
            ));
        }
        Ok(rank)
    }
}
