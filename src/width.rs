use std::fmt;

use num_bigint::BigUint;
use num_traits::{
    CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, FromPrimitive, One, ToPrimitive, Zero,
};

use crate::combinatorics;
use crate::error::CombinatoricsError;

/// Numeric capability required of a count representation.
///
/// One generic engine serves all three widths through this trait; the checked
/// operations are where overflow detection happens, and the `BigUint`
/// implementation simply never fails them.
pub trait CountWidth:
    Clone
    + Ord
    + fmt::Debug
    + fmt::Display
    + Zero
    + One
    + CheckedAdd
    + CheckedSub
    + CheckedMul
    + CheckedDiv
    + FromPrimitive
    + ToPrimitive
{
    /// The width this representation provides.
    const WIDTH: Width;

    /// Convert from an arbitrary-precision count, if it fits.
    fn from_big(value: &BigUint) -> Option<Self>;

    /// Convert to an arbitrary-precision count.
    fn to_big(&self) -> BigUint;
}

impl CountWidth for u32 {
    const WIDTH: Width = Width::U32;

    fn from_big(value: &BigUint) -> Option<Self> {
        value.to_u32()
    }

    fn to_big(&self) -> BigUint {
        BigUint::from(*self)
    }
}

impl CountWidth for u64 {
    const WIDTH: Width = Width::U64;

    fn from_big(value: &BigUint) -> Option<Self> {
        value.to_u64()
    }

    fn to_big(&self) -> BigUint {
        BigUint::from(*self)
    }
}

impl CountWidth for BigUint {
    const WIDTH: Width = Width::Big;

    fn from_big(value: &BigUint) -> Option<Self> {
        Some(value.clone())
    }

    fn to_big(&self) -> BigUint {
        self.clone()
    }
}

/// The three count representations, ordered narrowest to widest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Width {
    U32,
    U64,
    Big,
}

fn width_for_count(count: &BigUint) -> Width {
    if *count > BigUint::from(u64::MAX) {
        Width::Big
    } else if *count <= BigUint::from(u32::MAX) {
        Width::U32
    } else {
        Width::U64
    }
}

/// Smallest width whose maximum value holds `C(num_items, group_size)`.
///
/// The count is taken at arbitrary precision, so the answer is exact even for
/// cases far past 64 bits.
pub fn width_for_case(
    num_items: usize,
    group_size: usize,
) -> Result<Width, CombinatoricsError> {
    combinatorics::validate_case(num_items, group_size)?;
    let count = combinatorics::choose::<BigUint>(num_items, group_size)?;
    Ok(width_for_count(&count))
}

/// Smallest width that also holds every sub-case of `(num_items, group_size)`.
///
/// The worst sub-case is the group size closest to `num_items / 2`; when the
/// group size is already below that point no sub-case can produce more
/// combinations than the case itself.
pub fn width_for_all_subcases(
    num_items: usize,
    group_size: usize,
) -> Result<Width, CombinatoricsError> {
    combinatorics::validate_case(num_items, group_size)?;
    let worst = if num_items >= 2 * group_size {
        group_size
    } else {
        num_items / 2
    };
    let count = combinatorics::choose::<BigUint>(num_items, worst)?;
    Ok(width_for_count(&count))
}

/// Escalate-only record of the widest representation a caller has needed.
///
/// Once a case has forced a wider width, later smaller cases keep using it;
/// a width is never silently narrowed back down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidthTracker {
    current: Width,
}

impl WidthTracker {
    pub fn new() -> Self {
        Self {
            current: Width::U32,
        }
    }

    pub fn current(&self) -> Width {
        self.current
    }

    /// Record that `width` is needed and return the width to use, which is
    /// the high-water mark of everything required so far.
    pub fn require(&mut self, width: Width) -> Width {
        self.current = self.current.max(width);
        self.current
    }
}

impl Default for WidthTracker {
    fn default() -> Self {
        Self::new()
    }
}
