//! Rank, unrank and count combinations of an `n choose k` case through the
//! combinatorial number system.
//!
//! [`PascalTable`] precomputes partial binomial coefficients so that ranking
//! is one table lookup per digit; [`combinatorics`] is an independent,
//! table-free implementation used as ground truth and as the fallback when no
//! table exists. [`width`] picks the smallest of `u32`, `u64` or `BigUint`
//! that holds a case's count, and [`AnyWidthTable`] dispatches over the three.

pub mod combination_table;
pub mod combinatorics;
pub mod dispatch;
pub mod error;
pub mod pascal_table;
pub mod width;

pub use combination_table::CombinationTable;
pub use dispatch::AnyWidthTable;
pub use error::CombinatoricsError;
pub use pascal_table::PascalTable;
pub use width::{CountWidth, Width, WidthTracker, width_for_all_subcases, width_for_case};
