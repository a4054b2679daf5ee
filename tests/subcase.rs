use num_bigint::BigUint;

use combindex::error::CombinatoricsError;
use combindex::pascal_table::PascalTable;

#[test]
fn subcase_counts_match_fresh_tables() {
    let wide = PascalTable::<u32>::new(12, 6).unwrap();
    for k in 1..=6 {
        for n in k..=12 {
            let fresh = PascalTable::<u32>::new(n, k).unwrap();
            assert_eq!(
                wide.num_combinations_for(n, k),
                fresh.num_combinations(),
                "{n} choose {k}"
            );
        }
    }
}

#[test]
fn subcase_ranks_match_fresh_tables() {
    let wide = PascalTable::<u64>::new(15, 8).unwrap();
    let fresh = PascalTable::<u64>::new(15, 4).unwrap();
    let total = fresh.num_combinations().unwrap();
    for rank in 0..total {
        let combo = wide.unrank_for(&rank, 15, 4).unwrap();
        assert_eq!(combo, fresh.unrank(&rank).unwrap());
        let mut digits = combo;
        assert_eq!(wide.rank_for(&mut digits, true, 4), Ok(rank));
    }
}

#[test]
fn big_table_answers_the_half_case() {
    // The worst sub-case of 100 choose 95 is the half case, far past u64.
    let wide = PascalTable::<BigUint>::new(100, 95).unwrap();
    assert!(!wide.sub_case_overflow());
    let fresh = PascalTable::<BigUint>::new(100, 50).unwrap();
    assert_eq!(wide.num_combinations_for(100, 50), fresh.num_combinations());

    let rank = BigUint::from(123_456_789_012_345_678_901_234_567u128);
    let combo = wide.unrank_for(&rank, 100, 50).unwrap();
    assert_eq!(combo, fresh.unrank(&rank).unwrap());
    let mut digits = combo;
    assert_eq!(wide.rank_for(&mut digits, true, 50), Ok(rank));
}

#[test]
fn truncated_u64_table_reports_overflow_for_big_subcases() {
    let wide = PascalTable::<u64>::new(100, 95).unwrap();
    assert!(wide.sub_case_overflow());
    // The main case still answers.
    assert_eq!(wide.num_combinations(), Ok(75_287_520));
    assert_eq!(wide.num_combinations_for(100, 94), Ok(1_192_052_400));
    // The half case cannot, and says so instead of returning garbage.
    assert_eq!(
        wide.num_combinations_for(100, 50),
        Err(CombinatoricsError::Overflow)
    );
}

#[test]
fn truncated_table_unranks_ranks_near_the_width_limit() {
    // Every u64-representable rank stays below the first truncated entry of
    // any row, so sub-case unranking keeps working on the kept prefixes even
    // at the very top of the width.
    let wide = PascalTable::<u64>::new(100, 95).unwrap();
    assert!(wide.sub_case_overflow());
    let big = PascalTable::<BigUint>::new(100, 95).unwrap();
    for rank in [u64::MAX, u64::MAX - 1, 1u64 << 63] {
        let combo = wide.unrank_for(&rank, 100, 50).unwrap();
        assert_eq!(
            combo,
            big.unrank_for(&BigUint::from(rank), 100, 50).unwrap()
        );
        let mut digits = combo;
        assert_eq!(wide.rank_for(&mut digits, true, 50), Ok(rank));
    }
}

#[test]
fn oversized_subcases_fail_fast() {
    let table = PascalTable::<u32>::new(10, 5).unwrap();
    assert!(matches!(
        table.num_combinations_for(11, 5),
        Err(CombinatoricsError::InvalidArgument(_))
    ));
    assert!(matches!(
        table.num_combinations_for(10, 6),
        Err(CombinatoricsError::InvalidArgument(_))
    ));
    let mut combo = [5, 4, 3, 2, 1, 0];
    assert!(matches!(
        table.rank_for(&mut combo, true, 6),
        Err(CombinatoricsError::InvalidArgument(_))
    ));
    assert!(matches!(
        table.unrank_for(&0, 10, 6),
        Err(CombinatoricsError::InvalidArgument(_))
    ));
}
