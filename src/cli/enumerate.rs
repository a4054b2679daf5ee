use std::io::{self, Write};

use anyhow::{Result, bail};
use itertools::Itertools;
use num_bigint::BigUint;
use num_traits::One;

use combindex::AnyWidthTable;

/// Materialize a contiguous rank range as text, one combination per line.
/// When `start` is above `end` the range is walked downwards.
pub fn run_enumerate(
    num_items: usize,
    group_size: usize,
    start: Option<BigUint>,
    end: Option<BigUint>,
    symbols: Option<&str>,
    separator: &str,
) -> Result<()> {
    let table = AnyWidthTable::build(num_items, group_size)?;
    let last = table.num_combinations()? - 1u32;
    let start = start.unwrap_or_else(|| BigUint::from(0u32));
    let end = end.unwrap_or_else(|| last.clone());
    if start > last || end > last {
        bail!("rank range exceeds the highest rank {last}");
    }
    let symbols = match symbols {
        Some(s) => {
            let chars: Vec<char> = s.chars().collect();
            if chars.len() < num_items {
                bail!(
                    "{} display symbols given for {num_items} items",
                    chars.len()
                );
            }
            Some(chars)
        }
        None => None,
    };
    let stdout = io::stdout().lock();
    write_combinations(stdout, &table, &start, &end, symbols.as_deref(), separator)
}

fn write_combinations<W: Write>(
    mut out: W,
    table: &AnyWidthTable,
    start: &BigUint,
    end: &BigUint,
    symbols: Option<&[char]>,
    separator: &str,
) -> Result<()> {
    let descending = start > end;
    let one = BigUint::one();
    let mut rank = start.clone();
    loop {
        let combination = table.unrank(&rank)?;
        let line = combination
            .iter()
            .map(|&digit| match symbols {
                Some(chars) => chars[digit].to_string(),
                None => digit.to_string(),
            })
            .join(separator);
        writeln!(out, "{line}")?;
        if rank == *end {
            break;
        }
        if descending {
            rank -= &one;
        } else {
            rank += &one;
        }
    }
    Ok(())
}
