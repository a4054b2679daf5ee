mod enumerate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use num_bigint::BigUint;

use combindex::AnyWidthTable;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count the combinations of an n choose k case.
    Count {
        num_items: usize,
        group_size: usize,
    },
    /// Compute the lexicographic rank of a combination.
    Rank {
        num_items: usize,
        group_size: usize,
        /// Combination digits, in any order.
        #[arg(required = true)]
        combination: Vec<usize>,
    },
    /// Recover the combination at a rank.
    Unrank {
        num_items: usize,
        group_size: usize,
        rank: BigUint,
    },
    /// Print the combinations in a rank range, one per line.
    Enumerate {
        num_items: usize,
        group_size: usize,
        /// First rank to print (default 0).
        #[arg(long)]
        start: Option<BigUint>,
        /// Last rank to print (default the highest; put it below `start` to
        /// enumerate downwards).
        #[arg(long)]
        end: Option<BigUint>,
        /// Symbols to display instead of digit values, one character per
        /// item, e.g. `23456789TJQKA` for a 13-card deck.
        #[arg(long)]
        symbols: Option<String>,
        /// Separator between the digits of one combination.
        #[arg(long, default_value = " ")]
        separator: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Count {
            num_items,
            group_size,
        } => {
            let table = AnyWidthTable::build(num_items, group_size)?;
            println!("{}", table.num_combinations()?);
        }
        Commands::Rank {
            num_items,
            group_size,
            mut combination,
        } => {
            let table = AnyWidthTable::build(num_items, group_size)?;
            println!("{}", table.rank(&mut combination, false)?);
        }
        Commands::Unrank {
            num_items,
            group_size,
            rank,
        } => {
            let table = AnyWidthTable::build(num_items, group_size)?;
            let combination = table.unrank(&rank)?;
            println!("{}", combination.iter().join(" "));
        }
        Commands::Enumerate {
            num_items,
            group_size,
            start,
            end,
            symbols,
            separator,
        } => {
            enumerate::run_enumerate(
                num_items,
                group_size,
                start,
                end,
                symbols.as_deref(),
                &separator,
            )?;
        }
    }

    Ok(())
}
