//! CLI tool that checks the precomputed bounds table against the route
//! geometry, or regenerates it.
//!
//! ```text
//! cargo run --bin bounds_table                              # check
//! cargo run --bin bounds_table -- --output=data/bounds.json # regenerate
//! ```

use std::time::Instant;
use std::{env, fs, process};
use trekmap::dataset::TrekDataset;
use trekmap::services::validation::{check_bounds_table, derive_bounds_table};

fn print_help() {
    eprintln!(
        "\
Usage: bounds_table [OPTIONS]

Check or regenerate the per-day map bounds table.

Options:
  --check          Compare the embedded table with the route geometry (default)
  --output=PATH    Write a freshly derived table to PATH
  --help           Show this help message"
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help") {
        print_help();
        return Ok(());
    }

    let output = args.iter().find_map(|a| a.strip_prefix("--output="));

    let start = Instant::now();
    let dataset = TrekDataset::embedded()?;
    eprintln!("Loaded {} days in {:.1?}", dataset.len(), start.elapsed());

    if let Some(path) = output {
        let table = derive_bounds_table(&dataset);
        let json = serde_json::to_string_pretty(&table)?;
        fs::write(path, json + "\n")?;
        eprintln!("Wrote bounds for {} days to {}", table.len(), path);
        return Ok(());
    }

    let issues = check_bounds_table(&dataset);
    if issues.is_empty() {
        eprintln!("Bounds table matches the route geometry");
        return Ok(());
    }

    for issue in &issues {
        eprintln!("  {}", issue);
    }
    eprintln!("{} bounds issue(s) found", issues.len());
    process::exit(1);
}
