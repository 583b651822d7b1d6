use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::env;
use std::fs;
use std::path::Path;

use receipt_processor::{explain_points, PointsBreakdown, Receipt, Rule};

const RULE_LINE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// One scored file, as printed by `score --json`
#[derive(Serialize)]
struct ScoreReport<'a> {
    file: String,
    retailer: &'a str,
    total: u64,
    breakdown: &'a PointsBreakdown,
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("score") => {
            let json = args[2..].iter().any(|a| a == "--json");
            let files: Vec<&String> = args[2..].iter().filter(|a| *a != "--json").collect();
            if files.is_empty() {
                bail!("score needs at least one receipt file");
            }
            for path in files {
                print!("{}", run_score(Path::new(path), json)?);
            }
        }
        Some("version") => println!("receipt-processor {}", receipt_processor::VERSION),
        _ => print_usage(),
    }

    Ok(())
}

fn load_receipt(path: &Path) -> Result<Receipt> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read receipt file: {:?}", path))?;
    Receipt::from_json(&bytes).with_context(|| format!("Failed to parse receipt JSON: {:?}", path))
}

fn run_score(path: &Path, json: bool) -> Result<String> {
    let receipt = load_receipt(path)?;
    let breakdown = explain_points(&receipt);

    if json {
        let report = ScoreReport {
            file: path.display().to_string(),
            retailer: &receipt.retailer,
            total: breakdown.total(),
            breakdown: &breakdown,
        };
        Ok(serde_json::to_string_pretty(&report)? + "\n")
    } else {
        Ok(render_breakdown(&receipt, path, &breakdown))
    }
}

fn render_breakdown(receipt: &Receipt, path: &Path, breakdown: &PointsBreakdown) -> String {
    let mut out = format!("🧾 {} ({})\n{}\n", receipt.retailer, path.display(), RULE_LINE);
    for contribution in &breakdown.contributions {
        out.push_str(&format!(
            "{:>6}  {}\n",
            contribution.points,
            contribution.rule.description()
        ));
    }
    out.push_str(&format!("{}\n{:>6}  total points\n\n", RULE_LINE, breakdown.total()));
    out
}

fn print_usage() {
    println!("Usage:");
    println!("  receipt-processor score [--json] <receipt.json>...   Show the points breakdown");
    println!("  receipt-processor version");
    println!("\nRules:");
    for rule in Rule::ALL {
        println!("  - {}", rule.description());
    }
    println!("\nTo serve the HTTP API: cargo run --bin receipt-server");
}
