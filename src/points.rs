// 🎯 Points Calculator - Fixed scoring rules over a single receipt
// Every rule is independent and additive. A field that fails to parse is
// logged and contributes nothing; scoring itself never fails.

use crate::receipt::{Item, Receipt};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use tracing::warn;

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const ITEM_PRICE_MULTIPLIER: f64 = 0.2;
const LARGE_TOTAL_THRESHOLD: f64 = 10.00;
const LARGE_TOTAL_POINTS: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;
/// Purchase hours in [start, end) earn the afternoon bonus
const AFTERNOON_HOURS: std::ops::Range<u32> = 14..16;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

// ============================================================================
// RULES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// +1 per ASCII alphanumeric character in the retailer name
    RetailerName,

    /// +50 when the total has no cents
    RoundDollarTotal,

    /// +25 when the total is a multiple of 0.25
    QuarterMultipleTotal,

    /// +5 for every two items
    ItemPairs,

    /// ceil(price * 0.2) for items whose trimmed description length is a multiple of 3
    ItemDescription,

    /// +5 when the total is above 10.00
    LargeTotal,

    /// +6 when the purchase day is odd
    OddPurchaseDay,

    /// +10 for purchases between 14:00 and 15:59
    AfternoonPurchase,
}

impl Rule {
    /// All rules, in evaluation order
    pub const ALL: [Rule; 8] = [
        Rule::RetailerName,
        Rule::RoundDollarTotal,
        Rule::QuarterMultipleTotal,
        Rule::ItemPairs,
        Rule::ItemDescription,
        Rule::LargeTotal,
        Rule::OddPurchaseDay,
        Rule::AfternoonPurchase,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Rule::RetailerName => "alphanumeric characters in retailer name",
            Rule::RoundDollarTotal => "total is a round dollar amount",
            Rule::QuarterMultipleTotal => "total is a multiple of 0.25",
            Rule::ItemPairs => "every two items on the receipt",
            Rule::ItemDescription => "item descriptions with length divisible by 3",
            Rule::LargeTotal => "total is greater than 10.00",
            Rule::OddPurchaseDay => "purchase day is odd",
            Rule::AfternoonPurchase => "purchased between 2:00pm and 4:00pm",
        }
    }
}

// ============================================================================
// BREAKDOWN
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleContribution {
    pub rule: Rule,
    pub points: u64,
}

/// Per-rule points for one receipt, in `Rule::ALL` order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub contributions: Vec<RuleContribution>,
}

impl PointsBreakdown {
    pub fn total(&self) -> u64 {
        self.contributions
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.points))
    }

    /// Points awarded by a single rule (0 if it did not fire)
    pub fn points_for(&self, rule: Rule) -> u64 {
        self.contributions
            .iter()
            .filter(|c| c.rule == rule)
            .map(|c| c.points)
            .sum()
    }
}

// ============================================================================
// CALCULATOR
// ============================================================================

/// Score a receipt
pub fn calculate_points(receipt: &Receipt) -> u64 {
    explain_points(receipt).total()
}

/// Score a receipt, keeping the contribution of each rule
pub fn explain_points(receipt: &Receipt) -> PointsBreakdown {
    // Parsed once; rules 2, 3 and 6 all read it
    let total = parse_amount("total", &receipt.total);

    let contributions = Rule::ALL
        .iter()
        .map(|&rule| {
            let points = match rule {
                Rule::RetailerName => retailer_points(&receipt.retailer),
                Rule::RoundDollarTotal => total
                    .filter(|t| t % 1.0 == 0.0)
                    .map_or(0, |_| ROUND_DOLLAR_POINTS),
                Rule::QuarterMultipleTotal => total
                    .filter(|t| t % 0.25 == 0.0)
                    .map_or(0, |_| QUARTER_MULTIPLE_POINTS),
                Rule::ItemPairs => (receipt.items.len() as u64 / 2) * POINTS_PER_ITEM_PAIR,
                Rule::ItemDescription => receipt
                    .items
                    .iter()
                    .map(item_description_points)
                    .fold(0u64, u64::saturating_add),
                Rule::LargeTotal => total
                    .filter(|&t| t > LARGE_TOTAL_THRESHOLD)
                    .map_or(0, |_| LARGE_TOTAL_POINTS),
                Rule::OddPurchaseDay => odd_day_points(&receipt.purchase_date),
                Rule::AfternoonPurchase => afternoon_points(&receipt.purchase_time),
            };
            RuleContribution { rule, points }
        })
        .collect();

    PointsBreakdown { contributions }
}

fn retailer_points(retailer: &str) -> u64 {
    retailer.chars().filter(char::is_ascii_alphanumeric).count() as u64
}

fn item_description_points(item: &Item) -> u64 {
    // Byte length of the trimmed text; an empty description qualifies
    if item.short_description.trim().len() % 3 != 0 {
        return 0;
    }

    let Some(price) = parse_amount("price", &item.price) else {
        return 0;
    };

    let points = (price * ITEM_PRICE_MULTIPLIER).ceil();
    if points > 0.0 {
        points as u64
    } else {
        0
    }
}

fn odd_day_points(purchase_date: &str) -> u64 {
    match parse_purchase_date(purchase_date) {
        Some(date) if date.day() % 2 == 1 => ODD_DAY_POINTS,
        _ => 0,
    }
}

fn afternoon_points(purchase_time: &str) -> u64 {
    match parse_purchase_time(purchase_time) {
        Some(time) if AFTERNOON_HOURS.contains(&time.hour()) => AFTERNOON_POINTS,
        _ => 0,
    }
}

/// Strict "YYYY-MM-DD": the value must format back to exactly the input.
/// chrono alone accepts "2022-1-1" and leading spaces.
fn parse_purchase_date(raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) if date.format(DATE_FORMAT).to_string() == raw => Some(date),
        Ok(_) => {
            warn!(value = raw, "Error parsing purchaseDate: expected YYYY-MM-DD");
            None
        }
        Err(e) => {
            warn!(value = raw, error = %e, "Error parsing purchaseDate");
            None
        }
    }
}

/// Strict "HH:MM", same round-trip check as dates
fn parse_purchase_time(raw: &str) -> Option<NaiveTime> {
    match NaiveTime::parse_from_str(raw, TIME_FORMAT) {
        Ok(time) if time.format(TIME_FORMAT).to_string() == raw => Some(time),
        Ok(_) => {
            warn!(value = raw, "Error parsing purchaseTime: expected HH:MM");
            None
        }
        Err(e) => {
            warn!(value = raw, error = %e, "Error parsing purchaseTime");
            None
        }
    }
}

/// Parse a decimal amount; `None` (and a warning) when it is not a finite number
fn parse_amount(field: &'static str, raw: &str) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        Ok(value) => {
            warn!(field, value, "Ignoring non-finite amount");
            None
        }
        Err(e) => {
            warn!(field, value = raw, error = %e, "Error parsing amount");
            None
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
