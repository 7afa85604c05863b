//! Sales aggregation folds
//!
//! Pure functions that reduce raw transaction facts into the daily, monthly
//! and overall figures of the sales reports. Nothing here touches the
//! database; the report services fetch the facts and hand them over.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{
    TransactionFact, PAYMENT_STATUS_CREDIT, PAYMENT_STATUS_PAID, SERVICE_DELIVERY,
    SERVICE_PICK_UP,
};

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Sales for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    pub day: u32,
    /// Full English month name
    pub month: String,
    pub year: i32,
    pub total_quantity: i64,
    pub total_due: f64,
}

/// Sales for one month of the yearly report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    /// Three-letter uppercase abbreviation, `JAN`..`DEC`
    pub month: String,
    pub total_quantity: i64,
    pub total_due: f64,
    pub count_delivery: i64,
    pub count_pick_up: i64,
}

/// Report-wide figures; every transaction in the window contributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallTotals {
    pub count_overall_delivery: i64,
    pub count_overall_pick_up: i64,
    pub overall_total_unpaid: f64,
    /// Sum of `total_due` over `Paid` transactions only
    pub overall_total_due: f64,
}

/// An unpaid credit sale does not count toward due/quantity totals.
pub fn is_excluded_from_due_totals(fact: &TransactionFact) -> bool {
    fact.payment_status == PAYMENT_STATUS_CREDIT && coerce_amount(fact.unpaid) > 0.0
}

/// Parse-or-zero for monetary columns: NULL and non-finite values become 0
pub fn coerce_amount(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

pub fn coerce_count(value: Option<i64>) -> i64 {
    value.unwrap_or(0)
}

/// Round to cents so summed floats serialize deterministically
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Quantity and due a transaction contributes after the credit exclusion
fn countable(fact: &TransactionFact) -> (i64, f64) {
    if is_excluded_from_due_totals(fact) {
        (0, 0.0)
    } else {
        (
            coerce_count(fact.total_quantity),
            coerce_amount(fact.total_due),
        )
    }
}

pub fn accumulate_overall(facts: &[TransactionFact]) -> OverallTotals {
    let mut totals = facts
        .iter()
        .fold(OverallTotals::default(), |mut acc, fact| {
            match fact.selected_service.as_str() {
                SERVICE_DELIVERY => acc.count_overall_delivery += 1,
                SERVICE_PICK_UP => acc.count_overall_pick_up += 1,
                _ => {}
            }
            acc.overall_total_unpaid += coerce_amount(fact.unpaid);
            if fact.payment_status == PAYMENT_STATUS_PAID {
                acc.overall_total_due += coerce_amount(fact.total_due);
            }
            acc
        });

    totals.overall_total_unpaid = round_money(totals.overall_total_unpaid);
    totals.overall_total_due = round_money(totals.overall_total_due);
    totals
}

/// Group facts by calendar day, ascending
///
/// Days whose quantity and due both sum to zero are dropped.
pub fn fold_daily(facts: &[TransactionFact]) -> Vec<DailySales> {
    let mut days: BTreeMap<NaiveDate, (i64, f64)> = BTreeMap::new();

    for fact in facts {
        let (quantity, due) = countable(fact);
        let entry = days.entry(fact.transaction_date).or_insert((0, 0.0));
        entry.0 += quantity;
        entry.1 += due;
    }

    days.into_iter()
        .filter(|(_, (quantity, due))| !(*quantity == 0 && *due == 0.0))
        .map(|(date, (quantity, due))| DailySales {
            day: date.day(),
            month: MONTH_NAMES[date.month0() as usize].to_string(),
            year: date.year(),
            total_quantity: quantity,
            total_due: round_money(due),
        })
        .collect()
}

/// Fold facts into exactly twelve months, `JAN`..`DEC`
///
/// Months are matched on the numeric month of each date, so months without
/// data stay zeroed.
pub fn fold_monthly(facts: &[TransactionFact]) -> Vec<MonthlySales> {
    let mut months: Vec<MonthlySales> = MONTH_ABBREVIATIONS
        .iter()
        .map(|abbr| MonthlySales {
            month: abbr.to_string(),
            total_quantity: 0,
            total_due: 0.0,
            count_delivery: 0,
            count_pick_up: 0,
        })
        .collect();

    for fact in facts {
        let slot = &mut months[fact.transaction_date.month0() as usize];
        let (quantity, due) = countable(fact);
        slot.total_quantity += quantity;
        slot.total_due += due;
        match fact.selected_service.as_str() {
            SERVICE_DELIVERY => slot.count_delivery += 1,
            SERVICE_PICK_UP => slot.count_pick_up += 1,
            _ => {}
        }
    }

    for slot in &mut months {
        slot.total_due = round_money(slot.total_due);
    }

    months
}
