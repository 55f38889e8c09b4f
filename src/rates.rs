use log::warn;

use crate::aggregate::yearly_rollup;
use crate::models::{ExpeditionRecord, YearlyRate, YearlyTally};

/// `None` when the denominator is zero, so an empty year is never mistaken
/// for a year with a true zero rate.
pub fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

pub fn summarize_rates(records: &[ExpeditionRecord]) -> Vec<YearlyRate> {
    rates_from_rollup(&yearly_rollup(records))
}

pub fn rates_from_rollup(rollup: &[YearlyTally]) -> Vec<YearlyRate> {
    let mut rates: Vec<YearlyRate> = rollup
        .iter()
        .map(|entry| {
            let participants = entry.tally.participants();
            if participants == 0 {
                warn!("Year {} has no participants; rates are undefined", entry.year);
            }
            YearlyRate {
                year: entry.year,
                summit_rate: ratio(entry.tally.total_summits(), participants),
                death_rate: ratio(entry.tally.total_deaths(), participants),
            }
        })
        .collect();

    rates.sort_by_key(|rate| rate.year);
    rates
}
