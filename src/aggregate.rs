use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use log::debug;

use crate::models::{
    Category, ExpeditionRecord, Metric, MonthlyBucket, MonthlyTally, Tally, YearlyTally,
};

/// Every (category, metric) row a month expands into, in output order.
pub const BUCKET_KINDS: [(Category, Metric); 6] = [
    (Category::Member, Metric::Summits),
    (Category::Member, Metric::Deaths),
    (Category::Hired, Metric::Summits),
    (Category::Hired, Metric::Deaths),
    (Category::Total, Metric::Summits),
    (Category::Total, Metric::Deaths),
];

/// Records without a summit date cannot be placed in time and are dropped
/// by every stage of the pipeline.
pub fn has_summit_date(record: &ExpeditionRecord) -> bool {
    record.summit_date.is_some()
}

fn dated(records: &[ExpeditionRecord]) -> impl Iterator<Item = &ExpeditionRecord> {
    let dropped = records.iter().filter(|r| !has_summit_date(r)).count();
    if dropped > 0 {
        debug!("Skipping {dropped} of {} records without a summit date", records.len());
    }
    records.iter().filter(|r| has_summit_date(r))
}

pub fn monthly_tallies(records: &[ExpeditionRecord]) -> Vec<MonthlyTally> {
    let mut groups: BTreeMap<(i32, u32), Tally> = BTreeMap::new();

    for record in dated(records) {
        if let Some(date) = record.summit_date {
            groups
                .entry((date.year(), date.month()))
                .or_default()
                .add_record(record);
        }
    }

    groups
        .into_iter()
        .map(|((year, month), tally)| MonthlyTally { year, month, tally })
        .collect()
}

pub fn reshape(year: i32, month: u32, tally: &Tally) -> [MonthlyBucket; 6] {
    BUCKET_KINDS.map(|(category, metric)| MonthlyBucket {
        year,
        month,
        category,
        metric,
        count: tally.get(category, metric),
    })
}

/// Builds the dense monthly series.
///
/// Every year that appears in the dated records gets all twelve months, each
/// with all six (category, metric) rows; months without records are zero.
/// Years absent from the input are never synthesized, even when they fall
/// between observed years.
pub fn aggregate(records: &[ExpeditionRecord]) -> Vec<MonthlyBucket> {
    let tallies = monthly_tallies(records);
    let years: BTreeSet<i32> = tallies.iter().map(|t| t.year).collect();
    let observed: BTreeMap<(i32, u32), Tally> = tallies
        .into_iter()
        .map(|t| ((t.year, t.month), t.tally))
        .collect();

    let mut buckets = Vec::with_capacity(years.len() * 12 * BUCKET_KINDS.len());
    for year in years {
        for month in 1..=12 {
            let tally = observed.get(&(year, month)).copied().unwrap_or_default();
            buckets.extend(reshape(year, month, &tally));
        }
    }

    debug!("Aggregated {} monthly buckets", buckets.len());
    buckets
}

/// Rolls the monthly groups up to one tally per year.
pub fn yearly_rollup(records: &[ExpeditionRecord]) -> Vec<YearlyTally> {
    let mut groups: BTreeMap<i32, Tally> = BTreeMap::new();

    for monthly in monthly_tallies(records) {
        *groups.entry(monthly.year).or_default() += monthly.tally;
    }

    groups
        .into_iter()
        .map(|(year, tally)| YearlyTally { year, tally })
        .collect()
}
