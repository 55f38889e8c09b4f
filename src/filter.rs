use chrono::Datelike;

use crate::models::ExpeditionRecord;

/// Inclusive bounds on the summit-date year; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearRange {
    pub from: Option<i32>,
    pub to: Option<i32>,
}

impl YearRange {
    pub fn new(from: Option<i32>, to: Option<i32>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, year: i32) -> bool {
        self.from.map_or(true, |from| year >= from) && self.to.map_or(true, |to| year <= to)
    }

    /// Keeps dated records whose summit year falls inside the range.
    /// Undated records never survive, matching the aggregation filter.
    pub fn apply(&self, records: &[ExpeditionRecord]) -> Vec<ExpeditionRecord> {
        records
            .iter()
            .filter(|r| r.summit_date.is_some_and(|date| self.contains(date.year())))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use chrono::NaiveDate;

    fn on(year: i32) -> ExpeditionRecord {
        ExpeditionRecord {
            summit_date: NaiveDate::from_ymd_opt(year, 5, 1),
            total_members: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = YearRange::new(Some(2000), Some(2005));
        assert!(range.contains(2000));
        assert!(range.contains(2005));
        assert!(!range.contains(1999));
        assert!(!range.contains(2006));
    }

    #[test]
    fn open_range_keeps_every_dated_record() {
        let range = YearRange::default();
        assert!(range.is_unbounded());
        let records = vec![on(1950), on(2020), ExpeditionRecord::default()];
        assert_eq!(range.apply(&records).len(), 2);
    }

    #[test]
    fn bounded_range_never_keeps_undated_records() {
        let range = YearRange::new(Some(1900), Some(2100));
        let records = vec![ExpeditionRecord::default(), on(2001)];
        let kept = range.apply(&records);

        assert_eq!(kept.len(), 1);
        assert!(kept.iter().all(|r| r.summit_date.is_some()));
    }

    #[test]
    fn filtered_years_drop_out_of_the_series() {
        let records = vec![on(1999), on(2003), on(2010)];
        let kept = YearRange::new(Some(2000), None).apply(&records);
        let buckets = aggregate(&kept);

        assert_eq!(buckets.len(), 2 * 72);
        assert!(buckets.iter().all(|b| b.year >= 2000));
    }
}
