use std::io::Write;

use pretty_assertions::assert_eq;

use expedition_summit_trends::{
    aggregate, load_records, rates_from_rollup, summarize_rates, yearly_rollup, Category,
    IngestOptions, Metric, MonthlyBucket, YearRange,
};

const TABLE: &str = "\
expid,year,smtdate,totmembers,tothired,smtmembers,smthired,mdeaths,hdeaths,highpoint,o2used
EVER21101,2021,2021-05-10,10,5,8,5,0,1,8849,TRUE
EVER21102,2021,2021-05-20,4,0,4,0,0,0,8849,TRUE
EVER21103,2021,,6,3,0,0,0,0,7900,FALSE
LHOT19101,2019,10/02/2019,7,2,3,2,1,0,8516,TRUE
";

fn write_table(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn count(buckets: &[MonthlyBucket], year: i32, month: u32, category: Category, metric: Metric) -> u64 {
    buckets
        .iter()
        .find(|b| b.year == year && b.month == month && b.category == category && b.metric == metric)
        .map(|b| b.count)
        .unwrap()
}

#[test]
fn csv_table_flows_through_both_stages() {
    let file = write_table(TABLE);
    let report = load_records(file.path(), IngestOptions::default()).unwrap();

    assert_eq!(report.rows_read, 4);
    assert_eq!(report.rows_without_date, 1);

    let buckets = aggregate(&report.records);
    assert_eq!(buckets.len(), 2 * 72);

    assert_eq!(count(&buckets, 2021, 5, Category::Member, Metric::Summits), 12);
    assert_eq!(count(&buckets, 2021, 5, Category::Hired, Metric::Summits), 5);
    assert_eq!(count(&buckets, 2021, 5, Category::Total, Metric::Summits), 17);
    assert_eq!(count(&buckets, 2021, 5, Category::Member, Metric::Deaths), 0);
    assert_eq!(count(&buckets, 2021, 5, Category::Hired, Metric::Deaths), 1);
    assert_eq!(count(&buckets, 2021, 5, Category::Total, Metric::Deaths), 1);
    assert_eq!(count(&buckets, 2019, 10, Category::Total, Metric::Summits), 5);
    assert_eq!(count(&buckets, 2019, 11, Category::Total, Metric::Summits), 0);

    let rates = summarize_rates(&report.records);
    let years: Vec<i32> = rates.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![2019, 2021]);
    assert!((rates[1].summit_rate.unwrap() - 17.0 / 19.0).abs() < 1e-9);
    assert!((rates[1].death_rate.unwrap() - 1.0 / 19.0).abs() < 1e-9);
    assert!((rates[0].summit_rate.unwrap() - 5.0 / 9.0).abs() < 1e-9);
}

#[test]
fn rates_from_rollup_match_direct_summary() {
    let file = write_table(TABLE);
    let records = load_records(file.path(), IngestOptions::default())
        .unwrap()
        .records;

    assert_eq!(rates_from_rollup(&yearly_rollup(&records)), summarize_rates(&records));
}

#[test]
fn year_range_limits_the_series() {
    let file = write_table(TABLE);
    let records = load_records(file.path(), IngestOptions::default())
        .unwrap()
        .records;
    let kept = YearRange::new(Some(2020), None).apply(&records);

    let buckets = aggregate(&kept);
    assert_eq!(buckets.len(), 72);
    assert!(buckets.iter().all(|b| b.year == 2021));
    assert_eq!(summarize_rates(&kept).len(), 1);
}

#[test]
fn header_only_table_yields_empty_outputs() {
    let file = write_table("smtdate,totmembers,tothired\n");
    let records = load_records(file.path(), IngestOptions::default())
        .unwrap()
        .records;

    assert!(records.is_empty());
    assert!(aggregate(&records).is_empty());
    assert!(summarize_rates(&records).is_empty());
}

#[test]
fn serialized_rows_use_snake_case_fields_and_null_rates() {
    let file = write_table("smtdate,totmembers\n2005-06-01,0\n");
    let records = load_records(file.path(), IngestOptions::default())
        .unwrap()
        .records;

    let rates = serde_json::to_value(summarize_rates(&records)).unwrap();
    assert_eq!(
        rates,
        serde_json::json!([{ "year": 2005, "summit_rate": null, "death_rate": null }])
    );

    let first = serde_json::to_value(&aggregate(&records)[0]).unwrap();
    assert_eq!(
        first,
        serde_json::json!({
            "year": 2005,
            "month": 1,
            "category": "member",
            "metric": "summits",
            "count": 0
        })
    );
}
