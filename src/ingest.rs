use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};

use crate::error::IngestError;
use crate::models::ExpeditionRecord;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    pub delimiter: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub records: Vec<ExpeditionRecord>,
    pub rows_read: usize,
    pub rows_without_date: usize,
}

/// Short column names used by the source dataset, mapped to field names.
const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("smtdate", "summit_date"),
    ("totmembers", "total_members"),
    ("tothired", "total_hired"),
    ("smtmembers", "summit_members"),
    ("smthired", "summit_hired"),
    ("mdeaths", "member_deaths"),
    ("hdeaths", "hired_deaths"),
    ("highpoint", "high_point"),
    ("o2used", "oxygen_used"),
];

#[derive(serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    summit_date: Option<String>,
    #[serde(default)]
    total_members: Option<String>,
    #[serde(default)]
    total_hired: Option<String>,
    #[serde(default)]
    summit_members: Option<String>,
    #[serde(default)]
    summit_hired: Option<String>,
    #[serde(default)]
    member_deaths: Option<String>,
    #[serde(default)]
    hired_deaths: Option<String>,
    #[serde(default)]
    high_point: Option<String>,
    #[serde(default)]
    oxygen_used: Option<String>,
    #[serde(default)]
    year: Option<String>,
}

fn canonical_column(header: &str) -> String {
    let lowered = header.trim().to_ascii_lowercase();
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, field)| field.to_string())
        .unwrap_or(lowered)
}

/// Lower-cases headers and maps aliases onto field names. When two columns
/// land on the same field the first one wins and later ones are ignored.
fn normalize_headers(raw: &csv::StringRecord) -> csv::StringRecord {
    let mut seen = HashSet::new();
    raw.iter()
        .enumerate()
        .map(|(index, header)| {
            let name = canonical_column(header);
            if seen.insert(name.clone()) {
                name
            } else {
                debug!("Ignoring repeated `{name}` column `{header}` at position {}", index + 1);
                format!("{name}#{}", index + 1)
            }
        })
        .collect()
}

fn is_missing(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case("na") || value.eq_ignore_ascii_case("null")
}

/// Unusable dates read as absent rather than failing the load.
pub fn parse_summit_date(value: &str) -> Option<NaiveDate> {
    if is_missing(value) {
        return None;
    }
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn parse_count<T: std::str::FromStr>(
    value: Option<&str>,
    line: u64,
    column: &'static str,
) -> Result<Option<T>, IngestError> {
    match value {
        None => Ok(None),
        Some(raw) if is_missing(raw) => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| IngestError::InvalidCount {
                line,
                column,
                value: raw.to_string(),
            }),
    }
}

fn parse_flag(value: Option<&str>, line: u64, column: &'static str) -> Result<Option<bool>, IngestError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    if is_missing(raw) {
        return Ok(None);
    }
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(Some(true)),
        "false" | "f" | "0" | "no" | "n" => Ok(Some(false)),
        _ => Err(IngestError::InvalidFlag {
            line,
            column,
            value: raw.to_string(),
        }),
    }
}

fn convert(row: CsvRow, line: u64) -> Result<ExpeditionRecord, IngestError> {
    Ok(ExpeditionRecord {
        summit_date: row.summit_date.as_deref().and_then(parse_summit_date),
        total_members: parse_count(row.total_members.as_deref(), line, "total_members")?,
        total_hired: parse_count(row.total_hired.as_deref(), line, "total_hired")?,
        summit_members: parse_count(row.summit_members.as_deref(), line, "summit_members")?,
        summit_hired: parse_count(row.summit_hired.as_deref(), line, "summit_hired")?,
        member_deaths: parse_count(row.member_deaths.as_deref(), line, "member_deaths")?,
        hired_deaths: parse_count(row.hired_deaths.as_deref(), line, "hired_deaths")?,
        high_point: parse_count(row.high_point.as_deref(), line, "high_point")?,
        oxygen_used: parse_flag(row.oxygen_used.as_deref(), line, "oxygen_used")?,
        year: parse_count(row.year.as_deref(), line, "year")?,
    })
}

pub fn read_records<R: Read>(source: R, options: IngestOptions) -> Result<IngestReport, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source);

    let headers = normalize_headers(reader.headers()?);
    if !headers.iter().any(|name| name == "summit_date") {
        return Err(IngestError::MissingColumn {
            column: "summit_date",
        });
    }

    let mut report = IngestReport::default();

    for result in reader.records() {
        let raw = result?;
        let line = raw.position().map(|p| p.line()).unwrap_or_default();
        let row: CsvRow = raw.deserialize(Some(&headers))?;
        let record = convert(row, line)?;

        if record.summit_date.is_none() {
            report.rows_without_date += 1;
        }
        report.rows_read += 1;
        report.records.push(record);
    }

    debug!(
        "Read {} rows, {} without a usable summit date",
        report.rows_read, report.rows_without_date
    );
    Ok(report)
}

pub fn load_records(path: &Path, options: IngestOptions) -> Result<IngestReport, IngestError> {
    let file = std::fs::File::open(path)?;
    let report = read_records(file, options)?;
    info!("Loaded {} expedition records from {}", report.rows_read, path.display());
    Ok(report)
}
