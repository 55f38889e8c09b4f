use std::fmt;
use std::ops::AddAssign;

use chrono::NaiveDate;
use serde::Serialize;

/// One expedition attempt as it arrives from the source table.
///
/// Counts are `None` when the source left them blank; every accessor below
/// treats a missing count as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpeditionRecord {
    pub summit_date: Option<NaiveDate>,
    pub total_members: Option<u32>,
    pub total_hired: Option<u32>,
    pub summit_members: Option<u32>,
    pub summit_hired: Option<u32>,
    pub member_deaths: Option<u32>,
    pub hired_deaths: Option<u32>,
    pub high_point: Option<u32>,
    pub oxygen_used: Option<bool>,
    pub year: Option<i32>,
}

fn count(value: Option<u32>) -> u64 {
    value.map(u64::from).unwrap_or(0)
}

impl ExpeditionRecord {
    pub fn member_summits(&self) -> u64 {
        count(self.summit_members)
    }

    pub fn hired_summits(&self) -> u64 {
        count(self.summit_hired)
    }

    pub fn member_deaths(&self) -> u64 {
        count(self.member_deaths)
    }

    pub fn hired_deaths(&self) -> u64 {
        count(self.hired_deaths)
    }

    pub fn total_members(&self) -> u64 {
        count(self.total_members)
    }

    pub fn total_hired(&self) -> u64 {
        count(self.total_hired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Member,
    Hired,
    Total,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Member => write!(f, "member"),
            Category::Hired => write!(f, "hired"),
            Category::Total => write!(f, "total"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Summits,
    Deaths,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Summits, Metric::Deaths];
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Summits => write!(f, "summits"),
            Metric::Deaths => write!(f, "deaths"),
        }
    }
}

/// One row of the dense monthly series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub category: Category,
    pub metric: Metric,
    pub count: u64,
}

/// Running sums for a group of records (a month or a whole year).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub member_summits: u64,
    pub hired_summits: u64,
    pub member_deaths: u64,
    pub hired_deaths: u64,
    pub total_members: u64,
    pub total_hired: u64,
}

impl Tally {
    pub fn add_record(&mut self, record: &ExpeditionRecord) {
        self.member_summits += record.member_summits();
        self.hired_summits += record.hired_summits();
        self.member_deaths += record.member_deaths();
        self.hired_deaths += record.hired_deaths();
        self.total_members += record.total_members();
        self.total_hired += record.total_hired();
    }

    pub fn total_summits(&self) -> u64 {
        self.member_summits + self.hired_summits
    }

    pub fn total_deaths(&self) -> u64 {
        self.member_deaths + self.hired_deaths
    }

    pub fn participants(&self) -> u64 {
        self.total_members + self.total_hired
    }

    pub fn get(&self, category: Category, metric: Metric) -> u64 {
        match (category, metric) {
            (Category::Member, Metric::Summits) => self.member_summits,
            (Category::Member, Metric::Deaths) => self.member_deaths,
            (Category::Hired, Metric::Summits) => self.hired_summits,
            (Category::Hired, Metric::Deaths) => self.hired_deaths,
            (Category::Total, Metric::Summits) => self.total_summits(),
            (Category::Total, Metric::Deaths) => self.total_deaths(),
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Tally) {
        self.member_summits += other.member_summits;
        self.hired_summits += other.hired_summits;
        self.member_deaths += other.member_deaths;
        self.hired_deaths += other.hired_deaths;
        self.total_members += other.total_members;
        self.total_hired += other.total_hired;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTally {
    pub year: i32,
    pub month: u32,
    pub tally: Tally,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlyTally {
    pub year: i32,
    pub tally: Tally,
}

/// Success and mortality proportions for one year.
///
/// A rate is `None` when the year had no participants at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyRate {
    pub year: i32,
    pub summit_rate: Option<f64>,
    pub death_rate: Option<f64>,
}
