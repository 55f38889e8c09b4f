//! Temporal aggregation of expedition summit and death counts.
//!
//! The pipeline is two pure functions over an in-memory slice of
//! [`ExpeditionRecord`]s:
//!
//! - [`aggregate`] builds a dense monthly series of summit and death counts
//!   per participant category, zero-filling every month of each observed year.
//! - [`summarize_rates`] computes per-year success and mortality proportions.
//!
//! [`ingest`] loads records from a delimited text file; everything else is
//! free of I/O.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod models;
pub mod rates;

pub use aggregate::{aggregate, has_summit_date, monthly_tallies, yearly_rollup};
pub use error::IngestError;
pub use filter::YearRange;
pub use ingest::{load_records, read_records, IngestOptions, IngestReport};
pub use models::{Category, ExpeditionRecord, Metric, MonthlyBucket, YearlyRate};
pub use rates::{rates_from_rollup, summarize_rates};
