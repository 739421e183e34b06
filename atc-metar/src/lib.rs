mod client;
mod report;

pub use client::{DEFAULT_BASE_URL, MetarClient, MetarError};
pub use report::{MetarLookup, MetarReport, decode_response, format_report, is_valid_icao};
