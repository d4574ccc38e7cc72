//! Tabular record I/O.
//!
//! Loaders feeding [`Record`](crate::Record)s in and predictions out.
//!
//! # Feature gates
//!
//! - `io-csv`: CSV reading and writing

#[cfg(feature = "io-csv")]
pub mod csv;

#[cfg(feature = "io-csv")]
pub use csv::{read_records, write_records, CsvError};
