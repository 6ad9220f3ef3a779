//! Benchmark result loading for the benchmark dashboard.
//!
//! Per-run `*.bench.json` files are aggregated into a cached
//! `benchmark_results.csv` per result directory, and loaded back as a
//! sorted [`ResultSet`].
//!
//! # Quick Start
//!
//! ```no_run
//! use bench_dashboard_results::load;
//!
//! // Generate the cache from run files if it does not exist yet
//! let results = load("benchmark/DiffOpt", true)?;
//!
//! for record in &results {
//!     println!("{} @ {}: {}s", record.solver_type, record.batch_size, record.time_median);
//! }
//! # Ok::<(), bench_dashboard_core::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`io`] - Aggregation, loading and directory discovery
//! - [`markdown`] - Markdown report generation

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod io;
pub mod markdown;

pub use bench_dashboard_core::{BenchmarkRecord, Error, Result, ResultSet};
pub use io::{
    aggregate, cache_path, list_result_directories, load, read_aggregate, write_aggregate,
    AGGREGATE_FILE, RUN_FILE_SUFFIX,
};
