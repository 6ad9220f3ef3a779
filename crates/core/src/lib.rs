// Copyright 2025 Benchmark Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core types for the benchmark dashboard.
//!
//! # Modules
//!
//! - [`record`] - [`BenchmarkRecord`] and the always-sorted [`ResultSet`]
//! - [`error`] - Shared [`Error`] taxonomy and [`Result`] alias

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod record;

pub use error::{Error, Result};
pub use record::{parse_batch_size, BenchmarkRecord, ResultSet, CORE_COLUMNS};
