// Copyright 2025 Benchmark Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Where the dashboard gets its result sets from.

use bench_dashboard_core::{Result, ResultSet};
use std::path::{Path, PathBuf};

/// A named collection of result directories.
#[cfg_attr(test, mockall::automock)]
pub trait ResultSource: Send + Sync {
    /// Names of the available result directories, sorted.
    fn list_directories(&self) -> Result<Vec<String>>;

    /// Load the result set of one directory.
    fn load(&self, directory: &str) -> Result<ResultSet>;
}

/// Result directories below a base directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsResultSource {
    base_dir: PathBuf,
    generate_if_missing: bool,
}

impl FsResultSource {
    /// Create a source rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>, generate_if_missing: bool) -> Self {
        Self {
            base_dir: base_dir.into(),
            generate_if_missing,
        }
    }

    /// The base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl ResultSource for FsResultSource {
    fn list_directories(&self) -> Result<Vec<String>> {
        bench_dashboard_results::list_result_directories(&self.base_dir)
    }

    fn load(&self, directory: &str) -> Result<ResultSet> {
        bench_dashboard_results::load(self.base_dir.join(directory), self.generate_if_missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_fs_source_lists_and_loads() {
        let base = TempDir::new().unwrap();
        let dir = base.path().join("DiffOpt");
        fs::create_dir(&dir).unwrap();
        fs::write(
            dir.join("lu_8.bench.json"),
            r#"{"solver_type":"lu","batch_size":8,"time_median":0.1,"residuals_l2_avg":1e-9}"#,
        )
        .unwrap();

        let source = FsResultSource::new(base.path(), true);
        assert_eq!(source.list_directories().unwrap(), vec!["DiffOpt"]);
        assert_eq!(source.load("DiffOpt").unwrap().len(), 1);
    }

    #[test]
    fn test_fs_source_respects_generation_flag() {
        let base = TempDir::new().unwrap();
        fs::create_dir(base.path().join("raw")).unwrap();

        let source = FsResultSource::new(base.path(), false);
        assert!(source.load("raw").unwrap_err().is_missing_data());
    }
}
