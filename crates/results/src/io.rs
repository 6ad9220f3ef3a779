//! Filesystem operations for benchmark results.
//!
//! A result directory holds one `*.bench.json` file per benchmark run and,
//! once aggregated, a `benchmark_results.csv` cache with one row per run.
//! The cache is trusted whenever it exists; it is never compared against
//! the run files.

use bench_dashboard_core::{
    parse_batch_size, BenchmarkRecord, Error, Result, ResultSet, CORE_COLUMNS,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Suffix identifying per-run result files.
pub const RUN_FILE_SUFFIX: &str = ".bench.json";

/// Name of the aggregate cache inside a result directory.
pub const AGGREGATE_FILE: &str = "benchmark_results.csv";

/// Path of the aggregate cache for a result directory.
pub fn cache_path(directory: impl AsRef<Path>) -> PathBuf {
    directory.as_ref().join(AGGREGATE_FILE)
}

/// List per-run result files in a directory, sorted by file name.
///
/// Only immediate entries are considered.
pub fn run_files(directory: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let directory = directory.as_ref();
    let entries = fs::read_dir(directory).map_err(|e| Error::io(directory, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(directory, e))?;
        let is_run_file = entry
            .file_name()
            .to_str()
            .map_or(false, |name| name.ends_with(RUN_FILE_SUFFIX));
        if is_run_file && entry.path().is_file() {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

/// Read one per-run JSON file.
pub fn read_run_file(path: impl AsRef<Path>) -> Result<BenchmarkRecord> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    BenchmarkRecord::from_json_str(&content).map_err(|source| Error::RunRecord {
        path: path.to_path_buf(),
        source,
    })
}

/// Collect every per-run file of a directory into a sorted result set and
/// write it to the aggregate cache.
///
/// With no run files an empty table (header only) is written.
pub fn aggregate(directory: impl AsRef<Path>) -> Result<ResultSet> {
    let directory = directory.as_ref();
    let files = run_files(directory)?;
    debug!(directory = %directory.display(), files = files.len(), "Aggregating run files");

    let records = files
        .iter()
        .map(read_run_file)
        .collect::<Result<Vec<_>>>()?;
    let results = ResultSet::new(records);

    write_aggregate(directory, &results)?;
    info!(
        directory = %directory.display(),
        records = results.len(),
        "Aggregate written"
    );

    Ok(results)
}

/// Load the result set of a directory from its aggregate cache.
///
/// When the cache is absent it is generated from the run files, unless
/// `generate_if_missing` is false. Either way, a cache that still does not
/// exist yields [`Error::MissingData`].
pub fn load(directory: impl AsRef<Path>, generate_if_missing: bool) -> Result<ResultSet> {
    let directory = directory.as_ref();
    let cache = cache_path(directory);

    if !cache.exists() {
        if !generate_if_missing {
            error!(
                directory = %directory.display(),
                "Aggregate benchmark results not found and generation is disabled"
            );
            return Err(Error::MissingData {
                directory: directory.to_path_buf(),
            });
        }
        info!(
            directory = %directory.display(),
            "Aggregate benchmark results not found, processing JSON files"
        );
        aggregate(directory)?;
    }

    if !cache.exists() {
        error!(
            directory = %directory.display(),
            "Could not find or generate aggregate benchmark results"
        );
        return Err(Error::MissingData {
            directory: directory.to_path_buf(),
        });
    }

    read_aggregate(&cache)
}

/// Write a result set as the aggregate cache of a directory.
///
/// The header is the core columns followed by every extra column in sorted
/// order; records lacking an extra column get an empty cell.
pub fn write_aggregate(directory: impl AsRef<Path>, results: &ResultSet) -> Result<()> {
    let path = cache_path(directory);
    let file = fs::File::create(&path).map_err(|e| Error::io(&path, e))?;
    let mut writer = csv::Writer::from_writer(file);
    let csv_err = |source| Error::Aggregate {
        path: path.clone(),
        source,
    };

    let extra_columns = results.extra_columns();
    let header = CORE_COLUMNS.iter().copied().chain(extra_columns.iter().copied());
    writer.write_record(header).map_err(csv_err)?;

    for record in results {
        let mut row = vec![
            record.solver_type.clone(),
            record.batch_size.to_string(),
            float_cell(record.time_median),
            float_cell(record.residuals_l2_avg),
        ];
        row.extend(
            extra_columns
                .iter()
                .map(|column| record.extra.get(*column).cloned().unwrap_or_default()),
        );
        writer.write_record(&row).map_err(csv_err)?;
    }

    writer.flush().map_err(|e| Error::io(&path, e))
}

/// Read an aggregate CSV file into a sorted result set.
///
/// An empty file, or one holding only a header, yields an empty set. Columns
/// beyond the core four are carried as extra fields; empty cells are skipped.
pub fn read_aggregate(path: impl AsRef<Path>) -> Result<ResultSet> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = csv::Reader::from_reader(file);
    let csv_err = |source| Error::Aggregate {
        path: path.to_path_buf(),
        source,
    };

    let headers = reader.headers().map_err(csv_err)?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        warn!(path = %path.display(), "Aggregate file is empty");
        return Ok(ResultSet::empty());
    }

    let index_of = |column: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| Error::MissingColumn {
                path: path.to_path_buf(),
                column,
            })
    };
    let solver_idx = index_of("solver_type")?;
    let batch_idx = index_of("batch_size")?;
    let time_idx = index_of("time_median")?;
    let residual_idx = index_of("residuals_l2_avg")?;
    let core = [solver_idx, batch_idx, time_idx, residual_idx];

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row.map_err(csv_err)?;
        let line = i + 1;
        let cell = |idx: usize| row.get(idx).unwrap_or("").trim();

        let invalid = |column: &'static str, value: &str| Error::InvalidValue {
            path: path.to_path_buf(),
            row: line,
            column,
            value: value.to_string(),
        };

        let batch_size = parse_batch_size(cell(batch_idx))
            .ok_or_else(|| invalid("batch_size", cell(batch_idx)))?;
        let time_median: f64 = cell(time_idx)
            .parse()
            .map_err(|_| invalid("time_median", cell(time_idx)))?;
        let residuals_l2_avg: f64 = cell(residual_idx)
            .parse()
            .map_err(|_| invalid("residuals_l2_avg", cell(residual_idx)))?;

        let extra: BTreeMap<String, String> = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| !core.contains(idx))
            .filter_map(|(idx, name)| {
                let value = row.get(idx)?;
                (!value.is_empty()).then(|| (name.to_string(), value.to_string()))
            })
            .collect();

        records.push(BenchmarkRecord {
            solver_type: cell(solver_idx).to_string(),
            batch_size,
            time_median,
            residuals_l2_avg,
            extra,
        });
    }

    debug!(path = %path.display(), records = records.len(), "Aggregate loaded");
    Ok(ResultSet::new(records))
}

/// Text of a float cell. Very small or very large magnitudes use exponent
/// notation; both forms read back to the same value.
fn float_cell(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && magnitude.is_finite() && !(1e-4..1e16).contains(&magnitude) {
        format!("{value:e}")
    } else {
        value.to_string()
    }
}

/// Names of the result directories under a base directory, sorted.
///
/// Hidden (dot-prefixed) and non UTF-8 names are skipped.
pub fn list_result_directories(base: impl AsRef<Path>) -> Result<Vec<String>> {
    let base = base.as_ref();
    let entries = fs::read_dir(base).map_err(|e| Error::io(base, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(base, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) if !name.starts_with('.') => names.push(name.to_string()),
            _ => {}
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_run(dir: &Path, name: &str, solver: &str, batch: u64, time: f64, residual: f64) {
        let json = serde_json::json!({
            "solver_type": solver,
            "batch_size": batch,
            "time_median": time,
            "residuals_l2_avg": residual,
        });
        fs::write(dir.join(name), json.to_string()).unwrap();
    }

    #[test]
    fn test_run_files_filters_by_suffix() {
        let dir = TempDir::new().unwrap();
        write_run(dir.path(), "b.bench.json", "B", 8, 0.1, 0.1);
        write_run(dir.path(), "a.bench.json", "A", 8, 0.1, 0.1);
        fs::write(dir.path().join("notes.json"), "{}").unwrap();
        fs::write(dir.path().join(AGGREGATE_FILE), "").unwrap();
        fs::create_dir(dir.path().join("nested.bench.json")).unwrap();

        let files = run_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.bench.json", "b.bench.json"]);
    }

    #[test]
    fn test_aggregate_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        write_run(dir.path(), "1.bench.json", "B", 16, 1.0, 0.1);
        write_run(dir.path(), "2.bench.json", "A", 8, 0.5, 0.05);
        write_run(dir.path(), "3.bench.json", "A", 16, 0.9, 0.09);

        let results = aggregate(dir.path()).unwrap();
        assert_eq!(results.len(), 3);

        let content = fs::read_to_string(cache_path(dir.path())).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "solver_type,batch_size,time_median,residuals_l2_avg");
        assert_eq!(lines[1], "A,8,0.5,0.05");
        assert_eq!(lines[3], "B,16,1,0.1");
    }

    #[test]
    fn test_aggregate_empty_directory_writes_empty_table() {
        let dir = TempDir::new().unwrap();
        let results = aggregate(dir.path()).unwrap();
        assert!(results.is_empty());
        assert!(cache_path(dir.path()).exists());
        assert!(load(dir.path(), false).unwrap().is_empty());
    }

    #[test]
    fn test_aggregate_fails_on_malformed_run() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.bench.json"), "{ not json").unwrap();
        let err = aggregate(dir.path()).unwrap_err();
        assert!(matches!(err, Error::RunRecord { .. }));
    }

    #[test]
    fn test_load_without_generation_reports_missing_data() {
        let dir = TempDir::new().unwrap();
        write_run(dir.path(), "1.bench.json", "A", 8, 0.5, 0.05);

        let err = load(dir.path(), false).unwrap_err();
        assert!(err.is_missing_data());
        assert!(!cache_path(dir.path()).exists());
    }

    #[test]
    fn test_load_generates_missing_cache() {
        let dir = TempDir::new().unwrap();
        write_run(dir.path(), "1.bench.json", "A", 8, 0.5, 0.05);

        let results = load(dir.path(), true).unwrap();
        assert_eq!(results.len(), 1);
        assert!(cache_path(dir.path()).exists());
    }

    #[test]
    fn test_load_trusts_existing_cache() {
        let dir = TempDir::new().unwrap();
        write_run(dir.path(), "1.bench.json", "A", 8, 0.5, 0.05);
        fs::write(
            cache_path(dir.path()),
            "solver_type,batch_size,time_median,residuals_l2_avg\nZ,32,2.0,0.2\n",
        )
        .unwrap();

        let results = load(dir.path(), true).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results.records()[0].solver_type, "Z");
    }

    #[test]
    fn test_load_resorts_edited_cache() {
        let dir = TempDir::new().unwrap();
        fs::write(
            cache_path(dir.path()),
            "solver_type,batch_size,time_median,residuals_l2_avg\n\
             B,8,0.4,0.04\nA,16,0.9,0.09\nA,8,0.5,0.05\n",
        )
        .unwrap();

        let results = load(dir.path(), false).unwrap();
        let keys: Vec<(&str, u64)> = results
            .iter()
            .map(|r| (r.solver_type.as_str(), r.batch_size))
            .collect();
        assert_eq!(keys, vec![("A", 8), ("A", 16), ("B", 8)]);
    }

    #[test]
    fn test_read_zero_byte_cache_is_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(cache_path(dir.path()), "").unwrap();
        assert!(load(dir.path(), false).unwrap().is_empty());
    }

    #[test]
    fn test_read_aggregate_passes_extra_columns_through() {
        let dir = TempDir::new().unwrap();
        let path = cache_path(dir.path());
        fs::write(
            &path,
            "solver_type,batch_size,time_median,residuals_l2_avg,device,time_min\n\
             A,8.0,0.5,0.05,A100,\n",
        )
        .unwrap();

        let results = read_aggregate(&path).unwrap();
        let record = &results.records()[0];
        assert_eq!(record.batch_size, 8);
        assert_eq!(record.extra.get("device").map(String::as_str), Some("A100"));
        assert!(!record.extra.contains_key("time_min"));
    }

    #[test]
    fn test_read_aggregate_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = cache_path(dir.path());
        fs::write(&path, "solver_type,batch_size,time_median\nA,8,0.5\n").unwrap();

        let err = read_aggregate(&path).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingColumn {
                column: "residuals_l2_avg",
                ..
            }
        ));
    }

    #[test]
    fn test_read_aggregate_invalid_value() {
        let dir = TempDir::new().unwrap();
        let path = cache_path(dir.path());
        fs::write(
            &path,
            "solver_type,batch_size,time_median,residuals_l2_avg\nA,eight,0.5,0.05\n",
        )
        .unwrap();

        match read_aggregate(&path).unwrap_err() {
            Error::InvalidValue { row, column, value, .. } => {
                assert_eq!(row, 1);
                assert_eq!(column, "batch_size");
                assert_eq!(value, "eight");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_list_result_directories() {
        let base = TempDir::new().unwrap();
        fs::create_dir(base.path().join("DiffOpt")).unwrap();
        fs::create_dir(base.path().join("CuDSS")).unwrap();
        fs::create_dir(base.path().join(".cache")).unwrap();
        fs::write(base.path().join("README.md"), "").unwrap();

        let names = list_result_directories(base.path()).unwrap();
        assert_eq!(names, vec!["CuDSS", "DiffOpt"]);
    }

    #[test]
    fn test_list_result_directories_missing_base() {
        let base = TempDir::new().unwrap();
        let err = list_result_directories(base.path().join("absent")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_float_cells_stay_short() {
        assert_eq!(float_cell(0.05), "0.05");
        assert_eq!(float_cell(1.0), "1");
        assert_eq!(float_cell(0.0), "0");
        assert_eq!(float_cell(1e-300), "1e-300");
        assert_eq!(float_cell(-2.5e20), "-2.5e20");
        for value in [1e-300, 1.5e-9, 3.0e17, 0.012] {
            assert_eq!(float_cell(value).parse::<f64>().unwrap(), value);
        }
    }

    #[test]
    fn test_aggregate_tiny_residual_row() {
        let dir = TempDir::new().unwrap();
        write_run(dir.path(), "1.bench.json", "A", 8, 0.5, 1e-300);

        aggregate(dir.path()).unwrap();
        let content = fs::read_to_string(cache_path(dir.path())).unwrap();
        assert_eq!(content.lines().nth(1), Some("A,8,0.5,1e-300"));
        assert_eq!(load(dir.path(), false).unwrap().records()[0].residuals_l2_avg, 1e-300);
    }

    #[test]
    fn test_aggregate_accepts_whole_float_batch_size() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.bench.json"),
            r#"{"solver_type": "A", "batch_size": 8.0, "time_median": 0.5, "residuals_l2_avg": 0.05}"#,
        )
        .unwrap();

        let results = aggregate(dir.path()).unwrap();
        assert_eq!(results.records()[0].batch_size, 8);
    }
}
