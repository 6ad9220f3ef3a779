//! Markdown output generation for benchmark results.
//!
//! This module renders a loaded [`ResultSet`] as markdown, either as one
//! flat table or as a per-solver report.

use bench_dashboard_core::{BenchmarkRecord, ResultSet};
use std::fmt::Write;

/// Generate a markdown summary table of a result set.
pub fn generate_summary(name: &str, results: &ResultSet) -> String {
    let mut output = String::new();

    writeln!(output, "# Benchmark Summary: {}", name).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339()).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "## Results").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "| Solver | Batch Size | Median Time (s) | Residual (L2) |").unwrap();
    writeln!(output, "|--------|------------|-----------------|---------------|").unwrap();

    for record in results {
        writeln!(
            output,
            "| {} | {} | {:.6} | {:.3e} |",
            record.solver_type, record.batch_size, record.time_median, record.residuals_l2_avg
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "---").unwrap();
    writeln!(
        output,
        "Total runs: {} ({} solvers)",
        results.len(),
        results.solver_types().len()
    )
    .unwrap();

    output
}

/// Generate a detailed report with one section per solver.
///
/// Each section lists the solver's runs and names its fastest and most
/// accurate batch sizes.
pub fn generate_solver_report(name: &str, results: &ResultSet) -> String {
    let mut output = String::new();

    writeln!(output, "# Detailed Benchmark Report: {}", name).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339()).unwrap();
    writeln!(output).unwrap();

    if results.is_empty() {
        writeln!(output, "_No benchmark runs recorded._").unwrap();
        return output;
    }

    for solver in results.solver_types() {
        let runs: Vec<&BenchmarkRecord> = results.for_solver(solver).collect();

        writeln!(output, "## {}", solver).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "**Runs:** {}", runs.len()).unwrap();

        if let Some(fastest) = runs
            .iter()
            .min_by(|a, b| a.time_median.total_cmp(&b.time_median))
        {
            writeln!(
                output,
                "**Fastest:** batch size {} ({:.6} s)",
                fastest.batch_size, fastest.time_median
            )
            .unwrap();
        }
        if let Some(accurate) = runs
            .iter()
            .min_by(|a, b| a.residuals_l2_avg.total_cmp(&b.residuals_l2_avg))
        {
            writeln!(
                output,
                "**Most accurate:** batch size {} (residual {:.3e})",
                accurate.batch_size, accurate.residuals_l2_avg
            )
            .unwrap();
        }
        writeln!(output).unwrap();

        writeln!(output, "| Batch Size | Median Time (s) | Residual (L2) |").unwrap();
        writeln!(output, "|------------|-----------------|---------------|").unwrap();
        for run in &runs {
            writeln!(
                output,
                "| {} | {:.6} | {:.3e} |",
                run.batch_size, run.time_median, run.residuals_l2_avg
            )
            .unwrap();
        }
        writeln!(output).unwrap();
    }

    output
}
