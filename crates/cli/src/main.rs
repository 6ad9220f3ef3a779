//! Benchmark dashboard CLI entry point.

fn main() {
    if let Err(e) = bench_dashboard_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
