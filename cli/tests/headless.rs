use std::io::Write;

use clap::Parser;
use matmul_report_cli::{command, Cli};
use tempfile::NamedTempFile;

const RESULTS: &str = "\
MatrixSize,Sparsity,MatrixType,Optimization,Time(s),CacheMisses
1000,1.0,dense-dense,Native,2.0,1200
1000,1.0,dense-dense,SIMD,0.6,900
1000,0.01,dense-sparse,Native,0.9,800
2000,1.0,dense-dense,Native,9.5,5100
1000,0.01,sparse-sparse,All,0.05,40
2000,0.01,sparse-sparse,All,0.2,150
";

fn results_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> anyhow::Result<()> {
    let cli = Cli::try_parse_from(args.iter().copied())?;
    command::handle_command(cli)
}

#[test]
fn full_report_renders_headless() {
    let file = results_file(RESULTS);
    let path = file.path().to_str().unwrap();

    run(&["matmul-report", "--headless", "--data", path, "all"]).unwrap();
}

#[test]
fn single_operations_render_headless() {
    let file = results_file(RESULTS);
    let path = file.path().to_str().unwrap();

    run(&["matmul-report", "--headless", "--data", path, "line", "dense-dense"]).unwrap();
    run(&["matmul-report", "--headless", "--data", path, "bar", "1000"]).unwrap();
    run(&["matmul-report", "--headless", "sparsity", "--path", path]).unwrap();
}

#[test]
fn missing_table_is_reported() {
    let err = run(&[
        "matmul-report",
        "--headless",
        "--data",
        "/nonexistent/performance_results.csv",
        "line",
        "dense-dense",
    ])
    .unwrap_err();

    assert!(format!("{err:#}").contains("failed to load"));
}

#[test]
fn cache_scatter_needs_cache_column() {
    let file = results_file(
        "MatrixSize,Sparsity,MatrixType,Optimization,Time(s)\n\
         1000,1.0,dense-dense,Native,2.0\n",
    );
    let path = file.path().to_str().unwrap();

    let err = run(&["matmul-report", "--headless", "--data", path, "cache", "dense-dense"])
        .unwrap_err();
    assert!(format!("{err:#}").contains("CacheMisses"));
}
