//! Runs real child processes through `sh`, using the wrapped strategy with `sh` as the launcher.

#![cfg(unix)]

use std::path::Path;

use rangecheck::harness::RESULTS_HEADER;
use rangecheck::{Config, builder};

const FAKE_PROGRAM: &str = r#"
start=$1
length=$2
case "$start" in
  0)
    echo "starting sieve"
    echo "4 primes found in [0, 10)"
    echo "0.001 seconds"
    echo "25 primes found in [0, 100)"
    echo "0.250 seconds"
    ;;
  7)
    echo "segment fault in sieve" >&2
    exit 3
    ;;
  *)
    echo "0 primes found in [$start, $((start + length)))"
    ;;
esac
"#;

fn setup(dir: &Path, table: &str) -> (std::path::PathBuf, std::path::PathBuf) {
    let program = dir.join("count_primes.sh");
    std::fs::write(&program, FAKE_PROGRAM).unwrap();
    let table_path = dir.join("cases.txt");
    std::fs::write(&table_path, table).unwrap();
    (program, table_path)
}

#[test]
fn test_real_process_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let (program, table) = setup(dir.path(), "0 100 25\n7 3 0\n20 3 1\n-1 1 0\n");

    let summary = builder()
        .executable(&program)
        .wrapped("sh")
        .quiet(true)
        .build()
        .unwrap()
        .run_tables(&[&table])
        .unwrap();

    let text = std::fs::read_to_string(dir.path().join("cases.results")).unwrap();
    assert_eq!(
        text,
        format!(
            "{RESULTS_HEADER}0\t100\tPASSED\t0.250\n7\t3\tERROR\t3\n20\t3\tBADCOUNT\t0!=1\n-1\t1\tBADTEST\t-1,\n"
        )
    );
    assert_eq!(summary.cases_seen, 4);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failures, 2);
    assert_eq!(summary.bad_tests, 1);
}

#[test]
fn test_config_driven_run_with_custom_extension() {
    let dir = tempfile::tempdir().unwrap();
    let (program, table) = setup(dir.path(), "30 10 0\n");

    let config = Config::from_toml_str(&format!(
        r#"
        executable = "{}"
        quiet = true

        [execution]
        strategy = "wrapped"
        launcher = "sh"

        [results]
        extension = "out"
        show-output = "never"
        "#,
        program.display()
    ))
    .unwrap();

    let summary = builder()
        .with_config(config)
        .build()
        .unwrap()
        .run_tables(&[&table])
        .unwrap();

    assert!(summary.is_success());
    let text = std::fs::read_to_string(dir.path().join("cases.out")).unwrap();
    assert!(text.ends_with("30\t10\tPASSED\t\n"));
}

#[test]
fn test_missing_launcher_aborts_table_only() {
    let dir = tempfile::tempdir().unwrap();
    let (program, table) = setup(dir.path(), "30 10 0\n");

    let summary = builder()
        .executable(&program)
        .wrapped("/nonexistent/rangecheck-launcher")
        .quiet(true)
        .build()
        .unwrap()
        .run_tables(&[&table])
        .unwrap();

    assert_eq!(summary.failures, 1);
    assert_eq!(summary.cases_seen, 0);
    let text = std::fs::read_to_string(dir.path().join("cases.results")).unwrap();
    assert_eq!(text, RESULTS_HEADER);
}
