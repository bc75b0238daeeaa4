use std::path::Path;

use jtlstat_cli::{run, Config};
use jtlstat_core::JtlStatError;

const HEADER: &str = "timeStamp,elapsed,label,responseCode,success\n";

async fn write(dir: &Path, name: &str, content: &str) {
    tokio::fs::write(dir.join(name), content)
        .await
        .expect("writing fixture should succeed");
}

async fn fixture_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    write(
        dir.path(),
        "variant-a-mixed.jtl",
        &format!("{HEADER}1000,10,A,200,true\n1100,20,A,500,false\n2000,15,B,200,true\n"),
    )
    .await;
    write(
        dir.path(),
        "variant-c-mixed.jtl",
        &format!("{HEADER}1000,12,A,200,true\n1000,18,B,200,true\n"),
    )
    .await;
    write(dir.path(), "variant-d-mixed.jtl", HEADER).await;
    dir
}

#[tokio::test]
async fn writes_markdown_report() {
    let results = fixture_dir().await;
    let out = tempfile::tempdir().expect("tempdir should be created");
    let output = out.path().join("README_RESULTS.md");

    let batch = run(&Config::new(results.path(), &output))
        .await
        .expect("run should succeed");
    assert_eq!(batch.reports.len(), 2);
    assert!(batch.failed.is_empty());

    let md = tokio::fs::read_to_string(&output)
        .await
        .expect("report should be written");
    assert!(md.contains("| mixed | A | 3.00 | 15.00 |"));
    // Identical timestamps clamp the window to one second.
    assert!(md.contains("| mixed | C | 2.00 | 15.00 |"));
    assert!(md.contains("| variant-a-mixed.jtl | A | 1 | 33.33 |"));
    // The header-only file is left out without a trace.
    assert!(!md.contains("variant-d-mixed.jtl"));
}

#[tokio::test]
async fn writes_json_report_when_asked() {
    let results = fixture_dir().await;
    let out = tempfile::tempdir().expect("tempdir should be created");
    let output = out.path().join("summary.json");

    run(&Config::new(results.path(), &output))
        .await
        .expect("run should succeed");

    let json = tokio::fs::read_to_string(&output)
        .await
        .expect("report should be written");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["reports"][0]["file_name"], "variant-a-mixed.jtl");
    assert_eq!(value["reports"][0]["summary"]["total"], 3);
    assert_eq!(value["reports"][0]["endpoints"]["A"]["errors"], 1);
    assert_eq!(value["reports"].as_array().unwrap().len(), 2);
    assert!(!json.contains("variant-d-mixed.jtl"));
}

#[tokio::test]
async fn malformed_file_is_left_out_but_batch_completes() {
    let results = fixture_dir().await;
    write(
        results.path(),
        "variant-e-mixed.jtl",
        &format!("{HEADER}1000,slow,A,200,true\n"),
    )
    .await;
    let out = tempfile::tempdir().expect("tempdir should be created");
    let output = out.path().join("README_RESULTS.md");

    let batch = run(&Config::new(results.path(), &output))
        .await
        .expect("run should succeed");
    assert_eq!(batch.failed.len(), 1);

    let md = tokio::fs::read_to_string(&output)
        .await
        .expect("report should be written");
    assert!(md.contains("- `variant-e-mixed.jtl`: line 2"));
    assert!(!md.contains("| variant-e-mixed.jtl |"));
}

#[tokio::test]
async fn missing_results_dir_writes_nothing() {
    let out = tempfile::tempdir().expect("tempdir should be created");
    let output = out.path().join("README_RESULTS.md");

    let result = run(&Config::new(out.path().join("missing"), &output)).await;
    assert!(matches!(result, Err(JtlStatError::Io(_))));
    assert!(!output.exists());
}

#[tokio::test]
async fn results_path_that_is_a_file_is_config_error() {
    let out = tempfile::tempdir().expect("tempdir should be created");
    let not_a_dir = out.path().join("results");
    write(out.path(), "results", "").await;
    let output = out.path().join("README_RESULTS.md");

    let result = run(&Config::new(&not_a_dir, &output)).await;
    assert!(matches!(result, Err(JtlStatError::Config(_))));
    assert!(!output.exists());
}
