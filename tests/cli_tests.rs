use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const CLEAN: &str = "{\"label\": \"pos\", \"interaction_type\": \"reply\", \"source\": \"podcast\"}\n\
{\"label\": \"neg\", \"interaction_type\": \"like\", \"source\": \"stream\"}\n";

const WITH_NAN: &str = "{\"label\": \"pos\", \"score\": NaN}\n";

const BROKEN: &str = "{\"label\": \"pos\"\n";

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pipeline_stats"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run pipeline_stats")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_validate_clean_file_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "train.jsonl", CLEAN);
    let path = temp_dir.path().join("train.jsonl");

    let output = run(&["validate", path.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("✓ OK: 1 files, 2 lines, 2 valid records"));
}

#[test]
fn test_validate_exits_one_on_nan_lines() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "nan.jsonl", WITH_NAN);

    let output = run(&["validate", temp_dir.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("NaN lines:     1"));
    assert!(text.contains("FAILED"));
}

#[test]
fn test_validate_exits_one_on_parse_errors() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "a.jsonl", CLEAN);
    write(temp_dir.path(), "b.jsonl", BROKEN);

    let output = run(&["validate", "--json", temp_dir.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let summary: Value = serde_json::from_str(&stdout(&output)).unwrap();
    let files = summary["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["parse_errors"], 0);
    assert_eq!(files[1]["parse_errors"], 1);
    assert_eq!(files[1]["issues"][0]["kind"], "parse");
}

#[test]
fn test_label_field_flag_replaces_config_fields() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "data/train.jsonl", CLEAN);
    write(
        temp_dir.path(),
        "pipeline.json",
        r#"{"validation": {"label_fields": []}}"#,
    );
    let config = temp_dir.path().join("pipeline.json");
    let data = temp_dir.path().join("data");

    let output = run(&[
        "validate",
        "--config",
        config.to_str().unwrap(),
        "--label-field",
        "source",
        data.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let text = stdout(&output);
    assert!(text.contains("Label 'source':"));
    assert!(text.contains("podcast"));
    assert!(!text.contains("Label 'label':"));
}

#[test]
fn test_status_root_overrides_config_paths() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("pipeline");
    write(&root, "audio/alpha/ep1.mp3", "");
    write(&root, "transcripts/alpha/ep1.json", "{}");
    write(&root, "training/train.jsonl", CLEAN);
    write(
        temp_dir.path(),
        "pipeline.json",
        r#"{"paths": {"data_dir": "/nonexistent/data", "output_dir": "/nonexistent/out"}}"#,
    );
    let config = temp_dir.path().join("pipeline.json");

    let output = run(&[
        "status",
        "--json",
        "--config",
        config.to_str().unwrap(),
        "--root",
        root.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let summary: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["channels"][0]["channel"], "alpha");
    assert_eq!(summary["channels"][0]["counts"], serde_json::json!([1, 1, 0, 0]));
    assert_eq!(summary["total_output_lines"], 2);
}

#[test]
fn test_count_lines_reports_total() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "a.jsonl", "1\n2\n");
    write(temp_dir.path(), "nested/b.jsonl", "1\n2\n3");
    write(temp_dir.path(), "nested/skip.txt", "1\n2\n3\n4\n");

    let output = run(&["count-lines", temp_dir.path().to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.lines().last().unwrap().trim() == "5  total");

    let output = run(&["count-lines", "--json", temp_dir.path().to_str().unwrap()]);
    let counts: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(counts["total"], 5);
    assert_eq!(counts["files"].as_array().unwrap().len(), 2);
}

#[test]
fn test_validate_missing_path_fails() {
    let output = run(&["validate", "/definitely/not/here.jsonl"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("path does not exist"));
}
