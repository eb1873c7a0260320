use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const FRAMES: &str = r#"[[
  {"StartTime":"2024-03-10T18:30:00Z","OffTime":"2024-03-10T19:30:00Z","Duration":"60","TotalMoney":"500","TableId":"1"},
  {"StartTime":"bad","Duration":10,"TotalMoney":10,"TableId":"2"},
  {"StartTime":"2024-02-10T10:00:00Z","OffTime":"2024-02-10T11:00:00Z","Duration":5,"TotalMoney":50,"TableId":"2"}
]]"#;

const TOPUPS: &str = r#"[[
  {"RecordDate":"2024-03-10T20:00:00Z","Amount":"100","Mode":"Cash"},
  {"RecordDate":"2024-03-10T21:00:00Z","Amount":50,"Mode":" online "},
  {"RecordDate":"2024-03-11T10:00:00Z","Amount":25,"Mode":"CASH"},
  {"RecordDate":"2024-03-11T10:00:00Z","Amount":99,"Mode":"card"}
]]"#;

const TABLES: &str = r#"[[
  {"table_id":"T1","total_duration":"120","status":1},
  {"table_id":"T2","total_duration":30,"status":0}
]]"#;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write test file");
}

fn fixture_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(&dir.path().join("frames.json"), FRAMES);
    write_file(&dir.path().join("topup.json"), TOPUPS);
    write_file(&dir.path().join("tabledets.json"), TABLES);
    dir
}

fn bin_path() -> String {
    std::env::var("CARGO_BIN_EXE_snookerstats").unwrap_or_else(|_| {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("target");
        path.push("debug");
        if cfg!(windows) {
            path.push("snookerstats.exe");
        } else {
            path.push("snookerstats");
        }
        path.to_string_lossy().into_owned()
    })
}

/// Run against `data_dir` with no user config. `config` is written to a
/// temp file and used when given.
fn run_snookerstats(
    data_dir: &Path,
    args: &[&str],
    config: Option<&str>,
) -> (bool, String, String) {
    let config_dir = tempfile::tempdir().expect("config dir");
    let config_path = config_dir.path().join("config.toml");
    if let Some(content) = config {
        write_file(&config_path, content);
    }

    let output = Command::new(bin_path())
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .env("SNOOKERSTATS_CONFIG", &config_path)
        .env_remove("RUST_LOG")
        .output()
        .expect("run snookerstats");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

fn json(stdout: &str) -> Value {
    serde_json::from_str(stdout).expect("json output")
}

#[test]
fn frames_json_buckets_by_local_date() {
    let dir = fixture_dir();
    let (ok, stdout, stderr) =
        run_snookerstats(dir.path(), &["frames", "--month", "3", "--year", "2024", "--json"], None);
    assert!(ok, "stderr: {stderr}");

    let v = json(&stdout);
    assert_eq!(v["period"], "2024-03");
    assert_eq!(v["total_money"].as_f64(), Some(500.0));
    let days = v["days"].as_array().expect("days");
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], "2024-03-11");
    assert_eq!(days[0]["day_of_week"], "Monday");
    assert_eq!(days[0]["total_duration"].as_f64(), Some(60.0));
    assert_eq!(v["counts"]["invalid_date"], 1);
    assert_eq!(v["counts"]["filtered_out"], 1);
}

#[test]
fn frames_is_the_default_command() {
    let dir = fixture_dir();
    let (ok, stdout, _) = run_snookerstats(dir.path(), &["-m", "3", "-y", "2024", "-j"], None);
    assert!(ok);
    assert_eq!(json(&stdout)["days"][0]["date"], "2024-03-11");
}

#[test]
fn timezone_option_moves_the_bucket() {
    let dir = fixture_dir();
    let (ok, stdout, _) = run_snookerstats(
        dir.path(),
        &["frames", "--month", "3", "--year", "2024", "--json", "--timezone", "UTC"],
        None,
    );
    assert!(ok);
    let v = json(&stdout);
    assert_eq!(v["days"][0]["date"], "2024-03-10");
    assert_eq!(v["days"][0]["day_of_week"], "Sunday");
}

#[test]
fn topups_json_groups_by_business_day() {
    let dir = fixture_dir();
    let (ok, stdout, stderr) =
        run_snookerstats(dir.path(), &["topups", "--month", "3", "--year", "2024", "--json"], None);
    assert!(ok, "stderr: {stderr}");

    let v = json(&stdout);
    assert_eq!(v["scope"], "month-year");
    let days = v["days"].as_array().expect("days");
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["business_day"], "2024-03-10");
    assert_eq!(days[0]["cash"].as_f64(), Some(100.0));
    assert_eq!(days[0]["online"].as_f64(), Some(50.0));
    assert_eq!(days[1]["business_day"], "2024-03-11");
    assert_eq!(days[1]["cash"].as_f64(), Some(25.0));
    assert_eq!(v["total"].as_f64(), Some(175.0));
    assert_eq!(v["counts"]["unknown_mode"], 1);
}

#[test]
fn topups_other_month_is_empty() {
    let dir = fixture_dir();
    let (ok, stdout, _) =
        run_snookerstats(dir.path(), &["topups", "--month", "4", "--year", "2024"], None);
    assert!(ok);
    assert!(stdout.contains("No top-up data found."));
}

#[test]
fn topups_csv_orders_descending() {
    let dir = fixture_dir();
    let (ok, stdout, _) = run_snookerstats(
        dir.path(),
        &["topups", "--scope", "all", "--csv", "--order", "desc"],
        None,
    );
    assert!(ok);
    assert_eq!(
        stdout,
        "business_day,total,online,cash\n2024-03-11,25.00,0.00,25.00\n2024-03-10,150.00,50.00,100.00\n"
    );
}

#[test]
fn day_detail_shows_usage_and_payments() {
    let dir = fixture_dir();
    let (ok, stdout, stderr) = run_snookerstats(dir.path(), &["day", "--date", "2024-03-11"], None);
    assert!(ok, "stderr: {stderr}");
    assert!(stdout.contains("Details for 2024-03-11 (Monday)"));
    assert!(stdout.contains("Total Duration: 60.00 minutes"));
    assert!(stdout.contains("Total Money: ₹500.00"));
    assert!(stdout.contains("Cash Received: ₹25.00"));
    assert!(stdout.contains("Online Received: ₹0.00"));
}

#[test]
fn day_without_frames_reports_no_data() {
    let dir = fixture_dir();
    let (ok, stdout, _) = run_snookerstats(dir.path(), &["day", "--date", "20240315"], None);
    assert!(ok);
    assert!(stdout.contains("No data available for 2024-03-15"));
}

#[test]
fn missing_files_mean_no_data() {
    let empty = tempfile::tempdir().expect("temp dir");
    let (ok, stdout, _) =
        run_snookerstats(empty.path(), &["frames", "--month", "3", "--year", "2024"], None);
    assert!(ok);
    assert!(stdout.contains("No frame data found for March 2024."));
}

#[test]
fn malformed_body_means_no_data() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(&dir.path().join("tabledets.json"), "{not json");
    let (ok, stdout, _) = run_snookerstats(dir.path(), &["tables"], None);
    assert!(ok);
    assert!(stdout.contains("No table data found."));
}

#[test]
fn invalid_month_exits_with_error() {
    let dir = fixture_dir();
    let (ok, _, stderr) = run_snookerstats(dir.path(), &["--month", "13"], None);
    assert!(!ok);
    assert!(stderr.contains("Invalid month 13"), "stderr: {stderr}");
}

#[test]
fn invalid_date_and_timezone_exit_with_error() {
    let dir = fixture_dir();
    let (ok, _, stderr) = run_snookerstats(dir.path(), &["day", "--date", "2024-13-40"], None);
    assert!(!ok);
    assert!(stderr.contains("Invalid date"), "stderr: {stderr}");

    let (ok, _, stderr) = run_snookerstats(dir.path(), &["--timezone", "Mars/Olympus"], None);
    assert!(!ok);
    assert!(stderr.contains("Invalid timezone"), "stderr: {stderr}");
}

#[test]
fn tables_csv_marks_status() {
    let dir = fixture_dir();
    let (ok, stdout, _) = run_snookerstats(dir.path(), &["tables", "--csv"], None);
    assert!(ok);
    assert_eq!(
        stdout,
        "table_id,total_duration,status\nT1,120.00,active\nT2,30.00,idle\n"
    );
}

#[test]
fn tables_chart_uses_status_colors() {
    let dir = fixture_dir();
    let (ok, stdout, _) = run_snookerstats(dir.path(), &["tables", "--chart"], None);
    assert!(ok);
    let v = json(&stdout);
    assert_eq!(v["type"], "bar");
    assert_eq!(v["data"]["labels"][0], "T1");
    assert_eq!(v["data"]["datasets"][0]["backgroundColor"][0], "#01AB7A");
    assert_eq!(v["data"]["datasets"][0]["backgroundColor"][1], "#CCCCCC");
}

#[test]
fn frames_chart_highlights_sundays() {
    let dir = fixture_dir();
    let (ok, stdout, _) = run_snookerstats(
        dir.path(),
        &["--month", "3", "--year", "2024", "--chart", "--timezone", "UTC"],
        None,
    );
    assert!(ok);
    let v = json(&stdout);
    let duration = &v["data"]["datasets"][0];
    assert_eq!(duration["label"], "Total Duration (minutes)");
    assert_eq!(duration["backgroundColor"][0], "rgba(255, 99, 132, 0.2)");
    assert_eq!(v["data"]["datasets"][1]["borderColor"], "rgba(153, 102, 255, 1)");
}

#[test]
fn occupancy_json_lists_spans() {
    let dir = fixture_dir();
    let (ok, stdout, stderr) =
        run_snookerstats(dir.path(), &["occupancy", "--date", "2024-03-11", "--json"], None);
    assert!(ok, "stderr: {stderr}");
    let v = json(&stdout);
    assert_eq!(v["date"], "2024-03-11");
    let tables = v["tables"].as_array().expect("tables");
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0]["table_id"], "1");
    assert_eq!(tables[0]["spans"][0]["from"], "00:00");
    assert_eq!(tables[0]["spans"][0]["to"], "01:00");
}

#[test]
fn occupancy_chart_has_floating_bar_per_table() {
    let dir = fixture_dir();
    let (ok, stdout, stderr) =
        run_snookerstats(dir.path(), &["occupancy", "--date", "2024-03-11", "--chart"], None);
    assert!(ok, "stderr: {stderr}");
    let v = json(&stdout);
    assert_eq!(v["type"], "bar");
    assert_eq!(v["data"]["labels"], serde_json::json!(["2024-03-11"]));
    let table = &v["data"]["datasets"][0];
    assert_eq!(table["label"], "Table 1");
    assert_eq!(table["data"][0]["x"], "2024-03-11");
    assert_eq!(table["data"][0]["y"], serde_json::json!([0.0, 1.0]));
}

#[test]
fn config_file_supplies_currency_and_order() {
    let dir = fixture_dir();
    let (ok, stdout, stderr) = run_snookerstats(
        dir.path(),
        &["topups", "--scope", "all"],
        Some("currency = \"$\"\norder = \"desc\"\nstudio = \"Cue Club\"\n"),
    );
    assert!(ok, "stderr: {stderr}");
    assert!(stdout.contains("All top-ups (Cue Club)"));
    assert!(stdout.contains("$175.00"));
    let later = stdout.find("2024-03-11").expect("later day");
    let earlier = stdout.find("2024-03-10").expect("earlier day");
    assert!(later < earlier);
}

#[test]
fn debug_logs_go_to_stderr_only() {
    let dir = fixture_dir();
    let (ok, stdout, stderr) = run_snookerstats(
        dir.path(),
        &["tables", "--json", "--debug"],
        None,
    );
    assert!(ok);
    assert!(json(&stdout).is_array());
    assert!(stderr.contains("fetched records"), "stderr: {stderr}");
}
