use clap::Parser;
use slipgrid::cli::commands::train::{TrainArgs, execute};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");

    let args = parse_args([
        "slipgrid-train",
        "--episodes",
        "5",
        "--seed",
        "1",
        "--report-interval",
        "0",
        "--no-table",
        "--no-playback",
        "--summary",
        summary_stem.to_str().unwrap(),
    ]);

    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["total_episodes"], 5);
    assert_eq!(parsed["config"]["episodes"], 5);
    assert_eq!(parsed["config"]["grid_rows"], 5);
    assert!(parsed["playback_outcome"].is_null());
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}/", summary_dir.display());

    let args = parse_args([
        "slipgrid-train",
        "--episodes",
        "3",
        "--seed",
        "1",
        "--report-interval",
        "0",
        "--no-table",
        "--no-playback",
        "--summary",
        &summary_arg,
    ]);

    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["total_episodes"], 3);
}

#[test]
fn observations_flag_writes_one_record_per_episode() {
    let tmp = tempdir().unwrap();
    let log_path = tmp.path().join("episodes.jsonl");

    let args = parse_args([
        "slipgrid-train",
        "--episodes",
        "4",
        "--seed",
        "2",
        "--report-interval",
        "0",
        "--no-table",
        "--no-playback",
        "--observations",
        log_path.to_str().unwrap(),
    ]);

    execute(args).expect("training with observations should succeed");

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    for (i, line) in lines.iter().enumerate() {
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(record["episode"], i);
        assert!(record["epsilon"].as_f64().unwrap() <= 1.0);
    }
}

#[test]
fn grid_file_is_loaded_and_validated() {
    let tmp = tempdir().unwrap();

    let good = tmp.path().join("corridor.txt");
    std::fs::write(&good, "S . G\n").unwrap();
    let args = parse_args([
        "slipgrid-train",
        "--episodes",
        "2",
        "--seed",
        "3",
        "--report-interval",
        "0",
        "--no-table",
        "--no-playback",
        "--grid",
        good.to_str().unwrap(),
    ]);
    execute(args).expect("valid grid file should train");

    let bad = tmp.path().join("bad.txt");
    std::fs::write(&bad, "S?G\n").unwrap();
    let args = parse_args([
        "slipgrid-train",
        "--episodes",
        "2",
        "--report-interval",
        "0",
        "--grid",
        bad.to_str().unwrap(),
    ]);
    assert!(execute(args).is_err());
}
