use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskbot-{nanos}-{file_name}"))
}

#[test]
fn check_reports_skipped_lines() {
    let exe = env!("CARGO_BIN_EXE_taskbot");
    let store_path = temp_path("cli-check.txt");
    std::fs::write(
        &store_path,
        "D | 0 | read book | 2/12/2019 1800\nD | 0 | read book\n",
    )
    .unwrap();

    let output = Command::new(exe)
        .arg("check")
        .env("TASKBOT_STORE_PATH", &store_path)
        .env("TASKBOT_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run check command");
    std::fs::remove_file(&store_path).ok();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Loaded 1 tasks"));
    assert!(stdout.contains("line 2: malformed task line"));
}

#[test]
fn check_json_lists_skipped_lines() {
    let exe = env!("CARGO_BIN_EXE_taskbot");
    let store_path = temp_path("cli-check-json.txt");
    std::fs::write(&store_path, "T | 0 | fine\nT | 2 | bad flag\nT | 1 | done\n").unwrap();

    let output = Command::new(exe)
        .args(["--json", "check"])
        .env("TASKBOT_STORE_PATH", &store_path)
        .env("TASKBOT_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run check command");
    std::fs::remove_file(&store_path).ok();

    let payload: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(payload["tasks"], 2);
    assert_eq!(payload["skipped"][0]["line"], 2);
}

#[test]
fn corrupt_store_warns_once_but_still_runs_commands() {
    let exe = env!("CARGO_BIN_EXE_taskbot");
    let store_path = temp_path("cli-corrupt-exec.txt");
    std::fs::write(&store_path, "T | 0 | keep me\n???\n").unwrap();

    let output = Command::new(exe)
        .args(["exec", "LIST"])
        .env("TASKBOT_STORE_PATH", &store_path)
        .env("TASKBOT_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run exec command");
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1.[T][ ] keep me"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("WARNING: skipped 1 malformed line(s)").count(), 1);
}

#[test]
fn missing_store_checks_clean() {
    let exe = env!("CARGO_BIN_EXE_taskbot");
    let store_path = temp_path("cli-check-missing.txt");

    let output = Command::new(exe)
        .arg("check")
        .env("TASKBOT_STORE_PATH", &store_path)
        .env("TASKBOT_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run check command");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Loaded 0 tasks"));
    assert!(!store_path.exists());
}
