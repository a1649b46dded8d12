use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tasks-{nanos}-{file_name}"))
}

fn write_store(path: &Path, tasks: serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(&tasks).unwrap()).unwrap();
}

fn run(store_path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tasks"))
        .args(args)
        .env("TASKS_STORE_PATH", store_path)
        .env("TASKS_CONFIG_PATH", temp_path("no-config.json"))
        .env_remove("TASKS_LOG")
        .output()
        .expect("failed to run tasks")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn mixed_store() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "1",
            "title": "Task 1",
            "description": "Description 1",
            "deadline": "2023-05-20",
            "completed": false
        },
        {
            "id": "2",
            "title": "Task 2",
            "description": "Description 2",
            "deadline": "2023-04-30",
            "completed": false
        },
        {
            "id": "3",
            "title": "Task 3",
            "description": "",
            "deadline": "2099-05-10",
            "completed": false
        },
        {
            "id": "4",
            "title": "Undated",
            "completed": false
        },
        {
            "id": "5",
            "title": "Finished",
            "deadline": "2023-01-01",
            "completed": true,
            "completionDate": "2022-12-30 18:00:00"
        }
    ])
}

#[test]
fn list_prints_every_task_in_stored_order() {
    let store_path = temp_path("cli-list.json");
    write_store(&store_path, mixed_store());

    let output = run(&store_path, &["list"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines[0], "All tasks:");
    let ids: Vec<&str> = lines
        .iter()
        .filter_map(|line| line.strip_prefix("  ID: "))
        .collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    assert!(lines.contains(&"  Deadline: No deadline".to_string()));
    assert!(lines.contains(&"  Status: Completed".to_string()));
    assert!(lines.contains(&"  Completion Date: 2022-12-30 18:00:00".to_string()));
    assert!(lines.contains(&"  Completion Date: Not completed".to_string()));
}

#[test]
fn list_on_missing_store_reports_no_tasks() {
    let store_path = temp_path("cli-list-missing.json");

    let output = run(&store_path, &["list"]);

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["All tasks:", "No tasks."]);
    assert!(!store_path.exists());
}

#[test]
fn expired_lists_overdue_incomplete_tasks() {
    let store_path = temp_path("cli-expired.json");
    write_store(&store_path, mixed_store());

    let output = run(&store_path, &["expired"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec![
            "Expired tasks:",
            "  ID: 1",
            "  Title: Task 1",
            "  Description: Description 1",
            "  Deadline: 2023-05-20",
            "----------------------------",
            "  ID: 2",
            "  Title: Task 2",
            "  Description: Description 2",
            "  Deadline: 2023-04-30",
            "----------------------------",
        ]
    );
}

#[test]
fn expired_without_matches_prints_notice_only() {
    let store_path = temp_path("cli-expired-none.json");
    write_store(
        &store_path,
        serde_json::json!([
            { "id": "1", "title": "Later", "deadline": "2099-01-01", "completed": false },
            {
                "id": "2",
                "title": "Done",
                "deadline": "2023-05-20",
                "completed": true,
                "completionDate": "2023-05-01 10:00:00"
            }
        ]),
    );

    let output = run(&store_path, &["expired"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["No expired tasks."]);
}

#[test]
fn pending_sorts_dated_incomplete_tasks() {
    let store_path = temp_path("cli-pending.json");
    write_store(&store_path, mixed_store());

    let output = run(&store_path, &["pending"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines[0], "Pending tasks (sorted by deadline):");
    let ids: Vec<&str> = lines
        .iter()
        .filter_map(|line| line.strip_prefix("  ID: "))
        .collect();
    assert_eq!(ids, vec!["2", "1", "3"]);
    assert!(lines.contains(&"  Description: No description".to_string()));
    assert!(!lines.contains(&"  Title: Undated".to_string()));
}

#[test]
fn pending_without_matches_keeps_header() {
    let store_path = temp_path("cli-pending-none.json");
    write_store(
        &store_path,
        serde_json::json!([{ "id": "1", "title": "Undated", "completed": false }]),
    );

    let output = run(&store_path, &["pending"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["Pending tasks (sorted by deadline):", "No pending tasks."]
    );
}

#[test]
fn pending_json_outputs_sorted_array() {
    let store_path = temp_path("cli-pending-json.json");
    write_store(&store_path, mixed_store());

    let output = run(&store_path, &["pending", "--json"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let printed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    let ids: Vec<&str> = printed
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|task| task["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["2", "1", "3"]);
}

#[test]
fn expired_json_outputs_empty_array() {
    let store_path = temp_path("cli-expired-json.json");
    write_store(&store_path, serde_json::json!([]));

    let output = run(&store_path, &["expired", "--json"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let printed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(printed, serde_json::json!([]));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No expired tasks."));
}

#[test]
fn pending_json_announces_empty_view_on_stderr() {
    let store_path = temp_path("cli-pending-json-empty.json");
    write_store(
        &store_path,
        serde_json::json!([{ "id": "1", "title": "Undated", "completed": false }]),
    );

    let output = run(&store_path, &["pending", "--json"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let printed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(printed, serde_json::json!([]));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No pending tasks."));
}

#[test]
fn list_table_renders_rows() {
    let store_path = temp_path("cli-list-table.json");
    write_store(&store_path, mixed_store());

    let output = run(&store_path, &["list", "--table"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Title"));
    assert!(stdout.contains("Undated"));
    assert!(stdout.contains("2022-12-30 18:00:00"));
}

#[test]
fn config_file_selects_store() {
    let config_path = temp_path("cli-config.json");
    let store_path = temp_path("cli-config-store.json");
    write_store(&store_path, mixed_store());
    std::fs::write(
        &config_path,
        serde_json::json!({ "store_path": store_path }).to_string(),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_tasks"))
        .arg("list")
        .env_remove("TASKS_STORE_PATH")
        .env("TASKS_CONFIG_PATH", &config_path)
        .env_remove("TASKS_LOG")
        .output()
        .expect("failed to run tasks");
    std::fs::remove_file(&config_path).ok();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("All tasks:\n"));
    assert!(stdout.contains("  Title: Undated"));
    assert!(!stdout.contains('\x1b'));
}

#[test]
fn relative_store_in_config_sits_beside_config_file() {
    let config_dir = temp_path("cli-config-dir");
    std::fs::create_dir_all(&config_dir).unwrap();
    let config_path = config_dir.join("config.json");
    std::fs::write(&config_path, r#"{ "store_path": "work.json" }"#).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_tasks"))
        .args(["add", "Relative"])
        .current_dir(std::env::temp_dir())
        .env_remove("TASKS_STORE_PATH")
        .env("TASKS_CONFIG_PATH", &config_path)
        .env_remove("TASKS_LOG")
        .output()
        .expect("failed to run tasks");
    let stored = std::fs::read_to_string(config_dir.join("work.json"));
    std::fs::remove_dir_all(&config_dir).ok();

    assert!(output.status.success());
    assert!(stored.expect("store written next to config").contains("Relative"));
}

#[test]
fn store_override_beats_environment() {
    let env_store = temp_path("cli-env-store.json");
    let override_store = temp_path("cli-override-store.json");
    write_store(&override_store, mixed_store());

    let override_arg = format!("store_path={}", override_store.display());
    let output = run(&env_store, &["list", "--config-override", &override_arg]);
    std::fs::remove_file(&override_store).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  Title: Finished"));
    assert!(!env_store.exists());
}

#[test]
fn invalid_override_is_rejected() {
    let store_path = temp_path("cli-bad-override.json");

    let output = run(&store_path, &["list", "--config-override", "theme=noir"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}
