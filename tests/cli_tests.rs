mod common;

use common::{run_tasklift, TestEnv};

const TRANSCRIPT: &str = "\
Fabiana: Bom dia, Victor! Tudo bem?
Fabiana: Victor, você pode enviar a proposta até amanhã
Victor: Combinado, pode deixar comigo";

#[test]
fn tasklift_help_shows_usage() {
    let output = run_tasklift(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("extract"));
    assert!(
        !stderr.contains("No config file found"),
        "--help should not log config fallback noise\nstderr:\n{}",
        stderr
    );
}

#[test]
fn tasklift_version_shows_version() {
    let output = run_tasklift(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("tasklift "));
}

#[test]
fn completions_bash_outputs_script() {
    let output = run_tasklift(&["completions", "bash"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "completions bash should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(
        stdout.contains("tasklift"),
        "expected completion output to reference command name\nstdout:\n{}",
        stdout
    );
}

#[test]
fn config_show_works() {
    let output = run_tasklift(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config show should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("[general]"));
    assert!(stdout.contains("[extraction]"));
    assert!(stdout.contains("tracked_person = \"Victor\""));
}

#[test]
fn config_path_returns_valid_path() {
    let output = run_tasklift(&["config", "path"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let env = TestEnv::new();

    let first = env.run(&["config", "init"]);
    assert!(first.status.success());
    assert!(env.config_path().exists());

    let second = env.run(&["config", "init"]);
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("--force"));

    let forced = env.run(&["config", "init", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn extract_missing_file_fails() {
    let env = TestEnv::new();
    let missing = env.path_in_home("nope.txt");
    let output = env.run(&["extract", missing.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Transcript not found"),
        "unexpected stderr:\n{}",
        stderr
    );
}

#[test]
fn extract_prints_json() {
    let env = TestEnv::new();
    let file = env.write_transcript("reuniao.txt", TRANSCRIPT);
    let output = env.run(&[
        "extract",
        file.to_str().unwrap(),
        "--today",
        "2025-10-22",
        "--format",
        "json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        output.status.success(),
        "extract should succeed\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON on stdout");
    assert_eq!(value["reference_date"], "2025-10-22");
    assert_eq!(value["total"], 1);
    assert_eq!(value["tasks"][0]["source_line"], 2);
    assert_eq!(value["tasks"][0]["deadline"]["date"], "2025-10-23");
    assert_eq!(value["tasks"][0]["responsible"], "tracked_person");
}

#[test]
fn extract_prints_text() {
    let env = TestEnv::new();
    let file = env.write_transcript("reuniao.txt", TRANSCRIPT);
    let output = env.run(&["extract", file.to_str().unwrap(), "--today", "2025-10-22"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Tasks: 1 (1 with deadline, 0 without)"));
    assert!(stdout.contains("[direct_assignment]"));
    assert!(stdout.contains("Due: 2025-10-23"));
}

#[test]
fn person_flag_changes_tracked_person() {
    let env = TestEnv::new();
    let file = env.write_transcript(
        "reuniao.txt",
        "Fabiana: Ana, prepare o material hoje\nFabiana: depois precisamos enviar para o cliente",
    );
    let path = file.to_str().unwrap();

    let default = env.run(&["extract", path, "--format", "json"]);
    let value: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&default.stdout)).unwrap();
    assert_eq!(value["total"], 0);

    let ana = env.run(&["--person", "Ana", "extract", path, "--format", "json"]);
    let value: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&ana.stdout)).unwrap();
    assert_eq!(value["total"], 1);
}

#[test]
fn report_writes_html_file() {
    let env = TestEnv::new();
    let file = env.write_transcript("reuniao.txt", TRANSCRIPT);
    let out = env.path_in_home("tarefas.html");
    let output = env.run(&[
        "report",
        file.to_str().unwrap(),
        "--today",
        "2025-10-22",
        "--output",
        out.to_str().unwrap(),
    ]);

    assert!(
        output.status.success(),
        "report should succeed\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let html = std::fs::read_to_string(&out).expect("report file");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Victor, você pode enviar a proposta até amanhã"));
    assert!(html.contains("AMANHÃ (23/10/2025)"));
}

#[test]
fn events_prints_calendar_json() {
    let env = TestEnv::new();
    let file = env.write_transcript("reuniao.txt", TRANSCRIPT);
    let output = env.run(&["events", file.to_str().unwrap(), "--today", "2025-10-22"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON on stdout");
    let events = value.as_array().expect("array of events");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["start"]["date"], "2025-10-23");
    assert_eq!(events[0]["end"]["date"], "2025-10-23");
    assert_eq!(events[0]["reminders"]["useDefault"], false);
}

#[test]
fn events_reject_unknown_time_zone() {
    let env = TestEnv::new();
    env.write_config("[calendar]\ntimezone = \"Mars/Olympus\"\n");
    let file = env.write_transcript("reuniao.txt", TRANSCRIPT);

    let output = env.run(&["events", file.to_str().unwrap(), "--today", "2025-10-22"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Invalid calendar.timezone: Mars/Olympus"),
        "unexpected stderr:\n{}",
        stderr
    );
}

#[test]
fn configured_log_level_controls_output() {
    let env = TestEnv::new();
    let file = env.write_transcript("reuniao.txt", TRANSCRIPT);
    let path = file.to_str().unwrap();

    let quiet = env.run(&["extract", path, "--today", "2025-10-22"]);
    let stderr = String::from_utf8_lossy(&quiet.stderr);
    assert!(stderr.contains("Extracted 1 task(s)"), "stderr:\n{}", stderr);
    assert!(!stderr.contains("Analyzing"), "stderr:\n{}", stderr);

    env.write_config("[general]\nlog_level = \"debug\"\n");
    let debug = env.run(&["extract", path, "--today", "2025-10-22"]);
    let stderr = String::from_utf8_lossy(&debug.stderr);
    assert!(debug.status.success());
    assert!(stderr.contains("Analyzing 3 lines"), "stderr:\n{}", stderr);

    env.write_config("[general]\nlog_level = \"warn\"\n");
    let warn = env.run(&["extract", path, "--today", "2025-10-22"]);
    assert!(!String::from_utf8_lossy(&warn.stderr).contains("Extracted"));
}

#[test]
fn pending_is_empty_until_saved() {
    let env = TestEnv::new();

    let output = env.run(&["pending"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No pending tasks"));

    let file = env.write_transcript("reuniao.txt", TRANSCRIPT);
    let saved = env.run(&[
        "extract",
        file.to_str().unwrap(),
        "--today",
        "2025-10-22",
        "--save-pending",
    ]);
    assert!(saved.status.success());
    assert!(String::from_utf8_lossy(&saved.stderr).contains("Saved 1 pending task(s)"));

    let output = env.run(&["pending"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("reuniao.txt"));
    assert!(stdout.contains("Due: 2025-10-23"));
}

#[test]
fn unknown_format_is_rejected() {
    let env = TestEnv::new();
    let file = env.write_transcript("reuniao.txt", TRANSCRIPT);
    let output = env.run(&["extract", file.to_str().unwrap(), "--format", "yaml"]);
    assert!(!output.status.success());
}
