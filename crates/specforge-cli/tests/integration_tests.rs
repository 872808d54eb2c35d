//! End-to-end tests for the `specforge` binary.
//!
//! These run the real executable against temporary directories. Only the
//! bundled-template path is exercised here; external package resolution is
//! covered by the adapter-level tests with a scripted command runner.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn specforge() -> Command {
    Command::cargo_bin("specforge").expect("binary builds")
}

#[test]
fn help_lists_subcommands() {
    specforge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("templates"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_matches_manifest() {
    specforge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_arguments_shows_help_and_fails() {
    specforge().assert().failure().code(2);
}

#[test]
fn init_requires_assistant() {
    let tmp = TempDir::new().unwrap();
    specforge()
        .arg("init")
        .arg(tmp.path().join("demo"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--ai"));
}

#[test]
fn quiet_and_verbose_conflict() {
    specforge()
        .args(["--quiet", "--verbose", "templates"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn init_scaffolds_claude_layout() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("demo");

    specforge()
        .arg("init")
        .arg(&project)
        .args(["--ai", "claude", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scaffolded"));

    assert!(project.join(".claude/commands/plan.md").is_file());
    assert!(project.join(".claude/commands/specify.md").is_file());
    assert!(project.join(".claude-config.json").is_file());
    assert!(project.join(".specify/memory/constitution.md").is_file());
    assert!(project.join(".specify/scripts/bash/setup-plan.sh").is_file());
    assert!(
        !project.join(".specify/scripts/powershell").exists(),
        "default dialect must not ship powershell scripts"
    );

    // __AGENT__ rewritten, paths anchored under .specify
    let plan = std::fs::read_to_string(project.join(".claude/commands/plan.md")).unwrap();
    assert!(plan.contains("claude"));
    assert!(!plan.contains("__AGENT__"));
    assert!(plan.contains(".specify/"));
}

#[test]
fn init_scaffolds_gemini_toml_commands() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("gem");

    specforge()
        .arg("init")
        .arg(&project)
        .args(["--ai", "gemini", "--yes"])
        .assert()
        .success();

    assert!(project.join(".gemini/commands/specify.toml").is_file());
    assert!(project.join(".gemini-config.json").is_file());

    let toml = std::fs::read_to_string(project.join(".gemini/commands/specify.toml")).unwrap();
    assert!(toml.starts_with("description = "));
    assert!(toml.contains("{{args}}"));
    assert!(!toml.contains("$ARGUMENTS"));
}

#[test]
fn roadmap_workflow_adds_specs_tree() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("planned");

    specforge()
        .arg("init")
        .arg(&project)
        .args(["--ai", "cursor", "--yes", "--workflow", "roadmap"])
        .assert()
        .success();

    let roadmap = std::fs::read_to_string(project.join("specs/roadmap.md")).unwrap();
    assert!(roadmap.contains("planned"));
    assert!(!roadmap.contains("[Project Name]"));
    assert!(project.join("specs/modules/README.md").is_file());
}

#[test]
fn existing_nonempty_directory_is_refused() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("taken");
    std::fs::create_dir_all(&project).unwrap();
    std::fs::write(project.join("keep.txt"), "mine").unwrap();

    specforge()
        .arg("init")
        .arg(&project)
        .args(["--ai", "claude", "--yes"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    // Nothing was written into the directory.
    assert!(!project.join(".claude").exists());
}

#[test]
fn force_allows_existing_directory() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("taken");
    std::fs::create_dir_all(&project).unwrap();
    std::fs::write(project.join("keep.txt"), "mine").unwrap();

    specforge()
        .arg("init")
        .arg(&project)
        .args(["--ai", "claude", "--yes", "--force"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(project.join("keep.txt")).unwrap(),
        "mine"
    );
    assert!(project.join(".claude/commands/plan.md").is_file());
}

#[test]
fn invalid_project_name_is_rejected() {
    specforge()
        .args(["init", ".hidden", "--ai", "claude", "--yes"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn json_output_emits_summary() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("machine");

    let output = specforge()
        .args(["--output-format", "json"])
        .arg("init")
        .arg(&project)
        .args(["--ai", "codebuddy", "--yes"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json_start = stdout.find('{').expect("JSON object in output");
    let summary: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert_eq!(summary["project"], "machine");
    assert_eq!(summary["assistant"], "codebuddy");
    assert!(summary["files"].as_u64().unwrap() > 0);
}

#[test]
fn templates_lists_bundled_commands() {
    specforge()
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("specify"))
        .stdout(predicate::str::contains("plan"));
}

#[test]
fn completions_bash_emits_script() {
    specforge()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("specforge"));
}
