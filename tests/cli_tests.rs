use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn boardql_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("boardql"));
    cmd.env_remove("RUST_LOG").env_remove("PORT");
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    serde_json::from_str(&stdout).unwrap()
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    boardql_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GraphQL API"));
}

#[test]
fn test_version() {
    boardql_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("boardql"));
}

#[test]
fn test_schema_prints_sdl() {
    let temp_dir = TempDir::new().unwrap();

    boardql_cmd()
        .arg("schema")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("type Article"))
        .stdout(predicate::str::contains("deleteComment"))
        .stdout(predicate::str::contains("articlesFromBoard"));
}

#[test]
fn test_bad_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(".boardql.yml"), "storage:\n  id_length: 1\n").unwrap();

    boardql_cmd()
        .arg("schema")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

// =============================================================================
// Query / Mutate against a snapshot
// =============================================================================

#[test]
fn test_mutations_persist_between_runs() {
    let temp_dir = TempDir::new().unwrap();

    boardql_cmd()
        .args(["mutate", r#"createBoard(name: "free")"#, "--data", "forum.json"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"createBoard\": true"));

    assert!(temp_dir.path().join("forum.json").exists());

    let output = boardql_cmd()
        .args(["query", "{ boards { id name } }", "--data", "forum.json"])
        .current_dir(temp_dir.path())
        .assert()
        .success();

    let json = stdout_json(output.get_output());
    assert_eq!(json["data"]["boards"][0]["name"], "free");
    assert_eq!(json["data"]["boards"][0]["id"], "board-00000001");
}

#[test]
fn test_snapshot_path_from_config() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(".boardql.yml"),
        "storage:\n  path: data/forum.json\n",
    )
    .unwrap();
    let nested = temp_dir.path().join("sub");
    std::fs::create_dir_all(&nested).unwrap();

    boardql_cmd()
        .args([
            "mutate",
            r#"createUser(name: "Kim", nickname: "kimchi", school: "SNU")"#,
        ])
        .current_dir(&nested)
        .assert()
        .success();

    assert!(temp_dir.path().join("data/forum.json").exists());
}

#[test]
fn test_variables() {
    let temp_dir = TempDir::new().unwrap();

    boardql_cmd()
        .args([
            "mutate",
            "mutation Add($name: String!) { createBoard(name: $name) }",
            "--variables",
            r#"{"name": "notice"}"#,
            "--data",
            "forum.json",
        ])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"createBoard\": true"));

    let output = boardql_cmd()
        .args(["query", "{ boards { name } }", "--data", "forum.json"])
        .current_dir(temp_dir.path())
        .assert()
        .success();
    assert_eq!(stdout_json(output.get_output())["data"]["boards"][0]["name"], "notice");

    boardql_cmd()
        .args([
            "mutate",
            "createBoard(name: $name)",
            "--variables",
            r#"{"name": "notice"}"#,
        ])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("full document"));

    boardql_cmd()
        .args([
            "query",
            "query Find($id: ID!) { board(id: $id) { name } }",
            "--variables",
            r#"{"id": "board-missing"}"#,
        ])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"board\": null"));
}

#[test]
fn test_error_exit_code() {
    let temp_dir = TempDir::new().unwrap();

    boardql_cmd()
        .args([
            "mutate",
            r#"postArticle(authorId: "user-1", boardId: "board-1", type: NORMAL, title: "t", content: "c") { id }"#,
        ])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("CONSTRAINT_VIOLATION"))
        .stderr(predicate::str::contains("error(s)"));
}
