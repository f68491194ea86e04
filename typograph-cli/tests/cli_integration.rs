//! Integration tests for the typograph CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{name}")
}

fn typograph() -> Command {
    Command::cargo_bin("typograph").unwrap()
}

#[test]
fn test_format_text_file() {
    typograph()
        .arg("format")
        .arg("-i")
        .arg(fixture_path("quotes.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Мама сказала: «Привет…»"))
        .stdout(predicate::str::contains("«Электроника»"))
        .stdout(predicate::str::contains("—"));
}

#[test]
fn test_format_html_file() {
    typograph()
        .arg("format")
        .arg("-i")
        .arg(fixture_path("article.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1 class=\"title--main\">"))
        .stdout(predicate::str::contains("«Типограф»"))
        .stdout(predicate::str::contains("©"))
        .stdout(predicate::str::contains("2×2"))
        .stdout(predicate::str::contains("<pre>a -- \"b\"</pre>"));
}

#[test]
fn test_stdin_input() {
    typograph()
        .arg("format")
        .write_stdin("\"Привет\"")
        .assert()
        .success()
        .stdout("«Привет»\n");
}

#[test]
fn test_entities_flag() {
    typograph()
        .args(["format", "-e", "named"])
        .write_stdin("\"Привет\"")
        .assert()
        .success()
        .stdout("&laquo;Привет&raquo;\n");

    typograph()
        .args(["format", "--entities", "hex"])
        .write_stdin("\"Привет\"")
        .assert()
        .success()
        .stdout("&#xab;Привет&#xbb;\n");
}

#[test]
fn test_preset_flag() {
    typograph()
        .args(["format", "--preset", "minimal"])
        .write_stdin("Москва - столица (c)")
        .assert()
        .success()
        .stdout("Москва - столица (c)\n");
}

#[test]
fn test_rules_file() {
    typograph()
        .args(["format", "-r", &fixture_path("named.toml")])
        .write_stdin("Он был \"дома\"")
        .assert()
        .success()
        .stdout("Он был &laquo;дома&raquo;\n");
}

#[test]
fn test_config_file_json_output() {
    typograph()
        .args(["format", "-c", &fixture_path("typograph.toml")])
        .write_stdin("\"Привет\" (c)")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"format\":\"numeric\""))
        .stdout(predicate::str::contains("&#171;Привет&#187;"))
        .stdout(predicate::str::contains("(c)"))
        .stdout(predicate::str::contains("\"original\":\"\\\"Привет\\\" (c)\""));
}

#[test]
fn test_json_output() {
    typograph()
        .args(["format", "-f", "json", "-i", &fixture_path("quotes.txt")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["))
        .stdout(predicate::str::contains("\"original\""))
        .stdout(predicate::str::contains("\"tokens\""))
        .stdout(predicate::str::contains("\"kind\": \"quote\""))
        .stdout(predicate::str::contains("\"format\": \"raw\""));
}

#[test]
fn test_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("output.html");

    typograph()
        .args(["format", "-q", "-i", &fixture_path("article.html"), "-o"])
        .arg(&output_file)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&output_file).unwrap();
    assert!(content.contains("«Типограф»"));
}

#[test]
fn test_glob_pattern_parallel() {
    let temp_dir = TempDir::new().unwrap();
    let words = ["один", "два", "три", "четыре", "пять"];
    for (i, word) in words.iter().enumerate() {
        fs::write(temp_dir.path().join(format!("{i}.txt")), format!("\"{word}\"")).unwrap();
    }
    let pattern = format!("{}/*.txt", temp_dir.path().display());

    let output = typograph()
        .args(["format", "-q", "-p", "-t", "2", "-i", &pattern])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines, vec!["«один»", "«два»", "«три»", "«четыре»", "«пять»"]);
}

#[test]
fn test_missing_file() {
    typograph()
        .args(["format", "-i", "nonexistent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn test_unknown_preset() {
    typograph()
        .args(["format", "--preset", "fancy"])
        .write_stdin("текст")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preset: fancy"));
}

#[test]
fn test_invalid_entities_value() {
    typograph()
        .args(["format", "-e", "html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_validate_command() {
    typograph()
        .args(["validate", "-r", &fixture_path("named.toml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Options are valid"))
        .stdout(predicate::str::contains("Entities: named"));

    let temp_dir = TempDir::new().unwrap();
    let broken = temp_dir.path().join("broken.toml");
    fs::write(&broken, "[dash]\nhyphen-to-nbhy = 0\n").unwrap();
    typograph()
        .arg("validate")
        .arg("-r")
        .arg(&broken)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Options are invalid"));
}

#[test]
fn test_generate_config_then_use_it() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("typograph.toml");

    typograph()
        .args(["generate-config", "-P", "named", "-o"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("generated successfully"));

    typograph()
        .arg("validate")
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    typograph()
        .arg("format")
        .arg("-c")
        .arg(&config)
        .write_stdin("\"a\"")
        .assert()
        .success()
        .stdout("&laquo;a&raquo;\n");
}

#[test]
fn test_help_command() {
    typograph()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Typography formatter"));
}

#[test]
fn test_list_commands() {
    typograph()
        .args(["list", "presets"])
        .assert()
        .success()
        .stdout("default\nminimal\nnamed\n");

    typograph()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("json"));

    typograph()
        .args(["list", "entities"])
        .assert()
        .success()
        .stdout(predicate::str::contains("numeric"));
}
