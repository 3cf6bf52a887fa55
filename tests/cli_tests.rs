use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn scenegen(renderer: &str) -> Command {
    let templates = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scenegen"));
    cmd.env("SCENEGEN_TEMPLATES__DIR", templates)
        .env("SCENEGEN_RENDERER__PROGRAM", renderer)
        .env_remove("RUST_LOG");
    cmd
}

fn job(json: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("dsl.json"), json).unwrap();
    dir
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scenegen"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate a Manim scene script"))
        .stdout(predicate::str::contains("--scene-class"));
}

#[test]
fn test_cli_requires_input_and_outdir() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scenegen"));
    cmd.arg("--outdir").arg("out").assert().failure();
}

#[test]
fn test_cli_dry_run_generates_script() {
    let dir = job(r#"{"a": 1}"#);
    let input = dir.path().join("dsl.json");
    let outdir = dir.path().join("output");

    scenegen("manim")
        .arg("--input")
        .arg(&input)
        .arg("--outdir")
        .arg(&outdir)
        .arg("--scene-class")
        .arg("Foo")
        .arg("--quality")
        .arg("medium")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Running: manim -qm "))
        .stdout(predicate::str::contains("generated_scene.py Foo --media_dir"));

    let script = fs::read_to_string(dir.path().join("generated_scene.py")).unwrap();
    assert!(script.contains(r#"SCENE = {"a": 1}"#));
    assert!(script.contains("class Foo(Scene):"));
}

#[test]
fn test_cli_unknown_quality_uses_low() {
    let dir = job("{}");

    scenegen("manim")
        .arg("--input")
        .arg(dir.path().join("dsl.json"))
        .arg("--outdir")
        .arg(dir.path().join("output"))
        .arg("--quality")
        .arg("ultra")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Running: manim -ql "));
}

#[test]
fn test_cli_custom_script_name() {
    let dir = job("{}");

    scenegen("manim")
        .arg("--input")
        .arg(dir.path().join("dsl.json"))
        .arg("--outdir")
        .arg("/somewhere/else")
        .arg("--script-name")
        .arg("render_me.py")
        .arg("--dry-run")
        .assert()
        .success();

    assert!(dir.path().join("render_me.py").exists());
    assert!(!dir.path().join("generated_scene.py").exists());
}

#[test]
fn test_cli_missing_input() {
    let dir = TempDir::new().unwrap();

    scenegen("manim")
        .arg("--input")
        .arg(dir.path().join("nope.json"))
        .arg("--outdir")
        .arg(dir.path().join("output"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read scene file"));

    assert!(!dir.path().join("generated_scene.py").exists());
}

#[test]
fn test_cli_malformed_json() {
    let dir = job(r#"{"title": "x", "scenes": [],}"#);

    scenegen("scenegen-no-such-renderer")
        .arg("--input")
        .arg(dir.path().join("dsl.json"))
        .arg("--outdir")
        .arg(dir.path().join("output"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Running:").not())
        .stderr(predicate::str::contains("Failed to parse scene JSON"));
}

#[test]
fn test_cli_missing_template() {
    let dir = job("{}");
    let empty = TempDir::new().unwrap();

    Command::new(env!("CARGO_BIN_EXE_scenegen"))
        .env("SCENEGEN_TEMPLATES__DIR", empty.path())
        .arg("--input")
        .arg(dir.path().join("dsl.json"))
        .arg("--outdir")
        .arg(dir.path().join("output"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("scene.py.j2"));

    assert!(!dir.path().join("generated_scene.py").exists());
}

#[cfg(unix)]
#[test]
fn test_cli_renderer_success() {
    let dir = job(r#"{"title": "ok", "scenes": []}"#);

    scenegen("true")
        .arg("--input")
        .arg(dir.path().join("dsl.json"))
        .arg("--outdir")
        .arg(dir.path().join("output"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Running: true -ql "));
}

#[cfg(unix)]
#[test]
fn test_cli_renderer_failure() {
    let dir = job(r#"{"title": "bad", "scenes": []}"#);

    scenegen("false")
        .arg("--input")
        .arg(dir.path().join("dsl.json"))
        .arg("--outdir")
        .arg(dir.path().join("output"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("exited unsuccessfully"));
}

#[test]
fn test_cli_unknown_quality_is_silent() {
    let dir = job("{}");

    scenegen("manim")
        .arg("--input")
        .arg(dir.path().join("dsl.json"))
        .arg("--outdir")
        .arg(dir.path().join("output"))
        .arg("--quality")
        .arg("ultra")
        .arg("--dry-run")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_cli_unwritable_script_path() {
    let dir = job("{}");
    fs::create_dir(dir.path().join("taken")).unwrap();

    scenegen("scenegen-no-such-renderer")
        .arg("--input")
        .arg(dir.path().join("dsl.json"))
        .arg("--outdir")
        .arg(dir.path().join("output"))
        .arg("--script-name")
        .arg("taken")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Running:").not())
        .stderr(predicate::str::contains("Failed to write script"));
}

#[test]
fn test_cli_large_integers_pass_through() {
    let dir = job(r#"{"id": 123456789012345678901234567890, "scenes": []}"#);

    scenegen("manim")
        .arg("--input")
        .arg(dir.path().join("dsl.json"))
        .arg("--outdir")
        .arg(dir.path().join("output"))
        .arg("--dry-run")
        .assert()
        .success();

    let script = fs::read_to_string(dir.path().join("generated_scene.py")).unwrap();
    assert!(script.contains(r#"SCENE = {"id": 123456789012345678901234567890, "scenes": []}"#));
}

#[cfg(unix)]
#[test]
fn test_cli_renderer_log() {
    let dir = job("{}");
    let log = dir.path().join("render.log");

    scenegen("false")
        .arg("--input")
        .arg(dir.path().join("dsl.json"))
        .arg("--outdir")
        .arg(dir.path().join("output"))
        .arg("--log")
        .arg(&log)
        .assert()
        .failure();

    let content = fs::read_to_string(&log).unwrap();
    assert!(content.ends_with("\nProcess exited with code 1\n"));
}

#[test]
fn test_cli_status_report() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("output");
    let videos = out.join("videos").join("generated_scene").join("480p15");
    fs::create_dir_all(&videos).unwrap();
    fs::write(videos.join("GeneratedScene.mp4"), b"").unwrap();
    let log = dir.path().join("render.log");
    fs::write(&log, "\x1b[32mAnimation 2: 100%\x1b[0m\r\n").unwrap();

    Command::new(env!("CARGO_BIN_EXE_scenegen"))
        .arg("status")
        .arg(&out)
        .arg("--log")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: done"))
        .stdout(predicate::str::contains("Progress: 100%"))
        .stdout(predicate::str::contains("GeneratedScene.mp4"));
}

#[test]
fn test_cli_status_json() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("render.log");
    fs::write(&log, "frames 3/4\n").unwrap();

    let assert = Command::new(env!("CARGO_BIN_EXE_scenegen"))
        .arg("status")
        .arg(dir.path().join("output"))
        .arg("--log")
        .arg(&log)
        .arg("--json")
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["done"], false);
    assert_eq!(report["progress"], 75);
    assert_eq!(report["log_preview"], "frames 3/4");
}

#[test]
fn test_cli_status_missing_job() {
    let dir = TempDir::new().unwrap();

    Command::new(env!("CARGO_BIN_EXE_scenegen"))
        .arg("status")
        .arg(dir.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No render job found"));
}
