use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::tempdir;

fn cli_bin() -> &'static str {
    env!("CARGO_BIN_EXE_qml-i18n-extract")
}

fn run_cli<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Output {
    Command::new(cli_bin())
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("failed to run qml-i18n-extract")
}

fn write_config(root: &Path) -> PathBuf {
    let config = json!({
        "root": ".",
        "extension": "qml",
        "output": "translations",
        "referenceFile": "en.json",
        "templateFile": "template.json"
    });

    let config_path = root.join("qml-i18n-extract.json");
    fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    config_path
}

fn read_json(path: &Path) -> Value {
    let content = fs::read_to_string(path).expect("missing json file");
    serde_json::from_str(&content).expect("invalid json")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn extract_writes_both_catalogs() {
    let tmp = tempdir().unwrap();
    let project = tmp.path();
    fs::create_dir_all(project.join("ui")).unwrap();
    fs::write(
        project.join("ui/Main.qml"),
        r#"Text { text: qsTr("Hello") }
Text { text: I18n.tr("Open", "menu.file") }
"#,
    )
    .unwrap();

    let config_path = write_config(project);
    let output = run_cli(
        project,
        &["--config", config_path.to_str().unwrap(), "extract"],
    );
    assert_success(&output);

    let reference = read_json(&project.join("translations/en.json"));
    assert_eq!(reference[0]["term"], "Hello");
    assert_eq!(reference[0]["context"], "Hello");
    assert_eq!(reference[0]["comment"], "");
    assert_eq!(reference[1]["term"], "Open");
    assert_eq!(reference[1]["context"], "menu.file");

    let template = read_json(&project.join("translations/template.json"));
    assert_eq!(template[0]["term"], "Hello");
    assert_eq!(template[0]["translation"], "");
    assert_eq!(template[0]["context"], "");
    assert_eq!(template[0]["reference"], "");
    assert_eq!(template[1]["context"], "menu.file");
}

#[test]
fn extract_reference_lists_every_occurrence() {
    let tmp = tempdir().unwrap();
    let project = tmp.path();
    fs::write(project.join("A.qml"), "qsTr(\"Cancel\")").unwrap();
    fs::write(project.join("B.qml"), "\nqsTr(\"Cancel\")").unwrap();

    write_config(project);
    let output = run_cli(project, &["extract"]);
    assert_success(&output);

    let reference = read_json(&project.join("translations/en.json"));
    assert_eq!(reference.as_array().unwrap().len(), 1);
    assert_eq!(reference[0]["reference"], "A.qml:1, B.qml:2");
}

#[test]
fn extract_empty_tree_writes_empty_arrays() {
    let tmp = tempdir().unwrap();
    let project = tmp.path();
    write_config(project);

    let output = run_cli(project, &["extract"]);
    assert_success(&output);

    assert_eq!(
        fs::read_to_string(project.join("translations/en.json")).unwrap(),
        "[]\n"
    );
    assert_eq!(
        fs::read_to_string(project.join("translations/template.json")).unwrap(),
        "[]\n"
    );
}

#[test]
fn extract_is_byte_identical_across_runs() {
    let tmp = tempdir().unwrap();
    let project = tmp.path();
    fs::create_dir_all(project.join("ui")).unwrap();
    fs::write(
        project.join("ui/App.qml"),
        "qsTr(\"b\")\nqsTr(\"a\")\nI18n.tr(\"a\", \"ctx\")",
    )
    .unwrap();
    write_config(project);

    assert_success(&run_cli(project, &["extract"]));
    let first_ref = fs::read_to_string(project.join("translations/en.json")).unwrap();
    let first_tpl = fs::read_to_string(project.join("translations/template.json")).unwrap();

    assert_success(&run_cli(project, &["extract"]));
    let second_ref = fs::read_to_string(project.join("translations/en.json")).unwrap();
    let second_tpl = fs::read_to_string(project.join("translations/template.json")).unwrap();

    assert_eq!(first_ref, second_ref);
    assert_eq!(first_tpl, second_tpl);
}

#[test]
fn extract_runs_without_config_file() {
    let tmp = tempdir().unwrap();
    let project = tmp.path();
    fs::write(project.join("App.qml"), "qsTr(\"Defaults\")").unwrap();

    let output = run_cli(project, &["extract"]);
    assert_success(&output);

    let reference = read_json(&project.join("translations/en.json"));
    assert_eq!(reference[0]["term"], "Defaults");
}

#[test]
fn extract_honors_root_and_output_overrides() {
    let tmp = tempdir().unwrap();
    let project = tmp.path();
    fs::create_dir_all(project.join("src")).unwrap();
    fs::write(project.join("src/App.qml"), "qsTr(\"Scoped\")").unwrap();
    fs::write(project.join("Outside.qml"), "qsTr(\"Outside\")").unwrap();

    let output = run_cli(
        project,
        &["extract", "--root", "src", "--output", "out"],
    );
    assert_success(&output);

    let reference = read_json(&project.join("out/en.json"));
    let terms: Vec<&str> = reference
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["term"].as_str().unwrap())
        .collect();
    assert_eq!(terms, vec!["Scoped"]);
    assert_eq!(reference[0]["reference"], "App.qml:1");
}

#[test]
fn extract_fails_on_unreadable_source() {
    let tmp = tempdir().unwrap();
    let project = tmp.path();
    fs::write(project.join("Bad.qml"), [0xffu8, 0xfe, 0x00]).unwrap();
    write_config(project);

    let output = run_cli(project, &["extract"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Bad.qml"), "stderr: {}", stderr);
}

#[test]
fn extract_prints_summary() {
    let tmp = tempdir().unwrap();
    let project = tmp.path();
    fs::write(
        project.join("App.qml"),
        "qsTr(\"a\")\nqsTr(\"a\")\nI18n.tr(\"b\", \"ctx\")",
    )
    .unwrap();
    write_config(project);

    let output = run_cli(project, &["extract"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Unique strings: 2"), "stdout: {}", stdout);
    assert!(stdout.contains("Total occurrences: 3"), "stdout: {}", stdout);
    assert!(stdout.contains("Strings with contexts: 1"), "stdout: {}", stdout);
}

#[test]
fn quiet_flag_suppresses_summary() {
    let tmp = tempdir().unwrap();
    let project = tmp.path();
    fs::write(project.join("App.qml"), "qsTr(\"a\")").unwrap();
    write_config(project);

    let output = run_cli(project, &["--quiet", "extract"]);
    assert_success(&output);

    assert!(output.stdout.is_empty());
}

#[test]
fn init_creates_config_and_refuses_overwrite() {
    let tmp = tempdir().unwrap();
    let project = tmp.path();

    let output = run_cli(project, &["init"]);
    assert_success(&output);

    let config = read_json(&project.join("qml-i18n-extract.json"));
    assert_eq!(config["markerFunction"], "qsTr");
    assert_eq!(config["contextFunction"], "I18n.tr");

    let second = run_cli(project, &["init"]);
    assert!(!second.status.success());

    let forced = run_cli(project, &["init", "--force"]);
    assert_success(&forced);
}
