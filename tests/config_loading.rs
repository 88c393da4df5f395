use std::fs;

use stargate::config::{DEFAULT_CONFIG_FILE, load_and_validate, load_from_path};
use stargate::errors::{LookupKind, StargateError};
use stargate::project::DEFAULT_TARGET;
use stargate_test_utils::builders::ProjectConfigBuilder;

fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn loads_file_sets_targets_and_flows() {
    let (dir, path) = write_config(
        r#"
[filesets]
rtl = ["src/**/*.v", "src/**/*.sv"]
constraints = ["xdc/*.xdc"]

[targets.top]
filesets = ["rtl", "constraints"]
flow = "vivado"

[[flows.demo.sections]]
name = "build"
tasks = [
  { name = "lint", cmd = "true" },
  { name = "synth", cmd = "true" },
]
"#,
    );

    let project = load_and_validate(&path).unwrap();

    assert_eq!(project.project_dir(), std::path::absolute(dir.path()).unwrap());
    assert_eq!(project.config_path(), std::path::absolute(&path).unwrap());
    assert_eq!(
        project.fileset("rtl").unwrap().patterns(),
        ["src/**/*.v", "src/**/*.sv"]
    );
    let top = project.target("top").unwrap();
    assert_eq!(top.flow_name(), Some("vivado"));
    let sets: Vec<&str> = project
        .target_filesets(top)
        .unwrap()
        .iter()
        .map(|f| f.name())
        .collect();
    assert_eq!(sets, vec!["rtl", "constraints"]);
    assert_eq!(project.flows()["demo"].sections[0].tasks.len(), 2);
}

#[test]
fn keys_directly_under_targets_form_the_default_target() {
    let (_dir, path) = write_config(
        r#"
[filesets]
rtl = ["*.v"]

[targets]
filesets = ["rtl"]
flow = "vivado"
"#,
    );

    let project = load_and_validate(&path).unwrap();
    let target = project.target(DEFAULT_TARGET).unwrap();

    assert_eq!(target.fileset_names(), ["rtl"]);
    assert_eq!(target.flow_name(), Some("vivado"));
}

#[test]
fn unknown_top_level_key_is_rejected() {
    let (_dir, path) = write_config("[simulators]\nname = \"xsim\"\n");

    let err = load_from_path(&path).unwrap_err();

    assert!(matches!(err, StargateError::TomlError(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn unknown_target_key_is_rejected() {
    let (_dir, path) = write_config(
        r#"
[targets.top]
flow = "vivado"
part = "xc7a35t"
"#,
    );

    let err = load_and_validate(&path).unwrap_err();
    assert!(matches!(err, StargateError::ConfigError(_)));
    assert!(err.to_string().contains("top"));
}

#[test]
fn unknown_key_in_default_target_is_rejected() {
    let (_dir, path) = write_config("[targets]\nboard = \"arty\"\n");

    let err = load_and_validate(&path).unwrap_err();

    assert!(err.to_string().contains("invalid key 'board' in target default"));
}

#[test]
fn target_referencing_a_missing_file_set_is_rejected() {
    let (_dir, path) = write_config(
        r#"
[filesets]
rtl = ["*.v"]

[targets.top]
filesets = ["rtl", "ip"]
flow = "vivado"
"#,
    );

    let err = load_and_validate(&path).unwrap_err();

    assert!(matches!(err, StargateError::ConfigError(_)));
    assert!(err.to_string().contains("'ip'"));
}

#[test]
fn missing_config_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = load_and_validate(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, StargateError::ConfigError(_)));

    let err = load_and_validate(dir.path()).unwrap_err();
    assert!(matches!(err, StargateError::ConfigError(_)));
}

#[test]
fn command_flow_with_repeated_task_is_rejected() {
    let (_dir, path) = write_config(
        r#"
[[flows.demo.sections]]
name = "build"
tasks = [{ name = "a", cmd = "true" }]

[[flows.demo.sections]]
name = "run"
tasks = [{ name = "a", cmd = "true" }]
"#,
    );

    let err = load_and_validate(&path).unwrap_err();
    assert!(err.to_string().contains("declares task 'a' more than once"));
}

#[test]
fn command_task_with_empty_command_is_rejected() {
    let (_dir, path) = write_config(
        r#"
[[flows.demo.sections]]
name = "build"
tasks = [{ name = "a", cmd = "  " }]
"#,
    );

    let err = load_and_validate(&path).unwrap_err();
    assert!(matches!(err, StargateError::ConfigError(_)));
}

#[test]
fn unknown_target_lookup_is_not_found() {
    let project = ProjectConfigBuilder::new()
        .with_fileset("rtl", &["*.v"])
        .with_target("top", &["rtl"], "vivado")
        .build();

    let err = project.target("bottom").unwrap_err();

    assert!(matches!(err, StargateError::NotFound { kind: LookupKind::Target, .. }));
    assert_eq!(project.targets().count(), 1);
}
