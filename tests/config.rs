use std::fs;
use veritree::config::{Settings, CONFIG_FILE_NAME};
use veritree::ProjectError;

#[test]
fn defaults_when_no_config_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let settings = Settings::load(dir.path()).unwrap();

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.quoted_compile_output(), "\"a.out\"");
    assert_eq!(settings.quoted_vvp_output(), None);
}

#[test]
fn reads_simulation_table() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[simulation]\ncompile_output_file = \"build/sim.out\"\nvvp_output_file = \"sim.log\"\n",
    )
    .unwrap();

    let settings = Settings::load(dir.path()).unwrap();
    assert_eq!(settings.compile_output_file, "build/sim.out");
    assert_eq!(settings.quoted_vvp_output().as_deref(), Some("\"sim.log\""));
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[simulation]\nvvp_output_file = \"out.txt\"\n",
    )
    .unwrap();

    let settings = Settings::load(dir.path()).unwrap();
    assert_eq!(settings.compile_output_file, "a.out");
    assert_eq!(settings.vvp_output_file, "out.txt");
}

#[test]
fn invalid_toml_is_a_config_error() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "[simulation\n").unwrap();

    let err = Settings::load(dir.path()).unwrap_err();
    assert!(matches!(err, ProjectError::Config { .. }));
}

#[test]
fn overrides_replace_individual_keys() {
    let settings = Settings::default().with_overrides(None, Some("log.txt".to_string()));
    assert_eq!(settings.compile_output_file, "a.out");
    assert_eq!(settings.vvp_output_file, "log.txt");
}
