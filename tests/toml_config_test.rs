use docsplice::core::ConfigProvider;
use docsplice::utils::validation::Validate;
use docsplice::{SpliceError, TomlConfig};

const FULL_CONFIG: &str = r#"
[job]
name = "api-reference"
description = "Splice generated API docs into the reference page"

[fragments]
files = ["gen/core.js", "gen/types.js", "gen/extras.json"]

[target]
file = "docs/reference.html"
declaration = "apiIndex"
end_anchor = "<!-- api-index-end -->"

[output]
report_json = "splice-report.json"
check = true

[monitoring]
enabled = true
"#;

const MINIMAL_CONFIG: &str = r#"
[job]
name = "api-reference"

[fragments]
files = ["gen/core.js"]

[target]
file = "docs/reference.html"
"#;

#[test]
fn test_full_config_parses() {
    let config = TomlConfig::from_toml_str(FULL_CONFIG).unwrap();

    assert_eq!(config.job.name, "api-reference");
    assert_eq!(config.fragment_files().len(), 3);
    assert_eq!(config.target_file(), "docs/reference.html");
    assert_eq!(config.declaration_name(), "apiIndex");
    assert_eq!(config.end_anchor(), "<!-- api-index-end -->");
    assert_eq!(config.report_json(), Some("splice-report.json"));
    assert!(config.check_only());
    assert!(config.monitoring_enabled());
    assert!(config.validate().is_ok());
}

#[test]
fn test_minimal_config_uses_defaults() {
    let config = TomlConfig::from_toml_str(MINIMAL_CONFIG).unwrap();

    assert_eq!(config.declaration_name(), "D");
    assert_eq!(config.end_anchor(), "</script>");
    assert_eq!(config.report_json(), None);
    assert!(!config.check_only());
    assert!(!config.monitoring_enabled());
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_toml_is_rejected() {
    let err = TomlConfig::from_toml_str("not valid toml [").unwrap_err();
    assert!(matches!(err, SpliceError::TomlError(_)));
}

#[test]
fn test_empty_fragment_list_fails_validation() {
    let config = TomlConfig::from_toml_str(
        r#"
[job]
name = "api-reference"

[fragments]
files = []

[target]
file = "docs/reference.html"
"#,
    )
    .unwrap();

    let err = config.validate().unwrap_err();
    assert!(matches!(err, SpliceError::MissingConfigError { .. }));
}

#[test]
fn test_bad_declaration_name_fails_validation() {
    let config = TomlConfig::from_toml_str(
        r#"
[job]
name = "api-reference"

[fragments]
files = ["gen/core.js"]

[target]
file = "docs/reference.html"
declaration = "api-index"
"#,
    )
    .unwrap();

    let err = config.validate().unwrap_err();
    assert!(matches!(err, SpliceError::InvalidConfigValueError { .. }));
}

#[test]
fn test_unsupported_fragment_extension_fails_validation() {
    let config = TomlConfig::from_toml_str(
        r#"
[job]
name = "api-reference"

[fragments]
files = ["gen/core.csv"]

[target]
file = "docs/reference.html"
"#,
    )
    .unwrap();

    assert!(config.validate().is_err());
}

#[test]
fn test_set_check_override() {
    let mut config = TomlConfig::from_toml_str(MINIMAL_CONFIG).unwrap();
    assert!(!config.check_only());

    config.set_check(true);
    assert!(config.check_only());

    config.set_check(false);
    assert!(!config.check_only());
}

#[test]
fn test_env_var_substitution() {
    std::env::set_var("DOCSPLICE_TEST_TARGET", "docs/generated.html");

    let config = TomlConfig::from_toml_str(
        r#"
[job]
name = "api-reference"

[fragments]
files = ["gen/core.js"]

[target]
file = "${DOCSPLICE_TEST_TARGET}"
"#,
    )
    .unwrap();

    assert_eq!(config.target_file(), "docs/generated.html");

    std::env::remove_var("DOCSPLICE_TEST_TARGET");
}
