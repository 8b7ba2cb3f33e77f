//! 容器设置文件加载测试

mod fixtures;

use fixtures::*;
use inject_common::ConfigError;
use inject_impl::prelude::*;
use std::io::Write;

fn settings_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_container_from_settings_file() {
    let file = settings_file(
        r#"
default_lifetime = "singleton"
default_conflict_behavior = "replace"
"#,
    );
    let settings = ContainerSettings::load(Some(file.path())).unwrap();
    let container = Container::from_settings(&settings);

    container
        .register_type::<dyn EmailService, NullEmailService>()
        .unwrap();
    container
        .register_type::<dyn EmailService, DisposableEmailService>()
        .unwrap();

    let first = container.resolve::<dyn EmailService>().unwrap();
    let second = container.resolve::<dyn EmailService>().unwrap();
    assert_eq!(first.name(), "disposable");
    assert!(same_instance(&first, &second));
}

#[test]
fn test_partial_settings_use_defaults() {
    let settings = ContainerSettings::from_toml_str(r#"default_lifetime = "singleton""#).unwrap();

    assert_eq!(settings.default_lifetime, Lifetime::Singleton);
    assert_eq!(settings.default_conflict_behavior, ConflictBehavior::Throw);
}

#[test]
fn test_missing_settings_file() {
    let result = ContainerSettings::load(Some(std::path::Path::new("/nonexistent/inject.toml")));
    assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
}

#[test]
fn test_invalid_settings_rejected() {
    let result = ContainerSettings::from_toml_str(r#"default_conflict_behavior = "default""#);
    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));

    let result = ContainerSettings::from_toml_str(r#"default_lifetime = "scoped""#);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}
