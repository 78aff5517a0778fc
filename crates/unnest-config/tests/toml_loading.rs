//! Integration tests for layered configuration loading.
//!
//! Uses figment::Jail for sandboxed working directories and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use unnest_config::{OutputFormat, UnnestConfig};

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[transform]
counter = 3
check_diagnostics = false

[output]
format = "json"
"#,
        )?;

        let config: UnnestConfig = Figment::from(Serialized::defaults(UnnestConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.transform.counter, 3);
        assert!(!config.transform.check_diagnostics);
        assert_eq!(config.output.format, OutputFormat::Json);
        Ok(())
    });
}

#[test]
fn partial_section_keeps_other_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[transform]\ncounter = 2\n")?;

        let config: UnnestConfig = Figment::from(Serialized::defaults(UnnestConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.transform.counter, 2);
        assert!(config.transform.check_diagnostics);
        assert_eq!(config.output.format, OutputFormat::Raw);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_from_working_directory() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.create_dir(".unnest")?;
        jail.create_file(".unnest/config.toml", "[output]\nformat = \"json\"\n")?;

        let config = UnnestConfig::load().expect("config loads");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.transform.counter, 1);
        Ok(())
    });
}

#[test]
fn env_beats_project_config() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.create_dir(".unnest")?;
        jail.create_file(".unnest/config.toml", "[transform]\ncounter = 4\n")?;
        jail.set_env("UNNEST_TRANSFORM__COUNTER", "7");

        let config = UnnestConfig::load().expect("config loads");
        assert_eq!(config.transform.counter, 7);
        Ok(())
    });
}

#[cfg(target_os = "linux")]
#[test]
fn project_config_beats_user_config() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.create_dir("xdg")?;
        jail.create_dir("xdg/unnest")?;
        jail.create_file(
            "xdg/unnest/config.toml",
            "[transform]\ncounter = 5\ncheck_diagnostics = false\n",
        )?;
        jail.create_dir(".unnest")?;
        jail.create_file(".unnest/config.toml", "[transform]\ncounter = 6\n")?;

        let config = UnnestConfig::load().expect("config loads");
        assert_eq!(config.transform.counter, 6);
        assert!(!config.transform.check_diagnostics);
        Ok(())
    });
}

#[test]
fn zero_counter_from_env_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.set_env("UNNEST_TRANSFORM__COUNTER", "0");

        assert!(UnnestConfig::load().is_err());
        Ok(())
    });
}

#[test]
fn unknown_format_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.set_env("UNNEST_OUTPUT__FORMAT", "xml");

        assert!(UnnestConfig::load().is_err());
        Ok(())
    });
}
