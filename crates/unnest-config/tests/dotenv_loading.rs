use figment::Jail;
use unnest_config::UnnestConfig;

#[test]
fn dotenv_file_feeds_env_layer() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.create_file(".env", "UNNEST_TRANSFORM__CHECK_DIAGNOSTICS=false\n")?;

        let config = UnnestConfig::load_with_dotenv().expect("config loads");
        assert!(!config.transform.check_diagnostics);
        Ok(())
    });
}
