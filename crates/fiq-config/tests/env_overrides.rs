use figment::Jail;
use fiq_config::FiqConfig;
use pretty_assertions::assert_eq;

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("FORMULARIQ_SERVER__PORT", "9100");
        jail.set_env("FORMULARIQ_STORAGE__ROOT", "/srv/formulariq");
        jail.set_env("FORMULARIQ_STUDY__RESEARCHER", "Studienteam");

        let config = FiqConfig::load().expect("config loads");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.storage.root, "/srv/formulariq");
        assert!(config.storage.is_configured());
        assert_eq!(config.study.researcher, "Studienteam");
        Ok(())
    });
}

#[test]
fn env_list_fills_backend_urls() {
    Jail::expect_with(|jail| {
        jail.set_env(
            "FORMULARIQ_BACKEND__URLS",
            r#"["http://localhost:8001", "http://127.0.0.1:8002"]"#,
        );

        let config = FiqConfig::load().expect("config loads");
        assert_eq!(
            config.backend.urls,
            vec![
                "http://localhost:8001".to_string(),
                "http://127.0.0.1:8002".to_string()
            ]
        );
        Ok(())
    });
}

#[test]
fn process_env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".formulariq")?;
        jail.create_file(
            ".formulariq/config.toml",
            "[server]\nport = 9200\n\n[storage]\nprefix = \"pilot-run\"\n",
        )?;
        jail.set_env("FORMULARIQ_SERVER__PORT", "9300");

        let config = FiqConfig::load().expect("config loads");
        assert_eq!(config.server.port, 9300);
        assert_eq!(config.storage.prefix, "pilot-run");
        Ok(())
    });
}

#[test]
fn invalid_port_type_is_an_error() {
    Jail::expect_with(|jail| {
        jail.set_env("FORMULARIQ_SERVER__PORT", "not-a-port");
        assert!(FiqConfig::load().is_err());
        Ok(())
    });
}
