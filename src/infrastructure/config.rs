use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub backend: BackendSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub url: String,
    #[serde(default = "default_dashboards_path")]
    pub dashboards_path: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl BackendSettings {
    /// Absolute URL of the dashboards collection
    pub fn dashboards_url(&self) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            self.dashboards_path.trim_start_matches('/')
        )
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_dashboards_path() -> String {
    "/v2/dashboards".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Loads `config/console.*`, overridden by `CONSOLE__SECTION__KEY` variables
pub fn load_console_config() -> anyhow::Result<ConsoleConfig> {
    load_from("config/console")
}

fn load_from(path: &str) -> anyhow::Result<ConsoleConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix("CONSOLE").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> ConsoleConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(
            r#"
            [backend]
            url = "http://localhost:9999/"
            "#,
        );
        assert_eq!(config.server.listen, "0.0.0.0:8080");
        assert_eq!(config.backend.timeout_secs, 30);
        assert!(config.backend.token.is_none());
        assert_eq!(
            config.backend.dashboards_url(),
            "http://localhost:9999/v2/dashboards"
        );
    }

    #[test]
    fn test_explicit_settings() {
        let config = parse(
            r#"
            [server]
            listen = "127.0.0.1:3000"

            [backend]
            url = "https://influx.example.com"
            dashboards_path = "chronograf/v2/dashboards"
            token = "secret"
            timeout_secs = 5
            "#,
        );
        assert_eq!(config.server.listen, "127.0.0.1:3000");
        assert_eq!(config.backend.token.as_deref(), Some("secret"));
        assert_eq!(
            config.backend.dashboards_url(),
            "https://influx.example.com/chronograf/v2/dashboards"
        );
    }

    #[test]
    fn test_missing_backend_fails() {
        assert!(load_from("config/does-not-exist").is_err());
    }
}
