//! Configuration model loaded from external sources.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::query::{OrderDirection, QueryParams, SortSwitchPolicy};
use crate::domain::types::PageSize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    /// Base URL of the remote order service, e.g. `http://localhost:8081/api`.
    pub orders_api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub page_size: PageSize,
    #[serde(default = "default_order_by")]
    pub order_by: String,
    #[serde(default)]
    pub order_direction: OrderDirection,
    #[serde(default)]
    pub sort_switch: SortSwitchPolicy,
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_order_by() -> String {
    "description".to_string()
}

impl ServerConfig {
    /// Params the orders list starts with.
    pub fn default_query(&self) -> QueryParams {
        QueryParams::new(&self.order_by, self.order_direction).page_size(self.page_size)
    }
}

/// Loads `default.yaml`, then the optional `<app_env>.yaml` overlay from
/// `config_dir`, then `APP_*` environment variables.
pub fn load_server_config(config_dir: &Path, app_env: &str) -> Result<ServerConfig, ConfigError> {
    Config::builder()
        .add_source(File::from(config_dir.join("default")))
        .add_source(File::from(config_dir.join(app_env)).required(false))
        .add_source(Environment::with_prefix("APP"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const DEFAULT_YAML: &str = r#"
address: "127.0.0.1"
port: 8080
templates_dir: "templates/**/*"
secret: "not-a-real-secret"
orders_api_url: "http://localhost:8081/api"
"#;

    #[test]
    fn loads_defaults_and_fills_optional_fields() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.yaml"), DEFAULT_YAML).unwrap();

        let config = load_server_config(dir.path(), "test-missing").unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.page_size.get(), 10);
        assert_eq!(config.order_by, "description");
        assert_eq!(config.order_direction, OrderDirection::Asc);
        assert_eq!(config.sort_switch, SortSwitchPolicy::ResetAscending);
    }

    #[test]
    fn environment_overlay_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.yaml"), DEFAULT_YAML).unwrap();
        fs::write(
            dir.path().join("staging.yaml"),
            "page_size: 25\norder_by: value\norder_direction: desc\nsort_switch: keep_direction\n",
        )
        .unwrap();

        let config = load_server_config(dir.path(), "staging").unwrap();
        let query = config.default_query();

        assert_eq!(query.page, 0);
        assert_eq!(query.page_size.get(), 25);
        assert_eq!(query.order_by, "value");
        assert_eq!(query.order_direction, OrderDirection::Desc);
        assert_eq!(config.sort_switch, SortSwitchPolicy::KeepDirection);
    }

    #[test]
    fn rejects_zero_page_size() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            format!("{DEFAULT_YAML}page_size: 0\n"),
        )
        .unwrap();

        assert!(load_server_config(dir.path(), "local").is_err());
    }
}
