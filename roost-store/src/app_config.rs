use roost_core::pricing::PricingRules;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    pub ranking: RankingConfig,
    pub business_rules: PricingRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    /// JSON document loaded into the in-memory store at startup
    pub seed_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RankingConfig {
    pub type_weight: f64,
    pub location_weight: f64,
    pub price_weight: f64,
    #[serde(default = "default_per_type_limit")]
    pub per_type_limit: usize,
}

fn default_per_type_limit() -> usize { 6 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Untracked local overrides
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `ROOST_SERVER__PORT=8081`
            .add_source(config::Environment::with_prefix("ROOST").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    #[test]
    fn test_config_layers() {
        let defaults = r#"
            [server]
            port = 8080

            [ranking]
            type_weight = 40.0
            location_weight = 35.0
            price_weight = 25.0

            [business_rules]
            service_fee_rate = 0.12
            tax_rate = 0.0
        "#;
        let overrides = r#"
            [server]
            port = 9090

            [store]
            seed_path = "config/seed.json"
        "#;

        let config: Config = config::Config::builder()
            .add_source(File::from_str(defaults, FileFormat::Toml))
            .add_source(File::from_str(overrides, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.store.seed_path.as_deref(), Some("config/seed.json"));
        assert_eq!(config.ranking.per_type_limit, 6);
        assert_eq!(config.business_rules.currency, "USD");
    }
}
