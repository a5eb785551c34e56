use serde::Deserialize;

use crate::error::{RankingError, Result};
use crate::services::{EngineSettings, FusionPolicy};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Input snapshot
    pub catalog_path: String,

    // Ranking
    pub fusion_keep: usize,
    pub job_skill_discount: f64,

    // Output
    pub output_limit: usize,

    // Observability
    pub log_level: String,
}

impl Config {
    /// Reads `RANKING__*` variables, after loading `.env` if present.
    pub fn from_env() -> std::result::Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("catalog_path", "catalog.json")?
            .set_default("fusion_keep", 3)?
            .set_default("job_skill_discount", 0.01)?
            .set_default("output_limit", 0)? // 0 = all
            .set_default("log_level", "info")?
            .add_source(
                config::Environment::with_prefix("RANKING")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<()> {
        if self.catalog_path.trim().is_empty() {
            return Err(RankingError::Configuration(
                "Catalog path is required".to_string(),
            ));
        }

        if self.fusion_keep == 0 {
            return Err(RankingError::Configuration(
                "Fusion must keep at least one measure rank".to_string(),
            ));
        }

        if !self.job_skill_discount.is_finite() || self.job_skill_discount < 0.0 {
            return Err(RankingError::Configuration(
                "Job skill discount must be a non-negative number".to_string(),
            ));
        }

        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            fusion: FusionPolicy::keep_best(self.fusion_keep),
            job_skill_discount: self.job_skill_discount,
            ..EngineSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn config() -> Config {
        Config {
            catalog_path: "catalog.json".to_string(),
            fusion_keep: 3,
            job_skill_discount: 0.01,
            output_limit: 0,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        let mut cfg = config();
        cfg.fusion_keep = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = config();
        cfg.job_skill_discount = -0.5;
        assert!(cfg.validate().is_err());

        let mut cfg = config();
        cfg.job_skill_discount = f64::NAN;
        assert!(cfg.validate().is_err());

        let mut cfg = config();
        cfg.catalog_path = "  ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_engine_settings() {
        let mut cfg = config();
        cfg.fusion_keep = 2;
        cfg.job_skill_discount = 0.05;
        let settings = cfg.engine_settings();

        assert_eq!(settings.fusion.keep(), 2);
        assert_eq!(settings.job_skill_discount, 0.05);
        assert_eq!(settings.signals, EngineSettings::default().signals);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        env::remove_var("RANKING__CATALOG_PATH");
        env::remove_var("RANKING__FUSION_KEEP");

        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.catalog_path, "catalog.json");
        assert_eq!(cfg.fusion_keep, 3);
        assert_eq!(cfg.output_limit, 0);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        env::set_var("RANKING__CATALOG_PATH", "/data/concepts.json");
        env::set_var("RANKING__FUSION_KEEP", "2");

        let cfg = Config::from_env().unwrap();

        env::remove_var("RANKING__CATALOG_PATH");
        env::remove_var("RANKING__FUSION_KEEP");

        assert_eq!(cfg.catalog_path, "/data/concepts.json");
        assert_eq!(cfg.fusion_keep, 2);
    }
}
