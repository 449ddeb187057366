use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Disk,
    Memory,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PricingConfig {
    pub seed_prices: BTreeMap<String, f64>,
    pub random_min: f64,
    pub random_max: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            seed_prices: BTreeMap::from([
                ("AAPL".to_string(), 150.0),
                ("GOOGL".to_string(), 2800.0),
                ("MSFT".to_string(), 350.0),
                ("AMZN".to_string(), 3200.0),
                ("TSLA".to_string(), 800.0),
            ]),
            random_min: 50.0,
            random_max: 550.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct AppConfig {
    pub data_path: Option<String>,
    #[serde(default)]
    pub storage: StorageKind,
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no config file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "stockfolio", "stockfolio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("io", "stockfolio", "stockfolio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let pricing = &self.pricing;
        let positive = |bound: f64| bound.is_finite() && bound > 0.0;
        if !(positive(pricing.random_min) && positive(pricing.random_max)) {
            bail!(
                "Random price range must be finite and positive, got {}..{}",
                pricing.random_min,
                pricing.random_max
            );
        }
        if let Some((symbol, price)) = pricing
            .seed_prices
            .iter()
            .find(|(_, price)| !(price.is_finite() && **price > 0.0))
        {
            bail!("Seed price for {symbol} must be positive, got {price}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
data_path: "/tmp/stockfolio"
storage: memory
pricing:
  seed_prices:
    AAPL: 180.0
    NVDA: 900.5
  random_min: 10.0
  random_max: 20.0
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.data_path.as_deref(), Some("/tmp/stockfolio"));
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.pricing.seed_prices.len(), 2);
        assert_eq!(config.pricing.seed_prices["NVDA"], 900.5);
        assert_eq!(config.pricing.random_min, 10.0);
        assert_eq!(config.pricing.random_max, 20.0);
        assert_eq!(
            config.default_data_path().unwrap(),
            PathBuf::from("/tmp/stockfolio")
        );
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = serde_yaml::from_str("data_path: ~\n").unwrap();
        assert_eq!(config.storage, StorageKind::Disk);
        assert_eq!(config.pricing, PricingConfig::default());
        assert_eq!(config.pricing.seed_prices["GOOGL"], 2800.0);

        // Partial pricing section keeps the remaining defaults
        let config: AppConfig = serde_yaml::from_str("pricing:\n  random_max: 99.0\n").unwrap();
        assert_eq!(config.pricing.random_min, 50.0);
        assert_eq!(config.pricing.random_max, 99.0);
        assert_eq!(config.pricing.seed_prices.len(), 5);
    }

    #[test]
    fn test_load_from_path_rejects_bad_prices() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pricing:\n  seed_prices:\n    AAPL: -1.0").unwrap();

        let err = AppConfig::load_from_path(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("AAPL"));
    }

    #[test]
    fn test_load_from_path_rejects_infinite_random_range() {
        for bounds in ["random_max: .inf", "random_min: .inf", "random_min: .nan"] {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "pricing:\n  {bounds}").unwrap();

            let err = AppConfig::load_from_path(file.path()).unwrap_err();
            assert!(
                format!("{err:#}").contains("finite and positive"),
                "{bounds} was accepted"
            );
        }
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("nope.yaml"));
        assert!(result.is_err());
    }
}
