//! Configuration management for the CLI

use anyhow::{Context, Result};
use efficiency_lib::{AnalyzerConfig, GeneratorConfig, DEFAULT_WINDOW_MINUTES};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

/// Environment variable prefix, e.g. `WAREHOUSE_WINDOW_MINUTES`
pub const ENV_PREFIX: &str = "WAREHOUSE";

/// Engine run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Warehouse name attached to log events
    pub warehouse: String,
    /// Number of one-minute samples to generate
    pub window_minutes: usize,
    /// RNG seed; unseeded runs draw from OS entropy
    #[serde(deserialize_with = "deserialize_seed")]
    pub seed: Option<u64>,
    pub generator: GeneratorConfig,
    pub analyzer: AnalyzerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            warehouse: default_warehouse(),
            window_minutes: DEFAULT_WINDOW_MINUTES,
            seed: None,
            generator: GeneratorConfig::default(),
            analyzer: AnalyzerConfig::default(),
        }
    }
}

fn default_warehouse() -> String {
    "default".to_string()
}

/// Read a seed from an integer or a decimal string without going through `f64`
fn deserialize_seed<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SeedVisitor;

    impl<'de> de::Visitor<'de> for SeedVisitor {
        type Value = Option<u64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an unsigned 64-bit integer seed")
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(
            self,
            deserializer: D,
        ) -> std::result::Result<Self::Value, D::Error> {
            deserializer.deserialize_any(self)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Self::Value, E> {
            u64::try_from(value).map(Some).map_err(|_| {
                E::custom(format!(
                    "Invalid input: seed must be an unsigned 64-bit integer, got {}",
                    value
                ))
            })
        }

        fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Self::Value, E> {
            value.trim().parse::<u64>().map(Some).map_err(|_| {
                E::custom(format!(
                    "Invalid input: seed must be an unsigned 64-bit integer, got {:?}",
                    value
                ))
            })
        }
    }

    deserializer.deserialize_any(SeedVisitor)
}

impl EngineConfig {
    /// Load configuration from an optional file and `WAREHOUSE_*` environment
    ///
    /// Nested keys use a double underscore, e.g. `WAREHOUSE_GENERATOR__CPU_MEAN`.
    /// Environment values stay strings until deserialized into their field type,
    /// so seeds above `i64::MAX` keep every bit.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("Failed to read configuration")?;

        let config: EngineConfig = settings
            .try_deserialize()
            .context("Failed to parse configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, window: Option<i64>, seed: Option<u64>) -> Result<Self> {
        if let Some(window) = window {
            self.window_minutes = usize::try_from(window)
                .ok()
                .filter(|w| *w > 0)
                .with_context(|| {
                    format!("Invalid input: window must be a positive number of minutes, got {}", window)
                })?;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_minutes == 0 {
            anyhow::bail!("Invalid input: window_minutes must be a positive number of minutes");
        }
        self.generator
            .validate()
            .context("Invalid generator configuration")?;
        self.analyzer
            .validate()
            .context("Invalid analyzer configuration")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    /// Serializes tests that read or modify `WAREHOUSE_*` variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_config(contents: &str, extension: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(extension)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.window_minutes, 1440);
        assert_eq!(config.seed, None);
        assert_eq!(config.analyzer.idle_minutes_limit, 60);
        assert_eq!(config.generator.cpu_mean, 50.0);
    }

    #[test]
    fn test_load_from_toml_file() {
        let file = write_config(
            r#"
warehouse = "analytics"
window_minutes = 720
seed = 42

[generator]
cpu_mean = 35.0

[analyzer]
auto_scaling_events_limit = 5
"#,
            ".toml",
        );

        let _guard = env_guard();
        let config = EngineConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.warehouse, "analytics");
        assert_eq!(config.window_minutes, 720);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.generator.cpu_mean, 35.0);
        assert_eq!(config.generator.memory_mean, 60.0);
        assert_eq!(config.analyzer.auto_scaling_events_limit, 5);
        assert_eq!(config.analyzer.idle_minutes_limit, 60);
    }

    #[test]
    fn test_invalid_file_values_rejected() {
        let file = write_config(
            r#"{ "generator": { "auto_scaling_probability": 2.0 } }"#,
            ".json",
        );
        let _guard = env_guard();
        assert!(EngineConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_zero_window_in_file_rejected() {
        let file = write_config("window_minutes = 0\n", ".toml");
        let _guard = env_guard();
        let err = EngineConfig::load(Some(file.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid input"));
    }

    #[test]
    fn test_large_seed_from_env_kept_exact() {
        let _guard = env_guard();
        std::env::set_var("WAREHOUSE_SEED", "9223372036854775809");
        let loaded = EngineConfig::load(None);
        std::env::remove_var("WAREHOUSE_SEED");

        assert_eq!(loaded.unwrap().seed, Some(9_223_372_036_854_775_809));
    }

    #[test]
    fn test_numeric_values_from_env() {
        let _guard = env_guard();
        std::env::set_var("WAREHOUSE_WINDOW_MINUTES", "45");
        std::env::set_var("WAREHOUSE_GENERATOR__AUTO_SCALING_PROBABILITY", "0.5");
        let loaded = EngineConfig::load(None);
        std::env::remove_var("WAREHOUSE_WINDOW_MINUTES");
        std::env::remove_var("WAREHOUSE_GENERATOR__AUTO_SCALING_PROBABILITY");

        let config = loaded.unwrap();
        assert_eq!(config.window_minutes, 45);
        assert_eq!(config.generator.auto_scaling_probability, 0.5);
    }

    #[test]
    fn test_invalid_seed_from_env_rejected() {
        let _guard = env_guard();
        std::env::set_var("WAREHOUSE_SEED", "18446744073709551616");
        let loaded = EngineConfig::load(None);
        std::env::remove_var("WAREHOUSE_SEED");

        let err = loaded.unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid input"));
    }

    #[test]
    fn test_missing_file_rejected() {
        let path = Path::new("/nonexistent/warehouse-config.toml");
        let _guard = env_guard();
        assert!(EngineConfig::load(Some(path)).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = EngineConfig::default()
            .with_overrides(Some(90), Some(7))
            .unwrap();
        assert_eq!(config.window_minutes, 90);
        assert_eq!(config.seed, Some(7));

        let untouched = EngineConfig::default().with_overrides(None, None).unwrap();
        assert_eq!(untouched.window_minutes, 1440);
    }

    #[test]
    fn test_non_positive_window_override_rejected() {
        assert!(EngineConfig::default().with_overrides(Some(0), None).is_err());
        assert!(EngineConfig::default().with_overrides(Some(-30), None).is_err());
    }
}
