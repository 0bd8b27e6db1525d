use melon_catalog::PricingConfig;
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Environment variable prefix, eg. `MELON__PRICING__SMALL_ORDER_FEE`
const ENV_PREFIX: &str = "MELON";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl Config {
    /// Load from `./config` and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_dir("config")
    }

    /// Load from `dir`, picking the run mode from `RUN_MODE` and applying
    /// `MELON__*` environment overrides last
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::build(dir.as_ref(), &run_mode, true)
    }

    /// Load only the files in `dir` for an explicit run mode, ignoring the
    /// environment
    pub fn from_sources(dir: impl AsRef<Path>, run_mode: &str) -> Result<Self, config::ConfigError> {
        Self::build(dir.as_ref(), run_mode, false)
    }

    fn build(dir: &Path, run_mode: &str, with_env: bool) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            // Defaults are required
            .add_source(config::File::from(dir.join("default")))
            .add_source(config::File::from(dir.join(run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::from(dir.join("local")).required(false));

        if with_env {
            // Eg. `MELON__PRICING__SMALL_ORDER_FEE=0` disables the small-order fee
            builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config
            .pricing
            .validate()
            .map_err(|err| config::ConfigError::Message(format!("invalid pricing config: {}", err)))?;

        tracing::debug!(run_mode = %run_mode, pricing = ?config.pricing, "Loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn config_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("melon-config-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let dir = config_dir(name);
        fs::write(dir.join("default.toml"), contents).unwrap();
        dir
    }

    #[test]
    fn test_load_from_dir() {
        let dir = write_config(
            "override",
            "[pricing]\nsmall_order_fee = 0.0\nrush_surcharge = 5.0\n",
        );

        let config = Config::from_sources(&dir, "test").unwrap();
        assert_eq!(config.pricing.small_order_fee, 0.0);
        assert_eq!(config.pricing.rush_surcharge, 5.0);
        assert_eq!(config.pricing.premium_multiplier, 1.5);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_default_is_an_error() {
        let dir = env::temp_dir().join(format!("melon-config-missing-{}", std::process::id()));
        assert!(Config::from_dir(&dir).is_err());
        assert!(Config::from_sources(&dir, "development").is_err());
    }

    #[test]
    fn test_shipped_defaults_match_builtin() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../config");
        let config = Config::from_sources(dir, "development").unwrap();
        assert_eq!(config.pricing, PricingConfig::default());
    }

    #[test]
    fn test_run_mode_file_overrides_default() {
        let dir = write_config("run-mode", "[pricing]\nsmall_order_fee = 3.0\n");
        fs::write(
            dir.join("development.toml"),
            "[pricing]\nsmall_order_fee = 4.5\nrush_end_hour = 10\n",
        )
        .unwrap();

        let config = Config::from_sources(&dir, "development").unwrap();
        assert_eq!(config.pricing.small_order_fee, 4.5);
        assert_eq!(config.pricing.rush_end_hour, 10);
        assert_eq!(config.pricing.rush_start_hour, 8);

        // Other run modes skip the file
        let config = Config::from_sources(&dir, "production").unwrap();
        assert_eq!(config.pricing.small_order_fee, 3.0);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_env_overrides_files() {
        let dir = write_config("env", "[pricing]\nsmall_order_fee = 3.0\n");

        env::set_var("MELON__PRICING__SMALL_ORDER_FEE", "1.25");
        let loaded = Config::from_dir(&dir);
        let ignored = Config::from_sources(&dir, "development");
        env::remove_var("MELON__PRICING__SMALL_ORDER_FEE");

        assert_eq!(loaded.unwrap().pricing.small_order_fee, 1.25);
        assert_eq!(ignored.unwrap().pricing.small_order_fee, 3.0);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_invalid_pricing_rejected() {
        let cases = [
            ("inverted-window", "[pricing]\nrush_start_hour = 8\nrush_end_hour = 7\n"),
            ("late-hour", "[pricing]\nrush_end_hour = 24\n"),
            ("negative-fee", "[pricing]\nsmall_order_fee = -3.0\n"),
            ("negative-surcharge", "[pricing]\nrush_surcharge = -4.0\n"),
            ("zero-multiplier", "[pricing]\npremium_multiplier = 0.0\n"),
            ("negative-threshold", "[pricing]\nsmall_order_threshold = -1\n"),
        ];

        for (name, contents) in cases {
            let dir = write_config(name, contents);
            match Config::from_sources(&dir, "development") {
                Err(config::ConfigError::Message(msg)) => {
                    assert!(msg.starts_with("invalid pricing config"), "{}: {}", name, msg)
                }
                other => panic!("{}: expected a config error, got {:?}", name, other),
            }
            fs::remove_dir_all(dir).unwrap();
        }
    }
}
