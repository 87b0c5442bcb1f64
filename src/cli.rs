use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;
use crate::error::ConfigError;

/// Linked weather charts for a daily station CSV
#[derive(Parser, Debug)]
#[command(name = "weather-charts")]
#[command(version)]
pub struct Args {
    /// Weather CSV to open (defaults to the config's data_path)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// JSON layout/config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Config from `--config`, or the built-in defaults.
    pub fn app_config(&self) -> Result<AppConfig, ConfigError> {
        let config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// `--data` wins over the config file.
    pub fn data_path(&self, config: &AppConfig) -> PathBuf {
        self.data.clone().unwrap_or_else(|| config.data_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_bundled_csv() {
        let args = Args::parse_from(["weather-charts"]);
        let config = args.app_config().unwrap();
        assert_eq!(args.data_path(&config), PathBuf::from(crate::config::DEFAULT_DATA_FILE));
    }

    #[test]
    fn data_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("cfg.json");
        std::fs::write(&cfg, r#"{ "data_path": "from_config.csv" }"#).unwrap();

        let args = Args::parse_from(["weather-charts", "--config", cfg.to_str().unwrap()]);
        let config = args.app_config().unwrap();
        assert_eq!(args.data_path(&config), PathBuf::from("from_config.csv"));

        let args = Args::parse_from([
            "weather-charts",
            "-c",
            cfg.to_str().unwrap(),
            "--data",
            "other.csv",
        ]);
        let config = args.app_config().unwrap();
        assert_eq!(args.data_path(&config), PathBuf::from("other.csv"));
    }

    #[test]
    fn missing_config_is_an_error() {
        let args = Args::parse_from(["weather-charts", "--config", "/definitely/not/here.json"]);
        assert!(matches!(args.app_config(), Err(ConfigError::Io { .. })));
    }
}
