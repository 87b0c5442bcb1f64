//! Layout and startup configuration.
//!
//! Every field has a default matching the dashboard's stock page, so a
//! config file only needs the values it changes:
//!
//! ```json
//! { "data_path": "weather/atl.csv", "line": { "width": 1400 } }
//! ```

use std::path::{Path, PathBuf};

use eframe::egui::{pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_DATA_FILE: &str = "atl_weather_20to22.csv";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Margin {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Outer size of one chart plus the margins around its plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f32,
    pub height: f32,
    pub margin: Margin,
}

impl ChartLayout {
    pub const fn new(width: f32, height: f32, margin: Margin) -> Self {
        ChartLayout {
            width,
            height,
            margin,
        }
    }

    pub fn inner_width(&self) -> f32 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f32 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// Plot area in chart-local pixels.
    pub fn plot_rect(&self) -> Rect {
        Rect::from_min_max(
            pos2(self.margin.left, self.margin.top),
            pos2(self.width - self.margin.right, self.height - self.margin.bottom),
        )
    }

    fn validate(&self, chart: &'static str) -> Result<(), ConfigError> {
        if self.inner_width() <= 0.0 || self.inner_height() <= 0.0 {
            return Err(ConfigError::Layout {
                chart,
                reason: format!(
                    "{}×{} leaves no plot area inside the margins",
                    self.width, self.height
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV loaded at startup when no `--data` is given.
    pub data_path: PathBuf,
    /// Initial window size.
    pub window: [f32; 2],
    pub bar: ChartLayout,
    pub scatter: ChartLayout,
    pub line: ChartLayout,
    /// Size of each of the two paired charts.
    pub paired: ChartLayout,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            window: [1320.0, 960.0],
            bar: ChartLayout::new(600.0, 400.0, Margin::new(50.0, 50.0, 50.0, 60.0)),
            scatter: ChartLayout::new(600.0, 400.0, Margin::new(50.0, 20.0, 50.0, 60.0)),
            line: ChartLayout::new(1240.0, 350.0, Margin::new(10.0, 80.0, 50.0, 80.0)),
            paired: ChartLayout::new(600.0, 300.0, Margin::new(40.0, 20.0, 60.0, 50.0)),
        }
    }
}

impl AppConfig {
    /// Read a JSON config file; missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bar.validate("bar")?;
        self.scatter.validate("scatter")?;
        self.line.validate("line")?;
        self.paired.validate("paired")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_stock_layout() {
        let config = AppConfig::default();
        assert_eq!(config.scatter.plot_rect(), Rect::from_min_max(pos2(60.0, 50.0), pos2(580.0, 350.0)));
        assert_eq!(config.paired.inner_width(), 530.0);
        assert_eq!(config.paired.inner_height(), 200.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = AppConfig::from_json(
            r#"{ "data_path": "other.csv",
                 "line": { "width": 1400, "height": 350,
                           "margin": { "top": 10, "right": 80, "bottom": 50, "left": 80 } } }"#,
        )
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("other.csv"));
        assert_eq!(config.line.width, 1400.0);
        assert_eq!(config.bar, AppConfig::default().bar);
    }

    #[test]
    fn margins_larger_than_chart_are_rejected() {
        let err = AppConfig::from_json(
            r#"{ "bar": { "width": 100, "height": 400,
                          "margin": { "top": 50, "right": 50, "bottom": 50, "left": 60 } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Layout { chart: "bar", .. }));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "window": [800, 600] }}"#).unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.window, [800.0, 600.0]);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(AppConfig::from_json("{ nope"), Err(ConfigError::Json(_))));
    }
}
