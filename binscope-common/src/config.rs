use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Box-drawing family for the histogram frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Plain,
    Bold,
    Double,
    Curved,
    Quadrant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub border: BorderStyle,
    #[serde(default = "default_fallback_width")]
    pub fallback_width: u16, // used when the terminal cannot report its size
    #[serde(default = "default_fallback_height")]
    pub fallback_height: u16,
}

fn default_theme() -> String {
    "dark".into()
}
fn default_fallback_width() -> u16 {
    200
}
fn default_fallback_height() -> u16 {
    50
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            border: BorderStyle::default(),
            fallback_width: default_fallback_width(),
            fallback_height: default_fallback_height(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinningConfig {
    #[serde(default = "default_bins")]
    pub initial_bins: usize,
    #[serde(default = "default_ratio_target")]
    pub ratio_target: f64,
}

fn default_bins() -> usize {
    20
}
fn default_ratio_target() -> f64 {
    10.0
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            initial_bins: default_bins(),
            ratio_target: default_ratio_target(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub binning: BinningConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("binscope")
            .join("config.toml")
    }

    pub fn load() -> crate::Result<Self> {
        let path = if let Ok(env_path) = std::env::var("BINSCOPE_CONFIG") {
            PathBuf::from(env_path) // $BINSCOPE_CONFIG overrides default config path
        } else {
            Self::config_path()
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let cfg: Self = toml::from_str(&content)
            .map_err(|e| crate::BinscopeError::Config(format!("{}: {e}", path.display())))?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.display.theme, "dark");
        assert_eq!(cfg.display.fallback_width, 200);
        assert_eq!(cfg.binning.initial_bins, 20);
        assert_eq!(cfg.binning.ratio_target, 10.0);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "[display]\nborder = \"double\"\n\n[binning]\nratio_target = 4.5").unwrap();
        let cfg = Config::load_from(tmp.path()).unwrap();
        assert_eq!(cfg.display.border, BorderStyle::Double);
        assert_eq!(cfg.display.theme, "dark");
        assert_eq!(cfg.binning.ratio_target, 4.5);
        assert_eq!(cfg.binning.initial_bins, 20);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "[display\ntheme = ").unwrap();
        let err = Config::load_from(tmp.path()).unwrap_err();
        assert!(matches!(err, crate::BinscopeError::Config(_)));
    }
}
