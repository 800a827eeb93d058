//! # Configuration
//!
//! The run configuration is an explicit [`StegConfig`] value handed to
//! [`crate::app::run`]. Defaults that should not be typed on every invocation
//! can live in an optional TOML file:
//!
//! ```toml
//! [output]
//! path = "mixed.png"
//!
//! [logging]
//! level = "debug"
//! ```

use anyhow::Result;
use log::LevelFilter;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Example
/// ```ignore
/// let defaults: FileConfig = load_config(Path::new("steg.toml"))?;
/// ```
pub fn load_config<T>(path: &Path) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Defaults read from a TOML file. Every section and field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Output file used when `-o` is not given
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// One of error, warn, info, debug, trace, off
    pub level: Option<String>,
}

impl LoggingConfig {
    /// Configured level, or `Info` when none is set.
    pub fn level_filter(&self) -> Result<LevelFilter> {
        match &self.level {
            Some(level) => level
                .parse()
                .map_err(|_| anyhow::anyhow!("Unknown log level '{}'", level)),
            None => Ok(LevelFilter::Info),
        }
    }
}

/// Which transform to run, and on which inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Recover the hidden image from a mixed image
    Extract { mixed: PathBuf },
    /// Hide `secret` inside `carrier`
    Combine { carrier: PathBuf, secret: PathBuf },
}

impl Mode {
    /// One input means extract, two mean combine (carrier first).
    pub fn from_inputs(inputs: &[PathBuf]) -> Result<Self> {
        match inputs {
            [mixed] => Ok(Mode::Extract {
                mixed: mixed.clone(),
            }),
            [carrier, secret] => Ok(Mode::Combine {
                carrier: carrier.clone(),
                secret: secret.clone(),
            }),
            _ => Err(anyhow::anyhow!(
                "Need exactly 1 or 2 arguments, got {}",
                inputs.len()
            )),
        }
    }
}

/// Where the PNG result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    /// Command line wins over the config file; stdout is the fallback.
    pub fn resolve(cli: Option<PathBuf>, file: &FileConfig) -> Self {
        match cli.or_else(|| file.output.path.clone()) {
            Some(path) => Output::File(path),
            None => Output::Stdout,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StegConfig {
    pub mode: Mode,
    pub output: Output,
}

impl StegConfig {
    pub fn new(mode: Mode, output: Output) -> Self {
        Self { mode, output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_inputs() {
        let one = vec![PathBuf::from("mixed.png")];
        let two = vec![PathBuf::from("shown.png"), PathBuf::from("hidden.png")];

        assert_eq!(
            Mode::from_inputs(&one).unwrap(),
            Mode::Extract {
                mixed: PathBuf::from("mixed.png")
            }
        );
        assert_eq!(
            Mode::from_inputs(&two).unwrap(),
            Mode::Combine {
                carrier: PathBuf::from("shown.png"),
                secret: PathBuf::from("hidden.png"),
            }
        );
    }

    #[test]
    fn test_mode_rejects_wrong_count() {
        let err = Mode::from_inputs(&[]).unwrap_err();
        assert_eq!(err.to_string(), "Need exactly 1 or 2 arguments, got 0");

        let three = vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")];
        let err = Mode::from_inputs(&three).unwrap_err();
        assert_eq!(err.to_string(), "Need exactly 1 or 2 arguments, got 3");
    }

    #[test]
    fn test_output_precedence() {
        let mut file = FileConfig::default();
        assert_eq!(Output::resolve(None, &file), Output::Stdout);

        file.output.path = Some(PathBuf::from("from_file.png"));
        assert_eq!(
            Output::resolve(None, &file),
            Output::File(PathBuf::from("from_file.png"))
        );
        assert_eq!(
            Output::resolve(Some(PathBuf::from("from_cli.png")), &file),
            Output::File(PathBuf::from("from_cli.png"))
        );
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steg.toml");
        fs::write(&path, "[output]\npath = \"out.png\"\n\n[logging]\nlevel = \"debug\"\n").unwrap();

        let config: FileConfig = load_config(&path).unwrap();

        assert_eq!(config.output.path, Some(PathBuf::from("out.png")));
        assert_eq!(config.logging.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();

        assert_eq!(config.output.path, None);
        assert_eq!(config.logging.level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_bad_log_level() {
        let config = LoggingConfig {
            level: Some("loud".to_string()),
        };

        assert!(config.level_filter().is_err());
    }
}
