use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Default config file name, looked up in the working directory when no
/// `--config` path is given.
pub const DEFAULT_CONFIG_FILE: &str = "qml-i18n-extract.json";

/// Configuration for qml-i18n-extract
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory to scan for source files
    #[serde(default = "default_root")]
    pub root: String,

    /// Source file extension (without the dot)
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Output directory for the two catalogs
    #[serde(default = "default_output")]
    pub output: String,

    /// File name of the populated reference catalog
    #[serde(default = "default_reference_file")]
    pub reference_file: String,

    /// File name of the empty template catalog
    #[serde(default = "default_template_file")]
    pub template_file: String,

    /// Simple marker function (e.g., "qsTr")
    #[serde(default = "default_marker_function")]
    pub marker_function: String,

    /// Context-qualified marker function (e.g., "I18n.tr")
    #[serde(default = "default_context_function")]
    pub context_function: String,

    /// Glob patterns for paths to skip during the scan
    #[serde(default)]
    pub ignore: Vec<String>,
}

fn default_root() -> String {
    ".".to_string()
}

fn default_extension() -> String {
    "qml".to_string()
}

fn default_output() -> String {
    "translations".to_string()
}

fn default_reference_file() -> String {
    "en.json".to_string()
}

fn default_template_file() -> String {
    "template.json".to_string()
}

fn default_marker_function() -> String {
    "qsTr".to_string()
}

fn default_context_function() -> String {
    "I18n.tr".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            extension: default_extension(),
            output: default_output(),
            reference_file: default_reference_file(),
            template_file: default_template_file(),
            marker_function: default_marker_function(),
            context_function: default_context_function(),
            ignore: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Try to load from the default config file, or return default config
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.extension.is_empty() {
            bail!("Config error: extension must not be empty");
        }
        if self.marker_function.is_empty() || self.context_function.is_empty() {
            bail!("Config error: marker function names must not be empty");
        }
        Ok(())
    }
}
