use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory for decrypted files (default: next to the input)
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Appended to the input file stem
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Replace existing output files
    #[serde(default)]
    pub overwrite: bool,
}

fn default_suffix() -> String {
    "_decrypted".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            suffix: default_suffix(),
            overwrite: false,
        }
    }
}
