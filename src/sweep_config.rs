use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SweepError;

pub const CONFIG_FILE_NAME: &str = "sweep_config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SweepConfig {
    /// Directory that is scanned for templates. Not recursive.
    pub source: PathBuf,
    pub target: PathBuf,
    pub prefix: String,
    /// Without the leading dot.
    pub extension: String,
    pub sweep: SweepRange,
    pub path_rewrite: PathRewrite,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            source: ".".into(),
            target: "disney_total".into(),
            prefix: "disney_".to_string(),
            extension: "xml".to_string(),
            sweep: SweepRange::default(),
            path_rewrite: PathRewrite::default(),
        }
    }
}

impl SweepConfig {
    /// Reads the config file if there is one, otherwise falls back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, SweepError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(SweepError::io(path, err)),
        };
        serde_json::from_str(&content).map_err(|source| SweepError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<prefix><parameter>_<value>`
    pub fn output_id(&self, parameter: &str, value: &str) -> String {
        format!("{}{}_{}", self.prefix, parameter, value)
    }

    pub fn get_output_path(&self, id: &str) -> PathBuf {
        // Not `set_extension`, the id itself contains a dot.
        self.target.join(format!("{}.{}", id, self.extension))
    }
}

/// Evenly spaced values, both ends included.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SweepRange {
    pub start: f64,
    pub end: f64,
    pub steps: usize,
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
            steps: 11,
        }
    }
}

/// Environment map textures are referenced relative to the template,
/// and the generated files live one directory deeper.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PathRewrite {
    pub from: String,
    pub to: String,
}

impl Default for PathRewrite {
    fn default() -> Self {
        Self {
            from: "../../textures/kloofendal_overcast_1k.hdr".to_string(),
            to: "../../../textures/kloofendal_overcast_1k.hdr".to_string(),
        }
    }
}
