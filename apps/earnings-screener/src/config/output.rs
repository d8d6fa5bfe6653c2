//! Report output configuration.

use serde::{Deserialize, Serialize};

/// Where the report is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory, created if missing.
    #[serde(default = "default_output_dir")]
    pub dir: String,
    /// Also write the effective configuration next to the report.
    #[serde(default = "default_true")]
    pub write_config: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            write_config: true,
        }
    }
}

fn default_output_dir() -> String {
    "output".to_string()
}

const fn default_true() -> bool {
    true
}
