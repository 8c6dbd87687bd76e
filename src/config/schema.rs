use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Optional settings read from `~/.config/modcheck/config.yaml`.
///
/// Example YAML:
/// ```yaml
/// table_path: /srv/vocalink/valacdos.txt
/// output: json
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Weighting table file (defaults to `valacdos.txt` in the working directory)
    #[serde(default)]
    pub table_path: Option<PathBuf>,

    /// Output format when `--json` is not given
    #[serde(default)]
    pub output: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
