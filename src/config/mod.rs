mod schema;

pub use schema::{Config, OutputFormat};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::table::DEFAULT_TABLE_FILE;

/// Get the config directory path (~/.config/modcheck/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("modcheck"))
}

/// Get the default config file path (~/.config/modcheck/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => match get_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };

    read_config(&config_path)
}

fn read_config(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Resolve the weighting table path: explicit flag, then config, then
/// `valacdos.txt` in the working directory.
pub fn resolve_table_path(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.or_else(|| config.table_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TABLE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_explicit_missing_file_errors() {
        let path = env::temp_dir().join("modcheck_test_missing_config.yaml");
        let _ = fs::remove_file(&path);

        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_explicit_file() {
        let path = env::temp_dir().join("modcheck_test_config.yaml");
        fs::write(&path, "table_path: /tmp/rules.txt\noutput: text\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.table_path, Some(PathBuf::from("/tmp/rules.txt")));
        assert_eq!(config.output, Some(OutputFormat::Text));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_yaml_reports_path() {
        let path = env::temp_dir().join("modcheck_test_bad_config.yaml");
        fs::write(&path, "output: [unterminated\n").unwrap();

        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(format!("{:#}", err).contains("modcheck_test_bad_config.yaml"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_resolve_table_path_precedence() {
        let config = Config {
            table_path: Some(PathBuf::from("/from/config.txt")),
            output: None,
        };

        assert_eq!(
            resolve_table_path(Some(PathBuf::from("/from/flag.txt")), &config),
            PathBuf::from("/from/flag.txt")
        );
        assert_eq!(
            resolve_table_path(None, &config),
            PathBuf::from("/from/config.txt")
        );
        assert_eq!(
            resolve_table_path(None, &Config::default()),
            PathBuf::from(DEFAULT_TABLE_FILE)
        );
    }
}
