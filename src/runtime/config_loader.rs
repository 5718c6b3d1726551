//! Extraction configuration and its YAML loader.
//!
//! Values resolve with precedence: CLI flag > environment > YAML file > defaults.
//! The CLI layer is applied by the binary; this module covers the rest.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const INPUT_DIR_ENV: &str = "LEXNOM_INPUT_DIR";
pub const OUTPUT_ENV: &str = "LEXNOM_OUTPUT";

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Yaml { path: PathBuf, source: serde_yaml::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Failed to read config file {}: {}", path.display(), source)
            }
            ConfigError::Yaml { path, source } => {
                write!(f, "Failed to parse YAML in {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Yaml { source, .. } => Some(source),
        }
    }
}

/// Output artifact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Delimited text, one row per record
    #[default]
    Csv,
    /// One JSON object per line
    Ndjson,
}

/// Everything the pipeline needs to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Directory holding the corpus release files
    pub input_dir: PathBuf,

    /// Output artifact path
    pub output_path: PathBuf,

    /// Glob pattern, relative to `input_dir`, selecting corpus files
    pub file_pattern: String,

    pub format: OutputFormat,

    /// Language whose equivalents fill the English definition column
    pub language: String,

    /// Example types collected into the usages column
    pub usage_types: Vec<String>,

    /// Example type whose `example` values form one dialogue
    pub dialogue_type: String,

    /// Part-of-speech value meaning "none"
    pub no_part_of_speech: String,

    /// Vocabulary-level value meaning "none"
    pub no_vocabulary_level: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("2024_01"),
            output_path: PathBuf::from("results.csv"),
            file_pattern: "*.json".to_string(),
            format: OutputFormat::Csv,
            language: "영어".to_string(),
            usage_types: vec!["문장".to_string(), "대화".to_string()],
            dialogue_type: "대화".to_string(),
            no_part_of_speech: "품사 없음".to_string(),
            no_vocabulary_level: "없음".to_string(),
        }
    }
}

impl ExtractConfig {
    /// Load configuration from a YAML file; missing keys take their defaults.
    ///
    /// # Example
    /// ```ignore
    /// use lexnom::runtime::ExtractConfig;
    ///
    /// let config = ExtractConfig::load_from_file("lexnom.yaml")?;
    /// println!("Reading {}", config.input_dir.display());
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml_str(&contents).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document is valid and means "all defaults"
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    /// Override paths from `LEXNOM_INPUT_DIR` and `LEXNOM_OUTPUT` when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(INPUT_DIR_ENV).filter(|v| !v.is_empty()) {
            self.input_dir = PathBuf::from(dir);
        }
        if let Some(output) = lookup(OUTPUT_ENV).filter(|v| !v.is_empty()) {
            self.output_path = PathBuf::from(output);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ExtractConfig::default();

        assert_eq!(config.input_dir, PathBuf::from("2024_01"));
        assert_eq!(config.output_path, PathBuf::from("results.csv"));
        assert_eq!(config.usage_types, vec!["문장", "대화"]);
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ExtractConfig::from_yaml_str(
            "input_dir: corpus/2023_12\nformat: ndjson\nusage_types: [구]\n",
        )
        .unwrap();

        assert_eq!(config.input_dir, PathBuf::from("corpus/2023_12"));
        assert_eq!(config.format, OutputFormat::Ndjson);
        assert_eq!(config.usage_types, vec!["구"]);
        assert_eq!(config.language, "영어");
        assert_eq!(config.dialogue_type, "대화");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(ExtractConfig::from_yaml_str("\n").unwrap(), ExtractConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output_path: out/words.csv").unwrap();

        let config = ExtractConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.output_path, PathBuf::from("out/words.csv"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ExtractConfig::load_from_file("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("does/not/exist.yaml"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [(INPUT_DIR_ENV, "2025_06"), (OUTPUT_ENV, "")]
            .into_iter()
            .collect();

        let mut config = ExtractConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.input_dir, PathBuf::from("2025_06"));
        assert_eq!(config.output_path, PathBuf::from("results.csv"));
    }
}
