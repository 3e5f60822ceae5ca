//! Configuration loading for course-chunk.

use anyhow::{anyhow, ensure, Context, Result};
use course_chunker::{FencePolicy, DEFAULT_MAX_CHUNK_SIZE};
use directories::ProjectDirs;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Environment variable that sets the default maximum chunk size.
pub const MAX_CHUNK_SIZE_ENV: &str = "COURSE_CHUNK_MAX_CHUNK_SIZE";

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub chunking: Option<ChunkingConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ChunkingConfig {
    pub max_chunk_size: Option<usize>,
    pub fence_policy: Option<FencePolicy>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

impl Config {
    pub fn max_chunk_size(&self) -> Option<usize> {
        self.chunking.as_ref().and_then(|c| c.max_chunk_size)
    }

    pub fn fence_policy(&self) -> Option<FencePolicy> {
        self.chunking.as_ref().and_then(|c| c.fence_policy)
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|o| o.format)
    }
}

/// Values supplied on the command line; `None` defers to the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub max_chunk_size: Option<usize>,
    pub fence_policy: Option<FencePolicy>,
    pub format: Option<OutputFormat>,
}

/// Defaults taken from the environment. They rank below the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvDefaults {
    pub max_chunk_size: Option<usize>,
}

impl EnvDefaults {
    pub fn from_env() -> Result<Self> {
        let max_chunk_size = match env::var(MAX_CHUNK_SIZE_ENV) {
            Ok(value) => Some(parse_max_chunk_size(&value)?),
            Err(env::VarError::NotPresent) => None,
            Err(e) => return Err(anyhow!("Failed to read {MAX_CHUNK_SIZE_ENV}: {e}")),
        };
        Ok(Self { max_chunk_size })
    }
}

fn parse_max_chunk_size(value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid {MAX_CHUNK_SIZE_ENV} value: {value:?}"))
}

/// Effective settings after applying flag > config file > environment > default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub max_chunk_size: usize,
    pub fence_policy: FencePolicy,
    pub format: OutputFormat,
}

impl Settings {
    pub fn resolve(overrides: &Overrides, config: &Config, env: &EnvDefaults) -> Result<Self> {
        let max_chunk_size = overrides
            .max_chunk_size
            .or_else(|| config.max_chunk_size())
            .or(env.max_chunk_size)
            .unwrap_or(DEFAULT_MAX_CHUNK_SIZE);
        ensure!(max_chunk_size > 0, "max_chunk_size must be greater than zero");

        Ok(Self {
            max_chunk_size,
            fence_policy: overrides
                .fence_policy
                .or_else(|| config.fence_policy())
                .unwrap_or_default(),
            format: overrides
                .format
                .or_else(|| config.output_format())
                .unwrap_or_default(),
        })
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "course-chunk")
        .context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config =
        toml::from_str(&contents).context("Failed to parse config file as TOML")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let settings = Settings::resolve(&Overrides::default(), &Config::default(), &EnvDefaults::default())
                .unwrap();
        assert_eq!(settings.max_chunk_size, DEFAULT_MAX_CHUNK_SIZE);
        assert_eq!(settings.fence_policy, FencePolicy::SuppressHeaders);
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_config_file_values_apply() {
        let config = Config {
            chunking: Some(ChunkingConfig {
                max_chunk_size: Some(600),
                fence_policy: Some(FencePolicy::Ignore),
            }),
            output: Some(OutputConfig {
                format: Some(OutputFormat::Jsonl),
            }),
        };

        let settings = Settings::resolve(&Overrides::default(), &config, &EnvDefaults::default()).unwrap();
        assert_eq!(settings.max_chunk_size, 600);
        assert_eq!(settings.fence_policy, FencePolicy::Ignore);
        assert_eq!(settings.format, OutputFormat::Jsonl);
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            chunking: Some(ChunkingConfig {
                max_chunk_size: Some(600),
                fence_policy: Some(FencePolicy::Ignore),
            }),
            ..Default::default()
        };
        let overrides = Overrides {
            max_chunk_size: Some(250),
            fence_policy: Some(FencePolicy::SuppressHeaders),
            format: Some(OutputFormat::Pretty),
        };

        let settings = Settings::resolve(&overrides, &config, &EnvDefaults::default()).unwrap();
        assert_eq!(settings.max_chunk_size, 250);
        assert_eq!(settings.fence_policy, FencePolicy::SuppressHeaders);
        assert_eq!(settings.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_zero_max_chunk_size_rejected() {
        let overrides = Overrides {
            max_chunk_size: Some(0),
            ..Default::default()
        };
        assert!(Settings::resolve(&overrides, &Config::default(), &EnvDefaults::default()).is_err());
    }

    #[test]
    fn test_env_default_ranks_below_config_file() {
        let env = EnvDefaults {
            max_chunk_size: Some(300),
        };

        let settings = Settings::resolve(&Overrides::default(), &Config::default(), &env).unwrap();
        assert_eq!(settings.max_chunk_size, 300);

        let config = Config {
            chunking: Some(ChunkingConfig {
                max_chunk_size: Some(600),
                fence_policy: None,
            }),
            ..Default::default()
        };
        let settings = Settings::resolve(&Overrides::default(), &config, &env).unwrap();
        assert_eq!(settings.max_chunk_size, 600);
    }

    #[test]
    fn test_env_zero_max_chunk_size_rejected() {
        let env = EnvDefaults {
            max_chunk_size: Some(0),
        };
        assert!(Settings::resolve(&Overrides::default(), &Config::default(), &env).is_err());
    }

    #[test]
    fn test_parse_env_max_chunk_size() {
        assert_eq!(parse_max_chunk_size(" 750 ").unwrap(), 750);

        let err = parse_max_chunk_size("large").unwrap_err();
        assert!(err.to_string().contains(MAX_CHUNK_SIZE_ENV));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert!(config.max_chunk_size().is_none());
        assert!(config.fence_policy().is_none());
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[chunking]\nmax_chunk_size = 800\nfence_policy = \"ignore\"\n\n[output]\nformat = \"pretty\""
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.max_chunk_size(), Some(800));
        assert_eq!(config.fence_policy(), Some(FencePolicy::Ignore));
        assert_eq!(config.output_format(), Some(OutputFormat::Pretty));
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[chunking]\nmax_tokens = 800").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_rejects_unknown_fence_policy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[chunking]\nfence_policy = \"sometimes\"").unwrap();

        assert!(load_config(file.path()).is_err());
    }
}
