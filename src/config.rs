use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub elbench: ElbenchConfig,
    pub llm: LlmConfig,
    pub benchmark: BenchmarkConfig,
}

/// Paths and logging
#[derive(Debug, Clone, Deserialize)]
pub struct ElbenchConfig {
    /// Directory holding the cases and ranking CSVs. Relative file names in
    /// `[benchmark]` resolve against it.
    pub data_dir: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Chat completion settings for the LLM ranking source
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key_env: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Benchmark inputs
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkConfig {
    pub cases_file: PathBuf,
    pub sources: Vec<SourceConfig>,
    /// Where `llm-rank` writes its rankings; also the file `elbench --live` reads.
    #[serde(default = "default_live_output_file")]
    pub live_output_file: PathBuf,
    /// Name of the source that `--live` swaps for `live_output_file`.
    #[serde(default)]
    pub live_source: Option<String>,
}

/// One named ranking source
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub file: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_top_k() -> usize {
    5
}

fn default_max_retries() -> usize {
    3
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_live_output_file() -> PathBuf {
    PathBuf::from("llm_results_live.csv")
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in ELBENCH_CONFIG environment variable
    /// 2. ./config.toml in current directory
    pub fn load() -> Result<Self> {
        // .env is optional
        let _ = dotenv::dotenv();

        let config_path = std::env::var("ELBENCH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        Self::from_toml_str(&config_str)
            .with_context(|| format!("Invalid config file: {}", config_path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if !self.elbench.data_dir.is_dir() {
            anyhow::bail!(
                "data_dir must be an existing directory: {}. Set data_dir in config.toml.",
                self.elbench.data_dir.display()
            );
        }

        if self.llm.provider != "openai" {
            anyhow::bail!(
                "llm.provider '{}' is not supported (expected \"openai\")",
                self.llm.provider
            );
        }

        if self.llm.top_k == 0 {
            anyhow::bail!("llm.top_k must be greater than 0");
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            anyhow::bail!("llm.temperature must be between 0.0 and 2.0");
        }

        if self.benchmark.sources.is_empty() {
            anyhow::bail!("benchmark.sources must list at least one ranking source");
        }

        let mut seen = HashSet::new();
        for source in &self.benchmark.sources {
            if !seen.insert(source.name.as_str()) {
                anyhow::bail!("Duplicate benchmark source name: {}", source.name);
            }
        }

        if let Some(live) = &self.benchmark.live_source {
            if !seen.contains(live.as_str()) {
                anyhow::bail!("benchmark.live_source '{}' is not one of benchmark.sources", live);
            }
        }

        Ok(())
    }

    /// Read the LLM API key from the configured environment variable.
    ///
    /// Only the LLM runner needs this; scoring existing ranking files does not.
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.llm.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .with_context(|| {
                format!(
                    "Environment variable {} is not set or empty. Set it in your .env file or as an environment variable before running the LLM benchmark.",
                    self.llm.api_key_env
                )
            })
    }

    /// Resolve a data file name against `data_dir` (absolute paths pass through).
    pub fn data_path(&self, file: &Path) -> PathBuf {
        self.elbench.data_dir.join(file)
    }

    pub fn cases_path(&self) -> PathBuf {
        self.data_path(&self.benchmark.cases_file)
    }

    pub fn live_output_path(&self) -> PathBuf {
        self.data_path(&self.benchmark.live_output_file)
    }

    /// Named ranking sources with resolved paths.
    ///
    /// With `live` set, the `live_source` entry (or the last source when none is
    /// named) reads `live_output_file` instead of its configured file.
    pub fn source_paths(&self, live: bool) -> Vec<(String, PathBuf)> {
        let live_name = self
            .benchmark
            .live_source
            .as_deref()
            .or_else(|| self.benchmark.sources.last().map(|s| s.name.as_str()));

        self.benchmark
            .sources
            .iter()
            .map(|s| {
                let path = if live && Some(s.name.as_str()) == live_name {
                    self.live_output_path()
                } else {
                    self.data_path(&s.file)
                };
                (s.name.clone(), path)
            })
            .collect()
    }
}
