//! Configuration management for the UXsearch service.
//!
//! Configuration is merged from several sources, lowest precedence first:
//! - Built-in defaults
//! - A YAML config file (`uxsearch.yaml` or `UXSEARCH_CONFIG`)
//! - Environment variables
//! - Command-line flags (applied by the binary via [`AppConfig::with_overrides`])

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "uxsearch.yaml";

/// Hard cap on entries returned by the resource preview endpoint.
pub const MAX_PREVIEW_LIMIT: usize = 5;

const KNOWN_PROVIDERS: [&str; 2] = ["openai", "ollama"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Config file that was merged, if any
    pub config_file: Option<PathBuf>,

    /// Socket address the HTTP server binds to
    pub bind: String,

    /// Completion provider ("openai", "ollama")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Custom provider endpoint
    pub endpoint: Option<String>,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    /// Resolved API key
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Output-length bound for completions
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: Option<f32>,

    /// CSV export of the resource worksheet (URL or file path)
    pub resource_source: Option<String>,

    /// Maximum resources handed to the model per question
    pub max_matches: usize,

    /// Maximum resources returned by the preview endpoint
    pub preview_limit: usize,

    /// Worksheet header names
    pub columns: SheetColumns,

    /// Optional YAML prompt template override
    pub prompt_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Emit JSON log lines
    pub json_logs: bool,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Header names of the resource worksheet.
///
/// Headers are trimmed before they are matched against these names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetColumns {
    pub title: String,
    pub link: String,
    pub category: String,
    pub author: String,
    #[serde(rename = "mainTag")]
    pub main_tag: String,
    #[serde(rename = "subTag")]
    pub sub_tag: String,
    pub summary: String,
}

impl Default for SheetColumns {
    fn default() -> Self {
        Self {
            title: "Headline".to_string(),
            link: "Button".to_string(),
            category: "Category".to_string(),
            author: "Author".to_string(),
            main_tag: "Main-tag".to_string(),
            sub_tag: "Sub-tag".to_string(),
            summary: "General Summary".to_string(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    server: Option<ServerSection>,
    llm: Option<LlmSection>,
    resources: Option<ResourcesSection>,
    prompt: Option<PromptSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerSection {
    bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
    #[serde(rename = "maxTokens")]
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResourcesSection {
    source: Option<String>,
    #[serde(rename = "maxMatches")]
    max_matches: Option<usize>,
    #[serde(rename = "previewLimit")]
    preview_limit: Option<usize>,
    columns: Option<SheetColumns>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PromptSection {
    #[serde(rename = "templateFile")]
    template_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
    json: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            bind: "0.0.0.0:8000".to_string(),
            provider: "openai".to_string(),
            model: "gpt-4-1106-preview".to_string(),
            endpoint: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            max_tokens: 800,
            temperature: None,
            resource_source: None,
            max_matches: 50,
            preview_limit: MAX_PREVIEW_LIMIT,
            columns: SheetColumns::default(),
            prompt_file: None,
            log_level: None,
            json_logs: false,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file, environment variables and defaults.
    ///
    /// Environment variables:
    /// - `UXSEARCH_CONFIG`: Path to config file
    /// - `UXSEARCH_BIND`: Listen address
    /// - `UXSEARCH_PROVIDER`: Completion provider
    /// - `UXSEARCH_MODEL`: Model identifier
    /// - `UXSEARCH_RESOURCES`: Resource sheet CSV (URL or path)
    /// - `UXSEARCH_PROMPT_FILE`: Prompt template override
    /// - `OPENAI_API_KEY` (or the variable named by `apiKeyEnv`): API key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let explicit = std::env::var("UXSEARCH_CONFIG").ok().map(PathBuf::from);
        Self::load_from(explicit)
    }

    /// Load configuration, merging the given config file (if any).
    ///
    /// An explicitly named file must exist; the default `uxsearch.yaml`
    /// is merged only when present.
    pub fn load_from(config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        let config_path = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Config file does not exist: {:?}",
                        path
                    )));
                }
                Some(path)
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                default_path.exists().then_some(default_path)
            }
        };

        if let Some(path) = config_path {
            config = config.merge_yaml(&path)?;
        }

        // Environment variables override YAML config
        if let Ok(bind) = std::env::var("UXSEARCH_BIND") {
            config.bind = bind;
        }

        if let Ok(provider) = std::env::var("UXSEARCH_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("UXSEARCH_MODEL") {
            config.model = model;
        }

        if let Ok(source) = std::env::var("UXSEARCH_RESOURCES") {
            config.resource_source = Some(source);
        }

        if let Ok(prompt_file) = std::env::var("UXSEARCH_PROMPT_FILE") {
            config.prompt_file = Some(PathBuf::from(prompt_file));
        }

        config.api_key = std::env::var(&config.api_key_env).ok();

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();
        result.config_file = Some(path.to_path_buf());

        if let Some(server) = config_file.server {
            if let Some(bind) = server.bind {
                result.bind = bind;
            }
        }

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if llm.endpoint.is_some() {
                result.endpoint = llm.endpoint;
            }
            if let Some(api_key_env) = llm.api_key_env {
                result.api_key_env = api_key_env;
            }
            if let Some(max_tokens) = llm.max_tokens {
                result.max_tokens = max_tokens;
            }
            if llm.temperature.is_some() {
                result.temperature = llm.temperature;
            }
        }

        if let Some(resources) = config_file.resources {
            if resources.source.is_some() {
                result.resource_source = resources.source;
            }
            if let Some(max_matches) = resources.max_matches {
                result.max_matches = max_matches;
            }
            if let Some(preview_limit) = resources.preview_limit {
                result.preview_limit = preview_limit;
            }
            if let Some(columns) = resources.columns {
                result.columns = columns;
            }
        }

        if let Some(prompt) = config_file.prompt {
            if prompt.template_file.is_some() {
                result.prompt_file = prompt.template_file;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
            if let Some(json) = logging.json {
                result.json_logs = json;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        bind: Option<String>,
        provider: Option<String>,
        model: Option<String>,
        resource_source: Option<String>,
        prompt_file: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(bind) = bind {
            self.bind = bind;
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(source) = resource_source {
            self.resource_source = Some(source);
        }

        if let Some(prompt_file) = prompt_file {
            self.prompt_file = Some(prompt_file);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate the merged configuration before the service starts.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.provider.to_lowercase();
        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if provider == "openai" && self.api_key.is_none() {
            return Err(AppError::Config(format!(
                "API key not found in environment variable: {}",
                self.api_key_env
            )));
        }

        if self.resource_source.is_none() {
            return Err(AppError::Config(
                "No resource source configured (set UXSEARCH_RESOURCES or resources.source)"
                    .to_string(),
            ));
        }

        if self.max_matches == 0 {
            return Err(AppError::Config(
                "resources.maxMatches must be at least 1".to_string(),
            ));
        }

        if self.preview_limit == 0 || self.preview_limit > MAX_PREVIEW_LIMIT {
            return Err(AppError::Config(format!(
                "resources.previewLimit must be between 1 and {}",
                MAX_PREVIEW_LIMIT
            )));
        }

        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(AppError::Config(format!(
                    "Temperature out of range (0.0 - 2.0): {}",
                    temperature
                )));
            }
        }

        Ok(())
    }
}
