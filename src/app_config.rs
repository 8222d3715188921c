use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use url::Url;

use crate::engine::DEFAULT_INLINE_TAGS;
use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Only process rows whose context column equals this value
    #[serde(default)]
    pub context_filter: Option<String>,

    /// Column names in the tabular store
    #[serde(default)]
    pub columns: ColumnConfig,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Preservation engine config
    #[serde(default)]
    pub engine: EngineConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            context_filter: None,
            columns: ColumnConfig::default(),
            translation: TranslationConfig::default(),
            engine: EngineConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration after loading and CLI overrides.
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.source_language)
            .map_err(|e| anyhow!("Invalid source language: {}", e))?;
        language_utils::validate_language_code(&self.target_language)
            .map_err(|e| anyhow!("Invalid target language: {}", e))?;

        if self.columns.value.trim().is_empty() {
            return Err(anyhow!("Value column name must not be empty"));
        }

        self.engine.validate()?;
        self.translation.validate()?;
        Ok(())
    }

    /// Name of the derived translation column for the target language.
    pub fn translated_column(&self) -> String {
        format!(
            "{}_{}",
            self.columns.value,
            language_utils::column_suffix(&self.target_language)
        )
    }
}

/// Column names carried by the tabular store
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ColumnConfig {
    /// Source markup column
    #[serde(default = "default_value_column")]
    pub value: String,

    /// Row context column (optional in the data)
    #[serde(default = "default_context_column")]
    pub context: String,

    /// Content classification column
    #[serde(default = "default_content_type_column")]
    pub content_type: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            value: default_value_column(),
            context: default_context_column(),
            content_type: default_content_type_column(),
        }
    }
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: OpenAI
    #[default]
    OpenAI,
    // @provider: Anthropic
    Anthropic,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::OpenAI => Self {
                provider_type: "openai".to_string(),
                model: default_openai_model(),
                api_key: String::new(),
                endpoint: default_openai_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Anthropic => Self {
                provider_type: "anthropic".to_string(),
                model: default_anthropic_model(),
                api_key: String::new(),
                endpoint: default_anthropic_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Selected provider
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Configurations for all known providers
    #[serde(default = "default_available_providers")]
    pub available_providers: Vec<ProviderConfig>,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Maximum rows translated concurrently
    #[serde(default = "default_concurrent_rows")]
    pub concurrent_rows: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: default_available_providers(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            concurrent_rows: default_concurrent_rows(),
        }
    }
}

impl TranslationConfig {
    /// Configuration for the selected provider.
    pub fn provider_config(&self) -> Option<&ProviderConfig> {
        let wanted = self.provider.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == wanted)
    }

    fn validate(&self) -> Result<()> {
        if self.concurrent_rows == 0 {
            return Err(anyhow!("concurrent_rows must be at least 1"));
        }
        if self.provider_config().is_none() {
            return Err(anyhow!(
                "No configuration for selected provider: {}",
                self.provider
            ));
        }
        for provider in &self.available_providers {
            if !provider.endpoint.is_empty() {
                Url::parse(&provider.endpoint).map_err(|e| {
                    anyhow!("Invalid endpoint for {}: {}", provider.provider_type, e)
                })?;
            }
        }
        Ok(())
    }
}

/// Preservation engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    /// Content length above which chunked translation applies
    #[serde(default = "default_chunk_max_size")]
    pub chunk_max_size: usize,

    /// Characters of cross-window context
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Tag names whose content may be re-wrapped after translation
    #[serde(default = "default_inline_tags")]
    pub inline_tags: Vec<String>,

    /// Re-wrap inline tag content during reconstruction
    #[serde(default = "default_true")]
    pub rewrite_inline: bool,

    /// Run the structural repair post-pass
    #[serde(default = "default_true")]
    pub repair: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_max_size: default_chunk_max_size(),
            chunk_overlap: default_chunk_overlap(),
            inline_tags: default_inline_tags(),
            rewrite_inline: true,
            repair: true,
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> Result<()> {
        if self.chunk_max_size == 0 {
            return Err(anyhow!("chunk_max_size must be at least 1"));
        }
        if self.chunk_overlap >= self.chunk_max_size {
            return Err(anyhow!(
                "chunk_overlap ({}) must be smaller than chunk_max_size ({})",
                self.chunk_overlap,
                self.chunk_max_size
            ));
        }
        for tag in &self.inline_tags {
            if !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(anyhow!("Invalid inline tag name: {:?}", tag));
            }
        }
        Ok(())
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

fn default_source_language() -> String {
    "tr".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_value_column() -> String {
    "VALUE".to_string()
}

fn default_context_column() -> String {
    "CONTEXT".to_string()
}

fn default_content_type_column() -> String {
    "CONTENT_TYPE".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_available_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(TranslationProvider::OpenAI),
        ProviderConfig::new(TranslationProvider::Anthropic),
    ]
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_concurrent_rows() -> usize {
    4
}

fn default_chunk_max_size() -> usize {
    15000
}

fn default_chunk_overlap() -> usize {
    1200
}

fn default_inline_tags() -> Vec<String> {
    DEFAULT_INLINE_TAGS.iter().map(|t| t.to_string()).collect()
}

fn default_true() -> bool {
    true
}
