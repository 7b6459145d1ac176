use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Pipeline configuration module
/// This module handles the sync configuration including provider selection,
/// locale validation and output settings.
/// Represents the pipeline configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source locale code (the API catalog is English)
    pub source_locale: String,

    /// Target locale codes to translate into
    pub target_locales: Vec<String>,

    /// Output directory for materialized documents
    pub out_dir: String,

    /// Catalog host root (for `/api/...`-relative paths)
    pub api_root: String,

    /// Versioned catalog API base
    pub api_base: String,

    /// Translation config
    pub translation: TranslationConfig,

    /// Skip the full-catalog snapshot stage
    #[serde(default)]
    pub skip_full_sync: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google unauthenticated public endpoint
    #[default]
    Google,
    // @provider: Self-hosted LibreTranslate
    LibreTranslate,
    // @provider: MyMemory public quota-limited endpoint
    MyMemory,
    // @provider: Identity passthrough, no network calls
    None,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::LibreTranslate => "LibreTranslate",
            Self::MyMemory => "MyMemory",
            Self::None => "disabled",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::LibreTranslate => "libretranslate".to_string(),
            Self::MyMemory => "mymemory".to_string(),
            Self::None => "none".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "libretranslate" => Ok(Self::LibreTranslate),
            "mymemory" => Ok(Self::MyMemory),
            "none" => Ok(Self::None),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation gateway configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Provider to translate through
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Provider endpoint override (LibreTranslate host, mostly)
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// API key (LibreTranslate, optional)
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Contact email forwarded to MyMemory for a larger quota
    #[serde(default = "String::new")]
    pub email: String,

    /// Minimum milliseconds between provider calls, across all pools
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,

    /// Maximum characters per provider request
    #[serde(default = "default_max_chunk_len")]
    pub max_chunk_len: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            endpoint: String::new(),
            api_key: String::new(),
            email: String::new(),
            throttle_ms: default_throttle_ms(),
            max_chunk_len: default_max_chunk_len(),
        }
    }
}

/// Log level for the pipeline
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_throttle_ms() -> u64 {
    40
}

fn default_max_chunk_len() -> usize {
    350
}

fn default_out_dir() -> String {
    "data/dnd".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_locale: "en".to_string(),
            target_locales: vec!["es".to_string()],
            out_dir: default_out_dir(),
            api_root: crate::api_client::DEFAULT_API_ROOT.to_string(),
            api_base: crate::api_client::DEFAULT_API_BASE.to_string(),
            translation: TranslationConfig::default(),
            skip_full_sync: false,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration before the run starts
    pub fn validate(&self) -> Result<()> {
        if self.out_dir.trim().is_empty() {
            return Err(anyhow!("Output directory cannot be empty"));
        }

        if isolang::Language::from_639_1(&self.source_locale).is_none() {
            return Err(anyhow!("Invalid source locale: {}", self.source_locale));
        }

        for locale in &self.target_locales {
            if isolang::Language::from_639_1(locale).is_none() {
                return Err(anyhow!("Invalid target locale: {}", locale));
            }
        }

        url::Url::parse(&self.api_root)
            .map_err(|e| anyhow!("Invalid catalog host root '{}': {}", self.api_root, e))?;
        url::Url::parse(&self.api_base)
            .map_err(|e| anyhow!("Invalid catalog API base '{}': {}", self.api_base, e))?;

        Ok(())
    }
}
