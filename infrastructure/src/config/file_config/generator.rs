//! Question generator configuration from TOML (`[generator]` section)

use serde::{Deserialize, Serialize};
use trivia_domain::{ConfigIssue, ConfigIssueCode, Severity};

/// Where question batches come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeneratorProvider {
    /// OpenAI-compatible chat completions API
    #[default]
    OpenAi,
    /// Local JSON question bank
    File,
}

impl GeneratorProvider {
    pub const VALID_VALUES: [&'static str; 2] = ["openai", "file"];
}

impl std::str::FromStr for GeneratorProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(GeneratorProvider::OpenAi),
            "file" => Ok(GeneratorProvider::File),
            other => Err(format!("unknown generator provider '{}'", other)),
        }
    }
}

/// OpenAI API settings (`[generator.openai]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key. Prefer the env var.
    pub api_key: Option<String>,
    /// Base URL for the API (can point at any compatible server).
    pub base_url: String,
    /// Chat model used to write questions.
    pub model: String,
    /// Max tokens per response.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 2048,
            temperature: 0.7,
            timeout_secs: 60,
        }
    }
}

impl FileOpenAiConfig {
    /// Resolve the API key: explicit value first, then the env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Raw generator configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeneratorConfig {
    /// "openai" or "file"
    pub provider: String,
    /// Question bank for the "file" provider
    pub questions_file: Option<String>,
    pub openai: FileOpenAiConfig,
}

impl Default for FileGeneratorConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            questions_file: None,
            openai: FileOpenAiConfig::default(),
        }
    }
}

impl FileGeneratorConfig {
    /// Parse the provider, falling back to OpenAI with a warning.
    pub fn parse_provider(&self) -> (GeneratorProvider, Vec<ConfigIssue>) {
        match self.provider.parse() {
            Ok(provider) => (provider, vec![]),
            Err(message) => (
                GeneratorProvider::default(),
                vec![ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "generator.provider".to_string(),
                        value: self.provider.clone(),
                        valid_values: GeneratorProvider::VALID_VALUES
                            .iter()
                            .map(|v| v.to_string())
                            .collect(),
                    },
                    message: format!("generator.provider: {}, falling back to 'openai'", message),
                }],
            ),
        }
    }

    /// Issues that make the configured provider unusable.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (provider, mut issues) = self.parse_provider();

        if provider == GeneratorProvider::File
            && self
                .questions_file
                .as_deref()
                .is_none_or(|p| p.trim().is_empty())
        {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::MissingValue {
                    field: "generator.questions_file".to_string(),
                },
                message: "generator.provider is 'file' but generator.questions_file is not set"
                    .to_string(),
            });
        }

        if provider == GeneratorProvider::OpenAi && self.openai.timeout_secs == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::OutOfRange {
                    field: "generator.openai.timeout_secs".to_string(),
                    value: 0,
                },
                message: "generator.openai.timeout_secs: 0 disables the request timeout"
                    .to_string(),
            });
        }

        issues
    }
}
