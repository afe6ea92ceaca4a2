use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::negotiation::NegotiationTuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub judge: JudgeConfig,
    #[serde(default = "NegotiationTuning::interrogation_defaults")]
    pub interrogation: NegotiationTuning,
    #[serde(default = "NegotiationTuning::haggling_defaults")]
    pub haggling: NegotiationTuning,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            judge: JudgeConfig::default(),
            interrogation: NegotiationTuning::interrogation_defaults(),
            haggling: NegotiationTuning::haggling_defaults(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeConfig {
    /// Providers in priority order; the built-in heuristic always
    /// terminates the chain.
    #[serde(default)]
    pub providers: Vec<JudgeProviderConfig>,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeProviderConfig {
    pub id: String,
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key. Keys never
    /// live in config text.
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default = "default_judge_temperature")]
    pub temperature: f32,
}

fn default_request_timeout_ms() -> u64 {
    3000
}

fn default_judge_temperature() -> f32 {
    0.3
}

fn default_logging_dir() -> PathBuf {
    PathBuf::from("./logs/parley")
}

fn default_logging_filter() -> String {
    "info".to_string()
}

fn default_logging_rotation() -> LoggingRotation {
    LoggingRotation::Daily
}

fn default_enabled_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LoggingRotation {
    Daily,
    Hourly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_logging_filter")]
    pub filter: String,
    #[serde(default = "default_logging_rotation")]
    pub rotation: LoggingRotation,
    #[serde(default = "default_enabled_true")]
    pub stderr_warn_enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_logging_dir(),
            filter: default_logging_filter(),
            rotation: default_logging_rotation(),
            stderr_warn_enabled: true,
        }
    }
}

impl Config {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file {}", config_path.display()))?;
        let config_value: Value = json5::from_str(&config_content)
            .with_context(|| format!("failed to parse config file {}", config_path.display()))?;
        validate_schema(&config_value)?;
        serde_json::from_value(config_value)
            .with_context(|| format!("failed to deserialize config {}", config_path.display()))
    }
}

fn validate_schema(config_value: &Value) -> Result<()> {
    let schema = json!({
        "type": "object",
        "properties": {
            "judge": {
                "type": "object",
                "properties": {
                    "providers": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["id", "endpoint", "model"],
                            "properties": {
                                "id": { "type": "string", "minLength": 1 },
                                "endpoint": { "type": "string", "minLength": 1 },
                                "model": { "type": "string", "minLength": 1 },
                                "api_key_env": { "type": ["string", "null"] },
                                "temperature": { "type": "number", "minimum": 0.0, "maximum": 2.0 }
                            }
                        }
                    },
                    "request_timeout_ms": { "type": "integer", "minimum": 1 }
                }
            },
            "interrogation": { "$ref": "#/definitions/tuning" },
            "haggling": { "$ref": "#/definitions/tuning" },
            "logging": {
                "type": "object",
                "properties": {
                    "dir": { "type": "string", "minLength": 1 },
                    "filter": { "type": "string", "minLength": 1 },
                    "rotation": { "enum": ["daily", "hourly"] },
                    "stderr_warn_enabled": { "type": "boolean" }
                }
            }
        },
        "definitions": {
            "tuning": {
                "type": "object",
                "properties": {
                    "success_threshold": { "type": "number", "minimum": 0.0, "maximum": 1.0 },
                    "failure_threshold": { "type": "number", "minimum": 0.0, "maximum": 1.0 },
                    "provisional_accept_threshold": { "type": "number", "minimum": 0.0, "maximum": 1.0 },
                    "contradiction_hard_cap": { "type": "integer", "minimum": 0 },
                    "turn_budget": { "type": "integer", "minimum": 1 },
                    "numeric_tolerance": { "type": "number", "minimum": 0.0 },
                    "max_response_chars": { "type": "integer", "minimum": 1 }
                }
            }
        }
    });

    let compiled =
        JSONSchema::compile(&schema).map_err(|e| anyhow!("failed to compile schema: {e}"))?;
    match compiled.validate(config_value) {
        Ok(()) => Ok(()),
        Err(errors_iter) => {
            let messages: Vec<String> = errors_iter.map(|error| error.to_string()).collect();
            Err(anyhow!("config validation failed: {}", messages.join("; ")))
        }
    }
}
