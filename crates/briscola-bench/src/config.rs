use briscola_bot::BotDifficulty;
use briscola_core::game::mode::GameMode;
use briscola_core::model::modifiers::ModifierSet;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const AGENT_COUNT: usize = 2;
const IDENTIFIER_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root benchmark configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchmarkConfig {
    pub run_id: String,
    pub matches: MatchConfig,
    #[serde(default)]
    pub mode: GameMode,
    /// Replaces the mode's default rules when present.
    #[serde(default)]
    pub modifiers: Option<ModifierSet>,
    #[serde(default = "default_reveal_trump")]
    pub reveal_trump: bool,
    pub agents: Vec<AgentConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchmarkConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: BenchmarkConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        check_identifier("run_id", &self.run_id)?;
        self.matches.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        validate_agents(&self.agents)?;
        Ok(())
    }

    /// Rules every match of the run is played with.
    pub fn effective_modifiers(&self) -> ModifierSet {
        self.modifiers
            .unwrap_or_else(|| self.mode.default_modifiers())
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

fn default_reveal_trump() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MatchConfig {
    pub seed: Option<u64>,
    pub count: usize,
}

impl MatchConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.count {
            0 => Err(ValidationError::field("matches.count", "at least one match is required")),
            _ => Ok(()),
        }
    }
}

/// One of the two bots facing each other.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AgentConfig {
    pub name: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    /// When false the agent never activates elements, whatever its tier.
    #[serde(default = "default_activate_elements")]
    pub activate_elements: bool,
}

impl AgentConfig {
    pub fn parsed_difficulty(&self) -> Result<BotDifficulty, ValidationError> {
        self.difficulty
            .parse()
            .map_err(|message: String| {
                ValidationError::field(format!("agents[{}].difficulty", self.name), message)
            })
    }
}

fn default_difficulty() -> String {
    "medium".to_string()
}

fn default_activate_elements() -> bool {
    true
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        let templates = [("outputs.jsonl", &self.jsonl), ("outputs.summary_md", &self.summary_md)];
        templates.into_iter().try_for_each(|(field, template)| {
            if template.trim().is_empty() {
                Err(ValidationError::field(field, "no path given"))
            } else if resolve_template(run_id, template).file_name().is_none() {
                Err(ValidationError::field(field, "path does not name a file"))
            } else {
                Ok(())
            }
        })
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

/// Run ids and agent names end up in file paths and JSONL rows.
fn check_identifier(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::field(field, "must not be empty"))
    } else if let Some(bad) = value.chars().find(|c| !IDENTIFIER_CHARS.contains(*c)) {
        Err(ValidationError::field(
            field,
            format!("'{bad}' is not allowed; use letters, digits, '.', '_' or '-'"),
        ))
    } else {
        Ok(())
    }
}

fn validate_agents(agents: &[AgentConfig]) -> Result<(), ValidationError> {
    if agents.len() != AGENT_COUNT {
        return Err(ValidationError::field(
            "agents",
            format!("a match needs {AGENT_COUNT} agents, got {}", agents.len()),
        ));
    }

    let mut names = HashSet::new();
    for (index, agent) in agents.iter().enumerate() {
        check_identifier(&format!("agents[{index}].name"), &agent.name)?;
        if !names.insert(agent.name.as_str()) {
            return Err(ValidationError::field(
                "agents",
                format!("'{}' appears twice", agent.name),
            ));
        }
        agent.parsed_difficulty()?;
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

impl ValidationError {
    fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}
