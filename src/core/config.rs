use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Settings {
    runtime: RuntimeSettings,
    editor: EditorSettings,
    telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub environment: Environment,
    pub strict_config: bool,
}

#[derive(Debug, Clone)]
pub struct EditorSettings {
    pub auto_save_interval_seconds: u64,
    pub draft_key_prefix: String,
    pub max_import_questions: usize,
}

#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    pub log_level: String,
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Staging,
    Test,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Test => "test",
        }
    }

    fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = parse_environment(
            env_optional("QUIZFORGE_ENV").or_else(|| env_optional("ENVIRONMENT")),
        );
        let strict_config = env_optional("QUIZFORGE_STRICT_CONFIG")
            .map(|value| parse_bool(&value))
            .unwrap_or(false)
            || environment.is_production();

        let auto_save_interval_seconds = parse_u64(
            "AUTO_SAVE_INTERVAL_SECONDS",
            env_or_default("AUTO_SAVE_INTERVAL_SECONDS", "10"),
        )?;
        let draft_key_prefix = env_or_default("DRAFT_KEY_PREFIX", "quiz_draft");
        let max_import_questions = parse_usize(
            "MAX_IMPORT_QUESTIONS",
            env_or_default("MAX_IMPORT_QUESTIONS", "200"),
        )?;

        let log_level = env_or_default("QUIZFORGE_LOG_LEVEL", "info");
        let json = env_optional("QUIZFORGE_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            runtime: RuntimeSettings { environment, strict_config },
            editor: EditorSettings {
                auto_save_interval_seconds,
                draft_key_prefix,
                max_import_questions,
            },
            telemetry: TelemetrySettings { log_level, json },
        };

        settings.validate()?;

        Ok(settings)
    }

    pub fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    pub fn editor(&self) -> &EditorSettings {
        &self.editor
    }

    pub fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub fn autosave_period(&self) -> Duration {
        Duration::from_secs(self.editor.auto_save_interval_seconds)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.editor.auto_save_interval_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "AUTO_SAVE_INTERVAL_SECONDS",
                value: String::from("0"),
            });
        }
        if self.editor.draft_key_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "DRAFT_KEY_PREFIX",
                value: String::from("<empty>"),
            });
        }
        if self.runtime.strict_config && self.editor.max_import_questions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "MAX_IMPORT_QUESTIONS",
                value: String::from("0"),
            });
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            runtime: RuntimeSettings {
                environment: Environment::Development,
                strict_config: false,
            },
            editor: EditorSettings {
                auto_save_interval_seconds: 10,
                draft_key_prefix: String::from("quiz_draft"),
                max_import_questions: 200,
            },
            telemetry: TelemetrySettings { log_level: String::from("info"), json: false },
        }
    }
}

fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

fn parse_u64(field: &'static str, value: String) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidValue { field, value })
}

fn parse_usize(field: &'static str, value: String) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidValue { field, value })
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES" | "on" | "ON")
}

fn parse_environment(value: Option<String>) -> Environment {
    match value.as_deref().map(|val| val.to_lowercase()) {
        Some(ref val) if val == "production" || val == "prod" => Environment::Production,
        Some(ref val) if val == "staging" => Environment::Staging,
        Some(ref val) if val == "test" || val == "testing" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_variants() {
        assert!(parse_bool("1"));
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("yes"));
        assert!(parse_bool("on"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
    }

    #[test]
    fn parse_environment_variants() {
        assert_eq!(parse_environment(Some("prod".to_string())), Environment::Production);
        assert_eq!(parse_environment(Some("production".to_string())), Environment::Production);
        assert_eq!(parse_environment(Some("staging".to_string())), Environment::Staging);
        assert_eq!(parse_environment(Some("testing".to_string())), Environment::Test);
        assert_eq!(parse_environment(None), Environment::Development);
    }

    #[test]
    fn default_settings_pass_validation() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.autosave_period(), Duration::from_secs(10));
    }

    #[test]
    fn zero_autosave_interval_is_rejected() {
        let mut settings = Settings::default();
        settings.editor.auto_save_interval_seconds = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { field: "AUTO_SAVE_INTERVAL_SECONDS", .. })
        ));
    }
}
