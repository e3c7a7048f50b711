use serde::Deserialize;

use crate::pattern::token_stream::LexMode;

/// Parser behaviour that is not described by the doc itself.
///
/// Every field is optional; unset fields fall back to the defaults exposed
/// by the accessor methods.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Answer `-h`/`--help` with the doc. Defaults to `true`.
    pub help: Option<bool>,
    /// Answer `--version` with this string.
    pub version: Option<String>,
    pub unknown_options: Option<UnknownOptions>,
}

/// What the argv lexer does with options the doc never mentions.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnknownOptions {
    /// Fail with an invocation error.
    #[default]
    Reject,
    /// Register the option on the fly and keep lexing.
    Register,
}

impl UnknownOptions {
    pub fn lex_mode(self) -> LexMode {
        match self {
            UnknownOptions::Reject => LexMode::Strict,
            UnknownOptions::Register => LexMode::Lenient,
        }
    }
}

impl Config {
    pub fn help_enabled(&self) -> bool {
        self.help.unwrap_or(true)
    }

    pub fn version_string(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn unknown_options(&self) -> UnknownOptions {
        self.unknown_options.unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), crate::config::ConfigError> {
        let mut errors = Vec::new();

        if let Some(version) = &self.version {
            if version.trim().is_empty() {
                errors.push("version must not be empty".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(crate::config::ConfigError::Validation(errors))
        }
    }
}

/// Parse and validate a YAML configuration.
pub fn parse_config(yaml: &str) -> Result<Config, crate::config::ConfigError> {
    let config: Config = serde_saphyr::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}
