use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{Config, UnknownOptions};
use crate::pattern::DocoptError;
use crate::pattern::argv_lexer::parse_argv;
use crate::pattern::leaf::{CliOption, Leaf, Value};
use crate::pattern::option_parser::parse_doc_options;
use crate::pattern::pattern_parser::parse_pattern;
use crate::pattern::tree::PatternTree;
use crate::pattern::usage::{formal_usage, printable_usage};

/// A parser derived from a usage message.
///
/// Building one parses and fixes the usage pattern once; [`Docopt::parse`]
/// can then be called for any number of invocations.
#[derive(Debug, Clone)]
pub struct Docopt {
    doc: String,
    usage: String,
    options: Vec<CliOption>,
    pattern: PatternTree,
    config: Config,
}

impl Docopt {
    pub fn new(doc: &str) -> Result<Self, DocoptError> {
        Self::with_config(doc, Config::default())
    }

    /// Build a parser. Only grammar errors can occur here.
    pub fn with_config(doc: &str, config: Config) -> Result<Self, DocoptError> {
        let usage = printable_usage(doc)?;
        let mut options = parse_doc_options(doc);
        let pattern = parse_pattern(&formal_usage(&usage), &mut options)?.fix();
        tracing::debug!(pattern = %pattern, options = options.len(), "usage pattern ready");

        Ok(Self {
            doc: doc.to_string(),
            usage,
            options,
            pattern,
            config,
        })
    }

    pub fn help(mut self, enabled: bool) -> Self {
        self.config.help = Some(enabled);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = Some(version.into());
        self
    }

    pub fn unknown_options(mut self, policy: UnknownOptions) -> Self {
        self.config.unknown_options = Some(policy);
        self
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// The usage block, as carried by [`DocoptError::NoMatch`].
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Option registry: described options plus those only named in the usage.
    pub fn options(&self) -> &[CliOption] {
        &self.options
    }

    pub fn pattern(&self) -> &PatternTree {
        &self.pattern
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Match one invocation (without the program name).
    pub fn parse<I, S>(&self, argv: I) -> Result<ArgvMap, DocoptError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = self.options.clone();
        let argv = parse_argv(argv, &mut options, self.config.unknown_options().lex_mode())?;

        self.check_extras(&argv)?;

        let outcome = self.pattern.match_argv(&argv);
        tracing::debug!(
            matched = outcome.matched,
            left = outcome.left.len(),
            "matched argv against usage pattern"
        );
        if !outcome.is_complete() {
            return Err(DocoptError::NoMatch(self.usage.clone()));
        }

        let mut map = ArgvMap::default();
        for option in &options {
            map.insert(option.name(), option.value.clone());
        }
        for leaf in &argv {
            if let Leaf::Option(option) = leaf {
                map.insert(option.name(), option.value.clone());
            }
        }
        for leaf in self.pattern.flat() {
            if matches!(leaf, Leaf::Argument(_) | Leaf::Command(_)) {
                if let Some(name) = leaf.name() {
                    map.insert(name, leaf.value());
                }
            }
        }
        for leaf in &outcome.collected {
            if let Some(name) = leaf.name() {
                map.insert(name, leaf.value());
            }
        }
        Ok(map)
    }

    /// Help and version requests win over matching. Options are recognized
    /// by their canonical name, so a `-h` that abbreviates `--host` is not help.
    fn check_extras(&self, argv: &[Leaf]) -> Result<(), DocoptError> {
        let given = |predicate: fn(&CliOption) -> bool| {
            argv.iter().any(|leaf| {
                matches!(leaf, Leaf::Option(o) if predicate(o) && o.value.is_truthy())
            })
        };

        if self.config.help_enabled()
            && given(|o| matches!(o.name(), "-h" | "--help"))
        {
            tracing::debug!("help requested");
            return Err(DocoptError::Help(self.doc.clone()));
        }
        if let Some(version) = self.config.version_string() {
            if given(|o| o.name() == "--version") {
                tracing::debug!(version, "version requested");
                return Err(DocoptError::Version(version.to_string()));
            }
        }
        Ok(())
    }
}

/// Parse `argv` against `doc` with the default configuration.
pub fn docopt<I, S>(doc: &str, argv: I) -> Result<ArgvMap, DocoptError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Docopt::new(doc)?.parse(argv)
}

/// Name-to-value bindings of one successful match, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ArgvMap {
    map: IndexMap<String, Value>,
}

impl ArgvMap {
    /// Overwrites the value of an existing key in place.
    fn insert(&mut self, key: &str, value: Value) {
        self.map.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// `false` for keys that are missing or not boolean.
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Empty for keys that are missing or not lists.
    pub fn get_list(&self, key: &str) -> &[String] {
        self.get(key).and_then(Value::as_list).unwrap_or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for ArgvMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<(&str, &Value)> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        write!(f, "{{")?;
        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                write!(f, ",\n ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}
