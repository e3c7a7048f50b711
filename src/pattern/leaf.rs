//! Leaf values shared by the pattern tree and the argv lexer.
//!
//! The same types play two roles: inside a [`PatternTree`](super::tree::PatternTree)
//! they describe what the usage message declares, and in an argv leaf pool
//! they carry what the user actually typed.

use std::fmt;

use serde::Serialize;

/// A bound value as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Str(String),
    List(Vec<String>),
}

impl Value {
    /// Whether the value counts as "given" (used for help/version detection).
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::List(v) => !v.is_empty(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item:?}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// An option, either as described in the doc or as it occurred in argv.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CliOption {
    pub short: Option<String>,
    pub long: Option<String>,
    /// Number of values the option consumes: 0 or 1.
    pub argcount: usize,
    pub value: Value,
}

impl CliOption {
    pub fn new(short: Option<&str>, long: Option<&str>, argcount: usize) -> Self {
        Self {
            short: short.map(str::to_string),
            long: long.map(str::to_string),
            argcount,
            value: Value::Bool(false),
        }
    }

    pub fn short(short: &str) -> Self {
        Self::new(Some(short), None, 0)
    }

    pub fn long(long: &str) -> Self {
        Self::new(None, Some(long), 0)
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }

    /// Long name if present, otherwise short name.
    pub fn name(&self) -> &str {
        self.long
            .as_deref()
            .or(self.short.as_deref())
            .unwrap_or_default()
    }

    /// Options are the same option when their `(short, long)` pair matches,
    /// regardless of value.
    pub fn same_identity(&self, other: &CliOption) -> bool {
        self.short == other.short && self.long == other.long
    }
}

/// A positional placeholder (`<file>`, `FILE`) or, unnamed, a positional argv token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Argument {
    pub name: Option<String>,
    pub value: Value,
}

impl Argument {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            value: Value::Null,
        }
    }

    pub fn positional(value: &str) -> Self {
        Self {
            name: None,
            value: Value::Str(value.to_string()),
        }
    }
}

/// A literal keyword such as `add` in `prog add <file>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    pub name: String,
    pub value: bool,
}

impl Command {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Leaf {
    Argument(Argument),
    Command(Command),
    Option(CliOption),
    /// `[options]` shorthand: stands for any option occurrence.
    AnyOptions,
}

impl Leaf {
    pub fn argument(name: &str) -> Self {
        Leaf::Argument(Argument::named(name))
    }

    /// An unnamed positional token as produced by the argv lexer.
    pub fn positional(value: &str) -> Self {
        Leaf::Argument(Argument::positional(value))
    }

    pub fn command(name: &str) -> Self {
        Leaf::Command(Command::new(name))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Leaf::Argument(a) => a.name.as_deref(),
            Leaf::Command(c) => Some(&c.name),
            Leaf::Option(o) => Some(o.name()),
            Leaf::AnyOptions => None,
        }
    }

    pub fn value(&self) -> Value {
        match self {
            Leaf::Argument(a) => a.value.clone(),
            Leaf::Command(c) => Value::Bool(c.value),
            Leaf::Option(o) => o.value.clone(),
            Leaf::AnyOptions => Value::Null,
        }
    }

    pub fn is_positional(&self) -> bool {
        matches!(self, Leaf::Argument(Argument { name: None, .. }))
    }
}

impl From<CliOption> for Leaf {
    fn from(option: CliOption) -> Self {
        Leaf::Option(option)
    }
}

fn display_name(name: Option<&str>) -> &str {
    name.unwrap_or("None")
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Argument(a) => {
                write!(f, "Argument({}, {})", display_name(a.name.as_deref()), a.value)
            }
            Leaf::Command(c) => write!(f, "Command({}, {})", c.name, c.value),
            Leaf::Option(o) => write!(
                f,
                "Option({}, {}, {}, {})",
                display_name(o.short.as_deref()),
                display_name(o.long.as_deref()),
                o.argcount,
                o.value
            ),
            Leaf::AnyOptions => write!(f, "AnyOptions()"),
        }
    }
}
