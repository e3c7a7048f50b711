//! Parsing of option description lines such as
//! `-o FILE, --output=FILE  Where to write [default: out.txt]`.

use std::sync::LazyLock;

use regex::Regex;

use super::leaf::{CliOption, Value};

static DEFAULT_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[default:\s+(.*)\]").expect("default-value regex is valid")
});

/// Parse one option description into an option descriptor.
///
/// The option names and the value placeholder come before the first double
/// space; the description after it. Malformed lines degrade to whatever
/// could be recognized rather than failing.
pub fn parse_option(line: &str) -> CliOption {
    let line = line.trim();
    let (spec, description) = line.split_once("  ").unwrap_or((line, ""));

    let mut short = None;
    let mut long = None;
    let mut argcount = 0;

    let spec = spec.replace([',', '='], " ");
    for token in spec.split_whitespace() {
        if token.starts_with("--") {
            long = Some(token.to_string());
        } else if token.starts_with('-') && token.len() > 1 {
            short = Some(token.to_string());
        } else {
            argcount = 1;
        }
    }

    let value = if argcount == 1 {
        DEFAULT_VALUE
            .captures(description)
            .and_then(|caps| caps.get(1))
            .map(|m| Value::Str(m.as_str().to_string()))
            .unwrap_or(Value::Bool(false))
    } else {
        Value::Bool(false)
    };

    CliOption {
        short,
        long,
        argcount,
        value,
    }
}

/// Collect option descriptors from every doc line that starts with `-`.
///
/// Lines that follow an option line without starting with `-` themselves
/// continue its description, so a `[default: ...]` may sit on a later line.
pub fn parse_doc_options(doc: &str) -> Vec<CliOption> {
    let mut blocks: Vec<String> = Vec::new();
    let mut in_option = false;

    for line in doc.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('-') {
            blocks.push(trimmed.to_string());
            in_option = true;
        } else if in_option {
            if let Some(block) = blocks.last_mut() {
                block.push('\n');
                block.push_str(line);
            }
        }
    }

    let options: Vec<CliOption> = blocks.iter().map(|b| parse_option(b)).collect();
    tracing::debug!(count = options.len(), "parsed option descriptions");
    options
}
