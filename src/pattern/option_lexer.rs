//! Long-option and short-option-cluster lexing.
//!
//! Shared by the usage grammar parser and the argv lexer. Both consume the
//! option token at the front of a [`TokenStream`] (plus a following value
//! token when the option takes one) and resolve it against the option
//! registry.

use super::DocoptError;
use super::leaf::{CliOption, Value};
use super::token_stream::{LexMode, TokenStream};

/// Lex a `--long`, `--long=value` or unambiguous `--lo` prefix.
///
/// In grammar and lenient modes, a long option absent from `registry` is
/// added to it, taking a value iff one was written inline.
pub fn parse_long(
    tokens: &mut TokenStream,
    registry: &mut Vec<CliOption>,
) -> Result<Vec<CliOption>, DocoptError> {
    let Some(token) = tokens.next_token() else {
        return Ok(Vec::new());
    };
    let (raw, mut value) = match token.split_once('=') {
        Some((raw, value)) => (raw.to_string(), Some(value.to_string())),
        None => (token, None),
    };
    if value.as_deref() == Some("") {
        value = None;
    }

    let exact: Vec<&CliOption> = registry
        .iter()
        .filter(|o| o.long.as_deref() == Some(raw.as_str()))
        .collect();
    let candidates: Vec<&CliOption> = if exact.is_empty() {
        registry
            .iter()
            .filter(|o| o.long.as_deref().is_some_and(|l| l.starts_with(&raw)))
            .collect()
    } else {
        exact
    };

    if candidates.len() > 1 {
        return Err(tokens.error(format!(
            "{raw} is specified ambiguously {} times",
            candidates.len()
        )));
    }

    let Some(found) = candidates.first() else {
        if !tokens.registers_unknown() {
            return Err(tokens.error(format!("{raw} is not recognized")));
        }
        let argcount = usize::from(value.is_some());
        let registered = CliOption::new(None, Some(&raw), argcount);
        tracing::trace!(option = %raw, argcount, "registering undescribed long option");
        registry.push(registered.clone());
        return Ok(vec![match (tokens.mode(), value) {
            (LexMode::Lenient, Some(v)) => registered.with_value(Value::Str(v)),
            (LexMode::Lenient, None) => registered.with_value(Value::Bool(true)),
            _ => registered,
        }]);
    };

    let mut option = (*found).clone();
    if option.argcount == 1 {
        if value.is_none() {
            if tokens.is_empty() {
                return Err(tokens.error(format!("{} requires argument", option.name())));
            }
            value = tokens.next_token();
        }
    } else if value.is_some() {
        return Err(tokens.error(format!("{} must not have an argument", option.name())));
    }

    option.value = value.map(Value::Str).unwrap_or(Value::Bool(true));
    Ok(vec![option])
}

/// Lex a cluster of short options such as `-abc`, `-oFILE` or `-o FILE`.
///
/// The first option in the cluster that takes a value consumes the rest of
/// the cluster, or the next token when the cluster ends with it.
pub fn parse_shorts(
    tokens: &mut TokenStream,
    registry: &mut Vec<CliOption>,
) -> Result<Vec<CliOption>, DocoptError> {
    let Some(token) = tokens.next_token() else {
        return Ok(Vec::new());
    };
    let mut raw: String = token.chars().skip(1).collect();
    let mut parsed = Vec::new();

    while !raw.is_empty() {
        let ch = raw.remove(0);
        let short = format!("-{ch}");

        let candidates: Vec<&CliOption> = registry
            .iter()
            .filter(|o| o.short.as_deref() == Some(short.as_str()))
            .collect();

        if candidates.len() > 1 {
            return Err(tokens.error(format!(
                "{short} is specified ambiguously {} times",
                candidates.len()
            )));
        }

        let Some(found) = candidates.first() else {
            if !tokens.registers_unknown() {
                return Err(tokens.error(format!("{short} is not recognized")));
            }
            let registered = CliOption::short(&short);
            tracing::trace!(option = %short, "registering undescribed short option");
            registry.push(registered.clone());
            parsed.push(if tokens.mode() == LexMode::Lenient {
                registered.with_value(Value::Bool(true))
            } else {
                registered
            });
            continue;
        };

        let mut option = (*found).clone();
        option.value = if option.argcount == 0 {
            Value::Bool(true)
        } else {
            if raw.is_empty() {
                match tokens.next_token() {
                    Some(next) => raw = next,
                    None => return Err(tokens.error(format!("{short} requires argument"))),
                }
            }
            Value::Str(std::mem::take(&mut raw))
        };
        parsed.push(option);
    }

    Ok(parsed)
}
