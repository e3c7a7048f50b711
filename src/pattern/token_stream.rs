//! Token cursor shared by the usage-grammar parser and the argv lexer.

use std::collections::VecDeque;

use super::DocoptError;

/// How a [`TokenStream`] reports failures and treats unknown options.
///
/// The usage grammar and real argv share the option lexers; what differs is
/// whether a problem is the program author's fault (a malformed doc) or the
/// user's (a bad invocation), and whether options missing from the registry
/// are tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexMode {
    /// Lexing the usage pattern: errors are grammar errors and options not
    /// described in the doc are registered on first use.
    Grammar,
    /// Lexing argv: unknown options are invocation errors.
    Strict,
    /// Lexing argv: unknown options are registered instead of rejected.
    Lenient,
}

/// A queue of whitespace-separated tokens with a cursor at the front.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: VecDeque<String>,
    mode: LexMode,
}

impl TokenStream {
    /// Tokenize a formal usage pattern.
    ///
    /// `(`, `)`, `[`, `]`, `|` and `...` always form tokens of their own,
    /// even when written without surrounding spaces.
    pub fn from_pattern(source: &str) -> Self {
        Self {
            tokens: tokenize_pattern(source).into(),
            mode: LexMode::Grammar,
        }
    }

    /// Wrap invocation arguments verbatim; argv strings are never re-split.
    pub fn from_argv<I, S>(argv: I, mode: LexMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: argv.into_iter().map(Into::into).collect(),
            mode,
        }
    }

    pub fn mode(&self) -> LexMode {
        self.mode
    }

    pub fn current(&self) -> Option<&str> {
        self.tokens.front().map(String::as_str)
    }

    pub fn peek_is(&self, token: &str) -> bool {
        self.current() == Some(token)
    }

    pub fn next_token(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Drain everything that has not been consumed yet.
    pub fn remaining(&mut self) -> Vec<String> {
        self.tokens.drain(..).collect()
    }

    /// Build the error kind that fits this stream's mode.
    pub fn error(&self, message: impl Into<String>) -> DocoptError {
        match self.mode {
            LexMode::Grammar => DocoptError::Grammar(message.into()),
            LexMode::Strict | LexMode::Lenient => DocoptError::Invocation(message.into()),
        }
    }

    /// Whether options missing from the registry are added instead of rejected.
    pub fn registers_unknown(&self) -> bool {
        self.mode != LexMode::Strict
    }
}

fn tokenize_pattern(source: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            '(' | ')' | '[' | ']' | '|' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(ch.to_string());
            }
            '.' if starts_ellipsis(&mut chars) => {
                chars.next();
                chars.next();
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push("...".to_string());
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Whether the two characters after an already-consumed `.` are also dots.
fn starts_ellipsis(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> bool {
    let mut ahead = chars.clone();
    ahead.next() == Some('.') && ahead.next() == Some('.')
}
