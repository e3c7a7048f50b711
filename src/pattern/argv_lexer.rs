//! Turns invocation arguments into the leaf pool the matcher consumes.

use super::DocoptError;
use super::leaf::{CliOption, Leaf};
use super::option_lexer::{parse_long, parse_shorts};
use super::token_stream::{LexMode, TokenStream};

/// Lex `argv` into option occurrences and positional tokens.
///
/// Everything from the first `--` on, the `--` included, is positional.
/// A lone `-` is positional too.
pub fn parse_argv<I, S>(
    argv: I,
    registry: &mut Vec<CliOption>,
    mode: LexMode,
) -> Result<Vec<Leaf>, DocoptError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut tokens = TokenStream::from_argv(argv, mode);
    let mut parsed = Vec::new();

    while let Some(token) = tokens.current() {
        if token == "--" {
            parsed.extend(tokens.remaining().iter().map(|t| Leaf::positional(t)));
            break;
        }

        if token.starts_with("--") {
            parsed.extend(parse_long(&mut tokens, registry)?.into_iter().map(Leaf::from));
        } else if token.starts_with('-') && token != "-" {
            parsed.extend(parse_shorts(&mut tokens, registry)?.into_iter().map(Leaf::from));
        } else {
            let leaf = Leaf::positional(token);
            tokens.next_token();
            parsed.push(leaf);
        }
    }

    tracing::trace!(
        leaves = %parsed.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
        "lexed argv"
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::leaf::Value;
    use rstest::{fixture, rstest};

    #[fixture]
    fn registry() -> Vec<CliOption> {
        vec![
            CliOption::short("-h"),
            CliOption::new(Some("-v"), Some("--verbose"), 0),
            CliOption::new(Some("-f"), Some("--file"), 1),
        ]
    }

    fn on(option: CliOption) -> Leaf {
        Leaf::Option(option.with_value(Value::Bool(true)))
    }

    fn file(value: &str) -> Leaf {
        Leaf::Option(CliOption::new(Some("-f"), Some("--file"), 1).with_value(Value::Str(value.into())))
    }

    fn verbose() -> Leaf {
        on(CliOption::new(Some("-v"), Some("--verbose"), 0))
    }

    #[rstest]
    #[case::empty(&[], vec![])]
    #[case::short(&["-h"], vec![on(CliOption::short("-h"))])]
    #[case::cluster(&["-hv"], vec![on(CliOption::short("-h")), verbose()])]
    #[case::short_with_value(&["-h", "-ffile.txt"], vec![on(CliOption::short("-h")), file("file.txt")])]
    #[case::short_separate_value(
        &["-h", "-f", "file.txt"],
        vec![on(CliOption::short("-h")), file("file.txt")]
    )]
    #[case::long_with_value(&["-h", "--file", "f.txt"], vec![on(CliOption::short("-h")), file("f.txt")])]
    #[case::positional(
        &["-h", "arg"],
        vec![on(CliOption::short("-h")), Leaf::positional("arg")]
    )]
    #[case::double_dash(
        &["-h", "--", "-v"],
        vec![on(CliOption::short("-h")), Leaf::positional("--"), Leaf::positional("-v")]
    )]
    #[case::double_dash_protects_values(
        &["--", "--file", "x"],
        vec![Leaf::positional("--"), Leaf::positional("--file"), Leaf::positional("x")]
    )]
    #[case::single_dash(&["-"], vec![Leaf::positional("-")])]
    #[case::value_starting_with_dash(&["-f", "-v"], vec![file("-v")])]
    fn lex_argv(
        #[case] argv: &[&str],
        #[case] expected: Vec<Leaf>,
        mut registry: Vec<CliOption>,
    ) {
        let leaves = parse_argv(argv.iter().copied(), &mut registry, LexMode::Strict).unwrap();
        assert_eq!(leaves, expected);
    }

    #[test]
    fn long_prefix_resolves_to_full_option() {
        let leaves = parse_argv(["--verb"], &mut registry(), LexMode::Strict).unwrap();
        assert_eq!(leaves, vec![verbose()]);
    }

    #[rstest]
    #[case::unknown_short(&["-x"], "-x is not recognized")]
    #[case::unknown_long(&["--xyz"], "--xyz is not recognized")]
    #[case::missing_value(&["--file"], "--file requires argument")]
    #[case::flag_with_value(&["--verbose=yes"], "--verbose must not have an argument")]
    fn strict_argv_errors(
        #[case] argv: &[&str],
        #[case] message: &str,
        mut registry: Vec<CliOption>,
    ) {
        let result = parse_argv(argv.iter().copied(), &mut registry, LexMode::Strict);
        assert_eq!(result, Err(DocoptError::Invocation(message.to_string())));
    }

    #[test]
    fn lenient_argv_registers_unknown_options() {
        let mut registry = registry();
        let leaves = parse_argv(["-x", "--color=auto"], &mut registry, LexMode::Lenient).unwrap();

        assert_eq!(
            leaves,
            vec![
                on(CliOption::short("-x")),
                Leaf::Option(
                    CliOption::new(None, Some("--color"), 1).with_value(Value::Str("auto".into()))
                ),
            ]
        );
        assert!(registry.contains(&CliOption::short("-x")));
        assert!(registry.contains(&CliOption::new(None, Some("--color"), 1)));
    }
}
