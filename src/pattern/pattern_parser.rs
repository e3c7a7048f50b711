//! Recursive-descent parser for the usage grammar.
//!
//! ```text
//! expr ::= seq ( '|' seq )* ;
//! seq  ::= ( atom [ '...' ] )* ;
//! atom ::= '(' expr ')' | '[' expr ']' | '[' 'options' ']'
//!        | '--' | LONG | SHORTS | ARGUMENT | COMMAND ;
//! ```

use super::DocoptError;
use super::leaf::{CliOption, Leaf};
use super::option_lexer::{parse_long, parse_shorts};
use super::token_stream::TokenStream;
use super::tree::{Pattern, PatternTree};

/// Parse a formal usage pattern (program names already replaced by `|`).
///
/// Options written in the pattern but missing from `registry` are added to
/// it. The result is wrapped in a top-level `Required` and is not yet fixed.
pub fn parse_pattern(
    source: &str,
    registry: &mut Vec<CliOption>,
) -> Result<PatternTree, DocoptError> {
    let mut parser = PatternParser {
        tokens: TokenStream::from_pattern(source),
        registry,
        tree: PatternTree::new(),
    };

    let result = parser.parse_expr()?;
    if !parser.tokens.is_empty() {
        let rest = parser.tokens.remaining().join(" ");
        return Err(parser.tokens.error(format!("unexpected ending: {rest}")));
    }

    let mut tree = parser.tree;
    tree.set_root(Pattern::Required(result));
    Ok(tree)
}

struct PatternParser<'a> {
    tokens: TokenStream,
    registry: &'a mut Vec<CliOption>,
    tree: PatternTree,
}

impl PatternParser<'_> {
    fn parse_expr(&mut self) -> Result<Vec<Pattern>, DocoptError> {
        let seq = self.parse_seq()?;
        if !self.tokens.peek_is("|") {
            return Ok(seq);
        }

        let mut alternatives = vec![group(seq)];
        while self.tokens.peek_is("|") {
            self.tokens.next_token();
            let seq = self.parse_seq()?;
            alternatives.push(group(seq));
        }
        let alternatives: Vec<Pattern> = alternatives.into_iter().flatten().collect();

        if alternatives.len() > 1 {
            Ok(vec![Pattern::Either(alternatives)])
        } else {
            Ok(alternatives)
        }
    }

    fn parse_seq(&mut self) -> Result<Vec<Pattern>, DocoptError> {
        let mut result = Vec::new();
        while let Some(token) = self.tokens.current() {
            if matches!(token, "]" | ")" | "|") {
                break;
            }
            let mut atom = self.parse_atom()?;
            if self.tokens.peek_is("...") {
                self.tokens.next_token();
                let repeated = if atom.len() == 1 {
                    atom.remove(0)
                } else {
                    Pattern::Required(atom)
                };
                atom = vec![Pattern::one_or_more(repeated)];
            }
            result.extend(atom);
        }
        Ok(result)
    }

    fn parse_atom(&mut self) -> Result<Vec<Pattern>, DocoptError> {
        let Some(token) = self.tokens.current().map(str::to_string) else {
            return Ok(Vec::new());
        };

        match token.as_str() {
            "(" => {
                self.tokens.next_token();
                let inner = self.parse_expr()?;
                if self.tokens.next_token().as_deref() != Some(")") {
                    return Err(self.tokens.error("Unmatched '('"));
                }
                Ok(vec![Pattern::Required(inner)])
            }
            "[" => {
                self.tokens.next_token();
                let inner = if self.tokens.peek_is("options") {
                    self.tokens.next_token();
                    vec![self.tree.add_leaf(Leaf::AnyOptions)]
                } else {
                    self.parse_expr()?
                };
                if self.tokens.next_token().as_deref() != Some("]") {
                    return Err(self.tokens.error("Unmatched '['"));
                }
                Ok(vec![Pattern::Optional(inner)])
            }
            "--" => {
                self.tokens.next_token();
                Ok(vec![self.tree.add_leaf(Leaf::command("--"))])
            }
            t if t.starts_with("--") => {
                let options = parse_long(&mut self.tokens, self.registry)?;
                Ok(self.add_options(options))
            }
            t if t.starts_with('-') && t != "-" => {
                let options = parse_shorts(&mut self.tokens, self.registry)?;
                Ok(self.add_options(options))
            }
            t if is_argument_name(t) => {
                self.tokens.next_token();
                Ok(vec![self.tree.add_leaf(Leaf::argument(t))])
            }
            t => {
                self.tokens.next_token();
                Ok(vec![self.tree.add_leaf(Leaf::command(t))])
            }
        }
    }

    fn add_options(&mut self, options: Vec<CliOption>) -> Vec<Pattern> {
        options
            .into_iter()
            .map(|option| self.tree.add_leaf(option))
            .collect()
    }
}

/// One alternative of an `expr`: several elements are grouped in `Required`.
fn group(seq: Vec<Pattern>) -> Vec<Pattern> {
    if seq.len() > 1 {
        vec![Pattern::Required(seq)]
    } else {
        seq
    }
}

/// `<name>`, or a word with an upper-case letter and no lower-case letters.
fn is_argument_name(token: &str) -> bool {
    (token.starts_with('<') && token.ends_with('>'))
        || (token.chars().any(|c| c.is_ascii_uppercase())
            && !token.chars().any(|c| c.is_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn registry() -> Vec<CliOption> {
        vec![
            CliOption::short("-h"),
            CliOption::new(Some("-v"), Some("--verbose"), 0),
            CliOption::new(Some("-f"), Some("--file"), 1),
        ]
    }

    fn render(source: &str, registry: &mut Vec<CliOption>) -> String {
        parse_pattern(source, registry).unwrap().to_string()
    }

    #[rstest]
    #[case("[ -h ]", "Required(Optional(Option(-h, None, 0, true)))")]
    #[case("[ ARG ... ]", "Required(Optional(OneOrMore(Argument(ARG, null))))")]
    #[case(
        "[ -h | -v ]",
        "Required(Optional(Either(Option(-h, None, 0, true), Option(-v, --verbose, 0, true))))"
    )]
    #[case(
        "( -h | -v [ --file f.txt ] )",
        "Required(Required(Either(Option(-h, None, 0, true), \
         Required(Option(-v, --verbose, 0, true), \
         Optional(Option(-f, --file, 1, \"f.txt\"))))))"
    )]
    #[case(
        "(-h|-v[--file=f.txt]N...)",
        "Required(Required(Either(Option(-h, None, 0, true), \
         Required(Option(-v, --verbose, 0, true), \
         Optional(Option(-f, --file, 1, \"f.txt\")), \
         OneOrMore(Argument(N, null))))))"
    )]
    #[case(
        "[ -h ] [N]",
        "Required(Optional(Option(-h, None, 0, true)), Optional(Argument(N, null)))"
    )]
    #[case("[options]", "Required(Optional(AnyOptions()))")]
    #[case("[options] A", "Required(Optional(AnyOptions()), Argument(A, null))")]
    #[case(
        "-v [options]",
        "Required(Option(-v, --verbose, 0, true), Optional(AnyOptions()))"
    )]
    #[case("ADD", "Required(Argument(ADD, null))")]
    #[case("<add>", "Required(Argument(<add>, null))")]
    #[case("add", "Required(Command(add, false))")]
    #[case("[--]", "Required(Optional(Command(--, false)))")]
    #[case("[-]", "Required(Optional(Command(-, false)))")]
    #[case("", "Required()")]
    fn parse_pattern_shapes(
        #[case] source: &str,
        #[case] expected: &str,
        mut registry: Vec<CliOption>,
    ) {
        assert_eq!(render(source, &mut registry), expected);
    }

    #[test]
    fn parse_nested_alternatives_without_options() {
        assert_eq!(
            render("(N [M | (K | L)] | O P)", &mut Vec::new()),
            "Required(Required(Either(\
             Required(Argument(N, null), Optional(Either(Argument(M, null), \
             Required(Either(Argument(K, null), Argument(L, null)))))), \
             Required(Argument(O, null), Argument(P, null)))))"
        );
    }

    #[test]
    fn parse_repeated_short_cluster_repeats_together() {
        assert_eq!(
            render("-hv...", &mut registry()),
            "Required(OneOrMore(Required(Option(-h, None, 0, true), \
             Option(-v, --verbose, 0, true))))"
        );
    }

    #[rstest]
    #[case("FILE", true)]
    #[case("<file>", true)]
    #[case("N-1", true)]
    #[case("File", false)]
    #[case("file", false)]
    #[case("-", false)]
    #[case("123", false)]
    fn argument_name_classification(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_argument_name(token), expected);
    }

    #[test]
    fn undescribed_options_are_registered() {
        let mut registry = Vec::new();
        let rendered = render("[-o] [--hello=<world>]", &mut registry);
        assert_eq!(
            rendered,
            "Required(Optional(Option(-o, None, 0, false)), \
             Optional(Option(None, --hello, 1, false)))"
        );
        assert_eq!(
            registry,
            vec![
                CliOption::short("-o"),
                CliOption::new(None, Some("--hello"), 1),
            ]
        );
    }

    #[rstest]
    #[case::unmatched_bracket("[a [b]", "Unmatched '['")]
    #[case::unmatched_paren("(a b", "Unmatched '('")]
    #[case::stray_paren("[a [b] ] c )", "unexpected ending: )")]
    #[case::stray_bracket("a ]", "unexpected ending: ]")]
    #[case::options_not_closed("[options -v]", "Unmatched '['")]
    fn malformed_patterns_are_grammar_errors(#[case] source: &str, #[case] message: &str) {
        let result = parse_pattern(source, &mut Vec::new());
        assert_eq!(result, Err(DocoptError::Grammar(message.to_string())));
    }

    #[test]
    fn ambiguous_long_in_pattern_is_grammar_error() {
        let mut registry = vec![CliOption::long("--version"), CliOption::long("--verbose")];
        let result = parse_pattern("--ver", &mut registry);
        assert!(matches!(result, Err(DocoptError::Grammar(_))));
    }

    #[test]
    fn option_taking_value_consumes_placeholder() {
        let mut registry = vec![CliOption::new(Some("-o"), None, 1)];
        assert_eq!(
            render("-o FILE ARG", &mut registry),
            "Required(Option(-o, None, 1, \"FILE\"), Argument(ARG, null))"
        );
    }
}
