//! Locating the usage section of a doc and turning it into a formal pattern.

use std::sync::LazyLock;

use regex::Regex;

use super::DocoptError;

static USAGE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)usage:").expect("usage regex is valid"));

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("blank-line regex is valid"));

/// Extract the usage section: from the (case-insensitive) `usage:` header
/// up to the first blank line, trimmed.
///
/// The doc must contain the header exactly once.
pub fn printable_usage(doc: &str) -> Result<String, DocoptError> {
    let headers: Vec<_> = USAGE_HEADER.find_iter(doc).collect();
    let header = match headers.as_slice() {
        [] => return Err(DocoptError::Grammar(r#""usage:" (case-insensitive) not found."#.into())),
        [header] => header,
        _ => {
            return Err(DocoptError::Grammar(
                r#"More than one "usage:" (case-insensitive)."#.into(),
            ));
        }
    };

    let section = &doc[header.start()..];
    let section = match BLANK_LINE.find(section) {
        Some(blank) => &section[..blank.start()],
        None => section,
    };
    Ok(section.trim().to_string())
}

/// Rewrite a printable usage into the pattern grammar: the header and
/// program name are dropped and every later occurrence of the program name
/// becomes an alternative separator.
///
/// ```
/// use docopt_pattern::pattern::usage::formal_usage;
///
/// assert_eq!(formal_usage("Usage: prog [-hv] ARG\n       prog N M"), "[-hv] ARG | N M");
/// ```
pub fn formal_usage(printable: &str) -> String {
    let mut words = printable.split_whitespace().skip(1);
    let Some(program) = words.next() else {
        return String::new();
    };
    words
        .map(|word| if word == program { "|" } else { word })
        .collect::<Vec<_>>()
        .join(" ")
}
