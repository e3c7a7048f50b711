use docopt_pattern::pattern::leaf::Value;
use docopt_pattern::{ArgvMap, DocoptError, docopt};

/// Parse a whitespace-separated command line against `doc`.
pub fn run(doc: &str, line: &str) -> Result<ArgvMap, DocoptError> {
    docopt(doc, line.split_whitespace())
}

pub fn s(value: &str) -> Value {
    Value::Str(value.to_string())
}

pub fn list(values: &[&str]) -> Value {
    Value::List(values.iter().map(|v| v.to_string()).collect())
}

/// Assert that `actual` holds exactly the `expected` bindings, in any order.
pub fn assert_bindings(actual: &ArgvMap, expected: &[(&str, Value)]) {
    for (key, value) in expected {
        assert_eq!(
            actual.get(key),
            Some(value),
            "binding for {key} in\n{actual}"
        );
    }
    assert_eq!(
        actual.len(),
        expected.len(),
        "unexpected extra bindings in\n{actual}"
    );
}
