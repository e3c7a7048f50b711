//! Backtracking matcher unifying argv leaves with a fixed [`PatternTree`].
//!
//! Every function here is pure: it borrows the leaf pool (`left`) and the
//! bindings gathered so far (`collected`) and returns fresh vectors, so an
//! `Either` can try each alternative from the same untouched state.

use super::leaf::{Argument, Command, Leaf, Value};
use super::tree::{Pattern, PatternTree};

/// Result of matching one node.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub matched: bool,
    /// Argv leaves not consumed.
    pub left: Vec<Leaf>,
    /// Bindings produced along the matched path.
    pub collected: Vec<Leaf>,
}

impl MatchOutcome {
    fn success(left: Vec<Leaf>, collected: Vec<Leaf>) -> Self {
        Self {
            matched: true,
            left,
            collected,
        }
    }

    fn failure(left: &[Leaf], collected: &[Leaf]) -> Self {
        Self {
            matched: false,
            left: left.to_vec(),
            collected: collected.to_vec(),
        }
    }

    /// Matched and consumed every argv leaf.
    pub fn is_complete(&self) -> bool {
        self.matched && self.left.is_empty()
    }
}

impl PatternTree {
    /// Match argv leaves against the whole tree.
    pub fn match_argv(&self, argv: &[Leaf]) -> MatchOutcome {
        match_pattern(self, &self.root, argv, &[])
    }
}

/// Match `node` of `tree` against `left`, extending `collected`.
pub fn match_pattern(
    tree: &PatternTree,
    node: &Pattern,
    left: &[Leaf],
    collected: &[Leaf],
) -> MatchOutcome {
    match node {
        Pattern::Leaf(id) => match_leaf(tree.leaf(*id), left, collected),

        Pattern::Required(children) => {
            let mut l = left.to_vec();
            let mut c = collected.to_vec();
            for child in children {
                let outcome = match_pattern(tree, child, &l, &c);
                if !outcome.matched {
                    return MatchOutcome::failure(left, collected);
                }
                l = outcome.left;
                c = outcome.collected;
            }
            MatchOutcome::success(l, c)
        }

        Pattern::Optional(children) => {
            let mut l = left.to_vec();
            let mut c = collected.to_vec();
            for child in children {
                let outcome = match_pattern(tree, child, &l, &c);
                if outcome.matched {
                    l = outcome.left;
                    c = outcome.collected;
                }
            }
            MatchOutcome::success(l, c)
        }

        Pattern::OneOrMore(child) => {
            let mut l = left.to_vec();
            let mut c = collected.to_vec();
            let mut times = 0;
            let mut previous: Option<Vec<Leaf>> = None;
            loop {
                let outcome = match_pattern(tree, child, &l, &c);
                if !outcome.matched {
                    break;
                }
                times += 1;
                l = outcome.left;
                c = outcome.collected;
                // Always-succeeding children (e.g. an Optional) stop once they
                // no longer consume anything.
                if previous.as_ref() == Some(&l) {
                    break;
                }
                previous = Some(l.clone());
            }
            if times >= 1 {
                MatchOutcome::success(l, c)
            } else {
                MatchOutcome::failure(left, collected)
            }
        }

        Pattern::Either(children) => children
            .iter()
            .map(|child| match_pattern(tree, child, left, collected))
            .filter(|outcome| outcome.matched)
            // min_by_key keeps the last of equal keys, so fold to keep the first.
            .fold(None, |best: Option<MatchOutcome>, outcome| match best {
                Some(b) if b.left.len() <= outcome.left.len() => Some(b),
                _ => Some(outcome),
            })
            .unwrap_or_else(|| MatchOutcome::failure(left, collected)),
    }
}

fn match_leaf(leaf: &Leaf, left: &[Leaf], collected: &[Leaf]) -> MatchOutcome {
    match leaf {
        Leaf::Argument(argument) => match_argument(argument, left, collected),
        Leaf::Command(command) => match_command(command, left, collected),

        Leaf::Option(option) => {
            let remaining: Vec<Leaf> = left
                .iter()
                .filter(|l| !matches!(l, Leaf::Option(o) if o.same_identity(option)))
                .cloned()
                .collect();
            MatchOutcome {
                matched: remaining.len() != left.len(),
                left: remaining,
                collected: collected.to_vec(),
            }
        }

        Leaf::AnyOptions => {
            let remaining: Vec<Leaf> = left
                .iter()
                .filter(|l| !matches!(l, Leaf::Option(_)))
                .cloned()
                .collect();
            MatchOutcome {
                matched: remaining.len() != left.len(),
                left: remaining,
                collected: collected.to_vec(),
            }
        }
    }
}

/// Bind the first positional token. List arguments append to an existing
/// binding of the same name in `collected`.
fn match_argument(argument: &Argument, left: &[Leaf], collected: &[Leaf]) -> MatchOutcome {
    let Some(position) = left.iter().position(Leaf::is_positional) else {
        return MatchOutcome::failure(left, collected);
    };
    let mut remaining = left.to_vec();
    let Leaf::Argument(taken) = remaining.remove(position) else {
        return MatchOutcome::failure(left, collected);
    };
    let raw = match taken.value {
        Value::Str(s) => s,
        other => other.to_string(),
    };

    let mut bindings = collected.to_vec();
    if !argument.value.is_list() {
        bindings.push(Leaf::Argument(Argument {
            name: argument.name.clone(),
            value: Value::Str(raw),
        }));
        return MatchOutcome::success(remaining, bindings);
    }

    let existing = bindings.iter_mut().find_map(|binding| match binding {
        Leaf::Argument(Argument {
            name,
            value: Value::List(values),
        }) if *name == argument.name => Some(values),
        _ => None,
    });
    match existing {
        Some(values) => values.push(raw),
        None => bindings.push(Leaf::Argument(Argument {
            name: argument.name.clone(),
            value: Value::List(vec![raw]),
        })),
    }
    MatchOutcome::success(remaining, bindings)
}

/// Commands are positional: only the first positional token may match.
fn match_command(command: &Command, left: &[Leaf], collected: &[Leaf]) -> MatchOutcome {
    let Some(position) = left.iter().position(Leaf::is_positional) else {
        return MatchOutcome::failure(left, collected);
    };
    let is_same = matches!(
        &left[position],
        Leaf::Argument(Argument { value: Value::Str(s), .. }) if *s == command.name
    );
    if !is_same {
        return MatchOutcome::failure(left, collected);
    }

    let mut remaining = left.to_vec();
    remaining.remove(position);
    let mut bindings = collected.to_vec();
    bindings.push(Leaf::Command(Command {
        name: command.name.clone(),
        value: true,
    }));
    MatchOutcome::success(remaining, bindings)
}
