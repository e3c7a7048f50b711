//! Pattern tree built from the usage message.
//!
//! Leaves live in an arena owned by [`PatternTree`]; combinators refer to
//! them by [`LeafId`]. After fixing, every occurrence of the same variable
//! in the grammar points at one arena slot.

use std::fmt;

use super::leaf::Leaf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeafId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Leaf(LeafId),
    /// All children, in order.
    Required(Vec<Pattern>),
    /// Children that match are kept; the group itself never fails.
    Optional(Vec<Pattern>),
    /// Exactly one child; the one leaving the fewest tokens wins.
    Either(Vec<Pattern>),
    /// The child at least once.
    OneOrMore(Box<Pattern>),
}

impl Pattern {
    pub fn one_or_more(child: Pattern) -> Self {
        Pattern::OneOrMore(Box::new(child))
    }

    /// Leaf ids in depth-first order, repeats included.
    pub fn flat(&self) -> Vec<LeafId> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<LeafId>) {
        match self {
            Pattern::Leaf(id) => out.push(*id),
            Pattern::Required(children) | Pattern::Optional(children) | Pattern::Either(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
            Pattern::OneOrMore(child) => child.collect_leaves(out),
        }
    }

    /// Expand into disjunctive normal form: an `Either` of `Required` groups
    /// holding only leaves.
    ///
    /// Groups are expanded one grouping node at a time, picking `Either`
    /// before `Required` before `Optional` before `OneOrMore`. `Optional`
    /// children are treated as present and `OneOrMore` contributes its child
    /// twice, so repeated variables show up as duplicates within a group.
    pub fn either(&self) -> Pattern {
        if let Pattern::Leaf(_) = self {
            return Pattern::Either(vec![Pattern::Required(vec![self.clone()])]);
        }

        let mut done: Vec<Pattern> = Vec::new();
        let mut groups: std::collections::VecDeque<Vec<Pattern>> =
            std::collections::VecDeque::from([vec![self.clone()]]);

        while let Some(mut children) = groups.pop_front() {
            let Some(index) = pick_expandable(&children) else {
                done.push(Pattern::Required(children));
                continue;
            };

            match children.remove(index) {
                Pattern::Either(alternatives) => {
                    for alternative in alternatives {
                        let mut group = vec![alternative];
                        group.extend(children.iter().cloned());
                        groups.push_back(group);
                    }
                }
                Pattern::Required(inner) | Pattern::Optional(inner) => {
                    let mut group = inner;
                    group.extend(children);
                    groups.push_back(group);
                }
                Pattern::OneOrMore(child) => {
                    let mut group = vec![(*child).clone(), *child];
                    group.extend(children);
                    groups.push_back(group);
                }
                Pattern::Leaf(_) => unreachable!("pick_expandable never selects a leaf"),
            }
        }

        Pattern::Either(done)
    }
}

/// Index of the first grouping node of the highest-priority kind.
fn pick_expandable(children: &[Pattern]) -> Option<usize> {
    let position = |pred: fn(&Pattern) -> bool| children.iter().position(pred);
    position(|p| matches!(p, Pattern::Either(_)))
        .or_else(|| position(|p| matches!(p, Pattern::Required(_))))
        .or_else(|| position(|p| matches!(p, Pattern::Optional(_))))
        .or_else(|| position(|p| matches!(p, Pattern::OneOrMore(_))))
}

/// A usage pattern together with the arena of leaves it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTree {
    pub(crate) leaves: Vec<Leaf>,
    pub(crate) root: Pattern,
}

impl Default for PatternTree {
    fn default() -> Self {
        Self {
            leaves: Vec::new(),
            root: Pattern::Required(Vec::new()),
        }
    }
}

impl PatternTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a leaf in the arena and return a node referring to it.
    pub fn add_leaf(&mut self, leaf: impl Into<Leaf>) -> Pattern {
        self.leaves.push(leaf.into());
        Pattern::Leaf(LeafId(self.leaves.len() - 1))
    }

    pub fn with_root(mut self, root: Pattern) -> Self {
        self.root = root;
        self
    }

    pub fn set_root(&mut self, root: Pattern) {
        self.root = root;
    }

    pub fn root(&self) -> &Pattern {
        &self.root
    }

    pub fn leaf(&self, id: LeafId) -> &Leaf {
        &self.leaves[id.0]
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    /// Leaves of the whole tree in depth-first order.
    pub fn flat(&self) -> Vec<&Leaf> {
        self.root.flat().into_iter().map(|id| self.leaf(id)).collect()
    }

    /// Render a node of this tree, resolving leaf ids.
    pub fn display<'a>(&'a self, node: &'a Pattern) -> DisplayPattern<'a> {
        DisplayPattern { tree: self, node }
    }
}

impl fmt::Display for PatternTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display(&self.root).fmt(f)
    }
}

pub struct DisplayPattern<'a> {
    tree: &'a PatternTree,
    node: &'a Pattern,
}

impl fmt::Display for DisplayPattern<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, children): (&str, Vec<&Pattern>) = match self.node {
            Pattern::Leaf(id) => return self.tree.leaf(*id).fmt(f),
            Pattern::Required(c) => ("Required", c.iter().collect()),
            Pattern::Optional(c) => ("Optional", c.iter().collect()),
            Pattern::Either(c) => ("Either", c.iter().collect()),
            Pattern::OneOrMore(c) => ("OneOrMore", vec![c.as_ref()]),
        };
        write!(f, "{label}(")?;
        for (i, child) in children.into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            self.tree.display(child).fmt(f)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::leaf::CliOption;

    #[test]
    fn flat_lists_leaves_depth_first() {
        let mut tree = PatternTree::new();
        let n = tree.add_leaf(Leaf::argument("N"));
        let a = tree.add_leaf(CliOption::short("-a"));
        let m = tree.add_leaf(Leaf::argument("M"));
        let tree = tree.with_root(Pattern::Required(vec![Pattern::one_or_more(n), a, m]));

        assert_eq!(
            tree.flat(),
            vec![
                &Leaf::argument("N"),
                &Leaf::Option(CliOption::short("-a")),
                &Leaf::argument("M"),
            ]
        );
    }

    #[test]
    fn display_renders_nested_tree() {
        let mut tree = PatternTree::new();
        let h = tree.add_leaf(CliOption::short("-h"));
        let n = tree.add_leaf(Leaf::argument("N"));
        let tree = tree.with_root(Pattern::Required(vec![
            Pattern::Optional(vec![h]),
            Pattern::one_or_more(n),
        ]));
        assert_eq!(
            tree.to_string(),
            "Required(Optional(Option(-h, None, 0, false)), OneOrMore(Argument(N, null)))"
        );
    }

    /// Render the DNF of `root` so expectations read like the grammar.
    fn either_of(tree: &PatternTree, root: &Pattern) -> String {
        tree.display(&root.either()).to_string()
    }

    #[test]
    fn either_of_leaf() {
        let mut tree = PatternTree::new();
        let a = tree.add_leaf(CliOption::short("-a"));
        assert_eq!(
            either_of(&tree, &a),
            "Either(Required(Option(-a, None, 0, false)))"
        );
    }

    #[test]
    fn either_distributes_over_required() {
        let mut tree = PatternTree::new();
        let a = tree.add_leaf(CliOption::short("-a"));
        let b = tree.add_leaf(CliOption::short("-b"));
        let c = tree.add_leaf(CliOption::short("-c"));
        let root = Pattern::Required(vec![Pattern::Either(vec![a, b]), c]);
        assert_eq!(
            either_of(&tree, &root),
            "Either(Required(Option(-a, None, 0, false), Option(-c, None, 0, false)), \
             Required(Option(-b, None, 0, false), Option(-c, None, 0, false)))"
        );
    }

    #[test]
    fn either_splices_optional_after_expanded_alternative() {
        let mut tree = PatternTree::new();
        let a = tree.add_leaf(CliOption::short("-a"));
        let b = tree.add_leaf(CliOption::short("-b"));
        let c = tree.add_leaf(CliOption::short("-c"));
        let root = Pattern::Optional(vec![a, Pattern::Either(vec![b, c])]);
        assert_eq!(
            either_of(&tree, &root),
            "Either(Required(Option(-b, None, 0, false), Option(-a, None, 0, false)), \
             Required(Option(-c, None, 0, false), Option(-a, None, 0, false)))"
        );
    }

    #[test]
    fn either_flattens_nested_either() {
        let mut tree = PatternTree::new();
        let x = tree.add_leaf(CliOption::short("-x"));
        let y = tree.add_leaf(CliOption::short("-y"));
        let z = tree.add_leaf(CliOption::short("-z"));
        let root = Pattern::Either(vec![x, Pattern::Either(vec![y, z])]);
        assert_eq!(
            either_of(&tree, &root),
            "Either(Required(Option(-x, None, 0, false)), \
             Required(Option(-y, None, 0, false)), \
             Required(Option(-z, None, 0, false)))"
        );
    }

    #[test]
    fn either_doubles_one_or_more() {
        let mut tree = PatternTree::new();
        let n = tree.add_leaf(Leaf::argument("N"));
        let m = tree.add_leaf(Leaf::argument("M"));
        let root = Pattern::one_or_more(Pattern::Required(vec![n, m]));
        assert_eq!(
            either_of(&tree, &root),
            "Either(Required(Argument(N, null), Argument(M, null), \
             Argument(N, null), Argument(M, null)))"
        );
    }
}
