//! Normalization applied once to a freshly parsed [`PatternTree`].

use std::collections::HashMap;

use super::leaf::{Leaf, Value};
use super::tree::{LeafId, Pattern, PatternTree};

impl PatternTree {
    /// Intern equal leaves, then mark arguments that repeat within one
    /// alternative as list arguments.
    pub fn fix(mut self) -> Self {
        self.fix_identities();
        self.fix_list_arguments();
        self
    }

    /// Point every leaf that is structurally equal to another at one shared
    /// arena slot, so repeated occurrences of a variable accumulate into the
    /// same binding.
    ///
    /// The arena is rebuilt to hold only canonical leaves, in the order they
    /// are first reached.
    pub fn fix_identities(&mut self) {
        let mut canonical: HashMap<Leaf, LeafId> = HashMap::new();
        let mut leaves: Vec<Leaf> = Vec::new();
        let mut remap: HashMap<LeafId, LeafId> = HashMap::new();

        for id in self.root.flat() {
            let leaf = &self.leaves[id.0];
            let target = *canonical.entry(leaf.clone()).or_insert_with(|| {
                leaves.push(leaf.clone());
                LeafId(leaves.len() - 1)
            });
            remap.insert(id, target);
        }

        relink(&mut self.root, &remap);
        self.leaves = leaves;
    }

    /// Turn every argument that occurs more than once in some alternative of
    /// the DNF expansion into a list argument (`NAME NAME`, `NAME...`).
    ///
    /// Counting is by arena slot, so this expects [`fix_identities`] to have
    /// run first.
    ///
    /// [`fix_identities`]: PatternTree::fix_identities
    pub fn fix_list_arguments(&mut self) {
        let Pattern::Either(alternatives) = self.root.either() else {
            return;
        };

        for alternative in alternatives {
            let mut counts: HashMap<LeafId, usize> = HashMap::new();
            for id in alternative.flat() {
                *counts.entry(id).or_default() += 1;
            }
            for (id, count) in counts {
                if count > 1 {
                    if let Leaf::Argument(argument) = &mut self.leaves[id.0] {
                        argument.value = Value::List(Vec::new());
                    }
                }
            }
        }
    }
}

fn relink(node: &mut Pattern, remap: &HashMap<LeafId, LeafId>) {
    match node {
        Pattern::Leaf(id) => {
            if let Some(target) = remap.get(id) {
                *id = *target;
            }
        }
        Pattern::Required(children) | Pattern::Optional(children) | Pattern::Either(children) => {
            for child in children {
                relink(child, remap);
            }
        }
        Pattern::OneOrMore(child) => relink(child, remap),
    }
}
