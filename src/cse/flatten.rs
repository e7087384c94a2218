//! Standardized tree -> indexed family of flattened control structures.
//!
//! Index 0 holds the main program. Every `lambda` allocates a fresh index
//! for its body; every `->` allocates one fresh index for its then-branch
//! and one for its else-branch. A node's *own* instruction (the `Lambda`
//! marker, the `Delta` pair plus `beta`, or the plain symbol) is appended to
//! the control structure it was reached from, not the one it introduces.

use crate::ast::Node;

use super::instr::{ControlItem, DeltaDesc, LambdaDesc, TauDesc};

pub struct Flattener {
    pub structures: Vec<Vec<ControlItem>>,
    count: usize,
}

impl Flattener {
    pub fn new() -> Self {
        Self {
            structures: vec![vec![]],
            count: 0,
        }
    }

    fn ensure(&mut self, index: usize) {
        while self.structures.len() <= index {
            self.structures.push(vec![]);
        }
    }

    pub fn generate(&mut self, root: &Node, index: usize) {
        self.ensure(index);

        match root.label.as_str() {
            "lambda" => {
                self.count += 1;
                let body_index = self.count;
                let binder = &root.children[0];
                let bound_vars = if binder.label == "," {
                    binder
                        .children
                        .iter()
                        .map(|c| strip_id(&c.label).to_owned())
                        .collect()
                } else {
                    vec![strip_id(&binder.label).to_owned()]
                };
                self.structures[index].push(ControlItem::Lambda(LambdaDesc::new(
                    body_index,
                    bound_vars,
                )));
                for child in &root.children[1..] {
                    self.generate(child, body_index);
                }
            }
            "->" => {
                self.count += 1;
                let then_index = self.count;
                self.structures[index].push(ControlItem::Delta(DeltaDesc { index: then_index }));
                self.generate(&root.children[1], then_index);

                self.count += 1;
                let else_index = self.count;
                self.structures[index].push(ControlItem::Delta(DeltaDesc { index: else_index }));
                self.generate(&root.children[2], else_index);

                self.structures[index].push(ControlItem::symbol("beta"));
                self.generate(&root.children[0], index);
            }
            "tau" => {
                let arity = root.children.len();
                self.structures[index].push(ControlItem::Tau(TauDesc { arity }));
                for child in &root.children {
                    self.generate(child, index);
                }
            }
            _ => {
                let item = if root.is_atom() {
                    ControlItem::Atom(root.label.clone())
                } else {
                    ControlItem::symbol(root.label.clone())
                };
                self.structures[index].push(item);
                for child in &root.children {
                    self.generate(child, index);
                }
            }
        }
    }
}

impl Default for Flattener {
    fn default() -> Self {
        Self::new()
    }
}

/// Strips the `<ID:` prefix and trailing `>` from a bracketed identifier
/// atom's label, e.g. `<ID:x>` -> `x`.
fn strip_id(label: &str) -> &str {
    label
        .strip_prefix("<ID:")
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize_raw_for_tests;
    use crate::parser::parse;
    use crate::standardizer::standardize;

    fn flatten_src(src: &str) -> Flattener {
        let tokens = tokenize_raw_for_tests(src);
        let ast = parse(tokens).expect("parse should succeed");
        let st = standardize(ast).expect("standardize should succeed");
        let mut flattener = Flattener::new();
        flattener.generate(&st, 0);
        flattener
    }

    #[test]
    fn lambda_allocates_a_fresh_control_structure() {
        let flattener = flatten_src("let x = 1 in x");
        assert_eq!(flattener.structures.len(), 2);
        assert!(matches!(
            flattener.structures[0][0],
            ControlItem::Lambda(_)
        ));
    }

    #[test]
    fn conditional_allocates_two_branch_structures() {
        let flattener = flatten_src("let x = 1 eq 1 -> 2 | 3 in x");
        // main(0) holds the let's lambda + gamma; the conditional's lambda
        // body gets its own index, plus one each for the then/else branches.
        assert_eq!(flattener.structures.len(), 4);
    }
}
