//! The AST/ST node type shared by the parser, the standardizer, and the
//! control-structure flattener.
//!
//! Node *kind* would ordinarily be a sum type, but RPAL's bracketed wire
//! form (`<ID:x>`, `<INT:1>`, ...) is an externally observable contract (the
//! `-ast`/`-st` preorder dump), so we keep the label as the canonical string
//! form and let callers match on it, exactly as the reference tool does.

use std::fmt::Write as _;

/// A single AST or ST node: a label and an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub label: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: vec![],
        }
    }

    pub fn with_children(label: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn identifier(name: &str) -> Self {
        Self::new(format!("<ID:{name}>"))
    }

    pub fn integer(digits: &str) -> Self {
        Self::new(format!("<INT:{digits}>"))
    }

    /// `content` is the raw string token content, including the surrounding
    /// single quotes.
    pub fn string(content: &str) -> Self {
        Self::new(format!("<STR:{content}>"))
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(if value { "<true>" } else { "<false>" })
    }

    pub fn nil() -> Self {
        Self::new("<nil>")
    }

    pub fn dummy() -> Self {
        Self::new("<dummy>")
    }

    pub fn y_star() -> Self {
        Self::new("<Y*>")
    }

    pub fn is_atom(&self) -> bool {
        self.label.starts_with('<') && self.label.ends_with('>')
    }

    /// Render this tree as an indented preorder dump: one label per line,
    /// prefixed with `depth` dots, no separator between prefix and label.
    pub fn preorder_dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push('.');
        }
        let _ = writeln!(out, "{}", self.label);
        for child in &self.children {
            child.dump_into(out, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atom_labels_round_trip() {
        assert_eq!(Node::identifier("x").label, "<ID:x>");
        assert_eq!(Node::integer("42").label, "<INT:42>");
        assert_eq!(Node::string("'hi'").label, "<STR:'hi'>");
        assert_eq!(Node::boolean(true).label, "<true>");
        assert_eq!(Node::boolean(false).label, "<false>");
        assert_eq!(Node::nil().label, "<nil>");
        assert_eq!(Node::dummy().label, "<dummy>");
        assert_eq!(Node::y_star().label, "<Y*>");
    }

    #[test]
    fn preorder_dump_indents_by_depth() {
        let tree = Node::with_children(
            "gamma",
            vec![Node::identifier("f"), Node::integer("1")],
        );
        assert_eq!(tree.preorder_dump(), "gamma\n.<ID:f>\n.<INT:1>\n");
    }

    #[test]
    fn is_atom_detects_bracketed_labels() {
        assert!(Node::identifier("x").is_atom());
        assert!(!Node::new("gamma").is_atom());
    }
}
