//! AST -> ST: rewrites the seven pieces of syntactic sugar (`let`, `where`,
//! `function_form`, curried `gamma`, `within`, `@`, `and`, `rec`) down to the
//! primitives the CSE machine actually understands: `gamma`, `lambda`, `=`,
//! `,`, `tau`, and plain application.

use std::fmt::{self, Display};

use crate::ast::Node;
use crate::token::Line;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardizeError {
    pub message: String,
    pub line: Line,
}

impl Display for StandardizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Standardization Error]: {}", self.message)
    }
}

impl std::error::Error for StandardizeError {}

type StdResult<T> = Result<T, StandardizeError>;

fn malformed(label: &str) -> StandardizeError {
    StandardizeError {
        message: format!("malformed '{label}' node reached the standardizer"),
        line: 0,
    }
}

/// Standardize an AST in place, post-order: children are standardized before
/// the parent is inspected, so a parent's rewrite rule can assume its
/// children are already in core form.
pub fn standardize(mut root: Node) -> StdResult<Node> {
    let mut children = std::mem::take(&mut root.children);
    for child in children.iter_mut() {
        let standardized = standardize(std::mem::replace(child, Node::new("")))?;
        *child = standardized;
    }
    root.children = children;

    match root.label.as_str() {
        "let" if root.children.get(0).map(|c| c.label.as_str()) == Some("=") => {
            standardize_let(root)
        }
        "where" if root.children.get(1).map(|c| c.label.as_str()) == Some("=") => {
            standardize_where(root)
        }
        "function_form" => standardize_function_form(root),
        "gamma" if root.children.len() > 2 => standardize_curried_gamma(root),
        "within"
            if root.children.get(0).map(|c| c.label.as_str()) == Some("=")
                && root.children.get(1).map(|c| c.label.as_str()) == Some("=") =>
        {
            standardize_within(root)
        }
        "@" => standardize_at(root),
        "and" => standardize_and(root),
        "rec" => standardize_rec(root),
        _ => Ok(root),
    }
}

// let(=(X, E), P) -> gamma(lambda(X, P), E)
fn standardize_let(mut root: Node) -> StdResult<Node> {
    if root.children.len() != 2 {
        return Err(malformed("let"));
    }
    let p = root.children.pop().unwrap();
    let mut eq = root.children.pop().unwrap();
    if eq.children.len() != 2 {
        return Err(malformed("let"));
    }
    let e = eq.children.pop().unwrap();
    let x = eq.children.pop().unwrap();
    let lambda = Node::with_children("lambda", vec![x, p]);
    Ok(Node::with_children("gamma", vec![lambda, e]))
}

// where(E, =(X, E1)) -> gamma(lambda(X, E), E1)
fn standardize_where(mut root: Node) -> StdResult<Node> {
    if root.children.len() != 2 {
        return Err(malformed("where"));
    }
    let mut eq = root.children.pop().unwrap();
    let e = root.children.pop().unwrap();
    if eq.children.len() != 2 {
        return Err(malformed("where"));
    }
    let e1 = eq.children.pop().unwrap();
    let x = eq.children.pop().unwrap();
    let lambda = Node::with_children("lambda", vec![x, e]);
    Ok(Node::with_children("gamma", vec![lambda, e1]))
}

// function_form(P, V1..Vn, E) -> =(P, lambda(V1, lambda(V2, ... lambda(Vn, E))))
fn standardize_function_form(mut root: Node) -> StdResult<Node> {
    if root.children.len() < 3 {
        return Err(malformed("function_form"));
    }
    let e = root.children.pop().unwrap();
    let p = root.children.remove(0);
    let binders = root.children;

    let mut body = e;
    for binder in binders.into_iter().rev() {
        body = Node::with_children("lambda", vec![binder, body]);
    }
    Ok(Node::with_children("=", vec![p, body]))
}

// curried gamma(N1, N2, ..., Nk, E) -> gamma(gamma(..gamma(N1,N2)..,Nk), E)
// Defensive: our parser always emits binary gamma nodes, so this path is not
// exercised today, but is kept for fidelity with the node model.
fn standardize_curried_gamma(mut root: Node) -> StdResult<Node> {
    let e = root.children.pop().unwrap();
    let mut children = root.children.into_iter();
    let mut node = children.next().ok_or_else(|| malformed("gamma"))?;
    for next in children {
        node = Node::with_children("gamma", vec![node, next]);
    }
    Ok(Node::with_children("gamma", vec![node, e]))
}

// within(=(X1, E1), =(X2, E2)) -> =(X2, gamma(lambda(X1, E2), E1))
fn standardize_within(mut root: Node) -> StdResult<Node> {
    if root.children.len() != 2 {
        return Err(malformed("within"));
    }
    let mut eq2 = root.children.pop().unwrap();
    let mut eq1 = root.children.pop().unwrap();
    if eq1.children.len() != 2 || eq2.children.len() != 2 {
        return Err(malformed("within"));
    }
    let e2 = eq2.children.pop().unwrap();
    let x2 = eq2.children.pop().unwrap();
    let e1 = eq1.children.pop().unwrap();
    let x1 = eq1.children.pop().unwrap();
    let lambda = Node::with_children("lambda", vec![x1, e2]);
    let gamma = Node::with_children("gamma", vec![lambda, e1]);
    Ok(Node::with_children("=", vec![x2, gamma]))
}

// @(E1, N, E2) -> gamma(gamma(N, E1), E2)
fn standardize_at(mut root: Node) -> StdResult<Node> {
    if root.children.len() != 3 {
        return Err(malformed("@"));
    }
    let e2 = root.children.pop().unwrap();
    let n = root.children.pop().unwrap();
    let e1 = root.children.pop().unwrap();
    let inner = Node::with_children("gamma", vec![n, e1]);
    Ok(Node::with_children("gamma", vec![inner, e2]))
}

// and(=(X1,E1), ..., =(Xn,En)) -> =(,(X1..Xn), tau(E1..En))
fn standardize_and(root: Node) -> StdResult<Node> {
    let mut names = vec![];
    let mut values = vec![];
    for mut eq in root.children {
        if eq.children.len() != 2 {
            return Err(malformed("and"));
        }
        let value = eq.children.pop().unwrap();
        let name = eq.children.pop().unwrap();
        names.push(name);
        values.push(value);
    }
    let binder = Node::with_children(",", names);
    let tau = Node::with_children("tau", values);
    Ok(Node::with_children("=", vec![binder, tau]))
}

// rec(=(X, E)) -> =(X, gamma(<Y*>, lambda(X, E)))
fn standardize_rec(mut root: Node) -> StdResult<Node> {
    if root.children.len() != 1 {
        return Err(malformed("rec"));
    }
    let mut eq = root.children.pop().unwrap();
    if eq.children.len() != 2 {
        return Err(malformed("rec"));
    }
    let e = eq.children.pop().unwrap();
    let x = eq.children.pop().unwrap();
    let lambda = Node::with_children("lambda", vec![x.clone(), e]);
    let gamma = Node::with_children("gamma", vec![Node::y_star(), lambda]);
    Ok(Node::with_children("=", vec![x, gamma]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize_raw_for_tests;
    use crate::parser::parse;

    fn standardize_src(src: &str) -> Node {
        let tokens = tokenize_raw_for_tests(src);
        let ast = parse(tokens).expect("parse should succeed");
        standardize(ast).expect("standardize should succeed")
    }

    #[test]
    fn let_becomes_gamma_of_lambda() {
        let st = standardize_src("let x = 1 in x");
        assert_eq!(st.label, "gamma");
        assert_eq!(st.children[0].label, "lambda");
        assert_eq!(st.children[0].children[0].label, "<ID:x>");
        assert_eq!(st.children[0].children[1].label, "<ID:x>");
        assert_eq!(st.children[1].label, "<INT:1>");
    }

    #[test]
    fn where_becomes_gamma_of_lambda() {
        let st = standardize_src("x where x = 1");
        assert_eq!(st.label, "gamma");
        assert_eq!(st.children[0].label, "lambda");
        assert_eq!(st.children[1].label, "<INT:1>");
    }

    #[test]
    fn function_form_curries_into_nested_lambdas() {
        let st = standardize_src("let f x y = x in f");
        let def = &st.children[0];
        assert_eq!(def.label, "lambda");
        assert_eq!(def.children[0].label, "<ID:x>");
        assert_eq!(def.children[1].label, "lambda");
        assert_eq!(def.children[1].children[0].label, "<ID:y>");
    }

    #[test]
    fn rec_introduces_y_star() {
        let st = standardize_src("let rec f x = f x in f");
        let def = &st.children[0]; // lambda(f, gamma(Y*, lambda(f, gamma(Y*, ...))))
        assert_eq!(def.label, "gamma");
        assert_eq!(def.children[0].label, "<Y*>");
        assert_eq!(def.children[1].label, "lambda");
    }

    #[test]
    fn and_combines_definitions_into_tuple_binding() {
        let st = standardize_src("let x = 1 and y = 2 in x");
        let def = &st.children[0];
        assert_eq!(def.label, "lambda");
        assert_eq!(def.children[0].label, ",");
        assert_eq!(def.children[0].children.len(), 2);
    }

    #[test]
    fn within_threads_first_binding_into_second() {
        let st = standardize_src("let y = x + 1 within x = 1 in y");
        let def = &st.children[0];
        assert_eq!(def.label, "lambda");
        assert_eq!(def.children[0].label, "<ID:x>");
    }

    #[test]
    fn at_operator_becomes_nested_gamma() {
        let st = standardize_src("let x = 1 @ f 2 in x");
        let def = &st.children[0];
        assert_eq!(def.label, "lambda");
        let e = &def.children[1];
        assert_eq!(e.label, "gamma");
        assert_eq!(e.children[0].label, "gamma");
    }
}
