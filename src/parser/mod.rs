//! Recursive-descent parser: screened token stream -> AST.
//!
//! ```text
//! E   -> 'let' D 'in' E           ⇒ 'let'
//!      | 'fn' Vb+ '.' E           ⇒ 'lambda'
//!      | Ew
//! Ew  -> T 'where' Dr             ⇒ 'where'       | T
//! T   -> Ta (',' Ta)+             ⇒ 'tau'         | Ta
//! Ta  -> Ta 'aug' Tc              ⇒ 'aug'         | Tc
//! Tc  -> B '->' Tc '|' Tc         ⇒ '->'          | B
//! B   -> B 'or' Bt                ⇒ 'or'          | Bt
//! Bt  -> Bt '&' Bs                ⇒ '&'           | Bs
//! Bs  -> 'not' Bp                 ⇒ 'not'         | Bp
//! Bp  -> A cmp A                  ⇒ cmp           | A
//! A   -> ('+'|'-') At (unary)     ⇒ (0 +/- At)    | A ('+'|'-') At | At
//! At  -> At ('*'|'/') Af                          | Af
//! Af  -> Ap '**' Af (right-assoc)                 | Ap
//! Ap  -> Ap '@' <IDENTIFIER> R    ⇒ '@'           | R
//! R   -> R Rn                     ⇒ 'gamma'       | Rn
//! Rn  -> <IDENTIFIER> | <INTEGER> | <STRING> | true | false | nil | dummy | '(' E ')'
//! D   -> Da 'within' D            ⇒ 'within'      | Da
//! Da  -> Dr ('and' Dr)+           ⇒ 'and'         | Dr
//! Dr  -> 'rec' Db                 ⇒ 'rec'         | Db
//! Db  -> '(' D ')' | <ID> '=' E | <ID> Vb+ '=' E  ⇒ 'function_form' | Vl '=' E
//! Vb  -> <IDENTIFIER> | '(' ')' | '(' Vl ')'
//! Vl  -> <IDENTIFIER> (',' <IDENTIFIER>)*
//! ```

use std::fmt::{self, Display};

use crate::ast::Node;
use crate::token::{Line, Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub expected: String,
    pub got: String,
    pub line: Line,
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Syntax Error on line {}]: Expected '{}', but got '{}'",
            self.line, self.expected, self.got
        )
    }
}

impl std::error::Error for SyntaxError {}

pub type ParseResult<T> = Result<T, SyntaxError>;

const COMPARISONS: &[&str] = &["gr", "ge", "ls", "le", "eq", "ne"];

/// Parse an already-screened token stream into an AST rooted at `E`.
pub fn parse(tokens: Vec<Token>) -> ParseResult<Node> {
    let mut parser = Parser {
        tokens,
        current: 0,
    };
    let node = parser.e()?;
    if !parser.at_end() {
        let tok = parser.peek();
        return Err(SyntaxError {
            expected: "end of input".into(),
            got: tok.content,
            line: tok.line,
        });
    }
    Ok(node)
}

struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    fn at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn peek(&self) -> Token {
        if self.at_end() {
            let line = self.tokens.last().map(|t| t.line).unwrap_or(1);
            Token::new("<EOF>", TokenKind::Operator, line)
        } else {
            self.tokens[self.current].clone()
        }
    }

    fn peek_kind(&self) -> TokenKind {
        if self.at_end() {
            TokenKind::Operator
        } else {
            self.tokens[self.current].kind
        }
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek();
        if !self.at_end() {
            self.current += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &str) -> ParseResult<Token> {
        let tok = self.peek();
        if tok.content == expected {
            Ok(self.advance())
        } else {
            Err(SyntaxError {
                expected: expected.to_owned(),
                got: tok.content,
                line: tok.line,
            })
        }
    }

    fn expect_kind(&mut self, expected: TokenKind, name: &str) -> ParseResult<Token> {
        let tok = self.peek();
        if tok.kind == expected {
            Ok(self.advance())
        } else {
            Err(SyntaxError {
                expected: name.to_owned(),
                got: tok.content,
                line: tok.line,
            })
        }
    }

    fn is_vb_start(&self) -> bool {
        self.peek_kind() == TokenKind::Identifier || self.peek().content == "("
    }

    // E -> 'let' D 'in' E | 'fn' Vb+ '.' E | Ew
    fn e(&mut self) -> ParseResult<Node> {
        let tok = self.peek();
        if tok.content == "let" {
            self.advance();
            let d = self.d()?;
            self.expect("in")?;
            let e = self.e()?;
            Ok(Node::with_children("let", vec![d, e]))
        } else if tok.content == "fn" {
            self.advance();
            if !self.is_vb_start() {
                let tok = self.peek();
                return Err(SyntaxError {
                    expected: "Vb".into(),
                    got: tok.content,
                    line: tok.line,
                });
            }
            let mut binders = vec![];
            while self.is_vb_start() {
                binders.push(self.vb()?);
            }
            self.expect(".")?;
            let body = self.e()?;
            binders.push(body);
            Ok(Node::with_children("lambda", binders))
        } else {
            self.ew()
        }
    }

    // Ew -> T 'where' Dr | T
    fn ew(&mut self) -> ParseResult<Node> {
        let t = self.t()?;
        if self.peek().content == "where" {
            self.advance();
            let dr = self.dr()?;
            Ok(Node::with_children("where", vec![t, dr]))
        } else {
            Ok(t)
        }
    }

    // T -> Ta (',' Ta)+ | Ta
    fn t(&mut self) -> ParseResult<Node> {
        let mut items = vec![self.ta()?];
        while self.peek().content == "," {
            self.advance();
            items.push(self.ta()?);
        }
        if items.len() > 1 {
            Ok(Node::with_children("tau", items))
        } else {
            Ok(items.remove(0))
        }
    }

    // Ta -> Ta 'aug' Tc | Tc
    fn ta(&mut self) -> ParseResult<Node> {
        let mut node = self.tc()?;
        while self.peek().content == "aug" {
            self.advance();
            let right = self.tc()?;
            node = Node::with_children("aug", vec![node, right]);
        }
        Ok(node)
    }

    // Tc -> B '->' Tc '|' Tc | B
    fn tc(&mut self) -> ParseResult<Node> {
        let left = self.b()?;
        if self.peek().content == "->" {
            self.advance();
            let mid = self.tc()?;
            self.expect("|")?;
            let right = self.tc()?;
            Ok(Node::with_children("->", vec![left, mid, right]))
        } else {
            Ok(left)
        }
    }

    // B -> B 'or' Bt | Bt
    fn b(&mut self) -> ParseResult<Node> {
        let mut node = self.bt()?;
        while self.peek().content == "or" {
            self.advance();
            let right = self.bt()?;
            node = Node::with_children("or", vec![node, right]);
        }
        Ok(node)
    }

    // Bt -> Bt '&' Bs | Bs
    fn bt(&mut self) -> ParseResult<Node> {
        let mut node = self.bs()?;
        while self.peek().content == "&" {
            self.advance();
            let right = self.bs()?;
            node = Node::with_children("&", vec![node, right]);
        }
        Ok(node)
    }

    // Bs -> 'not' Bp | Bp
    fn bs(&mut self) -> ParseResult<Node> {
        if self.peek().content == "not" {
            self.advance();
            let child = self.bp()?;
            Ok(Node::with_children("not", vec![child]))
        } else {
            self.bp()
        }
    }

    // Bp -> A cmp A | A
    fn bp(&mut self) -> ParseResult<Node> {
        let node = self.a()?;
        if COMPARISONS.contains(&self.peek().content.as_str()) {
            let op = self.advance().content;
            let right = self.a()?;
            Ok(Node::with_children(&op, vec![node, right]))
        } else {
            Ok(node)
        }
    }

    // A -> ('+'|'-') At (unary, only when the operand is not an integer literal)
    //    | A ('+'|'-') At | At
    fn a(&mut self) -> ParseResult<Node> {
        let tok = self.peek();
        if (tok.content == "+" || tok.content == "-")
            && self.tokens.get(self.current + 1).map(|t| t.kind) != Some(TokenKind::Integer)
        {
            let sign = self.advance().content;
            let operand = self.at()?;
            return Ok(Node::with_children(sign, vec![Node::integer("0"), operand]));
        }

        let mut node = self.at()?;
        while self.peek().content == "+" || self.peek().content == "-" {
            let op = self.advance().content;
            let right = self.at()?;
            node = Node::with_children(op, vec![node, right]);
        }
        Ok(node)
    }

    // At -> At ('*'|'/') Af | Af
    fn at(&mut self) -> ParseResult<Node> {
        let mut node = self.af()?;
        while self.peek().content == "*" || self.peek().content == "/" {
            let op = self.advance().content;
            let right = self.af()?;
            node = Node::with_children(op, vec![node, right]);
        }
        Ok(node)
    }

    // Af -> Ap '**' Af | Ap    (right-assoc)
    fn af(&mut self) -> ParseResult<Node> {
        let node = self.ap()?;
        if self.peek().content == "**" {
            self.advance();
            let right = self.af()?;
            Ok(Node::with_children("**", vec![node, right]))
        } else {
            Ok(node)
        }
    }

    // Ap -> Ap '@' <IDENTIFIER> R | R
    fn ap(&mut self) -> ParseResult<Node> {
        let mut node = self.r()?;
        while self.peek().content == "@" {
            self.advance();
            let ident = self.expect_kind(TokenKind::Identifier, "identifier")?;
            let rhs = self.r()?;
            node = Node::with_children(
                "@",
                vec![node, Node::identifier(&ident.content), rhs],
            );
        }
        Ok(node)
    }

    fn is_rn_start(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Identifier | TokenKind::Integer | TokenKind::Str)
            || matches!(self.peek().content.as_str(), "true" | "false" | "nil" | "dummy" | "(")
    }

    // R -> R Rn | Rn
    fn r(&mut self) -> ParseResult<Node> {
        let mut node = self.rn()?;
        while self.is_rn_start() {
            let right = self.rn()?;
            node = Node::with_children("gamma", vec![node, right]);
        }
        Ok(node)
    }

    // Rn -> <IDENTIFIER> | <INTEGER> | <STRING> | true | false | nil | dummy | '(' E ')'
    fn rn(&mut self) -> ParseResult<Node> {
        let tok = self.peek();
        match tok.kind {
            TokenKind::Identifier => {
                self.advance();
                Ok(Node::identifier(&tok.content))
            }
            TokenKind::Integer => {
                self.advance();
                Ok(Node::integer(&tok.content))
            }
            TokenKind::Str => {
                self.advance();
                Ok(Node::string(&tok.content))
            }
            _ => match tok.content.as_str() {
                "true" => {
                    self.advance();
                    Ok(Node::boolean(true))
                }
                "false" => {
                    self.advance();
                    Ok(Node::boolean(false))
                }
                "nil" => {
                    self.advance();
                    Ok(Node::nil())
                }
                "dummy" => {
                    self.advance();
                    Ok(Node::dummy())
                }
                "(" => {
                    self.advance();
                    let node = self.e()?;
                    self.expect(")")?;
                    Ok(node)
                }
                _ => Err(SyntaxError {
                    expected: "identifier, integer, string, 'true', 'false', 'nil', 'dummy', or '('"
                        .into(),
                    got: tok.content,
                    line: tok.line,
                }),
            },
        }
    }

    // D -> Da 'within' D | Da
    fn d(&mut self) -> ParseResult<Node> {
        let node = self.da()?;
        if self.peek().content == "within" {
            self.advance();
            let right = self.d()?;
            Ok(Node::with_children("within", vec![node, right]))
        } else {
            Ok(node)
        }
    }

    // Da -> Dr ('and' Dr)+ | Dr
    fn da(&mut self) -> ParseResult<Node> {
        let mut items = vec![self.dr()?];
        while self.peek().content == "and" {
            self.advance();
            items.push(self.dr()?);
        }
        if items.len() > 1 {
            Ok(Node::with_children("and", items))
        } else {
            Ok(items.remove(0))
        }
    }

    // Dr -> 'rec' Db | Db
    fn dr(&mut self) -> ParseResult<Node> {
        if self.peek().content == "rec" {
            self.advance();
            let child = self.db()?;
            Ok(Node::with_children("rec", vec![child]))
        } else {
            self.db()
        }
    }

    // Db -> '(' D ')' | <ID> '=' E | <ID> Vb+ '=' E | Vl '=' E
    fn db(&mut self) -> ParseResult<Node> {
        if self.peek().content == "(" {
            self.advance();
            let node = self.d()?;
            self.expect(")")?;
            return Ok(node);
        }

        let id_tok = self.expect_kind(TokenKind::Identifier, "identifier")?;

        if self.peek().content == "," {
            // Vl '=' E: first identifier is part of a comma-separated binder list.
            let mut names = vec![id_tok.content];
            while self.peek().content == "," {
                self.advance();
                names.push(self.expect_kind(TokenKind::Identifier, "identifier")?.content);
            }
            self.expect("=")?;
            let rhs = self.e()?;
            let binder = Node::with_children(
                ",",
                names.iter().map(|n| Node::identifier(n)).collect(),
            );
            return Ok(Node::with_children("=", vec![binder, rhs]));
        }

        if self.peek().content == "=" {
            self.advance();
            let rhs = self.e()?;
            return Ok(Node::with_children(
                "=",
                vec![Node::identifier(&id_tok.content), rhs],
            ));
        }

        if self.is_vb_start() {
            let mut binders = vec![];
            while self.is_vb_start() {
                binders.push(self.vb()?);
            }
            self.expect("=")?;
            let rhs = self.e()?;
            let mut children = vec![Node::identifier(&id_tok.content)];
            children.extend(binders);
            children.push(rhs);
            return Ok(Node::with_children("function_form", children));
        }

        let tok = self.peek();
        Err(SyntaxError {
            expected: "'=' or function form arguments".into(),
            got: tok.content,
            line: tok.line,
        })
    }

    // Vb -> <IDENTIFIER> | '(' ')' | '(' Vl ')'
    fn vb(&mut self) -> ParseResult<Node> {
        if self.peek_kind() == TokenKind::Identifier {
            let tok = self.advance();
            return Ok(Node::identifier(&tok.content));
        }

        if self.peek().content == "(" {
            self.advance();
            if self.peek().content == ")" {
                self.advance();
                return Ok(Node::new("()"));
            }
            let names = self.vl()?;
            self.expect(")")?;
            return Ok(Node::with_children(",", names));
        }

        let tok = self.peek();
        Err(SyntaxError {
            expected: "identifier or '('".into(),
            got: tok.content,
            line: tok.line,
        })
    }

    // Vl -> <IDENTIFIER> (',' <IDENTIFIER>)*
    fn vl(&mut self) -> ParseResult<Vec<Node>> {
        let first = self.expect_kind(TokenKind::Identifier, "identifier")?;
        let mut names = vec![Node::identifier(&first.content)];
        while self.peek().content == "," {
            self.advance();
            let next = self.expect_kind(TokenKind::Identifier, "identifier")?;
            names.push(Node::identifier(&next.content));
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize_raw_for_tests;

    fn parse_src(src: &str) -> Node {
        let tokens = tokenize_raw_for_tests(src);
        parse(tokens).expect("parse should succeed")
    }

    #[test]
    fn parses_simple_let() {
        let tree = parse_src("let x = 1 in x");
        assert_eq!(tree.label, "let");
        assert_eq!(tree.children[0].label, "=");
        assert_eq!(tree.children[0].children[0].label, "<ID:x>");
        assert_eq!(tree.children[0].children[1].label, "<INT:1>");
        assert_eq!(tree.children[1].label, "<ID:x>");
    }

    #[test]
    fn parses_lambda_with_multiple_binders() {
        let tree = parse_src("fn x y . x");
        assert_eq!(tree.label, "lambda");
        assert_eq!(tree.children.len(), 3);
        assert_eq!(tree.children[0].label, "<ID:x>");
        assert_eq!(tree.children[1].label, "<ID:y>");
    }

    #[test]
    fn parses_tuple_binder_function_form() {
        let tree = parse_src("let f (x,y) = x+y in f");
        let function = &tree.children[0];
        assert_eq!(function.label, "function_form");
        assert_eq!(function.children[1].label, ",");
        assert_eq!(function.children[1].children.len(), 2);
    }

    #[test]
    fn parses_conditional() {
        let tree = parse_src("let x = 1 eq 1 -> 2 | 3 in x");
        let guard = &tree.children[0].children[1];
        assert_eq!(guard.label, "->");
        assert_eq!(guard.children[0].label, "eq");
    }

    #[test]
    fn left_associates_gamma() {
        let tree = parse_src("let x = f a b in x");
        let gamma = &tree.children[0].children[1];
        assert_eq!(gamma.label, "gamma");
        assert_eq!(gamma.children[0].label, "gamma");
    }

    #[test]
    fn tuple_comma_produces_tau() {
        let tree = parse_src("let x = 1,2,3 in x");
        assert_eq!(tree.children[0].children[1].label, "tau");
    }

    #[test]
    fn rejects_trailing_garbage() {
        let tokens = tokenize_raw_for_tests("let x = 1 in x )");
        assert!(parse(tokens).is_err());
    }

    #[test]
    fn comparison_keywords_parse_as_binary_nodes() {
        let tree = parse_src("let x = 1 gr 2 in x");
        assert_eq!(tree.children[0].children[1].label, "gr");
    }
}
