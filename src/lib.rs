//! A tree-walking interpreter for RPAL: lex -> screen -> parse -> standardize
//! -> flatten -> run on a Control-Stack-Environment machine.

pub mod ast;
pub mod cse;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod standardizer;
pub mod token;

use log::info;

use ast::Node;
use error::RpalError;

/// Parse `source` all the way to its AST, without standardizing or running
/// it. Used directly by the `-ast` dump flag.
pub fn parse_to_ast(source: &str) -> Result<Node, RpalError> {
    let tokens = lexer::tokenize(source)?;
    Ok(parser::parse(tokens)?)
}

/// Parse and standardize `source` into its ST, without running it. Used
/// directly by the `-st` dump flag.
pub fn parse_to_st(source: &str) -> Result<Node, RpalError> {
    let ast = parse_to_ast(source)?;
    Ok(standardizer::standardize(ast)?)
}

/// Run the full pipeline and return the formatted result value.
pub fn run(source: &str) -> Result<String, RpalError> {
    info!("evaluating program ({} bytes)", source.len());
    let st = parse_to_st(source)?;
    let value = cse::evaluate(&st)?;
    info!("evaluation finished");
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_end_to_end_let_expression() {
        assert_eq!(run("let x = 1 in x").unwrap(), "1");
    }

    #[test]
    fn run_reports_lexical_errors() {
        assert!(run("let x = 123abc in x").is_err());
    }

    #[test]
    fn run_reports_syntax_errors() {
        assert!(run("let x = in x").is_err());
    }

    #[test]
    fn run_reports_runtime_errors() {
        assert!(run("undeclared_name").is_err());
    }

    #[test]
    fn parse_to_ast_matches_bracketed_atom_convention() {
        let ast = parse_to_ast("let x = 1 in x").unwrap();
        assert_eq!(ast.label, "let");
    }
}
