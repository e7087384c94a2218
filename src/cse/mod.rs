//! The Control-Stack-Environment machine: executes a flattened, indexed
//! family of control structures against an environment arena until exactly
//! one value remains.

mod builtins;
mod env;
mod flatten;
mod instr;
mod machine;
pub mod value;

use std::fmt::{self, Display};

use log::debug;

use crate::ast::Node;

pub use value::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    UndeclaredIdentifier(String),
    StackUnderflow,
    TypeError {
        op: String,
        expected: String,
        got: String,
    },
    UnknownBuiltin(String),
    UnknownInstruction(String),
    DivisionByZero,
}

impl RuntimeError {
    pub(crate) fn type_error(op: &str, expected: &str, got: &Value) -> Self {
        Self::TypeError {
            op: op.to_owned(),
            expected: expected.to_owned(),
            got: got.type_name().to_owned(),
        }
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndeclaredIdentifier(name) => {
                write!(f, "[Runtime Error]: Undeclared identifier '{name}'")
            }
            Self::StackUnderflow => {
                write!(f, "[Runtime Error]: Attempted to pop from an empty CSE machine stack")
            }
            Self::TypeError { op, expected, got } => write!(
                f,
                "[Runtime Error]: '{op}' expected {expected}, got {got}"
            ),
            Self::UnknownBuiltin(name) => {
                write!(f, "[Runtime Error]: Unknown built-in function '{name}'")
            }
            Self::UnknownInstruction(symbol) => {
                write!(f, "[Runtime Error]: No reduction rule applies to '{symbol}'")
            }
            Self::DivisionByZero => write!(f, "[Runtime Error]: Division by zero"),
        }
    }
}

impl std::error::Error for RuntimeError {}

/// Flatten the standardized tree and run it to completion, returning the
/// single resulting value.
pub fn evaluate(root: &Node) -> Result<Value, RuntimeError> {
    let mut flattener = flatten::Flattener::new();
    flattener.generate(root, 0);
    debug!("flattened into {} control structures", flattener.structures.len());

    let mut machine = machine::Machine::new(flattener.structures);
    machine.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize_raw_for_tests;
    use crate::parser::parse;
    use crate::standardizer::standardize;

    fn run(src: &str) -> Value {
        let tokens = tokenize_raw_for_tests(src);
        let ast = parse(tokens).expect("parse should succeed");
        let st = standardize(ast).expect("standardize should succeed");
        evaluate(&st).expect("evaluate should succeed")
    }

    #[test]
    fn evaluates_let_binding() {
        assert_eq!(run("let x = 1 in x").to_string(), "1");
    }

    #[test]
    fn evaluates_arithmetic_with_truncating_division() {
        assert_eq!(run("let x = 7 / 2 in x").to_string(), "3");
    }

    #[test]
    fn evaluates_conditional() {
        assert_eq!(run("let x = 1 eq 1 -> 2 | 3 in x").to_string(), "2");
        assert_eq!(run("let x = 1 eq 2 -> 2 | 3 in x").to_string(), "3");
    }

    #[test]
    fn evaluates_tuple_indexing() {
        assert_eq!(run("let x = (1,2,3) in x 2").to_string(), "2");
    }

    #[test]
    fn evaluates_tuple_destructuring_function() {
        assert_eq!(run("let f (x,y) = x+y in f (3,4)").to_string(), "7");
    }

    #[test]
    fn evaluates_recursive_factorial() {
        assert_eq!(
            run("let rec F n = n eq 0 -> 1 | n * F(n-1) in F 5").to_string(),
            "120"
        );
    }

    #[test]
    fn evaluates_string_concatenation_builtin() {
        assert_eq!(run("Conc 'foo' 'bar'").to_string(), "foobar");
    }

    #[test]
    fn evaluates_boolean_and() {
        assert_eq!(run("true & false").to_string(), "false");
    }

    #[test]
    fn evaluates_unary_minus_as_zero_minus_operand() {
        assert_eq!(run("let x = 3 in -x").to_string(), "-3");
    }

    #[test]
    fn rejects_undeclared_identifier() {
        let tokens = tokenize_raw_for_tests("y");
        let ast = parse(tokens).unwrap();
        let st = standardize(ast).unwrap();
        assert!(matches!(
            evaluate(&st),
            Err(RuntimeError::UndeclaredIdentifier(_))
        ));
    }

    #[test]
    fn order_builtin_reports_tuple_arity() {
        assert_eq!(run("Order (1,2,3,4,5)").to_string(), "5");
    }
}
