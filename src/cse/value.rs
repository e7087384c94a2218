//! Runtime values that live on the CSE machine's operand stack.

use std::fmt::{self, Display};

use super::instr::{EtaDesc, LambdaDesc};

#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
    Tuple(Vec<Value>),
    Closure(LambdaDesc),
    Eta(EtaDesc),
    YStar,
    /// The `dummy` atom: an opaque placeholder value.
    Dummy,
    /// `e_k`, pushed onto the operand stack alongside its control-stack twin
    /// so rule 5 can find the call frame it belongs to.
    EnvMarker(usize),
    BuiltIn(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Str(_) => "string",
            Value::Bool(_) => "truth value",
            Value::Tuple(_) => "tuple",
            Value::Closure(_) => "function",
            Value::Eta(_) => "function",
            Value::YStar => "Y*",
            Value::Dummy => "dummy",
            Value::EnvMarker(_) => "environment marker",
            Value::BuiltIn(_) => "function",
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(
            self,
            Value::Closure(_) | Value::Eta(_) | Value::BuiltIn(_)
        )
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Value::Closure(desc) => {
                write!(
                    f,
                    "[lambda closure: {}: {}]",
                    desc.bound_vars.join(","),
                    desc.index
                )
            }
            Value::Eta(desc) => {
                write!(
                    f,
                    "[eta closure: {}: {}]",
                    desc.bound_vars.join(","),
                    desc.index
                )
            }
            Value::YStar => write!(f, "Y*"),
            Value::Dummy => write!(f, "dummy"),
            Value::EnvMarker(k) => write!(f, "e_{k}"),
            Value::BuiltIn(name) => write!(f, "{name}"),
        }
    }
}
