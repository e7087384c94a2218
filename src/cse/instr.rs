//! The handful of non-atomic control-structure instructions: `lambda`,
//! `->`'s guard/branch pair, and tuple construction. Everything else in a
//! flattened control structure is a plain symbol (an operator, `gamma`,
//! `beta`, or a bracketed atom label).

#[derive(Debug, Clone)]
pub struct LambdaDesc {
    pub index: usize,
    pub bound_vars: Vec<String>,
    pub env: usize,
}

impl LambdaDesc {
    pub fn new(index: usize, bound_vars: Vec<String>) -> Self {
        Self {
            index,
            bound_vars,
            env: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaDesc {
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TauDesc {
    pub arity: usize,
}

/// A re-expandable lambda awaiting its recursive argument, produced when
/// `Y*` is applied to a closure (CSE rule 12).
#[derive(Debug, Clone)]
pub struct EtaDesc {
    pub index: usize,
    pub bound_vars: Vec<String>,
    pub env: usize,
}

/// One entry in a flattened control structure, or in the live control stack
/// during execution.
#[derive(Debug, Clone)]
pub enum ControlItem {
    /// A bracketed atom label, e.g. `<ID:x>`, `<INT:5>`, `<Y*>`.
    Atom(String),
    /// A bare operator or keyword symbol: `+`, `gamma`, `beta`, `not`, ...
    Symbol(String),
    /// An environment marker pushed alongside a lambda's body (`e_k`),
    /// restoring `current_environment` when control returns from the call.
    EnvMarker(usize),
    Lambda(LambdaDesc),
    Delta(DeltaDesc),
    Tau(TauDesc),
}

impl ControlItem {
    pub fn symbol(s: impl Into<String>) -> Self {
        Self::Symbol(s.into())
    }
}
