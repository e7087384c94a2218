//! `apply_rules`: the main CSE execution loop, plus atom resolution (rule 1)
//! and the call/return machinery (rules 4, 5, 11, 12, 13).

use log::trace;

use super::builtins;
use super::env::EnvArena;
use super::instr::{ControlItem, EtaDesc, LambdaDesc};
use super::value::Value;
use super::RuntimeError;

const BINARY_OPS: &[&str] = &[
    "+", "-", "*", "/", "**", "gr", "ge", "ls", "le", "eq", "ne", "or", "&", "aug",
];
const UNARY_OPS: &[&str] = &["neg", "not"];

pub struct Machine {
    structures: Vec<Vec<ControlItem>>,
    control: Vec<ControlItem>,
    stack: Vec<Value>,
    envs: EnvArena,
    current_environment: usize,
    print_present: bool,
}

impl Machine {
    pub fn new(structures: Vec<Vec<ControlItem>>) -> Self {
        Self {
            structures,
            control: vec![],
            stack: vec![],
            envs: EnvArena::new(),
            current_environment: 0,
            print_present: false,
        }
    }

    fn pop_control(&mut self) -> Result<ControlItem, RuntimeError> {
        self.control.pop().ok_or(RuntimeError::StackUnderflow)
    }

    fn pop_value(&mut self) -> Result<Value, RuntimeError> {
        self.stack.pop().ok_or(RuntimeError::StackUnderflow)
    }

    fn push_structure(&mut self, index: usize) {
        let extra = self.structures[index].clone();
        self.control.extend(extra);
    }

    pub fn run(&mut self) -> Result<Value, RuntimeError> {
        self.control.push(ControlItem::EnvMarker(0));
        self.push_structure(0);
        self.stack.push(Value::EnvMarker(0));

        while let Some(symbol) = self.control.pop() {
            trace!("control: {symbol:?}, stack depth: {}", self.stack.len());
            self.step(symbol)?;
        }

        self.pop_value()
    }

    pub fn print_present(&self) -> bool {
        self.print_present
    }

    fn step(&mut self, symbol: ControlItem) -> Result<(), RuntimeError> {
        match symbol {
            // Rule 1
            ControlItem::Atom(label) => {
                let value = self.lookup_atom(&label)?;
                self.stack.push(value);
            }

            // Rule 2
            ControlItem::Lambda(desc) => {
                let mut closure = LambdaDesc::new(desc.index, desc.bound_vars.clone());
                closure.env = self.current_environment;
                self.stack.push(Value::Closure(closure));
            }

            ControlItem::EnvMarker(k) => self.rule5(k)?,

            ControlItem::Delta(_) => {
                // Delta markers are only ever consumed by `beta`, never
                // executed directly; seeing one here means the control
                // structure was malformed.
                return Err(RuntimeError::UnknownInstruction("Delta".into()));
            }

            ControlItem::Tau(desc) => {
                // Each pop yields the next tuple element in left-to-right
                // order already: the last-flattened child sits deepest on
                // the stack and is popped last.
                let mut items = Vec::with_capacity(desc.arity);
                for _ in 0..desc.arity {
                    items.push(self.pop_value()?);
                }
                self.stack.push(Value::Tuple(items));
            }

            ControlItem::Symbol(symbol) => self.step_symbol(&symbol)?,
        }
        Ok(())
    }

    fn step_symbol(&mut self, symbol: &str) -> Result<(), RuntimeError> {
        match symbol {
            "gamma" => self.rule4(),
            "beta" => self.rule8(),
            "Y*" => {
                self.stack.push(Value::YStar);
                Ok(())
            }
            op if BINARY_OPS.contains(&op) => self.rule6(op),
            op if UNARY_OPS.contains(&op) => self.rule7(op),
            other => Err(RuntimeError::UnknownInstruction(other.to_owned())),
        }
    }

    fn lookup_atom(&self, label: &str) -> Result<Value, RuntimeError> {
        let inner = label
            .strip_prefix('<')
            .and_then(|s| s.strip_suffix('>'))
            .unwrap_or(label);

        if let Some((tag, value)) = inner.split_once(':') {
            return match tag {
                "INT" => value
                    .parse::<i64>()
                    .map(Value::Int)
                    .map_err(|_| RuntimeError::UnknownInstruction(label.to_owned())),
                "STR" => Ok(Value::Str(value.trim_matches('\'').to_owned())),
                "ID" => {
                    if builtins::is_builtin(value) {
                        Ok(Value::BuiltIn(value.to_owned()))
                    } else {
                        self.envs
                            .lookup(self.current_environment, value)
                            .cloned()
                            .ok_or_else(|| RuntimeError::UndeclaredIdentifier(value.to_owned()))
                    }
                }
                _ => Err(RuntimeError::UnknownInstruction(label.to_owned())),
            };
        }

        match inner {
            "Y*" => Ok(Value::YStar),
            "nil" => Ok(Value::Tuple(vec![])),
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "dummy" => Ok(Value::Dummy),
            _ => Err(RuntimeError::UnknownInstruction(label.to_owned())),
        }
    }

    // Rule 4: function application.
    fn rule4(&mut self) -> Result<(), RuntimeError> {
        let rator = self.pop_value()?;
        let rand = self.pop_value()?;

        match rator {
            Value::Closure(desc) => self.enter_closure(desc, rand),

            // Rule 10: tuple selection.
            Value::Tuple(items) => {
                let Value::Int(n) = rand else {
                    return Err(RuntimeError::type_error("gamma", "integer index", &rand));
                };
                let index = usize::try_from(n - 1)
                    .ok()
                    .and_then(|i| items.get(i).cloned())
                    .ok_or(RuntimeError::StackUnderflow)?;
                self.stack.push(index);
                Ok(())
            }

            // Rule 12: Y* applied to a closure produces its fixed-point Eta.
            Value::YStar => {
                let Value::Closure(desc) = rand else {
                    return Err(RuntimeError::type_error("Y*", "function", &rand));
                };
                self.stack.push(Value::Eta(EtaDesc {
                    index: desc.index,
                    bound_vars: desc.bound_vars,
                    env: desc.env,
                }));
                Ok(())
            }

            // Rule 13: applying an Eta re-expands into (gamma, gamma, rand,
            // eta, reconstructed-closure): one gamma reapplies Y* to the
            // closure (regenerating another Eta for the next recursive
            // call), the other applies the resulting closure to `rand`.
            Value::Eta(desc) => {
                let closure = LambdaDesc {
                    index: desc.index,
                    bound_vars: desc.bound_vars.clone(),
                    env: desc.env,
                };
                self.control.push(ControlItem::symbol("gamma"));
                self.control.push(ControlItem::symbol("gamma"));
                self.stack.push(rand);
                self.stack.push(Value::Eta(desc));
                self.stack.push(Value::Closure(closure));
                Ok(())
            }

            Value::BuiltIn(name) => {
                builtins::call(&name, rand, &mut self.stack, &mut self.control, &mut self.print_present)
            }

            other => Err(RuntimeError::type_error("gamma", "function, tuple, or Y*", &other)),
        }
    }

    fn enter_closure(&mut self, desc: LambdaDesc, rand: Value) -> Result<(), RuntimeError> {
        let child = self.envs.create_child(desc.env);
        self.current_environment = child;

        // Rule 11: a multi-variable lambda destructures a tuple argument.
        if desc.bound_vars.len() > 1 {
            let Value::Tuple(items) = &rand else {
                return Err(RuntimeError::type_error(
                    "gamma",
                    "tuple argument",
                    &rand,
                ));
            };
            if items.len() != desc.bound_vars.len() {
                return Err(RuntimeError::TypeError {
                    op: "gamma".into(),
                    expected: format!("{}-tuple", desc.bound_vars.len()),
                    got: format!("{}-tuple", items.len()),
                });
            }
            for (name, value) in desc.bound_vars.iter().zip(items.iter()) {
                self.envs.bind(child, name.clone(), value.clone());
            }
        } else if let Some(name) = desc.bound_vars.first() {
            self.envs.bind(child, name.clone(), rand);
        }

        self.stack.push(Value::EnvMarker(child));
        self.control.push(ControlItem::EnvMarker(child));
        self.push_structure(desc.index);
        Ok(())
    }

    // Rule 5: restore the caller's environment once a call's body has
    // produced its result.
    fn rule5(&mut self, k: usize) -> Result<(), RuntimeError> {
        let result = self.pop_value()?;
        self.pop_value()?; // the env marker pushed alongside the call

        if self.current_environment != 0 {
            for element in self.stack.iter().rev() {
                if let Value::EnvMarker(idx) = element {
                    self.current_environment = *idx;
                    break;
                }
            }
        }
        let _ = k;
        self.stack.push(result);
        Ok(())
    }

    fn rule6(&mut self, op: &str) -> Result<(), RuntimeError> {
        let rand_1 = self.pop_value()?;
        let rand_2 = self.pop_value()?;

        let result = match op {
            "+" | "-" | "*" | "/" | "**" => self.arithmetic(op, &rand_1, &rand_2)?,
            "gr" | "ge" | "ls" | "le" | "eq" | "ne" => self.comparison(op, &rand_1, &rand_2)?,
            "or" => Value::Bool(as_bool(op, &rand_1)? || as_bool(op, &rand_2)?),
            "&" => Value::Bool(as_bool(op, &rand_1)? && as_bool(op, &rand_2)?),
            "aug" => self.aug(rand_1, rand_2)?,
            _ => unreachable!("BINARY_OPS is exhaustive"),
        };
        self.stack.push(result);
        Ok(())
    }

    fn arithmetic(&self, op: &str, rand_1: &Value, rand_2: &Value) -> Result<Value, RuntimeError> {
        let (Value::Int(a), Value::Int(b)) = (rand_1, rand_2) else {
            return Err(RuntimeError::type_error(op, "integer", rand_1));
        };
        Ok(match op {
            "+" => Value::Int(a + b),
            "-" => Value::Int(a - b),
            "*" => Value::Int(a * b),
            "/" => {
                if *b == 0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                Value::Int(a / b)
            }
            "**" => Value::Int(a.pow((*b).try_into().unwrap_or(0))),
            _ => unreachable!(),
        })
    }

    fn comparison(&self, op: &str, rand_1: &Value, rand_2: &Value) -> Result<Value, RuntimeError> {
        let (Value::Int(a), Value::Int(b)) = (rand_1, rand_2) else {
            return Err(RuntimeError::type_error(op, "integer", rand_1));
        };
        Ok(Value::Bool(match op {
            "gr" => a > b,
            "ge" => a >= b,
            "ls" => a < b,
            "le" => a <= b,
            "eq" => a == b,
            "ne" => a != b,
            _ => unreachable!(),
        }))
    }

    fn aug(&self, rand_1: Value, rand_2: Value) -> Result<Value, RuntimeError> {
        let Value::Tuple(mut items) = rand_1 else {
            return Err(RuntimeError::type_error("aug", "tuple", &rand_1));
        };
        match rand_2 {
            Value::Tuple(rest) => items.extend(rest),
            other => items.push(other),
        }
        Ok(Value::Tuple(items))
    }

    fn rule7(&mut self, op: &str) -> Result<(), RuntimeError> {
        let rand = self.pop_value()?;
        let result = match op {
            "not" => Value::Bool(!as_bool(op, &rand)?),
            "neg" => match rand {
                Value::Int(n) => Value::Int(-n),
                other => return Err(RuntimeError::type_error(op, "integer", &other)),
            },
            _ => unreachable!("UNARY_OPS is exhaustive"),
        };
        self.stack.push(result);
        Ok(())
    }

    // Rule 8: the conditional's guard has produced a boolean; select the
    // then or else control structure.
    fn rule8(&mut self) -> Result<(), RuntimeError> {
        let guard = self.pop_value()?;
        let else_part = self.pop_control()?;
        let then_part = self.pop_control()?;

        let ControlItem::Delta(else_delta) = else_part else {
            return Err(RuntimeError::UnknownInstruction("beta".into()));
        };
        let ControlItem::Delta(then_delta) = then_part else {
            return Err(RuntimeError::UnknownInstruction("beta".into()));
        };

        let taken = if as_bool("->", &guard)? {
            then_delta.index
        } else {
            else_delta.index
        };
        self.push_structure(taken);
        Ok(())
    }
}

fn as_bool(op: &str, value: &Value) -> Result<bool, RuntimeError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(RuntimeError::type_error(op, "truth value", other)),
    }
}
