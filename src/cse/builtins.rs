//! The fixed table of built-in procedures: `Order`, `Print`/`print`,
//! `Conc`, `Stern`, `Stem`, `Isinteger`, `Istruthvalue`, `Isstring`,
//! `Istuple`, `Isfunction`, `ItoS`.

use super::instr::ControlItem;
use super::value::Value;
use super::RuntimeError;

pub const BUILTINS: &[&str] = &[
    "Order",
    "Print",
    "print",
    "Conc",
    "Stern",
    "Stem",
    "Isinteger",
    "Istruthvalue",
    "Isstring",
    "Istuple",
    "Isfunction",
    "ItoS",
];

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

/// Dispatch a call to a built-in. `Conc` is the oddity: it is curried over
/// two arguments but resolved in a single call, so it reaches past its own
/// `argument` to pop the second operand straight off the value stack and
/// cancels the outer `gamma` that would otherwise try to apply its result.
pub fn call(
    name: &str,
    argument: Value,
    stack: &mut Vec<Value>,
    control: &mut Vec<ControlItem>,
    print_present: &mut bool,
) -> Result<(), RuntimeError> {
    match name {
        "Order" => {
            let Value::Tuple(items) = &argument else {
                return Err(RuntimeError::type_error("Order", "tuple", &argument));
            };
            stack.push(Value::Int(items.len() as i64));
        }
        "Print" | "print" => {
            *print_present = true;
            let value = match argument {
                Value::Str(s) => Value::Str(s.replace("\\n", "\n").replace("\\t", "\t")),
                other => other,
            };
            stack.push(value);
        }
        "Conc" => {
            let second = stack.pop().ok_or(RuntimeError::StackUnderflow)?;
            control.pop();
            let (Value::Str(a), Value::Str(b)) = (&argument, &second) else {
                return Err(RuntimeError::type_error("Conc", "string", &argument));
            };
            stack.push(Value::Str(format!("{a}{b}")));
        }
        "Stern" => {
            let Value::Str(s) = &argument else {
                return Err(RuntimeError::type_error("Stern", "string", &argument));
            };
            stack.push(Value::Str(s.chars().skip(1).collect()));
        }
        "Stem" => {
            let Value::Str(s) = &argument else {
                return Err(RuntimeError::type_error("Stem", "string", &argument));
            };
            let first = s.chars().next().map(|c| c.to_string()).unwrap_or_default();
            stack.push(Value::Str(first));
        }
        "Isinteger" => stack.push(Value::Bool(matches!(argument, Value::Int(_)))),
        "Istruthvalue" => stack.push(Value::Bool(matches!(argument, Value::Bool(_)))),
        "Isstring" => stack.push(Value::Bool(matches!(argument, Value::Str(_)))),
        "Istuple" => stack.push(Value::Bool(matches!(argument, Value::Tuple(_)))),
        "Isfunction" => stack.push(Value::Bool(argument.is_function())),
        "ItoS" => {
            let Value::Int(n) = &argument else {
                return Err(RuntimeError::type_error("ItoS", "integer", &argument));
            };
            stack.push(Value::Str(n.to_string()));
        }
        _ => return Err(RuntimeError::UnknownBuiltin(name.to_owned())),
    }
    Ok(())
}
