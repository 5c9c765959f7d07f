//! The small expression grammar `conditional` actions evaluate.
//!
//! Three forms are understood, applied over the merged context view:
//!
//! - `field OP literal` for `=== !== > >= < <=`
//! - a bare field path, judged for truthiness
//! - `confirm(...)`, a stub that is always true
//!
//! Anything else is unresolvable and yields the engine's configured default
//! (fail-open `true` unless the host changes it).  Evaluation never panics.

use serde_json::Value;

use crate::context::ExecutionContext;

/// Comparison operators, longest spelling first so `>=` wins over `>`.
const OPERATORS: [(&str, Op); 6] = [
    ("===", Op::Eq),
    ("!==", Op::Ne),
    (">=", Op::Ge),
    ("<=", Op::Le),
    (">", Op::Gt),
    ("<", Op::Lt),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

/// Evaluate a condition expression against a context.
///
/// `default` is returned for anything unresolvable: an empty or malformed
/// expression, a comparison whose field is absent, or an ordering between
/// incomparable values.  A bare field that is simply absent is `false`, not
/// the default; absence is a legitimate answer to "is this set".
pub fn evaluate_condition(expression: &str, ctx: &ExecutionContext, default: bool) -> bool {
    let expr = expression.trim();
    if expr.is_empty() {
        return default;
    }
    if is_confirm(expr) {
        return true;
    }

    if let Some((lhs, op, rhs)) = split_comparison(expr) {
        let Some(value) = ctx.lookup(lhs) else {
            return default;
        };
        let Some(literal) = parse_literal(rhs) else {
            return default;
        };
        return compare(&value, op, &literal).unwrap_or(default);
    }

    if is_path(expr) {
        return ctx.lookup(expr).map(|v| truthy(&v)).unwrap_or(false);
    }

    default
}

fn is_confirm(expr: &str) -> bool {
    expr.starts_with("confirm(") && expr.ends_with(')')
}

fn is_path(expr: &str) -> bool {
    expr.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Split on the first operator found, scanning longest spellings first.
fn split_comparison(expr: &str) -> Option<(&str, Op, &str)> {
    for (symbol, op) in OPERATORS {
        if let Some(at) = expr.find(symbol) {
            let lhs = expr[..at].trim();
            let rhs = expr[at + symbol.len()..].trim();
            if lhs.is_empty() || rhs.is_empty() {
                return None;
            }
            return Some((lhs, op, rhs));
        }
    }
    None
}

/// Parse the right-hand side of a comparison.
///
/// Quoted text is a string, `true`/`false`/`null` are themselves, numbers
/// parse as numbers, and any other bare word is treated as a string literal
/// so config authors who forget quotes still get what they meant.
fn parse_literal(raw: &str) -> Option<Value> {
    if raw.len() >= 2 {
        let quoted = (raw.starts_with('\'') && raw.ends_with('\''))
            || (raw.starts_with('"') && raw.ends_with('"'));
        if quoted {
            return Some(Value::String(raw[1..raw.len() - 1].to_string()));
        }
    }
    match raw {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        "null" => return Some(Value::Null),
        _ => {}
    }
    if let Ok(n) = raw.parse::<f64>()
        && let Some(number) = serde_json::Number::from_f64(n)
    {
        return Some(Value::Number(number));
    }
    is_path(raw).then(|| Value::String(raw.to_string()))
}

/// Compare two values.  `None` means the pair is not comparable under the
/// given operator.
fn compare(lhs: &Value, op: Op, rhs: &Value) -> Option<bool> {
    match op {
        Op::Eq => Some(loosely_equal(lhs, rhs)),
        Op::Ne => Some(!loosely_equal(lhs, rhs)),
        Op::Gt | Op::Ge | Op::Lt | Op::Le => {
            let ordering = order(lhs, rhs)?;
            Some(match op {
                Op::Gt => ordering.is_gt(),
                Op::Ge => ordering.is_ge(),
                Op::Lt => ordering.is_lt(),
                Op::Le => ordering.is_le(),
                Op::Eq | Op::Ne => unreachable!(),
            })
        }
    }
}

/// Equality with numeric widening, so `42 === 42.0` holds.
fn loosely_equal(lhs: &Value, rhs: &Value) -> bool {
    if let (Some(a), Some(b)) = (as_number(lhs), as_number(rhs)) {
        return a == b;
    }
    lhs == rhs
}

fn order(lhs: &Value, rhs: &Value) -> Option<std::cmp::Ordering> {
    if let (Some(a), Some(b)) = (as_number(lhs), as_number(rhs)) {
        return a.partial_cmp(&b);
    }
    if let (Value::String(a), Value::String(b)) = (lhs, rhs) {
        return Some(a.cmp(b));
    }
    None
}

/// Numeric view of a value; numeric strings coerce.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// JavaScript-style truthiness.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
