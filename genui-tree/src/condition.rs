use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::error::TreeError;

/// Comparison operators accepted in a visibility condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    pub const ALL: [CompareOp; 6] = [
        CompareOp::Eq,
        CompareOp::Neq,
        CompareOp::Gt,
        CompareOp::Gte,
        CompareOp::Lt,
        CompareOp::Lte,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "eq",
            CompareOp::Neq => "neq",
            CompareOp::Gt => "gt",
            CompareOp::Gte => "gte",
            CompareOp::Lt => "lt",
            CompareOp::Lte => "lte",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        CompareOp::ALL.into_iter().find(|op| op.as_str() == s)
    }
}

/// One side of a comparison: a bound data path or any other literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Path(String),
    Literal(Value),
}

impl Operand {
    fn from_value(value: Value) -> Self {
        if let Some(Value::String(path)) = value.get("path") {
            return Operand::Path(path.clone());
        }
        Operand::Literal(value)
    }

    fn to_value(&self) -> Value {
        match self {
            Operand::Path(path) => path_object(path),
            Operand::Literal(v) => v.clone(),
        }
    }

    fn resolve<'a>(&'a self, data: &'a Value) -> Option<&'a Value> {
        match self {
            Operand::Path(path) => resolve_path(data, path),
            Operand::Literal(v) => Some(v),
        }
    }
}

/// Visibility condition attached to an element.
///
/// JSON shapes:
/// - `true` / `false`: constant
/// - `{"path": "user/isAdmin"}`: truthiness of a bound value
/// - `{"and": [..]}`, `{"or": [..]}`, `{"not": cond}`
/// - `{"eq": [a, b]}` (also `neq`, `gt`, `gte`, `lt`, `lte`) where each operand
///   is a literal or `{"path": ..}`
///
/// An object carrying several of these keys is the conjunction of all of
/// them. Deserialization never fails: a shape outside the grammar is kept as
/// [`Condition::Unknown`] so the element it is attached to survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Condition {
    Literal(bool),
    Path(String),
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
    Compare { op: CompareOp, operands: Vec<Operand> },
    /// Unrecognized shape, kept verbatim. Evaluates to visible.
    Unknown(Value),
}

impl Condition {
    /// Strict parse; rejects anything outside the grammar
    pub fn parse(value: Value) -> Result<Self, TreeError> {
        let map = match value {
            Value::Bool(b) => return Ok(Condition::Literal(b)),
            Value::Object(map) => map,
            other => {
                return Err(TreeError::InvalidCondition(format!(
                    "expected a boolean or an object, got {}",
                    other
                )))
            }
        };

        let mut parts = Vec::new();
        for (key, value) in map {
            match key.as_str() {
                "path" => match value {
                    Value::String(p) => parts.push(Condition::Path(p)),
                    _ => return Err(TreeError::InvalidCondition("'path' must be a string".to_string())),
                },
                "and" => parts.push(Condition::And(parse_list(value, "and")?)),
                "or" => parts.push(Condition::Or(parse_list(value, "or")?)),
                "not" => parts.push(Condition::Not(Box::new(Condition::parse(value)?))),
                other => {
                    let Some(op) = CompareOp::parse(other) else {
                        tracing::debug!("Ignoring unknown condition key '{}'", other);
                        continue;
                    };
                    let Value::Array(items) = value else {
                        return Err(TreeError::InvalidCondition(format!(
                            "'{}' expects an operand list",
                            op.as_str()
                        )));
                    };
                    let operands = items.into_iter().map(Operand::from_value).collect();
                    parts.push(Condition::Compare { op, operands });
                }
            }
        }

        match parts.len() {
            0 => Err(TreeError::InvalidCondition(
                "expected one of path, and, or, not, eq, neq, gt, gte, lt, lte".to_string(),
            )),
            1 => Ok(parts.swap_remove(0)),
            _ => Ok(Condition::And(parts)),
        }
    }

    /// Add every data path referenced anywhere in this condition to `out`
    pub fn collect_paths(&self, out: &mut BTreeSet<String>) {
        match self {
            Condition::Literal(_) => {}
            Condition::Path(path) => {
                out.insert(path.clone());
            }
            Condition::And(items) | Condition::Or(items) => {
                for item in items {
                    item.collect_paths(out);
                }
            }
            Condition::Not(inner) => inner.collect_paths(out),
            Condition::Compare { operands, .. } => {
                for operand in operands {
                    if let Operand::Path(path) = operand {
                        out.insert(path.clone());
                    }
                }
            }
            Condition::Unknown(raw) => collect_raw_paths(raw, out),
        }
    }

    /// Evaluate against a data model. Missing paths are falsy.
    pub fn evaluate(&self, data: &Value) -> bool {
        match self {
            Condition::Literal(b) => *b,
            Condition::Path(path) => resolve_path(data, path).map(is_truthy).unwrap_or(false),
            Condition::And(items) => items.iter().all(|c| c.evaluate(data)),
            Condition::Or(items) => items.iter().any(|c| c.evaluate(data)),
            Condition::Not(inner) => !inner.evaluate(data),
            Condition::Compare { op, operands } => {
                let left = operands.first().and_then(|o| o.resolve(data));
                let right = operands.get(1).and_then(|o| o.resolve(data));
                compare(*op, left, right)
            }
            Condition::Unknown(_) => true,
        }
    }
}

impl From<Value> for Condition {
    fn from(value: Value) -> Self {
        match Condition::parse(value.clone()) {
            Ok(condition) => condition,
            Err(e) => {
                tracing::debug!("Keeping unrecognized condition {}: {}", value, e);
                Condition::Unknown(value)
            }
        }
    }
}

impl From<Condition> for Value {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Literal(b) => Value::Bool(b),
            Condition::Path(path) => path_object(&path),
            Condition::And(items) => tagged("and", Value::Array(items.into_iter().map(Value::from).collect())),
            Condition::Or(items) => tagged("or", Value::Array(items.into_iter().map(Value::from).collect())),
            Condition::Not(inner) => tagged("not", Value::from(*inner)),
            Condition::Compare { op, operands } => tagged(
                op.as_str(),
                Value::Array(operands.iter().map(Operand::to_value).collect()),
            ),
            Condition::Unknown(raw) => raw,
        }
    }
}

/// Best-effort path collection over a raw condition value. Visits the same
/// keys as the parsed grammar and skips whatever does not fit.
fn collect_raw_paths(value: &Value, out: &mut BTreeSet<String>) {
    let Value::Object(map) = value else {
        return;
    };
    if let Some(Value::String(path)) = map.get("path") {
        out.insert(path.clone());
    }
    for key in ["and", "or"] {
        if let Some(Value::Array(items)) = map.get(key) {
            for item in items {
                collect_raw_paths(item, out);
            }
        }
    }
    if let Some(inner) = map.get("not") {
        collect_raw_paths(inner, out);
    }
    for op in CompareOp::ALL {
        if let Some(Value::Array(operands)) = map.get(op.as_str()) {
            for operand in operands {
                if let Some(Value::String(path)) = operand.get("path") {
                    out.insert(path.clone());
                }
            }
        }
    }
}

fn parse_list(value: Value, name: &str) -> Result<Vec<Condition>, TreeError> {
    match value {
        Value::Array(items) => items.into_iter().map(Condition::parse).collect(),
        _ => Err(TreeError::InvalidCondition(format!("'{}' expects a list", name))),
    }
}

fn tagged(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

fn path_object(path: &str) -> Value {
    tagged("path", Value::String(path.to_string()))
}

/// Resolve a slash-separated path (`user/name`, `/items/0/title`) inside `data`
pub fn resolve_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .try_fold(data, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn compare(op: CompareOp, left: Option<&Value>, right: Option<&Value>) -> bool {
    match op {
        CompareOp::Eq => values_equal(left, right),
        CompareOp::Neq => !values_equal(left, right),
        _ => {
            let (Some(l), Some(r)) = (
                left.and_then(Value::as_f64),
                right.and_then(Value::as_f64),
            ) else {
                return false;
            };
            match op {
                CompareOp::Gt => l > r,
                CompareOp::Gte => l >= r,
                CompareOp::Lt => l < r,
                _ => l <= r,
            }
        }
    }
}

fn values_equal(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a.as_f64() == b.as_f64(),
        (a, b) => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: Value) -> Condition {
        Condition::parse(v).unwrap()
    }

    #[test]
    fn parses_nested_shapes() {
        let cond = parse(json!({"and": [{"path": "a"}, {"not": {"eq": [{"path": "b"}, 1]}}]}));
        assert_eq!(
            cond,
            Condition::And(vec![
                Condition::Path("a".to_string()),
                Condition::Not(Box::new(Condition::Compare {
                    op: CompareOp::Eq,
                    operands: vec![Operand::Path("b".to_string()), Operand::Literal(json!(1))],
                })),
            ])
        );
    }

    #[test]
    fn strict_parse_rejects_unknown_shape() {
        assert!(Condition::parse(json!({"xor": []})).is_err());
        assert!(Condition::parse(json!("visible")).is_err());
        assert!(Condition::parse(json!({"path": 3})).is_err());
    }

    #[test]
    fn any_operand_value_is_a_literal() {
        let cond = parse(json!({"eq": [{"path": "role"}, ["admin", "owner"]]}));
        assert_eq!(
            cond,
            Condition::Compare {
                op: CompareOp::Eq,
                operands: vec![
                    Operand::Path("role".to_string()),
                    Operand::Literal(json!(["admin", "owner"])),
                ],
            }
        );
        let data = json!({"role": ["admin", "owner"]});
        assert!(cond.evaluate(&data));

        let cond = parse(json!({"neq": [{"name": "x"}, 1]}));
        assert!(matches!(
            cond,
            Condition::Compare { ref operands, .. } if operands[0] == Operand::Literal(json!({"name": "x"}))
        ));
    }

    #[test]
    fn several_keys_form_a_conjunction() {
        let cond = parse(json!({"path": "a", "and": [{"path": "b"}]}));
        assert_eq!(
            cond,
            Condition::And(vec![
                Condition::Path("a".to_string()),
                Condition::And(vec![Condition::Path("b".to_string())]),
            ])
        );
        let mut paths = BTreeSet::new();
        cond.collect_paths(&mut paths);
        assert_eq!(paths.len(), 2);
        assert!(!cond.evaluate(&json!({"a": true})));
        assert!(cond.evaluate(&json!({"a": true, "b": 1})));
    }

    #[test]
    fn unrecognized_shape_is_kept_and_still_yields_paths() {
        let raw = json!({"and": [{"path": "a"}, "oops"], "gt": [{"path": "n"}, 1]});
        let cond: Condition = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(cond, Condition::Unknown(raw.clone()));
        assert!(cond.evaluate(&Value::Null));
        assert_eq!(Value::from(cond.clone()), raw);

        let mut paths = BTreeSet::new();
        cond.collect_paths(&mut paths);
        let expected: BTreeSet<String> = ["a", "n"].iter().map(|s| s.to_string()).collect();
        assert_eq!(paths, expected);

        let cond: Condition = serde_json::from_value(json!("visible")).unwrap();
        assert_eq!(cond, Condition::Unknown(json!("visible")));
    }

    #[test]
    fn serializes_back_to_json() {
        let raw = json!({"or": [true, {"gte": [{"path": "count"}, 3]}]});
        let cond = parse(raw.clone());
        assert_eq!(Value::from(cond), raw);
    }

    #[test]
    fn collects_every_path() {
        let cond = parse(json!({
            "or": [
                {"path": "a"},
                {"not": {"lt": [{"path": "b"}, {"path": "c"}]}},
                {"and": [{"neq": ["x", {"path": "d"}]}]}
            ]
        }));
        let mut paths = BTreeSet::new();
        cond.collect_paths(&mut paths);
        let expected: BTreeSet<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(paths, expected);
    }

    #[test]
    fn evaluates_against_data() {
        let data = json!({"user": {"name": "Ada", "age": 36, "admin": false}, "items": [1, 2]});
        assert!(parse(json!({"path": "user/name"})).evaluate(&data));
        assert!(!parse(json!({"path": "user/admin"})).evaluate(&data));
        assert!(!parse(json!({"path": "user/missing"})).evaluate(&data));
        assert!(parse(json!({"path": "/items/1"})).evaluate(&data));
        assert!(parse(json!({"gt": [{"path": "user/age"}, 30]})).evaluate(&data));
        assert!(parse(json!({"eq": [{"path": "user/age"}, 36.0]})).evaluate(&data));
        assert!(!parse(json!({"lt": [{"path": "user/name"}, 3]})).evaluate(&data));
        assert!(parse(json!({"and": [{"path": "user/name"}, {"not": {"path": "user/admin"}}]})).evaluate(&data));
        assert!(parse(json!(true)).evaluate(&Value::Null));
    }
}
