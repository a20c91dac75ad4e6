//! Prop values to JSX attribute syntax.
//!
//! ```ignore
//! serialize_props(&props, &SerializeOptions::default())
//! // title="Hi" disabled hidden={false} count={3}
//! ```

use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuoteStyle {
    #[default]
    Double,
    Single,
}

impl QuoteStyle {
    pub fn as_char(&self) -> char {
        match self {
            QuoteStyle::Double => '"',
            QuoteStyle::Single => '\'',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    pub quotes: QuoteStyle,
    /// Spaces per nesting level in generated markup
    pub indent: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            quotes: QuoteStyle::Double,
            indent: 2,
        }
    }
}

/// Serialized text plus whether it must be wrapped in `{}` as an attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedValue {
    pub text: String,
    pub needs_braces: bool,
}

impl SerializedValue {
    fn braced(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            needs_braces: true,
        }
    }

    fn bare(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            needs_braces: false,
        }
    }
}

/// Escape backslash, newline, carriage return, tab and the active quote character
pub fn escape_string(s: &str, quotes: QuoteStyle) -> String {
    let quote = quotes.as_char();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

fn quote(s: &str, quotes: QuoteStyle) -> String {
    let q = quotes.as_char();
    format!("{}{}{}", q, escape_string(s, quotes), q)
}

/// Like [`serialize_value`], with `None` standing for an absent (`undefined`) value
pub fn serialize_optional(value: Option<&Value>, options: &SerializeOptions) -> SerializedValue {
    match value {
        Some(v) => serialize_value(v, options),
        None => SerializedValue::braced("undefined"),
    }
}

pub fn serialize_value(value: &Value, options: &SerializeOptions) -> SerializedValue {
    match value {
        Value::Null => SerializedValue::braced("null"),
        Value::String(s) => SerializedValue::bare(quote(s, options.quotes)),
        Value::Number(n) => SerializedValue::braced(format_number(n)),
        Value::Bool(true) => SerializedValue::bare("true"),
        Value::Bool(false) => SerializedValue::braced("false"),
        Value::Array(items) => {
            let items: Vec<String> = items
                .iter()
                .map(|v| serialize_value(v, options).text)
                .collect();
            SerializedValue::braced(format!("[{}]", items.join(", ")))
        }
        Value::Object(map) => match map.get("path") {
            Some(Value::String(path)) => {
                SerializedValue::braced(format!("{{ path: {} }}", quote(path, options.quotes)))
            }
            _ => SerializedValue::braced(serialize_object(map, options)),
        },
    }
}

fn serialize_object(map: &Map<String, Value>, options: &SerializeOptions) -> String {
    let entries: Vec<String> = map
        .iter()
        .map(|(k, v)| format!("{}: {}", k, serialize_value(v, options).text))
        .collect();
    format!("{{ {} }}", entries.join(", "))
}

/// Numbers print the way JavaScript's `String(n)` does: integral floats lose
/// the fractional part (`3.0` → `3`) and exponent form kicks in at `1e21` and
/// below `1e-6` (`1e+21`, `1.5e-7`).
fn format_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => js_number_string(f),
        _ => n.to_string(),
    }
}

fn js_number_string(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `1.5e-7`
    let sci = format!("{:e}", f.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        format!("{}.{}", &digits[..n as usize], &digits[n as usize..])
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat(-n as usize), digits)
    } else {
        let sign = if n > 0 { '+' } else { '-' };
        let e = (n - 1).abs();
        if k == 1 {
            format!("{}e{}{}", digits, sign, e)
        } else {
            format!("{}.{}e{}{}", &digits[..1], &digits[1..], sign, e)
        }
    };

    if f < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Render props as a space-separated attribute list.
///
/// Null props are dropped, `true` becomes a bare flag, strings are quoted and
/// everything else is wrapped in braces.
pub fn serialize_props(props: &Map<String, Value>, options: &SerializeOptions) -> String {
    let mut parts = Vec::with_capacity(props.len());
    for (key, value) in props {
        match value {
            Value::Null => continue,
            Value::Bool(true) => parts.push(key.clone()),
            _ => {
                let serialized = serialize_value(value, options);
                if serialized.needs_braces {
                    parts.push(format!("{}={{{}}}", key, serialized.text));
                } else {
                    parts.push(format!("{}={}", key, serialized.text));
                }
            }
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(v: Value) -> (String, bool) {
        let s = serialize_value(&v, &SerializeOptions::default());
        (s.text, s.needs_braces)
    }

    #[test]
    fn scalars() {
        assert_eq!(text(json!(null)), ("null".to_string(), true));
        assert_eq!(text(json!(true)), ("true".to_string(), false));
        assert_eq!(text(json!(false)), ("false".to_string(), true));
        assert_eq!(text(json!(42)), ("42".to_string(), true));
        assert_eq!(text(json!(-1.5)), ("-1.5".to_string(), true));
        assert_eq!(text(json!(3.0)), ("3".to_string(), true));
        assert_eq!(text(json!("hi")), ("\"hi\"".to_string(), false));
    }

    #[test]
    fn numbers_match_javascript_text() {
        let num = |f: f64| text(json!(f)).0;
        assert_eq!(num(0.1), "0.1");
        assert_eq!(num(123.456), "123.456");
        assert_eq!(num(1e20), "100000000000000000000");
        assert_eq!(num(1e21), "1e+21");
        assert_eq!(num(1.5e300), "1.5e+300");
        assert_eq!(num(-2.5e22), "-2.5e+22");
        assert_eq!(num(0.000001), "0.000001");
        assert_eq!(num(1.5e-7), "1.5e-7");
        assert_eq!(num(-0.0), "0");
    }

    #[test]
    fn absent_value_is_undefined() {
        let s = serialize_optional(None, &SerializeOptions::default());
        assert_eq!(s.text, "undefined");
        assert!(s.needs_braces);
    }

    #[test]
    fn escapes_control_characters_and_quotes() {
        assert_eq!(
            escape_string("a\\b\n\"c\"\t'd'\r", QuoteStyle::Double),
            "a\\\\b\\n\\\"c\\\"\\t'd'\\r"
        );
        assert_eq!(escape_string("it's \"ok\"", QuoteStyle::Single), "it\\'s \"ok\"");
    }

    #[test]
    fn single_quotes_option() {
        let opts = SerializeOptions {
            quotes: QuoteStyle::Single,
            ..SerializeOptions::default()
        };
        assert_eq!(serialize_value(&json!("it's"), &opts).text, "'it\\'s'");
        assert_eq!(
            serialize_value(&json!({"path": "a/b"}), &opts).text,
            "{ path: 'a/b' }"
        );
    }

    #[test]
    fn arrays_and_objects() {
        assert_eq!(
            text(json!(["a", 1, false, null])),
            ("[\"a\", 1, false, null]".to_string(), true)
        );
        assert_eq!(
            text(json!({"value": "x", "label": "X", "extra": [1]})),
            ("{ value: \"x\", label: \"X\", extra: [1] }".to_string(), true)
        );
        assert_eq!(text(json!({})), ("{  }".to_string(), true));
    }

    #[test]
    fn path_objects_use_shorthand() {
        assert_eq!(
            text(json!({"path": "user/\"name\"", "fallback": "x"})),
            ("{ path: \"user/\\\"name\\\"\" }".to_string(), true)
        );
        // non-string path falls back to a plain object
        assert_eq!(text(json!({"path": 1})), ("{ path: 1 }".to_string(), true));
    }

    #[test]
    fn props_rendering() {
        let props = json!({"title": "Hi", "disabled": true, "hidden": false, "count": 3, "tag": null});
        let rendered = serialize_props(props.as_object().unwrap(), &SerializeOptions::default());
        assert_eq!(rendered, "title=\"Hi\" disabled hidden={false} count={3}");
    }

    #[test]
    fn empty_props() {
        assert_eq!(serialize_props(&Map::new(), &SerializeOptions::default()), "");
    }
}
