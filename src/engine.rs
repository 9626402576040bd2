//! Placeholder substitution engine.
//!
//! Expands `{{token}}`-style placeholders in free text against a resolved
//! variable bag. Recognized constructs:
//!
//! - `{{name}}` — value interpolation
//! - `{{formatDate value}}` — "January 5, 2025"
//! - `{{truncate value 100}}` — first N chars + `...` when too long
//! - `{{uppercase value}}` / `{{lowercase value}}`
//! - `{{#ifEquals a b}}…{{else}}…{{/ifEquals}}` — two-way branch on strict
//!   equality of the resolved values; branches are recursively expanded and
//!   `{{else}}` may be omitted
//!
//! Expansion policies:
//!
//! - A missing variable resolves to the empty string, never the raw token.
//! - `null` renders as the empty string; numbers and booleans in display
//!   form; arrays and objects as compact JSON.
//! - An unterminated `{{`, an unknown helper, or an unclosed block is a
//!   [`Error::TemplateSyntax`] surfaced to the caller. A stray `}}` with no
//!   opener is treated as literal text.
//! - `formatDate` on an unparsable input passes the input through unchanged.
//!
//! The engine is stateless and reentrant; nothing is cached across calls.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::Error;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const IF_EQUALS_OPEN: &str = "{{#ifEquals";
const IF_EQUALS_CLOSE: &str = "{{/ifEquals}}";
const ELSE_TAG: &str = "{{else}}";

/// Expand every placeholder in `template` against `vars`.
pub fn expand(template: &str, vars: &HashMap<String, Value>) -> Result<String, Error> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        if is_if_equals_open(rest) {
            rest = expand_if_equals(rest, vars, &mut out)?;
        } else {
            rest = expand_inline(rest, vars, &mut out)?;
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// True when `input` starts an `{{#ifEquals …}}` opener. The helper name
/// must end at a whitespace boundary, so `{{#ifEqualsFoo}}` is not a block
/// opener and falls through to the unknown-helper error.
fn is_if_equals_open(input: &str) -> bool {
    input
        .strip_prefix(IF_EQUALS_OPEN)
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_whitespace)
}

/// Expand a single inline `{{…}}` expression at the head of `input`.
/// Returns the remainder after the closing braces.
fn expand_inline<'a>(
    input: &'a str,
    vars: &HashMap<String, Value>,
    out: &mut String,
) -> Result<&'a str, Error> {
    let body_start = OPEN.len();
    let close = input[body_start..].find(CLOSE).ok_or_else(|| {
        Error::TemplateSyntax(format!("unbalanced braces near `{}`", snippet(input)))
    })?;

    let content = input[body_start..body_start + close].trim();
    let rest = &input[body_start + close + CLOSE.len()..];

    if content.starts_with('/') || content == "else" {
        return Err(Error::TemplateSyntax(format!(
            "`{{{{{}}}}}` outside of a block",
            content
        )));
    }
    if content.starts_with('#') {
        return Err(Error::TemplateSyntax(format!(
            "unsupported block helper `{}`",
            content
        )));
    }

    let args = split_args(content)?;
    let rendered = match args.split_first() {
        None => String::new(),
        Some((head, tail)) => match (head.as_word(), tail.len()) {
            (Some("formatDate"), 1) => helper_format_date(&resolve(&tail[0], vars)),
            (Some("truncate"), 2) => {
                let text = value_to_string(&resolve(&tail[0], vars));
                let max = numeric_arg(&tail[1], vars).ok_or_else(|| {
                    Error::TemplateSyntax("truncate expects a numeric length".to_string())
                })?;
                truncate(&text, max)
            }
            (Some("uppercase"), 1) => value_to_string(&resolve(&tail[0], vars)).to_uppercase(),
            (Some("lowercase"), 1) => value_to_string(&resolve(&tail[0], vars)).to_lowercase(),
            (_, 0) => value_to_string(&resolve(head, vars)),
            _ => {
                return Err(Error::TemplateSyntax(format!(
                    "unknown helper `{}`",
                    content
                )))
            }
        },
    };

    out.push_str(&rendered);
    Ok(rest)
}

/// Expand a `{{#ifEquals a b}}…{{/ifEquals}}` block at the head of `input`.
/// Returns the remainder after the closing tag.
fn expand_if_equals<'a>(
    input: &'a str,
    vars: &HashMap<String, Value>,
    out: &mut String,
) -> Result<&'a str, Error> {
    let body_start = IF_EQUALS_OPEN.len();
    let close = input[body_start..].find(CLOSE).ok_or_else(|| {
        Error::TemplateSyntax(format!("unbalanced braces near `{}`", snippet(input)))
    })?;

    let arg_text = input[body_start..body_start + close].trim();
    let args = split_args(arg_text)?;
    if args.len() != 2 {
        return Err(Error::TemplateSyntax(format!(
            "ifEquals expects exactly two arguments, got {}",
            args.len()
        )));
    }

    let body = &input[body_start + close + CLOSE.len()..];
    let (then_branch, else_branch, rest) = split_block(body)?;

    // Strict equality of the resolved values: "1" (string) never equals
    // 1 (number).
    let equal = resolve(&args[0], vars) == resolve(&args[1], vars);
    let chosen = if equal { then_branch } else { else_branch };
    out.push_str(&expand(chosen, vars)?);
    Ok(rest)
}

/// Split a block body into (then, else, remainder-after-close), honoring
/// nested `ifEquals` blocks.
fn split_block(body: &str) -> Result<(&str, &str, &str), Error> {
    let mut depth = 0usize;
    let mut else_at: Option<usize> = None;
    let mut pos = 0usize;

    while let Some(offset) = body[pos..].find(OPEN) {
        let at = pos + offset;
        let tail = &body[at..];

        if is_if_equals_open(tail) {
            depth += 1;
            pos = at + IF_EQUALS_OPEN.len();
        } else if tail.starts_with(IF_EQUALS_CLOSE) {
            if depth == 0 {
                let then_end = else_at.unwrap_or(at);
                let then_branch = &body[..then_end];
                let else_branch = match else_at {
                    Some(e) => &body[e + ELSE_TAG.len()..at],
                    None => "",
                };
                return Ok((then_branch, else_branch, &body[at + IF_EQUALS_CLOSE.len()..]));
            }
            depth -= 1;
            pos = at + IF_EQUALS_CLOSE.len();
        } else if tail.starts_with(ELSE_TAG) && depth == 0 {
            if else_at.is_some() {
                return Err(Error::TemplateSyntax(
                    "duplicate {{else}} in ifEquals block".to_string(),
                ));
            }
            else_at = Some(at);
            pos = at + ELSE_TAG.len();
        } else {
            pos = at + OPEN.len();
        }
    }

    Err(Error::TemplateSyntax(
        "unclosed {{#ifEquals}} block".to_string(),
    ))
}

/// One parsed argument of a placeholder expression.
#[derive(Debug, PartialEq)]
enum Arg {
    /// Bare word: a variable name, helper name, or numeric literal.
    Word(String),
    /// Double-quoted string literal.
    Literal(String),
}

impl Arg {
    fn as_word(&self) -> Option<&str> {
        match self {
            Arg::Word(w) => Some(w.as_str()),
            Arg::Literal(_) => None,
        }
    }
}

/// Split expression content on whitespace, keeping quoted literals intact.
fn split_args(content: &str) -> Result<Vec<Arg>, Error> {
    let mut args = Vec::new();
    let mut chars = content.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '"' {
            chars.next();
            let mut literal = String::new();
            let mut closed = false;
            for (_, c) in chars.by_ref() {
                if c == '"' {
                    closed = true;
                    break;
                }
                literal.push(c);
            }
            if !closed {
                return Err(Error::TemplateSyntax(format!(
                    "unterminated string literal in `{}`",
                    content
                )));
            }
            args.push(Arg::Literal(literal));
        } else {
            let mut end = start;
            while let Some(&(i, c)) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }
            args.push(Arg::Word(content[start..end].to_string()));
        }
    }

    Ok(args)
}

/// Resolve an argument to a value: quoted literals and numeric literals as
/// themselves, anything else as a variable lookup (missing → null).
fn resolve(arg: &Arg, vars: &HashMap<String, Value>) -> Value {
    match arg {
        Arg::Literal(s) => Value::String(s.clone()),
        Arg::Word(w) => {
            if let Ok(n) = w.parse::<i64>() {
                return Value::Number(n.into());
            }
            if let Ok(f) = w.parse::<f64>() {
                if let Some(n) = serde_json::Number::from_f64(f) {
                    return Value::Number(n);
                }
            }
            vars.get(w).cloned().unwrap_or(Value::Null)
        }
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn numeric_arg(arg: &Arg, vars: &HashMap<String, Value>) -> Option<usize> {
    match resolve(arg, vars) {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// "January 5, 2025"-style long date. Unparsable input passes through.
fn helper_format_date(value: &Value) -> String {
    let raw = value_to_string(value);
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return dt.format("%B %-d, %Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return date.format("%B %-d, %Y").to_string();
    }
    raw
}

/// Truncate to `max` characters, trimming trailing whitespace before the
/// literal `...` suffix. Text at or under the limit is returned unchanged.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}

fn snippet(input: &str) -> &str {
    let end = input
        .char_indices()
        .nth(20)
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    &input[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_plain_text_unchanged() {
        let out = expand("no placeholders here", &HashMap::new()).unwrap();
        assert_eq!(out, "no placeholders here");
    }

    #[test]
    fn test_simple_interpolation() {
        let out = expand("Hi {{first_name}}!", &vars(&[("first_name", json!("Ana"))])).unwrap();
        assert_eq!(out, "Hi Ana!");
    }

    #[test]
    fn test_missing_key_is_empty() {
        let out = expand("Hi {{nobody}}!", &HashMap::new()).unwrap();
        assert_eq!(out, "Hi !");
    }

    #[test]
    fn test_null_is_empty() {
        let out = expand("id={{user_id}}", &vars(&[("user_id", Value::Null)])).unwrap();
        assert_eq!(out, "id=");
    }

    #[test]
    fn test_number_and_bool_display() {
        let v = vars(&[("year", json!(2025)), ("flag", json!(true))]);
        assert_eq!(expand("{{year}} {{flag}}", &v).unwrap(), "2025 true");
    }

    #[test]
    fn test_uppercase_lowercase() {
        let v = vars(&[("name", json!("Ana"))]);
        assert_eq!(expand("{{uppercase name}}", &v).unwrap(), "ANA");
        assert_eq!(expand("{{lowercase name}}", &v).unwrap(), "ana");
    }

    #[test]
    fn test_format_date() {
        let v = vars(&[("when", json!("2025-01-05T12:00:00Z"))]);
        assert_eq!(expand("{{formatDate when}}", &v).unwrap(), "January 5, 2025");

        let v = vars(&[("when", json!("2025-01-05"))]);
        assert_eq!(expand("{{formatDate when}}", &v).unwrap(), "January 5, 2025");
    }

    #[test]
    fn test_format_date_passthrough() {
        let v = vars(&[("when", json!("not a date"))]);
        assert_eq!(expand("{{formatDate when}}", &v).unwrap(), "not a date");
    }

    #[test]
    fn test_truncate_helper() {
        let v = vars(&[("text", json!("hello world"))]);
        assert_eq!(expand("{{truncate text 5}}", &v).unwrap(), "hello...");

        let v = vars(&[("text", json!("hi"))]);
        assert_eq!(expand("{{truncate text 5}}", &v).unwrap(), "hi");
    }

    #[test]
    fn test_truncate_trims_trailing_whitespace() {
        // "hello " cut at 6 chars would end in a space.
        assert_eq!(truncate("hello world", 6), "hello...");
    }

    #[test]
    fn test_truncate_bad_length_errors() {
        let v = vars(&[("text", json!("hello"))]);
        let err = expand("{{truncate text nope}}", &v).unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax(_)));
    }

    #[test]
    fn test_if_equals_then_branch() {
        let v = vars(&[("plan", json!("pro"))]);
        let out = expand(
            "{{#ifEquals plan \"pro\"}}Thanks for subscribing{{else}}Upgrade today{{/ifEquals}}",
            &v,
        )
        .unwrap();
        assert_eq!(out, "Thanks for subscribing");
    }

    #[test]
    fn test_if_equals_else_branch() {
        let v = vars(&[("plan", json!("free")), ("name", json!("Ana"))]);
        let out = expand(
            "{{#ifEquals plan \"pro\"}}Thanks{{else}}Upgrade, {{name}}{{/ifEquals}}",
            &v,
        )
        .unwrap();
        assert_eq!(out, "Upgrade, Ana");
    }

    #[test]
    fn test_if_equals_without_else() {
        let out = expand(
            "{{#ifEquals a b}}same{{/ifEquals}}done",
            &vars(&[("a", json!(1)), ("b", json!(2))]),
        )
        .unwrap();
        assert_eq!(out, "done");
    }

    #[test]
    fn test_if_equals_strict() {
        // String "1" is not number 1.
        let out = expand(
            "{{#ifEquals a 1}}eq{{else}}ne{{/ifEquals}}",
            &vars(&[("a", json!("1"))]),
        )
        .unwrap();
        assert_eq!(out, "ne");
    }

    #[test]
    fn test_if_equals_nested() {
        let v = vars(&[("a", json!(1)), ("b", json!(1)), ("c", json!(2))]);
        let out = expand(
            "{{#ifEquals a b}}outer {{#ifEquals a c}}inner-eq{{else}}inner-ne{{/ifEquals}}{{/ifEquals}}",
            &v,
        )
        .unwrap();
        assert_eq!(out, "outer inner-ne");
    }

    #[test]
    fn test_unbalanced_braces_error() {
        let err = expand("Hi {{first_name", &HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax(_)));
    }

    #[test]
    fn test_unclosed_block_error() {
        let err = expand("{{#ifEquals a b}}never closed", &HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax(_)));
    }

    #[test]
    fn test_unknown_helper_error() {
        let err = expand("{{shout name}}", &HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax(_)));
    }

    #[test]
    fn test_block_helper_name_must_match_exactly() {
        let v = vars(&[("a", json!("x")), ("b", json!("x"))]);
        let err = expand("{{#ifEqualsFoo a b}}same{{/ifEquals}}", &v).unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax(_)));
    }

    #[test]
    fn test_stray_close_is_literal() {
        let out = expand("a }} b", &HashMap::new()).unwrap();
        assert_eq!(out, "a }} b");
    }

    #[test]
    fn test_orphan_close_tag_errors() {
        let err = expand("text {{/ifEquals}}", &HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax(_)));
    }
}
