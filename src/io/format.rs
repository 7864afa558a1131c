// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Argument formatting for the script output

use crate::ast::{Kwargs, Value};
use crate::error::{Error, Result};
use std::fmt::Write;

/// Named arguments with this prefix are internal and never written
const INTERNAL_PREFIX: char = '_';

/// Keys the engine reads as special variables
const SPECIAL_KEYS: [&str; 3] = ["fa", "fs", "fn"];

/// Format a float with six decimals, trailing zeros and dot removed.
///
/// `1.0` is written as `1`, `0.25` as `0.25` and negative zero as `0`.
pub fn format_number(value: f64) -> String {
    let text = format!("{value:.6}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn is_identifier(text: &str) -> bool {
    let body = text.strip_prefix('$').unwrap_or(text);
    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn unrepresentable(value: &Value) -> Error {
    Error::Serialization {
        value: format!("{value:?}"),
        type_name: value.type_name(),
    }
}

/// Append a single argument value
pub fn write_value(out: &mut String, value: &Value) -> Result<()> {
    match value {
        Value::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
        Value::Int(v) => {
            let _ = write!(out, "{v}");
        }
        Value::Float(v) if !v.is_finite() => return Err(unrepresentable(value)),
        Value::Float(v) => out.push_str(&format_number(*v)),
        Value::Str(s) => {
            out.push('"');
            for c in s.chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    '\n' => out.push_str("\\n"),
                    _ => out.push(c),
                }
            }
            out.push('"');
        }
        Value::Ident(name) if !is_identifier(name) => return Err(unrepresentable(value)),
        Value::Ident(name) => out.push_str(name),
        Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item)?;
            }
            out.push(']');
        }
    }
    Ok(())
}

/// Key as written in the script: `fa`, `fs` and `fn` gain a `$` sigil
pub fn format_key(key: &str) -> String {
    if SPECIAL_KEYS.contains(&key) {
        format!("${key}")
    } else {
        key.to_owned()
    }
}

/// Append positional arguments in order, then named arguments by key
pub fn write_arguments(out: &mut String, args: &[Value], kwargs: &Kwargs) -> Result<()> {
    let mut first = true;
    for value in args {
        if !first {
            out.push(',');
        }
        first = false;
        write_value(out, value)?;
    }
    for (key, value) in kwargs {
        if key.starts_with(INTERNAL_PREFIX) {
            continue;
        }
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&format_key(key));
        out.push('=');
        write_value(out, value)?;
    }
    Ok(())
}
