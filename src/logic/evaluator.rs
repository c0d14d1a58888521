// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Pure field evaluation against a [`FieldRule`].
//!
//! Checks run in a fixed order and the first failure wins:
//! required, empty-but-optional, pattern, length, numeric bounds, custom
//! predicate, and finally the attached file for the upload field.

use crate::models::fields::FieldInput;
use crate::models::rules::{FieldRule, RuleSet};

/// Outcome of evaluating one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
    pub message: Option<String>,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Evaluate `input` against `rule`.
///
/// # Examples
///
/// ```ignore
/// let rules = RuleSet::base();
/// let verdict = evaluate(rules.get("age").unwrap(), FieldInput::Text("51"));
/// assert!(!verdict.valid);
/// ```
pub fn evaluate(rule: &FieldRule, input: FieldInput<'_>) -> Verdict {
    let value = match input {
        FieldInput::Text(raw) => raw.trim(),
        FieldInput::Checkbox(checked) => {
            if checked {
                "on"
            } else {
                ""
            }
        }
        FieldInput::File(attachment) => attachment.map(|a| a.name.as_str()).unwrap_or(""),
    };

    if rule.required && value.is_empty() {
        return Verdict::fail(&rule.message);
    }
    if value.is_empty() {
        return Verdict::pass();
    }

    if let Some(pattern) = &rule.pattern
        && !pattern.is_match(value)
    {
        return Verdict::fail(&rule.message);
    }

    let length = value.chars().count();
    if rule.min_length.is_some_and(|min| length < min)
        || rule.max_length.is_some_and(|max| length > max)
    {
        return Verdict::fail(&rule.message);
    }

    // Unparsable input compares as neither below nor above the bounds.
    let number = parse_leading_number(value);
    if let (Some(min), Some(n)) = (rule.min, number)
        && n < min
    {
        return Verdict::fail(&rule.message);
    }
    if let (Some(max), Some(n)) = (rule.max, number)
        && n > max
    {
        return Verdict::fail(&rule.message);
    }

    if let Some(custom) = rule.custom
        && !custom(value)
    {
        return Verdict::fail(&rule.message);
    }

    if let FieldInput::File(Some(attachment)) = input
        && let Err(rejection) = attachment.validate()
    {
        return Verdict::fail(rejection.to_string());
    }

    Verdict::pass()
}

/// Evaluate a field by name; fields without an active rule always pass.
pub fn evaluate_field(rules: &RuleSet, field: &str, input: FieldInput<'_>) -> Verdict {
    match rules.get(field) {
        Some(rule) => evaluate(rule, input),
        None => Verdict::pass(),
    }
}

/// Parse the longest numeric prefix of `raw`, ignoring trailing garbage.
///
/// `"42abc"` reads as 42 and `"1e3x"` as 1000; input with no leading number
/// yields `None`.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].parse::<f64>().ok();
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
