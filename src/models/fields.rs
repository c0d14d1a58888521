// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Registration form field catalog and the values typed into it.

use std::collections::BTreeMap;

use crate::models::category::{teammate_phone_field, teammate_uid_field};

/// Field name of the payment screenshot upload.
pub const SCREENSHOT_FIELD: &str = "screenshot";
/// Field name of the terms checkbox.
pub const TERMS_FIELD: &str = "terms";
/// Field name of the category picker.
pub const CATEGORY_FIELD: &str = "category";
/// Field whose input is normalised to digits while typing.
pub const PHONE_FIELD: &str = "phone";

/// Teammate rows rendered in the team section.
pub const TEAMMATE_ROWS: usize = 3;

pub const COUNTRIES: &[&str] = &[
    "India",
    "Bangladesh",
    "Nepal",
    "Pakistan",
    "Sri Lanka",
    "Indonesia",
    "Other",
];

pub const RANKS: &[&str] = &[
    "Bronze",
    "Silver",
    "Gold",
    "Platinum",
    "Diamond",
    "Heroic",
    "Grandmaster",
];

pub const EXPERIENCE_LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced", "Professional"];

/// How a field is rendered and what kind of value it carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Select(&'static [&'static str]),
}

/// Static description of a text-like field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub hint: &'static str,
}

const fn spec(
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    hint: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        hint,
    }
}

/// Player details, in form order.
pub const PLAYER_FIELDS: &[FieldSpec] = &[
    spec("playerName", "Full name", FieldKind::Text, "e.g., Arjun Rao"),
    spec("email", "Email", FieldKind::Email, "name@example.com"),
    spec(PHONE_FIELD, "Phone", FieldKind::Tel, "10-15 digits"),
    spec("age", "Age", FieldKind::Number, "13-50"),
    spec("country", "Country", FieldKind::Select(COUNTRIES), ""),
];

/// In-game profile, in form order.
pub const GAME_FIELDS: &[FieldSpec] = &[
    spec("gameId", "Game UID", FieldKind::Text, "At least 7 digits"),
    spec("ign", "In-game name", FieldKind::Text, "2-20 characters"),
    spec("rank", "Current rank", FieldKind::Select(RANKS), ""),
    spec(
        "experience",
        "Experience",
        FieldKind::Select(EXPERIENCE_LEVELS),
        "",
    ),
];

/// What the evaluator sees for a field at evaluation time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldInput<'a> {
    Text(&'a str),
    Checkbox(bool),
    File(Option<&'a crate::models::attachment::FileAttachment>),
}

/// Names of every text-valued field on the form, hidden team rows included.
pub fn text_field_names() -> Vec<String> {
    let mut names: Vec<String> = PLAYER_FIELDS
        .iter()
        .chain(GAME_FIELDS)
        .map(|f| f.name.to_string())
        .collect();
    names.push(CATEGORY_FIELD.to_string());
    names.push(crate::models::rules::TEAM_NAME_FIELD.to_string());
    for slot in 1..=TEAMMATE_ROWS {
        names.push(teammate_uid_field(slot));
        names.push(teammate_phone_field(slot));
    }
    names
}

/// Current contents of every form control except the upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormValues {
    text: BTreeMap<String, String>,
    /// Terms and conditions checkbox.
    pub terms: bool,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            text: text_field_names()
                .into_iter()
                .map(|name| (name, String::new()))
                .collect(),
            terms: false,
        }
    }
}

impl FormValues {
    /// Raw value of a text field; unknown names read as empty.
    pub fn get(&self, name: &str) -> &str {
        self.text.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: String) {
        self.text.insert(name.to_string(), value);
    }

    /// Iterate text fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.text.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Keep only digits of a typed phone number, capping long input at 15 digits.
///
/// Numbers shorter than ten digits are left at whatever length was typed.
pub fn normalize_phone_input(raw: &str) -> String {
    let mut digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 10 {
        digits.truncate(15);
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_input_keeps_digits_only() {
        assert_eq!(normalize_phone_input("+91 98-765"), "9198765");
        assert_eq!(normalize_phone_input("abc"), "");
    }

    #[test]
    fn long_phone_input_is_capped() {
        assert_eq!(normalize_phone_input("12345678901234567890"), "123456789012345");
        assert_eq!(normalize_phone_input("1234567890"), "1234567890");
    }

    #[test]
    fn default_values_cover_hidden_team_rows() {
        let values = FormValues::default();
        let names: Vec<&str> = values.iter().map(|(k, _)| k).collect();
        assert!(names.contains(&"teamName"));
        assert!(names.contains(&"teammate3Phone"));
        assert!(!names.contains(&"teammate4UID"));
        assert!(values.iter().all(|(_, v)| v.is_empty()));
        assert!(!values.terms);
    }

    #[test]
    fn unknown_field_reads_empty() {
        let mut values = FormValues::default();
        assert_eq!(values.get("nickname"), "");
        values.set("email", "a@b.com".into());
        assert_eq!(values.get("email"), "a@b.com");
    }
}
