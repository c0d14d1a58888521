// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Declarative validation rules and the category-driven rule registry.
//!
//! Rule sets are immutable values: a category change builds a fresh
//! [`RuleSet`] via [`RuleSet::for_category`] instead of patching entries in
//! place, so no rules from a larger bracket can linger after switching down.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::category::{
    Category, TEAMMATE_SLOT_LIMIT, teammate_phone_field, teammate_uid_field,
};

static PLAYER_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s_-]+$").expect("player name pattern compiles"));
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone pattern compiles"));
static GAME_UID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7,}$").expect("game uid pattern compiles"));

/// Field holding the team name for duo/squad brackets.
pub const TEAM_NAME_FIELD: &str = "teamName";

/// Constraint set for one form field.
///
/// `message` is mandatory so that every failing check has something to show.
#[derive(Clone, Debug)]
pub struct FieldRule {
    pub required: bool,
    pub pattern: Option<Regex>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub custom: Option<fn(&str) -> bool>,
    pub message: String,
}

impl FieldRule {
    /// Start an unconstrained rule reporting `message` on failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            required: false,
            pattern: None,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
            custom: None,
            message: message.into(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn pattern(mut self, pattern: &Regex) -> Self {
        self.pattern = Some(pattern.clone());
        self
    }

    /// Character-count bounds, inclusive on both ends.
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    /// Numeric bounds, inclusive on both ends.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    #[cfg(test)]
    pub fn custom(mut self, predicate: fn(&str) -> bool) -> Self {
        self.custom = Some(predicate);
        self
    }
}

impl PartialEq for FieldRule {
    // Regex has no structural equality; the source pattern identifies it.
    fn eq(&self, other: &Self) -> bool {
        self.required == other.required
            && self.pattern.as_ref().map(Regex::as_str) == other.pattern.as_ref().map(Regex::as_str)
            && self.min_length == other.min_length
            && self.max_length == other.max_length
            && self.min == other.min
            && self.max == other.max
            && self.custom.is_some() == other.custom.is_some()
            && self.message == other.message
    }
}

/// Immutable mapping from field name to its active rule.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleSet {
    rules: BTreeMap<String, FieldRule>,
}

impl RuleSet {
    /// Rules that apply regardless of the selected category.
    pub fn base() -> Self {
        let mut rules = BTreeMap::new();
        let mut add = |name: &str, rule: FieldRule| {
            rules.insert(name.to_string(), rule);
        };

        add(
            "playerName",
            FieldRule::new("Please enter a valid name (2-50 characters)")
                .required()
                .length(2, 50)
                .pattern(&PLAYER_NAME_PATTERN),
        );
        add(
            "email",
            FieldRule::new("Please enter a valid email address")
                .required()
                .pattern(&EMAIL_PATTERN),
        );
        add(
            "phone",
            FieldRule::new("Please enter a valid phone number")
                .required()
                .pattern(&PHONE_PATTERN),
        );
        add(
            "age",
            FieldRule::new("Age must be between 13 and 50")
                .required()
                .range(13.0, 50.0),
        );
        add(
            "country",
            FieldRule::new("Please select your country").required(),
        );
        add(
            "gameId",
            FieldRule::new("Game ID must be at least 7 digits")
                .required()
                .pattern(&GAME_UID_PATTERN),
        );
        add(
            "ign",
            FieldRule::new("In-Game Name must be 2-20 characters")
                .required()
                .length(2, 20),
        );
        add(
            "rank",
            FieldRule::new("Please select your current rank").required(),
        );
        add(
            "experience",
            FieldRule::new("Please select your experience level").required(),
        );
        add(
            "category",
            FieldRule::new("Please select a tournament category").required(),
        );
        add(
            "screenshot",
            FieldRule::new("Please upload a payment screenshot").required(),
        );
        add(
            "terms",
            FieldRule::new("You must agree to the terms and conditions").required(),
        );

        Self { rules }
    }

    /// Full rule set for a category selection (`None` = nothing selected).
    ///
    /// Team categories add the team name and exactly as many teammate slots
    /// as the bracket needs; every other selection yields the base rules.
    pub fn for_category(category: Option<Category>) -> Self {
        let mut set = Self::base();
        let Some(category) = category.filter(|c| c.is_team()) else {
            return set;
        };

        set.rules.insert(
            TEAM_NAME_FIELD.to_string(),
            FieldRule::new("Team name is required for duo/squad categories")
                .required()
                .length(2, 30),
        );
        for slot in 1..=category.teammate_slots() {
            set.rules.insert(
                teammate_uid_field(slot),
                FieldRule::new(format!(
                    "Teammate {slot} Game UID must be at least 7 digits"
                ))
                .required()
                .pattern(&GAME_UID_PATTERN),
            );
            set.rules.insert(
                teammate_phone_field(slot),
                FieldRule::new(format!("Teammate {slot} phone must be valid"))
                    .required()
                    .pattern(&PHONE_PATTERN),
            );
        }
        set
    }

    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.rules.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.rules.contains_key(field)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }
}

/// Current category selection plus the rule set derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleRegistry {
    category: Option<Category>,
    rules: RuleSet,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self {
            category: None,
            rules: RuleSet::for_category(None),
        }
    }
}

impl RuleRegistry {
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Swap in the rule set for `category`.
    ///
    /// Returns the fields whose displayed error/success state is now stale:
    /// every teammate slot field, plus the team name when the new selection
    /// has no team section.
    pub fn set_category(&mut self, category: Option<Category>) -> Vec<String> {
        self.category = category;
        self.rules = RuleSet::for_category(category);

        let mut stale = Vec::with_capacity(TEAMMATE_SLOT_LIMIT * 2 + 1);
        if !category.is_some_and(Category::is_team) {
            stale.push(TEAM_NAME_FIELD.to_string());
        }
        for slot in 1..=TEAMMATE_SLOT_LIMIT {
            stale.push(teammate_uid_field(slot));
            stale.push(teammate_phone_field(slot));
        }
        stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_fields(set: &RuleSet) -> Vec<&str> {
        set.field_names()
            .into_iter()
            .filter(|name| name.starts_with("team"))
            .collect()
    }

    #[test]
    fn solo_has_no_team_rules() {
        let set = RuleSet::for_category(Some(Category::Solo));
        assert!(team_fields(&set).is_empty());
        assert_eq!(set, RuleSet::base());
    }

    #[test]
    fn duo_adds_team_name_and_one_slot() {
        let set = RuleSet::for_category(Some(Category::Duo));
        assert_eq!(
            team_fields(&set),
            vec!["teamName", "teammate1Phone", "teammate1UID"]
        );
        let team = set.get(TEAM_NAME_FIELD).unwrap();
        assert!(team.required);
        assert_eq!((team.min_length, team.max_length), (Some(2), Some(30)));
    }

    #[test]
    fn squad_adds_three_slots_with_indexed_messages() {
        let set = RuleSet::for_category(Some(Category::Squad));
        assert_eq!(team_fields(&set).len(), 7);
        assert_eq!(
            set.get("teammate3UID").unwrap().message,
            "Teammate 3 Game UID must be at least 7 digits"
        );
        assert_eq!(
            set.get("teammate2Phone").unwrap().message,
            "Teammate 2 phone must be valid"
        );
        assert!(!set.contains("teammate4UID"));
    }

    #[test]
    fn switching_categories_leaves_no_residual_rules() {
        let choices = [
            None,
            Some(Category::Solo),
            Some(Category::Duo),
            Some(Category::Squad),
        ];
        for first in choices {
            for second in choices {
                let mut switched = RuleRegistry::default();
                switched.set_category(first);
                switched.set_category(second);

                let mut fresh = RuleRegistry::default();
                fresh.set_category(second);

                assert_eq!(switched, fresh, "{first:?} -> {second:?}");
            }
        }
    }

    #[test]
    fn squad_to_duo_drops_upper_slots() {
        let mut registry = RuleRegistry::default();
        registry.set_category(Some(Category::Squad));
        registry.set_category(Some(Category::Duo));

        assert!(registry.rules().contains("teammate1UID"));
        assert!(!registry.rules().contains("teammate2UID"));
        assert!(!registry.rules().contains("teammate3Phone"));
    }

    #[test]
    fn set_category_is_idempotent() {
        let mut registry = RuleRegistry::default();
        registry.set_category(Some(Category::Duo));
        let once = registry.clone();
        registry.set_category(Some(Category::Duo));
        assert_eq!(registry, once);
    }

    #[test]
    fn leaving_team_categories_marks_team_name_stale() {
        let mut registry = RuleRegistry::default();
        let stale = registry.set_category(Some(Category::Squad));
        assert!(!stale.iter().any(|f| f == TEAM_NAME_FIELD));
        assert!(stale.iter().any(|f| f == "teammate4Phone"));

        let stale = registry.set_category(None);
        assert!(stale.iter().any(|f| f == TEAM_NAME_FIELD));
        assert!(!registry.rules().contains(TEAM_NAME_FIELD));
    }

    #[test]
    fn unset_registry_matches_initial_state() {
        let mut registry = RuleRegistry::default();
        registry.set_category(Some(Category::Squad));
        registry.set_category(None);
        assert_eq!(registry, RuleRegistry::default());
        assert_eq!(registry.rules().field_names().len(), 12);
    }
}
