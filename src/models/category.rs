// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Tournament categories and the teammate slots they unlock.

/// Highest teammate slot index any form layout has ever carried.
///
/// Display state is cleared for every slot up to this bound on a category
/// change, even though squads only use three.
pub const TEAMMATE_SLOT_LIMIT: usize = 4;

/// Tournament bracket the player registers for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Solo,
    Duo,
    Squad,
}

impl Category {
    /// All selectable categories in display order.
    pub const ALL: [Category; 3] = [Category::Solo, Category::Duo, Category::Squad];

    /// Parse the submitted form value; anything unknown maps to `None`.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// assert_eq!(Category::parse("duo"), Some(Category::Duo));
    /// assert_eq!(Category::parse(""), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "solo" => Some(Self::Solo),
            "duo" => Some(Self::Duo),
            "squad" => Some(Self::Squad),
            _ => None,
        }
    }

    /// Form value sent to the registration endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solo => "solo",
            Self::Duo => "duo",
            Self::Squad => "squad",
        }
    }

    /// Label shown in the category picker.
    pub fn label(self) -> &'static str {
        match self {
            Self::Solo => "Solo",
            Self::Duo => "Duo (2 players)",
            Self::Squad => "Squad (4 players)",
        }
    }

    /// Number of teammate rows that must be filled in.
    pub fn teammate_slots(self) -> usize {
        match self {
            Self::Solo => 0,
            Self::Duo => 1,
            Self::Squad => 3,
        }
    }

    /// Whether the team name and teammate section apply.
    pub fn is_team(self) -> bool {
        self.teammate_slots() > 0
    }
}

/// Field name of the game UID input for a 1-based teammate slot.
pub fn teammate_uid_field(slot: usize) -> String {
    format!("teammate{slot}UID")
}

/// Field name of the phone input for a 1-based teammate slot.
pub fn teammate_phone_field(slot: usize) -> String {
    format!("teammate{slot}Phone")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_values_only() {
        assert_eq!(Category::parse("solo"), Some(Category::Solo));
        assert_eq!(Category::parse(" squad "), Some(Category::Squad));
        assert_eq!(Category::parse("trio"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn slot_counts_match_bracket_sizes() {
        assert_eq!(Category::Solo.teammate_slots(), 0);
        assert_eq!(Category::Duo.teammate_slots(), 1);
        assert_eq!(Category::Squad.teammate_slots(), 3);
        assert!(!Category::Solo.is_team());
        assert!(Category::Duo.is_team());
    }

    #[test]
    fn teammate_field_names_are_one_based() {
        assert_eq!(teammate_uid_field(1), "teammate1UID");
        assert_eq!(teammate_phone_field(3), "teammate3Phone");
    }
}
