//! Country-driven rules for moveable and rule-based holidays.

pub mod computus;
mod engine;

pub use engine::{VariableEvents, build_variable_events, christian_feasts};

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// Country code (ISO 3166 alpha-2, upper case) to that country's rules.
pub type RuleBook = BTreeMap<String, RuleSet>;

/// Which rule-based holidays a country observes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleSet {
    pub mothers_day: Option<MothersDayRule>,
    pub fathers_day: Option<FathersDayRule>,
    pub yorkshire_pudding_day: Option<YorkshirePuddingRule>,
    #[serde(default)]
    pub christian: bool,
    #[serde(default)]
    pub moveable_cultural: MoveableCultural,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoveableCultural {
    #[serde(default)]
    pub remembrance_sunday: bool,
    #[serde(default)]
    pub volkstrauertag: bool,
    #[serde(default)]
    pub florii: bool,
    #[serde(default)]
    pub blue_monday: bool,
    #[serde(default)]
    pub thanksgiving: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum MothersDayRule {
    /// UK: the Sunday three weeks after the first Sunday of March.
    MotheringSunday,
    SecondSundayMay,
    Unknown(String),
}

impl From<String> for MothersDayRule {
    fn from(id: String) -> Self {
        match id.as_str() {
            "mothering_sunday" => MothersDayRule::MotheringSunday,
            "second_sunday_may" => MothersDayRule::SecondSundayMay,
            _ => MothersDayRule::Unknown(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum FathersDayRule {
    ThirdSundayJune,
    /// Australia.
    FirstSundaySeptember,
    /// Recognised but not calculated.
    AscensionDay,
    Unknown(String),
}

impl From<String> for FathersDayRule {
    fn from(id: String) -> Self {
        match id.as_str() {
            "third_sunday_june" => FathersDayRule::ThirdSundayJune,
            "first_sunday_september" => FathersDayRule::FirstSundaySeptember,
            "ascension_day" => FathersDayRule::AscensionDay,
            _ => FathersDayRule::Unknown(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum YorkshirePuddingRule {
    FirstSundayFebruary,
    Unknown(String),
}

impl From<String> for YorkshirePuddingRule {
    fn from(id: String) -> Self {
        match id.as_str() {
            "first_sunday_february" => YorkshirePuddingRule::FirstSundayFebruary,
            _ => YorkshirePuddingRule::Unknown(id),
        }
    }
}

/// A rule that contributed nothing, reported instead of passing silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleDiagnostic {
    UnknownRule {
        country: String,
        field: &'static str,
        rule: String,
    },
    Unimplemented {
        country: String,
        field: &'static str,
        rule: &'static str,
    },
}

impl fmt::Display for RuleDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleDiagnostic::UnknownRule {
                country,
                field,
                rule,
            } => write!(f, "{}: unknown {} rule '{}'", country, field, rule),
            RuleDiagnostic::Unimplemented {
                country,
                field,
                rule,
            } => write!(f, "{}: {} rule '{}' is not implemented", country, field, rule),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_book_deserialises_known_and_unknown_ids() {
        let json = r#"{
            "GB": {
                "mothers_day": "mothering_sunday",
                "fathers_day": "third_sunday_june",
                "yorkshire_pudding_day": "first_sunday_february",
                "christian": true,
                "moveable_cultural": {"remembrance_sunday": true}
            },
            "SE": {"fathers_day": "second_sunday_november"}
        }"#;

        let book: RuleBook = serde_json::from_str(json).unwrap();
        let gb = &book["GB"];
        assert_eq!(gb.mothers_day, Some(MothersDayRule::MotheringSunday));
        assert!(gb.christian);
        assert!(gb.moveable_cultural.remembrance_sunday);
        assert!(!gb.moveable_cultural.florii);

        assert_eq!(
            book["SE"].fathers_day,
            Some(FathersDayRule::Unknown("second_sunday_november".to_string()))
        );
        assert!(!book["SE"].christian);
    }
}
