use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use tracing::{debug, warn};

use super::computus::{
    advent_anchor, advent_sundays, nth_weekday, offset, orthodox_easter, western_easter,
};
use super::{FathersDayRule, MothersDayRule, RuleDiagnostic, RuleSet, YorkshirePuddingRule};
use crate::date_key::{MonthDay, bind_year};
use crate::holiday::{AggregateMap, DayRecord, HolidayEntry};

/// Output of one rule-engine run for one country.
#[derive(Debug, Clone, Default)]
pub struct VariableEvents {
    pub events: AggregateMap,
    pub diagnostics: Vec<RuleDiagnostic>,
}

/// Year-agnostic accumulator. Later insertions overwrite earlier ones on the
/// same day.
#[derive(Default)]
struct Templates(BTreeMap<MonthDay, HolidayEntry>);

impl Templates {
    fn set(&mut self, date: Option<NaiveDate>, label: &str, colour: &str) {
        if let Some(date) = date {
            self.0
                .insert(MonthDay::of(date), HolidayEntry::new(label, colour));
        }
    }

    fn bind(self, year: i32) -> AggregateMap {
        bind_year(year, &self.0)
            .into_iter()
            .map(|(date, entry)| (date, DayRecord::from(entry)))
            .collect()
    }
}

/// Compute every rule-based holiday `rules` enables for `country` in `year`.
///
/// Rules that cannot contribute (unknown identifiers, unimplemented rules)
/// are skipped and reported in [`VariableEvents::diagnostics`].
pub fn build_variable_events(year: i32, country: &str, rules: &RuleSet) -> VariableEvents {
    let country = country.to_uppercase();
    let mut days = Templates::default();
    let mut diagnostics = Vec::new();

    match &rules.mothers_day {
        Some(MothersDayRule::MotheringSunday) => {
            let first = nth_weekday(year, 3, Weekday::Sun, 1);
            days.set(
                first.and_then(|d| offset(d, 21)),
                "Mother's Day (UK)",
                "pink",
            );
        }
        Some(MothersDayRule::SecondSundayMay) => {
            days.set(nth_weekday(year, 5, Weekday::Sun, 2), "Mother's Day", "pink");
        }
        Some(MothersDayRule::Unknown(rule)) => diagnostics.push(RuleDiagnostic::UnknownRule {
            country: country.clone(),
            field: "mothers_day",
            rule: rule.clone(),
        }),
        None => {}
    }

    match &rules.fathers_day {
        Some(FathersDayRule::ThirdSundayJune) => {
            days.set(nth_weekday(year, 6, Weekday::Sun, 3), "Father's Day", "blue");
        }
        Some(FathersDayRule::FirstSundaySeptember) => {
            days.set(
                nth_weekday(year, 9, Weekday::Sun, 1),
                "Father's Day (AU)",
                "blue",
            );
        }
        Some(FathersDayRule::AscensionDay) => diagnostics.push(RuleDiagnostic::Unimplemented {
            country: country.clone(),
            field: "fathers_day",
            rule: "ascension_day",
        }),
        Some(FathersDayRule::Unknown(rule)) => diagnostics.push(RuleDiagnostic::UnknownRule {
            country: country.clone(),
            field: "fathers_day",
            rule: rule.clone(),
        }),
        None => {}
    }

    match &rules.yorkshire_pudding_day {
        Some(YorkshirePuddingRule::FirstSundayFebruary) => {
            days.set(
                nth_weekday(year, 2, Weekday::Sun, 1),
                "Yorkshire Pudding Day",
                "goldenrod",
            );
        }
        Some(YorkshirePuddingRule::Unknown(rule)) => {
            diagnostics.push(RuleDiagnostic::UnknownRule {
                country: country.clone(),
                field: "yorkshire_pudding_day",
                rule: rule.clone(),
            })
        }
        None => {}
    }

    if rules.christian {
        add_christian_feasts(&mut days, year);
    }

    let cultural = &rules.moveable_cultural;
    if cultural.remembrance_sunday {
        days.set(
            nth_weekday(year, 11, Weekday::Sun, 2),
            "Remembrance Sunday",
            "red",
        );
    }
    if cultural.volkstrauertag {
        days.set(
            advent_anchor(year).and_then(|d| offset(d, -14)),
            "Volkstrauertag (Germany)",
            "black",
        );
    }
    if cultural.florii {
        days.set(
            orthodox_easter(year).and_then(|d| offset(d, -7)),
            "Florii (Flowers Day) (RO)",
            "mediumvioletred",
        );
    }
    if cultural.blue_monday {
        days.set(nth_weekday(year, 1, Weekday::Mon, 3), "Blue Monday", "blue");
    }
    if cultural.thanksgiving {
        let thanksgiving = nth_weekday(year, 11, Weekday::Thu, 4);
        days.set(thanksgiving, "Thanksgiving (US)", "#D28800");
        days.set(thanksgiving.and_then(|d| offset(d, 1)), "Black Friday", "black");
    }

    for diagnostic in &diagnostics {
        warn!("{}", diagnostic);
    }

    let events = days.bind(year);
    debug!(country = %country, year, count = events.len(), "Computed variable events");

    VariableEvents {
        events,
        diagnostics,
    }
}

/// Easter-relative feasts and the four Sundays of Advent.
pub fn christian_feasts(year: i32) -> AggregateMap {
    let mut days = Templates::default();
    add_christian_feasts(&mut days, year);
    days.bind(year)
}

fn add_christian_feasts(days: &mut Templates, year: i32) {
    if let Some(easter) = western_easter(year) {
        days.set(Some(easter), "Easter Sunday", "pink");
        days.set(offset(easter, -2), "Good Friday", "red");
        days.set(offset(easter, -46), "Ash Wednesday", "grey");
        days.set(offset(easter, 39), "Ascension Day", "blue");
        days.set(offset(easter, 49), "Pentecost Sunday", "purple");
    }

    if let Some(sundays) = advent_sundays(year) {
        for (i, sunday) in sundays.into_iter().enumerate() {
            days.set(Some(sunday), &format!("Advent {}", i + 1), "purple");
        }
    }
}
