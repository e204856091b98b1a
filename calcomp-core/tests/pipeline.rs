use std::collections::BTreeMap;

use calcomp_core::export::{export_csv, load_json, save_json};
use calcomp_core::rules::{MothersDayRule, RuleDiagnostic, RuleSet};
use calcomp_core::settings::{IncludeCountryList, InternationalDays};
use calcomp_core::sources::{CountryHolidays, FsSourceProvider, MemorySource, TemplateLayer};
use calcomp_core::{
    AggregateMap, DateKey, DayRecord, HolidayEntry, MonthDay, Pipeline, Settings, TemplateMap,
};

fn key(s: &str) -> DateKey {
    s.parse().unwrap()
}

fn template(days: &[(&str, &str, &str)]) -> TemplateMap {
    days.iter()
        .map(|(md, label, colour)| {
            let md: MonthDay = md.parse().unwrap();
            (md, DayRecord::from(HolidayEntry::new(*label, *colour)))
        })
        .collect()
}

fn national(days: &[(&str, &str)]) -> CountryHolidays {
    CountryHolidays {
        national: days.iter().map(|(d, n)| (key(d), n.to_string())).collect(),
        subdivisions: BTreeMap::new(),
    }
}

fn settings_2026() -> Settings {
    Settings {
        year: 2026,
        ..Default::default()
    }
}

fn christian_gb() -> RuleSet {
    RuleSet {
        christian: true,
        mothers_day: Some(MothersDayRule::MotheringSunday),
        ..Default::default()
    }
}

#[test_log::test]
fn test_local_rules_always_run() {
    let mut source = MemorySource::new();
    source.rules.insert("GB".to_string(), christian_gb());

    let report = Pipeline::new(source).build(&settings_2026()).unwrap();

    assert_eq!(report.year, 2026);
    assert_eq!(
        report.holidays.entries_on(&key("2026-04-05")),
        [HolidayEntry::new("Easter Sunday", "pink")]
    );
    assert_eq!(
        report.holidays.entries_on(&key("2026-03-22")),
        [HolidayEntry::new("Mother's Day (UK)", "pink")]
    );
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_identical_holidays_merge_across_countries() {
    let mut source = MemorySource::new();
    source
        .countries
        .insert("GB".to_string(), national(&[("2026-01-01", "New Year's Day")]));
    source
        .countries
        .insert("FR".to_string(), national(&[("2026-01-01", "New Year's Day")]));
    source
        .countries
        .insert("DE".to_string(), national(&[("2026-01-01", "New Year's Day")]));
    source.palette.countries.insert("FR".to_string(), "blue".to_string());
    source.palette.countries.insert("DE".to_string(), "blue".to_string());

    let mut settings = settings_2026();
    settings.include_days.uk_holidays = true;
    settings.include_days.country_list = true;
    settings.include_country_list = IncludeCountryList {
        countries: vec!["FR".to_string(), "DE".to_string()],
    };
    settings.merge_identical_holidays = true;

    let report = Pipeline::new(source).build(&settings).unwrap();

    assert_eq!(
        report.holidays.entries_on(&key("2026-01-01")),
        [HolidayEntry::new("New Year's Day (DE, FR)", "blue")]
    );
}

#[test]
fn test_identical_merge_disabled_keeps_entries() {
    let mut source = MemorySource::new();
    source
        .countries
        .insert("FR".to_string(), national(&[("2026-05-01", "Labour Day")]));
    source
        .countries
        .insert("DE".to_string(), national(&[("2026-05-01", "Labour Day")]));

    let mut settings = settings_2026();
    settings.include_days.country_list = true;
    settings.include_country_list.countries = vec!["FR".to_string(), "DE".to_string()];

    let report = Pipeline::new(source).build(&settings).unwrap();

    assert_eq!(
        report.holidays.entries_on(&key("2026-05-01")),
        [
            HolidayEntry::new("Labour Day (FR)", "grey"),
            HolidayEntry::new("Labour Day (DE)", "grey"),
        ]
    );
}

#[test]
fn test_subdivided_country_is_consolidated() {
    let mut au = national(&[("2026-12-25", "Christmas Day")]);
    au.subdivisions.insert(
        "NSW".to_string(),
        [(key("2026-12-25"), "Christmas Day".to_string())].into_iter().collect(),
    );
    au.subdivisions.insert(
        "VIC".to_string(),
        [
            (key("2026-12-25"), "Christmas Day".to_string()),
            (key("2026-11-03"), "Melbourne Cup".to_string()),
        ]
        .into_iter()
        .collect(),
    );

    let mut source = MemorySource::new();
    source.countries.insert("AU".to_string(), au);
    source.palette.regions.insert(
        "AU".to_string(),
        [("NATIONAL".to_string(), "#AD9200".to_string())].into_iter().collect(),
    );

    let mut settings = settings_2026();
    settings.include_days.country_list = true;
    settings.include_country_list.countries = vec!["au".to_string()];

    let report = Pipeline::new(source).build(&settings).unwrap();

    assert_eq!(
        report.holidays.entries_on(&key("2026-12-25")),
        [HolidayEntry::new("Christmas Day (National, NSW, VIC)", "#AD9200")]
    );
    assert_eq!(
        report.holidays.entries_on(&key("2026-11-03")),
        [HolidayEntry::new("Melbourne Cup (VIC)", "grey")]
    );
}

#[test]
fn test_conflicting_colours_across_layers_turn_black() {
    let source = MemorySource::new()
        .with_layer(TemplateLayer::Custom, template(&[("03-14", "Pi Day", "blue")]))
        .with_layer(TemplateLayer::Retro, template(&[("03-14", "Pi Day", "orange")]));

    let mut settings = settings_2026();
    settings.include_days.custom_events = true;
    settings.include_days.retro = true;

    let report = Pipeline::new(source).build(&settings).unwrap();

    assert_eq!(
        report.holidays.entries_on(&key("2026-03-14")),
        [HolidayEntry::new("Pi Day", "black")]
    );
}

#[test]
fn test_disabled_layers_are_skipped() {
    let mut source = MemorySource::new()
        .with_layer(TemplateLayer::Custom, template(&[("06-01", "Birthday", "gold")]))
        .with_layer(TemplateLayer::UkEvents, template(&[("01-25", "Burns Night", "blue")]));
    let mut religious = AggregateMap::new();
    religious.push(key("2026-04-02"), HolidayEntry::new("Passover", "#D28800"));
    source.religious.insert(2026, religious);

    let report = Pipeline::new(source).build(&settings_2026()).unwrap();

    assert!(report.holidays.get(&key("2026-06-01")).is_none());
    assert!(report.holidays.get(&key("2026-04-02")).is_none());
    assert_eq!(
        report.holidays.entries_on(&key("2026-01-25")),
        [HolidayEntry::new("Burns Night", "blue")]
    );
}

#[test]
fn test_international_layers_overwrite_in_order() {
    let source = MemorySource::new()
        .with_layer(TemplateLayer::Official, template(&[("03-08", "Women's Day", "purple")]))
        .with_layer(TemplateLayer::SemiOfficial, template(&[("04-22", "Earth Day", "green")]))
        .with_layer(TemplateLayer::Fun, template(&[("03-08", "Fun Thing", "pink")]));

    let mut settings = settings_2026();
    settings.include_days.international = Some(InternationalDays {
        semi_official: false,
        ..Default::default()
    });

    let report = Pipeline::new(source).build(&settings).unwrap();

    assert_eq!(
        report.holidays.entries_on(&key("2026-03-08")),
        [HolidayEntry::new("Fun Thing", "pink")]
    );
    assert!(report.holidays.get(&key("2026-04-22")).is_none());
}

#[test]
fn test_religious_and_cultural_layers() {
    let mut source = MemorySource::new();
    let mut religious = AggregateMap::new();
    religious.push(key("2026-04-02"), HolidayEntry::new("Passover", "#D28800"));
    source.religious.insert(2026, religious);
    source
        .cultural
        .insert("ALL".to_string(), template(&[("12-31", "New Year's Eve", "blue")]));
    source
        .cultural
        .insert("RO".to_string(), template(&[("02-24", "Dragobete (RO)", "mediumvioletred")]));
    source
        .cultural
        .insert("JP".to_string(), template(&[("07-07", "Tanabata (JP)", "teal")]));

    let mut settings = settings_2026();
    settings.include_days.religious = true;
    settings.include_days.country_list = true;
    settings.include_country_list.countries = vec!["RO".to_string()];

    let report = Pipeline::new(source).build(&settings).unwrap();
    let holidays = &report.holidays;

    assert_eq!(holidays.entries_on(&key("2026-04-02"))[0].label, "Passover");
    assert_eq!(holidays.entries_on(&key("2026-12-31"))[0].label, "New Year's Eve");
    assert_eq!(holidays.entries_on(&key("2026-02-24"))[0].label, "Dragobete (RO)");
    assert!(holidays.get(&key("2026-07-07")).is_none());
}

#[test]
fn test_rule_diagnostics_are_collected_per_country() {
    let mut source = MemorySource::new();
    source.rules.insert(
        "SE".to_string(),
        RuleSet {
            mothers_day: Some(MothersDayRule::Unknown("last_sunday_may".to_string())),
            ..Default::default()
        },
    );

    let mut settings = settings_2026();
    settings.include_days.country_list = true;
    settings.include_country_list.countries = vec!["se".to_string()];

    let report = Pipeline::new(source).build(&settings).unwrap();

    assert_eq!(report.diagnostics.len(), 1);
    assert!(matches!(
        &report.diagnostics[0],
        RuleDiagnostic::UnknownRule { country, .. } if country == "SE"
    ));
}

#[test]
fn test_leap_day_template_dropped_in_common_year() {
    let source = MemorySource::new()
        .with_layer(TemplateLayer::UkEvents, template(&[("02-29", "Leap Day", "teal")]));

    let mut settings = settings_2026();
    settings.year = 2027;
    let report = Pipeline::new(source.clone()).build(&settings).unwrap();
    assert!(report.holidays.is_empty());

    settings.year = 2028;
    let report = Pipeline::new(source).build(&settings).unwrap();
    assert_eq!(report.holidays.entry_count(), 1);
}

#[test_log::test]
fn test_build_from_config_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let write = |rel: &str, content: &str| {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    };

    write(
        "settings.json",
        r#"{"year": 2026, "local_country": "GB",
            "include_days": {"uk_holidays": true, "retro": true}}"#,
    );
    write(
        "holidays/GB.json",
        r#"{"NATIONAL": {"2026-12-25": "Christmas Day"},
            "SCT": {"2026-11-30": "St Andrew's Day"}}"#,
    );
    write(
        "events/retro_days.json",
        r#"{"05-04": {"label": "Star Wars Day", "colour": "black"}}"#,
    );
    write(
        "rules/variable_rules.json",
        r#"{"GB": {"yorkshire_pudding_day": "first_sunday_february"}}"#,
    );

    let settings = Settings::load(&root.join("settings.json")).unwrap();
    let mut pipeline = Pipeline::new(FsSourceProvider::new(root));
    let report = pipeline.build(&settings).unwrap();

    let holidays = &report.holidays;
    assert_eq!(holidays.entries_on(&key("2026-12-25"))[0].colour, "red");
    assert_eq!(holidays.entries_on(&key("2026-11-30"))[0].colour, "blue");
    assert_eq!(holidays.entries_on(&key("2026-05-04"))[0].label, "Star Wars Day");
    assert_eq!(
        holidays.entries_on(&key("2026-02-01"))[0].label,
        "Yorkshire Pudding Day"
    );

    let csv_path = root.join("holiday_export_2026.csv");
    export_csv(holidays, &csv_path).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("Date,Label,Colour\n2026-02-01,Yorkshire Pudding Day,goldenrod\n"));

    let json_path = root.join("holidays.json");
    save_json(holidays, &json_path, true).unwrap();
    assert_eq!(&load_json(&json_path).unwrap(), holidays);
}
