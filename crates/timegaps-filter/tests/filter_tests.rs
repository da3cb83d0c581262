use timegaps_filter::period::{DAY, HOUR, MONTH, WEEK, YEAR};
use timegaps_filter::{
    Category, FilterConfig, Item, Period, RejectReason, RuleSet, TimeFilter, Verdict, decide,
};

/// Noon (UTC) on some day, far from the epoch.
const NOON: i64 = 19_000 * DAY + 12 * HOUR;

fn aged(id: &str, now: i64, age_days: f64) -> Item {
    Item::new(id, now - (age_days * DAY as f64).round() as i64)
}

fn verdicts(report: &timegaps_filter::FilterReport) -> Vec<(&str, Category, Verdict)> {
    report
        .decisions
        .iter()
        .map(|d| (d.id.as_str(), d.category, d.verdict))
        .collect()
}

#[test]
fn test_days2_scenario_at_noon() {
    let items = vec![
        aged("a", NOON, 0.1),
        aged("b", NOON, 1.1),
        aged("c", NOON, 1.9),
        aged("d", NOON, 2.5),
        aged("e", NOON, 3.5),
    ];
    let rules = RuleSet::parse("days2").unwrap();
    let report = decide(&items, &rules, NOON);

    assert_eq!(
        verdicts(&report),
        vec![
            ("a", Category::Recent, Verdict::Accepted),
            ("b", Category::Days, Verdict::Accepted),
            ("c", Category::Days, Verdict::Accepted),
            ("d", Category::Days, Verdict::Rejected(RejectReason::Duplicate)),
            ("e", Category::Days, Verdict::Rejected(RejectReason::OutOfRange)),
        ]
    );
    assert_eq!(report.decisions[1].period, Some(Period::Day(18_999)));
    assert_eq!(report.decisions[2].period, Some(Period::Day(18_998)));
    assert_eq!(report.decisions[3].period, Some(Period::Day(18_998)));
}

#[test]
fn test_days2_scenario_late_evening() {
    // At 23:00 the items aged 1.1 and 1.9 days share a calendar day.
    let now = 19_000 * DAY + 23 * HOUR;
    let items = vec![
        aged("a", now, 0.1),
        aged("b", now, 1.1),
        aged("c", now, 1.9),
        aged("d", now, 2.5),
        aged("e", now, 3.5),
    ];
    let rules = RuleSet::parse("days2").unwrap();
    let report = decide(&items, &rules, now);

    let accepted: Vec<&str> = report.accepted().map(|d| d.id.as_str()).collect();
    let rejected: Vec<&str> = report.rejected().map(|d| d.id.as_str()).collect();
    assert_eq!(accepted, vec!["a", "b", "d"]);
    assert_eq!(rejected, vec!["c", "e"]);
    assert_eq!(
        report.decisions[2].verdict,
        Verdict::Rejected(RejectReason::Duplicate)
    );
}

#[test]
fn test_recent_is_unlimited_unless_given() {
    let items: Vec<Item> = (0..5)
        .map(|i| Item::new(format!("fresh{i}"), NOON - i * 60))
        .collect();

    let report = decide(&items, &RuleSet::parse("years1").unwrap(), NOON);
    assert_eq!(report.accepted_count(), 5);

    let report = decide(&items, &RuleSet::parse("recent2,years1").unwrap(), NOON);
    let accepted: Vec<&str> = report.accepted().map(|d| d.id.as_str()).collect();
    assert_eq!(accepted, vec!["fresh0", "fresh1"]);

    let report = decide(&items, &RuleSet::parse("recent0,years1").unwrap(), NOON);
    assert_eq!(report.accepted_count(), 0);
    assert!(report.decisions.iter().all(|d| d.category == Category::Recent));
}

#[test]
fn test_recent_only_rules_keep_everything_recent() {
    let items = vec![
        Item::new("ancient", NOON - 30 * YEAR),
        Item::new("now", NOON),
    ];
    let report = decide(&items, &RuleSet::parse("recent10").unwrap(), NOON);
    assert_eq!(report.accepted_count(), 2);
    assert!(report.decisions.iter().all(|d| d.category == Category::Recent));
}

#[test]
fn test_future_items_are_protected() {
    let items = vec![Item::new("tomorrow", NOON + DAY)];
    let report = decide(&items, &RuleSet::parse("hours1,days1").unwrap(), NOON);
    assert_eq!(report.category_of(0), Some(Category::Recent));
    assert!(report.is_accepted(0));
}

#[test]
fn test_grandfather_father_son_rotation() {
    // One snapshot every 6 hours for 400 days.
    let items: Vec<Item> = (0..(400 * 4))
        .map(|i| Item::new(format!("snap-{i:04}"), NOON - i * 6 * HOUR))
        .collect();
    let rules = RuleSet::parse("hours6,days7,weeks4,months6,years1").unwrap();
    let filter = TimeFilter::with_config(rules, FilterConfig::at(NOON));
    let report = filter.decide(&items);

    for (category, limit) in [
        (Category::Hours, 6),
        (Category::Days, 7),
        (Category::Weeks, 4),
        (Category::Months, 6),
        (Category::Years, 1),
    ] {
        let summary = report.summary(category).unwrap();
        assert!(summary.accepted <= limit, "{category}: {summary:?}");
        assert_eq!(summary.accepted + summary.rejected, summary.items);
    }

    // The newest snapshot is recent and kept; the oldest is rejected.
    assert!(report.is_accepted(0));
    assert_eq!(report.category_of(0), Some(Category::Recent));
    assert!(!report.is_accepted(items.len() - 1));
    assert_eq!(report.accepted_count() + report.rejected_count(), items.len());
}

#[test]
fn test_band_boundaries_are_inclusive() {
    let rules = RuleSet::parse("hours1,days1,weeks1,months1,years1").unwrap();
    let items = vec![
        Item::new("h", NOON - HOUR),
        Item::new("d", NOON - DAY),
        Item::new("w", NOON - WEEK),
        Item::new("m", NOON - MONTH),
        Item::new("y", NOON - YEAR),
    ];
    let report = decide(&items, &rules, NOON);
    let categories: Vec<Category> = report.decisions.iter().map(|d| d.category).collect();
    assert_eq!(
        categories,
        vec![
            Category::Hours,
            Category::Days,
            Category::Weeks,
            Category::Months,
            Category::Years
        ]
    );
    assert_eq!(report.accepted_count(), 5);
}

#[test]
fn test_unconfigured_categories_do_not_form_bands() {
    let rules = RuleSet::parse("weeks2").unwrap();
    let items = vec![
        Item::new("three-days", NOON - 3 * DAY),
        Item::new("two-weeks", NOON - 2 * WEEK),
        Item::new("two-years", NOON - 2 * YEAR),
    ];
    let report = decide(&items, &rules, NOON);
    assert_eq!(report.category_of(0), Some(Category::Recent));
    assert_eq!(report.category_of(1), Some(Category::Weeks));
    assert_eq!(report.category_of(2), Some(Category::Weeks));
    assert!(report.is_accepted(0));
    assert!(report.is_accepted(1));
    assert!(report.is_accepted(2));
}

#[test]
fn test_report_serializes() {
    let rules = RuleSet::parse("days1").unwrap();
    let items = vec![Item::new("x", NOON - 2 * DAY), Item::new("y", NOON - 3 * DAY)];
    let report = decide(&items, &rules, NOON);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["rules"]["days"], 1);
    assert_eq!(json["decisions"][0]["verdict"], "accepted");
    assert_eq!(json["decisions"][1]["verdict"], "rejected");
    assert_eq!(json["decisions"][1]["reason"], "out_of_range");
    assert_eq!(json["decisions"][1]["category"], "days");
}
