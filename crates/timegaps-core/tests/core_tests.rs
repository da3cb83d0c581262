use std::time::{Duration, UNIX_EPOCH};

use timegaps_core::{Category, Item, Retention, RuleSet, RulesError, TokenFault};

#[test]
fn test_parser_scenarios() {
    let rules = RuleSet::parse("days5").unwrap();
    assert_eq!(rules.retention(Category::Days), Retention::Keep(5));
    for category in [
        Category::Hours,
        Category::Weeks,
        Category::Months,
        Category::Years,
    ] {
        assert_eq!(rules.retention(category), Retention::Keep(0));
    }
    assert_eq!(rules.retention(Category::Recent), Retention::Unlimited);

    assert_eq!(RuleSet::parse(""), Err(RulesError::EmptyRules));

    match RuleSet::parse("foo5") {
        Err(RulesError::InvalidToken { token, fault }) => {
            assert_eq!(token, "foo5");
            assert_eq!(fault, TokenFault::UnknownCategory("foo".into()));
        }
        other => panic!("unexpected result: {other:?}"),
    }

    assert_eq!(
        RuleSet::parse("days5,days3"),
        Err(RulesError::DuplicateCategory {
            category: Category::Days
        })
    );

    assert!(matches!(
        RuleSet::parse("days5,,weeks2"),
        Err(RulesError::EmptyToken { .. })
    ));
}

#[test]
fn test_full_rules_string() {
    let rules: RuleSet = "days5,weeks4,months12,years5".parse().unwrap();
    assert_eq!(rules.count(Category::Days), 5);
    assert_eq!(rules.count(Category::Weeks), 4);
    assert_eq!(rules.count(Category::Months), 12);
    assert_eq!(rules.count(Category::Years), 5);
    assert_eq!(rules.count(Category::Hours), 0);
    assert!(!rules.is_explicit(Category::Hours));
    assert_eq!(rules.to_string(), "days5,weeks4,months12,years5");
}

#[test]
fn test_every_category_name_parses() {
    let rules = RuleSet::parse("recent1,hours2,days3,weeks4,months5,years6").unwrap();
    for (expected, category) in Category::ALL.iter().enumerate() {
        assert_eq!(rules.count(*category), expected as u32 + 1);
    }
}

#[test]
fn test_rules_builder_rejects_duplicates() {
    let rules = RuleSet::new()
        .with(Category::Weeks, 2)
        .and_then(|r| r.with(Category::Days, 1))
        .unwrap();
    assert_eq!(rules.to_string(), "weeks2,days1");

    let dup = rules.with(Category::Weeks, 7);
    assert_eq!(
        dup,
        Err(RulesError::DuplicateCategory {
            category: Category::Weeks
        })
    );
}

#[test]
fn test_rules_serialize_as_ordered_map() {
    let rules = RuleSet::parse("weeks4,days5").unwrap();
    let json = serde_json::to_string(&rules).unwrap();
    assert_eq!(json, r#"{"weeks":4,"days":5}"#);

    let back: RuleSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, rules);
}

#[test]
fn test_item_from_system_time() {
    let item = Item::with_system_time("backup.tar", UNIX_EPOCH + Duration::from_secs(86_400));
    assert_eq!(item.id, "backup.tar");
    assert_eq!(item.modified, 86_400);
    assert_eq!(item.age(86_400 + 5), 5);
}
