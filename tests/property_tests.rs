//! Property tests for entries and line parsing

use proptest::prelude::*;
use runconf::{ConfigEntry, ConfigStore};

proptest! {
    #[test]
    fn prop_text_round_trips_through_store(
        token in "[A-Za-z_][A-Za-z0-9_.]{0,15}",
        value in "[^\\s=#][^\\s=]{0,15}",
    ) {
        let mut store = ConfigStore::new();
        store.append_str(&format!("{} {}\n", token, value));
        prop_assert_eq!(store.get(&token).map(|e| e.text().to_string()), Some(value));
    }

    #[test]
    fn prop_decimal_strings_parse(x in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
        let raw = x.to_string();
        let entry = ConfigEntry::new(raw.as_str());
        prop_assert!(entry.success());
        prop_assert_eq!(entry.numeric_value(), raw.parse::<f64>().unwrap());
    }

    #[test]
    fn prop_integers_extract_cleanly(n in any::<i32>()) {
        let entry = ConfigEntry::new(n.to_string());
        prop_assert_eq!(entry.try_extract::<i32>().ok(), Some(n));
    }

    #[test]
    fn prop_alphabetic_words_are_not_numbers(word in "[a-hj-mo-z][a-z]{0,10}") {
        let entry = ConfigEntry::new(word);
        prop_assert!(!entry.success());
        prop_assert_eq!(entry.numeric_value(), 0.0);
    }
}
