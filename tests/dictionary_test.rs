//! Dictionary store lifecycle and per-dictionary views.

use std::sync::Arc;
use std::thread;

use wordveil::{Dictionary, FilterError, WordFilter, DEFAULT_DICTIONARY_NAME};

fn french() -> Dictionary {
    Dictionary::new("fr").with_words(["fountain", "verde"])
}

#[test]
fn add_words_to_default_dictionary() {
    let filter = WordFilter::default();
    filter.add_words(["flower", "bees"], None);
    let dict = filter.get_dictionary(None);
    assert_eq!(dict.name(), DEFAULT_DICTIONARY_NAME);
    assert_eq!(dict.words(), ["flower", "bees"]);
}

#[test]
fn duplicate_words_are_kept() {
    let filter = WordFilter::default();
    filter.add_words(["flower"], None);
    filter.add_words(["flower", "bees"], None);
    assert_eq!(filter.get_dictionary(None).words(), ["flower", "flower", "bees"]);
    assert_eq!(filter.sanitize("a flower", None, None), "a ******");
}

#[test]
fn add_dictionary_registers_new_name() {
    let filter = WordFilter::default();
    assert!(filter.add_dictionary(french()).is_ok());
    assert!(filter.has_dictionary("fr"));
}

#[test]
fn add_dictionary_twice_fails_and_keeps_first() {
    let filter = WordFilter::default();
    filter.add_dictionary(french()).unwrap();

    let err = filter
        .add_dictionary(Dictionary::new("fr").with_words(["other"]))
        .unwrap_err();
    assert_eq!(err, FilterError::DictionaryExists("fr".to_string()));
    assert_eq!(err.to_string(), "Dictionary \"fr\" already exists");
    assert_eq!(filter.get_dictionary(Some("fr")).words(), ["fountain", "verde"]);
    assert!(!filter.check("other", Some("fr")));
}

#[test]
fn add_dictionary_fails_for_implicitly_created_name() {
    let filter = WordFilter::default();
    filter.check("anything", Some("es"));
    assert!(filter.add_dictionary(Dictionary::new("es")).is_err());
}

#[test]
fn dictionaries_are_isolated() {
    let filter = WordFilter::default();
    filter.add_dictionary(french()).unwrap();
    assert!(!filter.check("fountain", None));
    assert!(filter.check("fountain", Some("fr")));
}

#[test]
fn removing_a_word_from_named_dictionary() {
    let filter = WordFilter::default();
    filter.add_dictionary(french()).unwrap();
    filter.remove_words(["fountain"], Some("fr"));
    assert!(!filter.check("fountain", Some("fr")));
    assert!(filter.check("verde", Some("fr")));
}

#[test]
fn removing_unknown_words_is_a_no_op() {
    let filter = WordFilter::default();
    filter.add_words(["flower"], None);
    filter.remove_words(["tulip"], None);
    assert_eq!(filter.get_dictionary(None).words(), ["flower"]);
}

#[test]
fn has_dictionary_does_not_create() {
    let filter = WordFilter::default();
    assert!(!filter.has_dictionary("de"));
    assert!(!filter.has_dictionary("de"));
}

#[test]
fn get_dictionary_creates_empty_dictionary() {
    let filter = WordFilter::default();
    let dict = filter.get_dictionary(Some("de"));
    assert_eq!(dict.name(), "de");
    assert!(dict.words().is_empty());
    assert!(dict.pattern().is_none());
    assert!(filter.has_dictionary("de"));
}

#[test]
fn get_dictionary_returns_a_snapshot() {
    let filter = WordFilter::default();
    filter.add_words(["flower"], None);
    let before = filter.get_dictionary(None);
    filter.add_words(["bees"], None);
    assert_eq!(before.words(), ["flower"]);
    assert_eq!(filter.get_dictionary(None).words(), ["flower", "bees"]);
}

#[test]
fn remove_dictionary_deletes_and_tolerates_missing() {
    let filter = WordFilter::default();
    filter.add_dictionary(french()).unwrap();
    filter.remove_dictionary(Some("fr"));
    assert!(!filter.has_dictionary("fr"));
    filter.remove_dictionary(Some("fr"));
    filter.remove_dictionary(Some("never-existed"));
    assert!(filter.add_dictionary(french()).is_ok());
}

#[test]
fn clean_dictionary_empties_word_list() {
    let filter = WordFilter::default();
    filter.add_words(["flower", "bees"], None);
    filter.clean_dictionary(None);
    let dict = filter.get_dictionary(None);
    assert!(dict.words().is_empty());
    assert!(dict.pattern().is_none());
    assert!(!filter.check("a flower", None));
    assert_eq!(filter.sanitize("a flower", None, None), "a flower");
}

#[test]
fn instances_do_not_share_dictionaries() {
    let first = WordFilter::default();
    let second = WordFilter::default();
    first.add_words(["flower"], None);
    assert!(first.check("flower", None));
    assert!(!second.check("flower", None));
}

#[test]
fn bound_view_targets_one_dictionary() {
    let filter = WordFilter::default();
    let fr = filter.filter_by_dictionary(Some("fr"));
    assert_eq!(fr.name(), "fr");

    fr.add_words(["fountain", "verde"]);
    assert!(fr.check("a fountain"));
    assert!(filter.check("a fountain", Some("fr")));
    assert!(!filter.check("a fountain", None));
    assert_eq!(fr.sanitize("a fountain", None), "a ********");

    fr.remove_words(["fountain"]);
    assert!(!fr.check("a fountain"));
    assert_eq!(fr.get_dictionary().words(), ["verde"]);

    fr.clean_dictionary();
    assert!(filter.get_dictionary(Some("fr")).words().is_empty());
}

#[test]
fn bound_view_sees_changes_made_through_filter() {
    let filter = WordFilter::default();
    let view = filter.filter_by_dictionary(None);
    assert_eq!(view.name(), DEFAULT_DICTIONARY_NAME);
    filter.add_words(["bees"], None);
    assert!(view.check("two bees"));
}

#[test]
fn filter_is_shareable_across_threads() {
    let filter = Arc::new(WordFilter::default());
    filter.add_words(["flower"], None);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let filter = Arc::clone(&filter);
            thread::spawn(move || {
                let name = format!("lang-{}", i);
                filter.add_words(["bees"], Some(&name));
                assert!(filter.check("two bees", Some(&name)));
                filter.sanitize("a flower", None, None).into_owned()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "a ******");
    }
    assert_eq!(filter.dictionary_names().len(), 5);
}

#[test]
fn words_added_one_at_a_time_stay_fast() {
    let filter = WordFilter::default();
    filter.add_words(["(broken"], None);

    let start = std::time::Instant::now();
    for i in 0..400 {
        filter.add_words([format!("word{}s?", i)], None);
        if i % 100 == 0 {
            assert!(filter.check(&format!("say word{}", i), None));
        }
    }
    let elapsed = start.elapsed();

    assert!(filter.check("say word399s", None));
    assert!(!filter.check("say word400", None));
    assert_eq!(filter.get_dictionary(None).skipped(), 1);
    assert!(elapsed.as_secs() < 10, "Incremental adds took too long: {:?}", elapsed);
}
