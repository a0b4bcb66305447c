//! Session state, history bounds, persistence, and the loader seam.

use crate::test_bot;
use aiml_bot::{
    AimlLoader, Bot, CategoryKey, CategoryMap, ParseError, TagKind, Template, DEFAULT_SESSION_ID,
    MAX_HISTORY,
};
use std::path::Path;
use std::sync::Arc;

#[test]
fn test_input_history_is_bounded() {
    let bot = test_bot();
    for i in 1..=11 {
        bot.respond(&format!("hi number {i}"), DEFAULT_SESSION_ID);
    }
    let history = bot.get_input_history(DEFAULT_SESSION_ID);
    assert_eq!(history.len(), MAX_HISTORY);
    // The oldest surviving entry is the second call's input.
    assert_eq!(history[0], "hi number 2");
    assert_eq!(history[9], "hi number 11");
    assert_eq!(bot.get_output_history(DEFAULT_SESSION_ID).len(), MAX_HISTORY);
}

#[test]
fn test_input_stack_is_empty_between_turns() {
    let bot = test_bot();
    bot.respond("test srai", DEFAULT_SESSION_ID);
    bot.respond("test sr test srai", DEFAULT_SESSION_ID);
    assert!(bot.get_input_stack(DEFAULT_SESSION_ID).is_empty());
}

#[test]
fn test_sessions_are_isolated() {
    let bot = test_bot();
    bot.set_predicate("gender", "male", "alpha");
    bot.set_predicate("gender", "female", "beta");
    assert_eq!(bot.respond("test condition name value", "alpha"), "You are handsome");
    assert_eq!(bot.respond("test condition name value", "beta"), "");
    assert_eq!(bot.get_predicate("gender", "gamma"), "");
}

#[test]
fn test_session_data_round_trip() {
    let bot = test_bot();
    bot.set_predicate("topic", "cheese", "alpha");
    bot.respond("test bot", "alpha");

    let snapshot = bot.get_session_data("alpha");
    assert_eq!(snapshot.predicates.get("topic").unwrap(), "cheese");
    assert_eq!(snapshot.input_history.len(), 1);

    bot.delete_session("alpha");
    assert_eq!(bot.get_predicate("topic", "alpha"), "");

    bot.set_session_data("alpha", snapshot);
    assert_eq!(bot.get_predicate("topic", "alpha"), "cheese");
}

#[test]
#[should_panic(expected = "reserved session state")]
fn test_reserved_keys_are_rejected() {
    let bot = test_bot();
    bot.get_predicate("<INPUT STACK>", DEFAULT_SESSION_ID);
}

#[test]
fn test_brain_file_round_trip() {
    let bot = test_bot();
    let categories_before = bot.category_count();
    let file = tempfile::NamedTempFile::new().unwrap();
    bot.save_brain(file.path()).unwrap();

    let reloaded = Bot::builder()
        .brain_file(file.path())
        .rng_seed(7)
        .build()
        .unwrap();
    assert_eq!(reloaded.category_count(), categories_before);
    assert_eq!(
        reloaded.respond("test bot", DEFAULT_SESSION_ID),
        "My name is Nameless"
    );
}

#[test]
fn test_missing_brain_file_is_an_error() {
    assert!(Bot::builder()
        .brain_file("/nonexistent/missing.brn")
        .build()
        .is_err());
}

struct StubLoader;

impl AimlLoader for StubLoader {
    fn parse(&self, _path: &Path) -> Result<CategoryMap, ParseError> {
        let mut categories = CategoryMap::new();
        categories.insert(
            CategoryKey::new("STUB RULE", "", ""),
            Template::element(TagKind::Template).with_child(Template::text("stub loaded")),
        );
        Ok(categories)
    }
}

#[test]
fn test_learn_resolves_against_the_install_root() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("extra.aiml"), "<aiml/>").unwrap();

    let bot = Bot::builder()
        .loader(Box::new(StubLoader))
        .install_root(dir.path())
        .build()
        .unwrap();
    bot.learn("extra.aiml");
    assert_eq!(bot.respond("stub rule", DEFAULT_SESSION_ID), "stub loaded");
}

#[test]
fn test_concurrent_respond_calls_serialize() {
    let bot = Arc::new(test_bot());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let bot = Arc::clone(&bot);
            std::thread::spawn(move || {
                let session = format!("thread-{i}");
                for _ in 0..5 {
                    assert_eq!(bot.respond("test srai", &session), "srai test passed");
                }
                assert!(bot.get_input_stack(&session).is_empty());
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
