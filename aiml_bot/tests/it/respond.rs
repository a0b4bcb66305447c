//! End-to-end scenarios: one respond() round trip per template tag.

use crate::test_bot;
use aiml_bot::{DEFAULT_SESSION_ID, VERSION};

fn ask(bot: &aiml_bot::Bot, input: &str) -> String {
    bot.respond(input, DEFAULT_SESSION_ID)
}

#[test]
fn test_bot_tag() {
    let bot = test_bot();
    assert_eq!(ask(&bot, "test bot"), "My name is Nameless");
}

#[test]
fn test_condition_name_value() {
    let bot = test_bot();
    bot.set_predicate("gender", "male", DEFAULT_SESSION_ID);
    assert_eq!(ask(&bot, "test condition name value"), "You are handsome");
    bot.set_predicate("gender", "female", DEFAULT_SESSION_ID);
    assert_eq!(ask(&bot, "test condition name value"), "");
}

#[test]
fn test_condition_list_forms() {
    let bot = test_bot();
    bot.set_predicate("gender", "female", DEFAULT_SESSION_ID);
    assert_eq!(ask(&bot, "test condition name"), "You are beautiful");
    bot.set_predicate("gender", "robot", DEFAULT_SESSION_ID);
    assert_eq!(ask(&bot, "test condition name"), "You are genderless");
    assert_eq!(ask(&bot, "test condition"), "You are genderless");
    bot.set_predicate("gender", "male", DEFAULT_SESSION_ID);
    assert_eq!(ask(&bot, "test condition"), "You are handsome");
}

#[test]
fn test_date_tag() {
    let bot = test_bot();
    let response = ask(&bot, "test date");
    assert!(
        response.starts_with("The date is "),
        "unexpected date response: {response:?}"
    );
}

#[test]
fn test_formal_tag() {
    let bot = test_bot();
    assert_eq!(ask(&bot, "test formal"), "Formal Test Passed");
}

#[test]
fn test_gender_tag() {
    let bot = test_bot();
    assert_eq!(
        ask(&bot, "test gender"),
        "He'd told her he heard that her hernia is history"
    );
}

#[test]
fn test_get_and_set_tags() {
    let bot = test_bot();
    assert_eq!(
        ask(&bot, "test get and set"),
        "I like cheese. My favorite food is cheese"
    );
    assert_eq!(
        bot.get_predicate("favorite-food", DEFAULT_SESSION_ID),
        "cheese"
    );
}

#[test]
fn test_gossip_and_javascript_behave_like_think() {
    let bot = test_bot();
    assert_eq!(ask(&bot, "test gossip"), "Gossip is not yet implemented");
    assert_eq!(ask(&bot, "test javascript"), "Javascript is not yet implemented");
}

#[test]
fn test_id_tag() {
    let bot = test_bot();
    assert_eq!(ask(&bot, "test id"), "Your id is anonymous");
    assert_eq!(
        bot.respond("test id", "somebody-else"),
        "Your id is somebody-else"
    );
}

#[test]
fn test_input_tag() {
    let bot = test_bot();
    assert_eq!(ask(&bot, "test input"), "You just said: test input");
}

#[test]
fn test_case_tags() {
    let bot = test_bot();
    assert_eq!(ask(&bot, "test lowercase"), "The Last Word Should Be lowercase");
    assert_eq!(ask(&bot, "test uppercase"), "The Last Word Should Be UPPERCASE");
}

#[test]
fn test_person_tags() {
    let bot = test_bot();
    assert_eq!(
        ask(&bot, "test person"),
        "HE think i knows that my actions threaten him and his."
    );
    assert_eq!(
        ask(&bot, "test person2"),
        "YOU think me know that my actions threaten you and yours."
    );
    // An empty <person2/> runs the star capture through the table.
    assert_eq!(ask(&bot, "test person2 I Love Lucy"), "YOU Love Lucy");
}

#[test]
fn test_random_tag() {
    let bot = test_bot();
    let expected = ["response #1", "response #2", "response #3"];
    for _ in 0..5 {
        let response = ask(&bot, "test random");
        assert!(expected.contains(&response.as_str()), "got {response:?}");
    }
    assert_eq!(ask(&bot, "test random empty"), "Nothing here!");
}

#[test]
fn test_sentence_tag() {
    let bot = test_bot();
    assert_eq!(
        ask(&bot, "test sentence"),
        "My first letter should be capitalized."
    );
}

#[test]
fn test_size_tag() {
    let bot = test_bot();
    assert_eq!(
        ask(&bot, "test size"),
        format!("I've learned {} categories", bot.category_count())
    );
}

#[test]
fn test_srai_tags() {
    let bot = test_bot();
    assert_eq!(ask(&bot, "test srai"), "srai test passed");
    assert_eq!(ask(&bot, "test sr test srai"), "srai results: srai test passed");
    assert_eq!(
        ask(&bot, "test nested sr test srai"),
        "srai results: srai test passed"
    );
}

#[test]
fn test_srai_infinite_terminates_empty() {
    let bot = test_bot();
    assert_eq!(ask(&bot, "test srai infinite"), "");
    assert!(bot.get_input_stack(DEFAULT_SESSION_ID).is_empty());
}

#[test]
fn test_star_tag() {
    let bot = test_bot();
    assert_eq!(
        ask(&bot, "intro scroll test star begin"),
        "Begin star matched: intro scroll"
    );
    assert_eq!(
        ask(&bot, "test star creamy goodness middle"),
        "Middle star matched: creamy goodness"
    );
    assert_eq!(
        ask(&bot, "test star end the credits roll"),
        "End star matched: the credits roll"
    );
    assert_eq!(
        ask(&bot, "test star having multiple stars in a pattern makes me extremely happy"),
        "Multiple stars matched: having, stars in a pattern, extremely happy"
    );
}

#[cfg(unix)]
#[test]
fn test_system_and_that_tags() {
    let bot = test_bot();
    assert_eq!(ask(&bot, "test system"), "The system says hello!");
    assert_eq!(ask(&bot, "test that"), "I just said: The system says hello!");
    // The previous response now matches the category's that-pattern.
    assert_eq!(ask(&bot, "test that"), "I have already answered this question");
}

#[test]
fn test_that_sentence_index() {
    let bot = test_bot();
    assert_eq!(ask(&bot, "test sentences"), "First thing. Second thing.");
    assert_eq!(ask(&bot, "test that sentence"), "Second thing.");
}

#[test]
fn test_thatstar_tag() {
    let bot = test_bot();
    assert_eq!(ask(&bot, "test thatstar"), "I say beans");
    assert_eq!(ask(&bot, "test thatstar"), "I just said \"beans\"");

    assert_eq!(
        ask(&bot, "test thatstar multiple"),
        "I say beans and franks for everybody"
    );
    assert_eq!(
        ask(&bot, "test thatstar multiple"),
        "Yes, beans and franks for all!"
    );
}

#[test]
fn test_think_tag_is_silent_but_effective() {
    let bot = test_bot();
    assert_eq!(ask(&bot, "test think"), "");
}

#[test]
fn test_topic_and_topicstar_tags() {
    let bot = test_bot();
    bot.set_predicate("topic", "fruit", DEFAULT_SESSION_ID);
    assert_eq!(ask(&bot, "test topic"), "We were discussing apples and oranges");

    bot.set_predicate("topic", "Soylent Green", DEFAULT_SESSION_ID);
    assert_eq!(ask(&bot, "test topicstar"), "Soylent Green is made of people!");

    bot.set_predicate("topic", "Soylent Ham and Cheese", DEFAULT_SESSION_ID);
    assert_eq!(
        ask(&bot, "test topicstar multiple"),
        "Both Soylents Ham and Cheese are made of people!"
    );
}

#[test]
fn test_version_tag() {
    let bot = test_bot();
    assert_eq!(ask(&bot, "test version"), VERSION);
}

#[test]
fn test_whitespace_handling() {
    let bot = test_bot();
    assert_eq!(
        ask(&bot, "test whitespace"),
        "Collapsed in here. But   not   in   here!"
    );
}

#[test]
fn test_multi_sentence_input_joins_responses() {
    let bot = test_bot();
    assert_eq!(
        ask(&bot, "test srai. test bot"),
        "srai test passed  My name is Nameless"
    );
}

#[test]
fn test_unmatched_input_is_empty() {
    let bot = test_bot();
    assert_eq!(ask(&bot, "complete gibberish nothing matches"), "");
    assert_eq!(ask(&bot, ""), "");
}

#[test]
fn test_bootstrap_greeting_rules() {
    let bot = test_bot();
    let expected = ["Hello!", "Hi there!", "Greetings!"];
    assert!(expected.contains(&ask(&bot, "hello").as_str()));
    assert!(expected.contains(&ask(&bot, "hi").as_str()));
    assert_eq!(ask(&bot, "What is your name?"), "My name is Nameless.");
    // The BOT_NAME pattern token matches the current bot name.
    assert_eq!(ask(&bot, "nameless"), "Yes? I am listening.");
}
