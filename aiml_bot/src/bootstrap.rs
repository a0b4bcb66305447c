//! Compiled-in rule sets.
//!
//! The XML parser is external to this engine, so the bundled bootstrap rules
//! and the self-test rules used by the integration tests are constructed
//! directly as template trees. A category with a topic context carries a
//! `"*"` that-pattern so the matcher can reach the topic segment.

use crate::loader::{CategoryKey, CategoryMap};
use aiml_brain::{TagKind, Template};

fn text(content: &str) -> Template {
    Template::text(content)
}

fn el(tag: TagKind) -> Template {
    Template::element(tag)
}

fn template(children: Vec<Template>) -> Template {
    children
        .into_iter()
        .fold(el(TagKind::Template), |root, child| root.with_child(child))
}

fn li(children: Vec<Template>) -> Template {
    children
        .into_iter()
        .fold(el(TagKind::Li), |item, child| item.with_child(child))
}

fn add(map: &mut CategoryMap, pattern: &str, that: &str, topic: &str, body: Vec<Template>) {
    map.insert(CategoryKey::new(pattern, that, topic), template(body));
}

/// The rules every freshly built bot knows: a few greetings and the
/// `load std aiml` command that pulls in the standard rule set from the
/// install root.
pub fn bootstrap_categories() -> CategoryMap {
    let mut map = CategoryMap::new();

    add(
        &mut map,
        "LOAD STD AIML",
        "",
        "",
        vec![
            el(TagKind::Learn).with_child(text("std/*.aiml")),
            text("Loaded the standard AIML set."),
        ],
    );
    add(
        &mut map,
        "HELLO",
        "",
        "",
        vec![el(TagKind::Random)
            .with_child(li(vec![text("Hello!")]))
            .with_child(li(vec![text("Hi there!")]))
            .with_child(li(vec![text("Greetings!")]))],
    );
    add(&mut map, "HI", "", "", vec![el(TagKind::Srai).with_child(text("HELLO"))]);
    add(
        &mut map,
        "WHAT IS YOUR NAME",
        "",
        "",
        vec![
            text("My name is "),
            el(TagKind::Bot).with_attr("name", "name"),
            text("."),
        ],
    );
    add(
        &mut map,
        "BOT_NAME",
        "",
        "",
        vec![text("Yes? I am listening.")],
    );

    map
}

/// One category per template tag, used by the end-to-end tests.
pub fn self_test_categories() -> CategoryMap {
    let mut map = CategoryMap::new();

    add(
        &mut map,
        "TEST BOT",
        "",
        "",
        vec![text("My name is "), el(TagKind::Bot).with_attr("name", "name")],
    );

    add(
        &mut map,
        "TEST CONDITION NAME VALUE",
        "",
        "",
        vec![el(TagKind::Condition)
            .with_attr("name", "gender")
            .with_attr("value", "male")
            .with_child(text("You are handsome"))],
    );
    add(
        &mut map,
        "TEST CONDITION NAME",
        "",
        "",
        vec![el(TagKind::Condition)
            .with_attr("name", "gender")
            .with_child(li(vec![text("You are handsome")]).with_attr("value", "male"))
            .with_child(li(vec![text("You are beautiful")]).with_attr("value", "female"))
            .with_child(li(vec![text("You are genderless")]))],
    );
    add(
        &mut map,
        "TEST CONDITION",
        "",
        "",
        vec![el(TagKind::Condition)
            .with_child(
                li(vec![text("You are handsome")])
                    .with_attr("name", "gender")
                    .with_attr("value", "male"),
            )
            .with_child(
                li(vec![text("You are beautiful")])
                    .with_attr("name", "gender")
                    .with_attr("value", "female"),
            )
            .with_child(li(vec![text("You are genderless")]))],
    );

    add(
        &mut map,
        "TEST DATE",
        "",
        "",
        vec![text("The date is "), el(TagKind::Date)],
    );
    add(
        &mut map,
        "TEST FORMAL",
        "",
        "",
        vec![el(TagKind::Formal).with_child(text("formal test passed"))],
    );
    add(
        &mut map,
        "TEST GENDER",
        "",
        "",
        vec![el(TagKind::Gender)
            .with_child(text("She'd told him she heard that his hernia is history"))],
    );
    add(
        &mut map,
        "TEST GET AND SET",
        "",
        "",
        vec![
            text("I like "),
            el(TagKind::Set)
                .with_attr("name", "favorite-food")
                .with_child(text("cheese")),
            text(". My favorite food is "),
            el(TagKind::Get).with_attr("name", "favorite-food"),
        ],
    );
    add(
        &mut map,
        "TEST GOSSIP",
        "",
        "",
        vec![
            el(TagKind::Gossip).with_child(text("some juicy rumor")),
            text("Gossip is not yet implemented"),
        ],
    );
    add(
        &mut map,
        "TEST ID",
        "",
        "",
        vec![text("Your id is "), el(TagKind::Id)],
    );
    add(
        &mut map,
        "TEST INPUT",
        "",
        "",
        vec![text("You just said: "), el(TagKind::Input)],
    );
    add(
        &mut map,
        "TEST JAVASCRIPT",
        "",
        "",
        vec![
            el(TagKind::Javascript).with_child(text("alert('hello')")),
            text("Javascript is not yet implemented"),
        ],
    );
    add(
        &mut map,
        "TEST LOWERCASE",
        "",
        "",
        vec![
            text("The Last Word Should Be "),
            el(TagKind::Lowercase).with_child(text("LOWERCASE")),
        ],
    );
    add(
        &mut map,
        "TEST PERSON",
        "",
        "",
        vec![el(TagKind::Person)
            .with_child(text("I think he knows that his actions threaten me and mine."))],
    );
    add(
        &mut map,
        "TEST PERSON2",
        "",
        "",
        vec![el(TagKind::Person2)
            .with_child(text("I think you know that your actions threaten me and mine."))],
    );
    add(&mut map, "TEST PERSON2 *", "", "", vec![el(TagKind::Person2)]);
    add(
        &mut map,
        "TEST RANDOM",
        "",
        "",
        vec![el(TagKind::Random)
            .with_child(li(vec![text("response #1")]))
            .with_child(li(vec![text("response #2")]))
            .with_child(li(vec![text("response #3")]))],
    );
    add(
        &mut map,
        "TEST RANDOM EMPTY",
        "",
        "",
        vec![el(TagKind::Random), text("Nothing here!")],
    );
    add(
        &mut map,
        "TEST SENTENCE",
        "",
        "",
        vec![el(TagKind::Sentence).with_child(text("my first letter should be capitalized."))],
    );
    add(
        &mut map,
        "TEST SIZE",
        "",
        "",
        vec![text("I've learned "), el(TagKind::Size), text(" categories")],
    );

    add(
        &mut map,
        "TEST SRAI",
        "",
        "",
        vec![el(TagKind::Srai).with_child(text("SRAI TARGET"))],
    );
    add(&mut map, "SRAI TARGET", "", "", vec![text("srai test passed")]);
    add(
        &mut map,
        "TEST SR *",
        "",
        "",
        vec![text("srai results: "), el(TagKind::Sr)],
    );
    add(
        &mut map,
        "TEST NESTED SR *",
        "",
        "",
        vec![el(TagKind::Srai)
            .with_child(text("TEST SR "))
            .with_child(el(TagKind::Star))],
    );
    add(
        &mut map,
        "TEST SRAI INFINITE",
        "",
        "",
        vec![el(TagKind::Srai).with_child(text("TEST SRAI INFINITE"))],
    );

    add(
        &mut map,
        "* TEST STAR BEGIN",
        "",
        "",
        vec![text("Begin star matched: "), el(TagKind::Star)],
    );
    add(
        &mut map,
        "TEST STAR * MIDDLE",
        "",
        "",
        vec![text("Middle star matched: "), el(TagKind::Star)],
    );
    add(
        &mut map,
        "TEST STAR END *",
        "",
        "",
        vec![text("End star matched: "), el(TagKind::Star)],
    );
    add(
        &mut map,
        "TEST STAR * MULTIPLE * MAKES ME *",
        "",
        "",
        vec![
            text("Multiple stars matched: "),
            el(TagKind::Star),
            text(", "),
            el(TagKind::Star).with_attr("index", "2"),
            text(", "),
            el(TagKind::Star).with_attr("index", "3"),
        ],
    );

    add(
        &mut map,
        "TEST SYSTEM",
        "",
        "",
        vec![el(TagKind::System).with_child(text("echo The system says hello!"))],
    );

    add(
        &mut map,
        "TEST THAT",
        "",
        "",
        vec![text("I just said: "), el(TagKind::That)],
    );
    add(
        &mut map,
        "TEST THAT",
        "I JUST SAID *",
        "",
        vec![text("I have already answered this question")],
    );
    add(&mut map, "TEST THATSTAR", "", "", vec![text("I say beans")]);
    add(
        &mut map,
        "TEST THATSTAR",
        "I SAY *",
        "",
        vec![
            text("I just said \""),
            el(TagKind::ThatStar),
            text("\""),
        ],
    );
    add(
        &mut map,
        "TEST THATSTAR MULTIPLE",
        "",
        "",
        vec![text("I say beans and franks for everybody")],
    );
    add(
        &mut map,
        "TEST THATSTAR MULTIPLE",
        "I SAY * AND * FOR *",
        "",
        vec![
            text("Yes, "),
            el(TagKind::ThatStar),
            text(" and "),
            el(TagKind::ThatStar).with_attr("index", "2"),
            text(" for all!"),
        ],
    );
    add(
        &mut map,
        "TEST THINK",
        "",
        "",
        vec![el(TagKind::Think).with_child(text("invisible"))],
    );

    add(
        &mut map,
        "TEST TOPIC",
        "*",
        "FRUIT",
        vec![text("We were discussing apples and oranges")],
    );
    add(
        &mut map,
        "TEST TOPICSTAR",
        "*",
        "SOYLENT *",
        vec![
            text("Soylent "),
            el(TagKind::TopicStar),
            text(" is made of people!"),
        ],
    );
    add(
        &mut map,
        "TEST TOPICSTAR MULTIPLE",
        "*",
        "SOYLENT * AND *",
        vec![
            text("Both Soylents "),
            el(TagKind::TopicStar),
            text(" and "),
            el(TagKind::TopicStar).with_attr("index", "2"),
            text(" are made of people!"),
        ],
    );

    add(&mut map, "TEST VERSION", "", "", vec![el(TagKind::Version)]);
    add(
        &mut map,
        "TEST SENTENCES",
        "",
        "",
        vec![text("First thing. Second thing.")],
    );
    add(
        &mut map,
        "TEST THAT SENTENCE",
        "",
        "",
        vec![el(TagKind::That).with_attr("index", "1,2")],
    );
    add(
        &mut map,
        "TEST UPPERCASE",
        "",
        "",
        vec![
            text("The Last Word Should Be "),
            el(TagKind::Uppercase).with_child(text("uppercase")),
        ],
    );
    add(
        &mut map,
        "TEST WHITESPACE",
        "",
        "",
        vec![
            text("Collapsed   in   here.  "),
            Template::preserved_text("But   not   in   here!"),
        ],
    );

    map
}
