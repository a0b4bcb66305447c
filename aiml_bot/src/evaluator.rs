//! The template evaluator: recursive dispatch over the tag kinds.
//!
//! Evaluation never fails; malformed attributes degrade to the empty string
//! with a warning, and unknown tags are skipped.

use crate::bot::{BotCore, VERSION};
use aiml_brain::{StarKind, TagKind, Template, Whitespace};
use aiml_utils::collapse_whitespace;
use rand::seq::SliceRandom;
use std::collections::HashMap;

/// Returned by `<system>` when the command could not be run.
pub(crate) const SYSTEM_FAILURE_MESSAGE: &str =
    "There was an error while computing my response.  Please inform my botmaster.";

impl BotCore {
    /// Evaluate a template tree into its response text.
    pub(crate) fn evaluate(&mut self, element: &Template, session_id: &str) -> String {
        match element {
            Template::Text {
                content,
                whitespace,
            } => match whitespace {
                Whitespace::Preserve => content.clone(),
                Whitespace::Default => collapse_whitespace(content),
            },
            Template::Element {
                tag,
                attrs,
                children,
            } => self.evaluate_element(tag, attrs, children, session_id),
        }
    }

    fn evaluate_children(&mut self, children: &[Template], session_id: &str) -> String {
        let mut response = String::new();
        for child in children {
            response.push_str(&self.evaluate(child, session_id));
        }
        response
    }

    fn evaluate_element(
        &mut self,
        tag: &TagKind,
        attrs: &HashMap<String, String>,
        children: &[Template],
        session_id: &str,
    ) -> String {
        match tag {
            TagKind::Template | TagKind::Li => self.evaluate_children(children, session_id),

            TagKind::Bot => attrs
                .get("name")
                .map(|name| self.get_bot_predicate_value(name))
                .unwrap_or_default(),

            TagKind::Get => attrs
                .get("name")
                .map(|name| self.get_predicate_value(name, session_id))
                .unwrap_or_default(),

            TagKind::Set => {
                let value = self.evaluate_children(children, session_id);
                if let Some(name) = attrs.get("name") {
                    self.set_predicate_value(name, &value, session_id);
                }
                value
            }

            TagKind::Condition => self.evaluate_condition(attrs, children, session_id),
            TagKind::Random => self.evaluate_random(children, session_id),

            TagKind::Srai => {
                let new_input = self.evaluate_children(children, session_id);
                self.respond_internal(&new_input, session_id)
            }
            TagKind::Sr => {
                let star = self.star_value(StarKind::Star, 1, session_id);
                self.respond_internal(&star, session_id)
            }

            TagKind::Star => self.star_value(StarKind::Star, index_attr(attrs), session_id),
            TagKind::ThatStar => self.star_value(StarKind::ThatStar, index_attr(attrs), session_id),
            TagKind::TopicStar => {
                self.star_value(StarKind::TopicStar, index_attr(attrs), session_id)
            }

            TagKind::That => self.evaluate_that(attrs, session_id),
            TagKind::Input => self.evaluate_input(attrs, session_id),

            TagKind::Date => now(),
            TagKind::Id => session_id.to_string(),
            TagKind::Size => self.brain.template_count().to_string(),
            TagKind::Version => VERSION.to_string(),

            // <gossip> and <javascript> have no implementation here and
            // behave exactly like <think>.
            TagKind::Think | TagKind::Gossip | TagKind::Javascript => {
                self.evaluate_children(children, session_id);
                String::new()
            }

            TagKind::Formal => capwords(&self.evaluate_children(children, session_id)),
            TagKind::Sentence => {
                let response = self.evaluate_children(children, session_id);
                capitalize_first(response.trim())
            }
            TagKind::Uppercase => self.evaluate_children(children, session_id).to_uppercase(),
            TagKind::Lowercase => self.evaluate_children(children, session_id).to_lowercase(),

            TagKind::Gender => self.apply_subber("gender", children, session_id),
            TagKind::Person => self.apply_subber("person", children, session_id),
            TagKind::Person2 => self.apply_subber("person2", children, session_id),

            TagKind::Learn => {
                let filename = self.evaluate_children(children, session_id);
                self.learn(&filename);
                String::new()
            }
            TagKind::System => self.evaluate_system(children, session_id),

            TagKind::Unknown(name) => {
                tracing::warn!(tag = name.as_str(), "no handler found for element");
                String::new()
            }
        }
    }

    /// `<condition>` in its three forms: name+value on the tag, name on the
    /// tag with valued `<li>` children, or name+value pairs on each `<li>`.
    /// A malformed `<li>` is skipped; a final attribute-less `<li>` is the
    /// default branch.
    fn evaluate_condition(
        &mut self,
        attrs: &HashMap<String, String>,
        children: &[Template],
        session_id: &str,
    ) -> String {
        let name = attrs.get("name");
        let value = attrs.get("value");

        if let (Some(name), Some(value)) = (name, value) {
            if self.get_predicate_value(name, session_id) == *value {
                return self.evaluate_children(children, session_id);
            }
            return String::new();
        }

        let items: Vec<&Template> = children
            .iter()
            .filter(|child| child.is_element(&TagKind::Li))
            .collect();
        let Some((last, rest)) = items.split_last() else {
            return String::new();
        };

        for item in rest.iter().chain(std::iter::once(last)) {
            let li_name = name.map(String::as_str).or_else(|| item.attr("name"));
            let (Some(li_name), Some(li_value)) = (li_name, item.attr("value")) else {
                continue;
            };
            if self.get_predicate_value(li_name, session_id) == li_value {
                return self.evaluate(item, session_id);
            }
        }

        // No branch matched; an attribute-less final <li> is the default.
        if last.attr("name").is_none() && last.attr("value").is_none() {
            return self.evaluate(last, session_id);
        }
        String::new()
    }

    /// `<random>`: choose one `<li>` child uniformly; anything else inside
    /// the element is ignored.
    fn evaluate_random(&mut self, children: &[Template], session_id: &str) -> String {
        let items: Vec<&Template> = children
            .iter()
            .filter(|child| child.is_element(&TagKind::Li))
            .collect();
        let Some(choice) = items.choose(&mut self.rng).copied() else {
            return String::new();
        };
        self.evaluate(choice, session_id)
    }

    /// `<that index="i">` or `<that index="i,j">`: the i-th most recent
    /// response, optionally narrowed to its j-th sentence.
    fn evaluate_that(&mut self, attrs: &HashMap<String, String>, session_id: &str) -> String {
        let raw_index = attrs.get("index").map(String::as_str).unwrap_or("1");
        let (response_part, sentence_part) = match raw_index.split_once(',') {
            Some((response, sentence)) => (response, Some(sentence)),
            None => (raw_index, None),
        };
        let index = parse_index(response_part);
        let sentence_index = sentence_part.map(parse_index);

        let history = &self.session_mut(session_id).output_history;
        if index == 0 || history.len() < index {
            tracing::warn!(index, "no such history index while processing <that> element");
            return String::new();
        }
        let previous = history[history.len() - index].clone();

        match sentence_index {
            None => previous,
            Some(sentence_index) => {
                let sentences = aiml_utils::split_sentences(&previous);
                if sentence_index >= 1 && sentence_index <= sentences.len() {
                    sentences[sentence_index - 1].clone()
                } else {
                    tracing::warn!(
                        sentence_index,
                        "no such sentence index while processing <that> element"
                    );
                    String::new()
                }
            }
        }
    }

    /// `<input index="i">`: the i-th most recent user input.
    fn evaluate_input(&mut self, attrs: &HashMap<String, String>, session_id: &str) -> String {
        let index = index_attr(attrs);
        let history = &self.session_mut(session_id).input_history;
        if index == 0 || history.len() < index {
            tracing::warn!(index, "no such history index while processing <input> element");
            return String::new();
        }
        history[history.len() - index].clone()
    }

    /// `<star>`/`<thatstar>`/`<topicstar>`: re-run the match for the input
    /// currently being processed and extract the wildcard capture.
    fn star_value(&mut self, kind: StarKind, index: usize, session_id: &str) -> String {
        let Some(input) = self.session_mut(session_id).input_stack.last().cloned() else {
            return String::new();
        };
        let input = self.normal_sub(&input);
        let that = self
            .session_mut(session_id)
            .output_history
            .back()
            .cloned()
            .unwrap_or_default();
        let that = self.normal_sub(&that);
        let topic = self.get_predicate_value("topic", session_id);
        self.brain.star(kind, &input, &that, &topic, index)
    }

    /// `<gender>`/`<person>`/`<person2>`: run the evaluated contents (or,
    /// for an empty element, the `<star/>` capture) through the named
    /// substitution table.
    fn apply_subber(&mut self, table: &str, children: &[Template], session_id: &str) -> String {
        let response = if children.is_empty() {
            self.star_value(StarKind::Star, 1, session_id)
        } else {
            self.evaluate_children(children, session_id)
        };
        self.sub_with(table, &response)
    }

    /// `<system>`: run the evaluated contents as a shell command and return
    /// its collapsed stdout.
    fn evaluate_system(&mut self, children: &[Template], session_id: &str) -> String {
        let command = self.evaluate_children(children, session_id);
        let command = normalize_command_path(&command);
        match run_shell(&command) {
            Ok(output) => output,
            Err(error) => {
                tracing::warn!(%error, command = command.as_str(), "error while processing <system> element");
                SYSTEM_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

fn index_attr(attrs: &HashMap<String, String>) -> usize {
    attrs
        .get("index")
        .map(String::as_str)
        .map(parse_index)
        .unwrap_or(1)
}

fn parse_index(raw: &str) -> usize {
    raw.trim().parse().unwrap_or(1)
}

/// Capitalize the first letter of each whitespace-separated word, lowercase
/// the rest, and join with single spaces.
fn capwords(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// The current local date and time, asctime-style. The format is stable
/// within one process.
pub(crate) fn now() -> String {
    chrono::Local::now().format("%a %b %e %H:%M:%S %Y").to_string()
}

/// Collapse redundant separators in the command path; `<system>` contents
/// use Unix-style forward slashes for portability.
fn normalize_command_path(command: &str) -> String {
    std::path::Path::new(command)
        .components()
        .collect::<std::path::PathBuf>()
        .to_string_lossy()
        .into_owned()
}

/// Run `command` through the platform shell, blocking until it finishes,
/// and collapse the newlines of its stdout into spaces.
pub(crate) fn run_shell(command: &str) -> std::io::Result<String> {
    #[cfg(unix)]
    let output = std::process::Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()?;
    #[cfg(windows)]
    let output = std::process::Command::new("cmd")
        .arg("/C")
        .arg(command)
        .output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout
        .lines()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capwords_lowercases_the_rest() {
        assert_eq!(capwords("formal TEST passed"), "Formal Test Passed");
        assert_eq!(capwords("  spread   out  "), "Spread Out");
        assert_eq!(capwords(""), "");
    }

    #[test]
    fn test_capitalize_first_leaves_the_rest() {
        assert_eq!(capitalize_first("my first letter"), "My first letter");
        assert_eq!(capitalize_first(""), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_shell_collapses_newlines() {
        let output = run_shell("printf 'one\\ntwo\\n'").unwrap();
        assert_eq!(output, "one two");
    }

    #[test]
    fn test_parse_index_defaults_to_one() {
        assert_eq!(parse_index("3"), 3);
        assert_eq!(parse_index(" 2 "), 2);
        assert_eq!(parse_index("junk"), 1);
    }
}
