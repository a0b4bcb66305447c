use aiml_utils::collapse_whitespace;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whitespace handling for a text leaf.
///
/// `Default` leaves have their whitespace runs collapsed to a single space
/// the first time they pass through [`Template::normalize_whitespace`], after
/// which the flag flips to `Preserve` to cache the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Whitespace {
    Default,
    Preserve,
}

/// The closed set of AIML template tags, plus `Unknown` for anything the
/// evaluator should warn about and skip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagKind {
    Template,
    Li,
    Bot,
    Get,
    Set,
    Condition,
    Random,
    Srai,
    Sr,
    Star,
    ThatStar,
    TopicStar,
    That,
    Input,
    Date,
    Id,
    Size,
    Version,
    Think,
    Gossip,
    Javascript,
    Formal,
    Sentence,
    Uppercase,
    Lowercase,
    Gender,
    Person,
    Person2,
    Learn,
    System,
    Unknown(String),
}

impl TagKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "template" => TagKind::Template,
            "li" => TagKind::Li,
            "bot" => TagKind::Bot,
            "get" => TagKind::Get,
            "set" => TagKind::Set,
            "condition" => TagKind::Condition,
            "random" => TagKind::Random,
            "srai" => TagKind::Srai,
            "sr" => TagKind::Sr,
            "star" => TagKind::Star,
            "thatstar" => TagKind::ThatStar,
            "topicstar" => TagKind::TopicStar,
            "that" => TagKind::That,
            "input" => TagKind::Input,
            "date" => TagKind::Date,
            "id" => TagKind::Id,
            "size" => TagKind::Size,
            "version" => TagKind::Version,
            "think" => TagKind::Think,
            "gossip" => TagKind::Gossip,
            "javascript" => TagKind::Javascript,
            "formal" => TagKind::Formal,
            "sentence" => TagKind::Sentence,
            "uppercase" => TagKind::Uppercase,
            "lowercase" => TagKind::Lowercase,
            "gender" => TagKind::Gender,
            "person" => TagKind::Person,
            "person2" => TagKind::Person2,
            "learn" => TagKind::Learn,
            "system" => TagKind::System,
            _ => TagKind::Unknown(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TagKind::Template => "template",
            TagKind::Li => "li",
            TagKind::Bot => "bot",
            TagKind::Get => "get",
            TagKind::Set => "set",
            TagKind::Condition => "condition",
            TagKind::Random => "random",
            TagKind::Srai => "srai",
            TagKind::Sr => "sr",
            TagKind::Star => "star",
            TagKind::ThatStar => "thatstar",
            TagKind::TopicStar => "topicstar",
            TagKind::That => "that",
            TagKind::Input => "input",
            TagKind::Date => "date",
            TagKind::Id => "id",
            TagKind::Size => "size",
            TagKind::Version => "version",
            TagKind::Think => "think",
            TagKind::Gossip => "gossip",
            TagKind::Javascript => "javascript",
            TagKind::Formal => "formal",
            TagKind::Sentence => "sentence",
            TagKind::Uppercase => "uppercase",
            TagKind::Lowercase => "lowercase",
            TagKind::Gender => "gender",
            TagKind::Person => "person",
            TagKind::Person2 => "person2",
            TagKind::Learn => "learn",
            TagKind::System => "system",
            TagKind::Unknown(name) => name,
        }
    }
}

/// An AIML template tree: ordered elements with attributes, and text leaves.
///
/// Templates are immutable once stored in the trie, except for the one-shot
/// whitespace normalization of `Default` text leaves applied on insertion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Template {
    Text {
        content: String,
        whitespace: Whitespace,
    },
    Element {
        tag: TagKind,
        attrs: HashMap<String, String>,
        children: Vec<Template>,
    },
}

impl Template {
    /// A text leaf with default whitespace handling.
    pub fn text(content: impl Into<String>) -> Self {
        Template::Text {
            content: content.into(),
            whitespace: Whitespace::Default,
        }
    }

    /// A text leaf whose whitespace is kept verbatim (`xml:space="preserve"`).
    pub fn preserved_text(content: impl Into<String>) -> Self {
        Template::Text {
            content: content.into(),
            whitespace: Whitespace::Preserve,
        }
    }

    /// An element with no attributes or children.
    pub fn element(tag: TagKind) -> Self {
        Template::Element {
            tag,
            attrs: HashMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Template::Element { attrs, .. } = &mut self {
            attrs.insert(name.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: Template) -> Self {
        if let Template::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn tag(&self) -> Option<&TagKind> {
        match self {
            Template::Element { tag, .. } => Some(tag),
            Template::Text { .. } => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Template::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            Template::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[Template] {
        match self {
            Template::Element { children, .. } => children,
            Template::Text { .. } => &[],
        }
    }

    pub fn is_element(&self, kind: &TagKind) -> bool {
        matches!(self, Template::Element { tag, .. } if tag == kind)
    }

    /// Collapse whitespace runs in every `Default` text leaf to a single
    /// space (leading and trailing runs become one space, not nothing) and
    /// flip the leaf to `Preserve`. Idempotent; run once when a template
    /// enters the trie.
    pub fn normalize_whitespace(&mut self) {
        match self {
            Template::Text {
                content,
                whitespace,
            } => {
                if *whitespace == Whitespace::Default {
                    *content = collapse_whitespace(content);
                    *whitespace = Whitespace::Preserve;
                }
            }
            Template::Element { children, .. } => {
                for child in children {
                    child.normalize_whitespace();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for name in ["template", "srai", "topicstar", "person2", "system"] {
            assert_eq!(TagKind::from_name(name).as_str(), name);
        }
        assert_eq!(
            TagKind::from_name("made-up"),
            TagKind::Unknown("made-up".to_string())
        );
    }

    #[test]
    fn test_normalize_whitespace_collapses_default_leaves() {
        let mut template = Template::element(TagKind::Template)
            .with_child(Template::text("  hello \n  world  "))
            .with_child(Template::preserved_text("  kept \n intact  "));
        template.normalize_whitespace();

        let children = template.children();
        assert_eq!(
            children[0],
            Template::preserved_text(" hello world ")
        );
        assert_eq!(children[1], Template::preserved_text("  kept \n intact  "));

        // Idempotent: a second pass changes nothing.
        let snapshot = template.clone();
        template.normalize_whitespace();
        assert_eq!(template, snapshot);
    }
}
