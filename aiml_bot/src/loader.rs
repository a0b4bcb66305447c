use aiml_brain::Template;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// The `(pattern, that, topic)` triple a category is indexed on.
///
/// Loaders return these already normalized: uppercase words, punctuation
/// stripped, wildcards and `BOT_NAME` intact. An empty `that` or `topic`
/// means the category carries no such context; note that a category with a
/// topic needs at least a `"*"` that-pattern, because the matcher reaches
/// the topic segment through the that-subtree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CategoryKey {
    pub pattern: String,
    pub that: String,
    pub topic: String,
}

impl CategoryKey {
    pub fn new(
        pattern: impl Into<String>,
        that: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            that: that.into(),
            topic: topic.into(),
        }
    }
}

/// The categories parsed out of one AIML document.
pub type CategoryMap = HashMap<CategoryKey, Template>;

/// A fatal problem with one AIML source file. Loading of remaining files
/// continues after the error is reported.
#[derive(Debug, Error)]
#[error("fatal parse error in {filename}: {message}")]
pub struct ParseError {
    pub filename: String,
    pub message: String,
}

/// The external AIML XML parser, consumed by `learn`.
///
/// Parsing AIML source is outside this engine; implementations convert one
/// file into the normalized category triples and template trees defined
/// here.
pub trait AimlLoader: Send {
    fn parse(&self, path: &Path) -> Result<CategoryMap, ParseError>;
}
