use crate::template::Template;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// An edge in the pattern trie: a literal word or one of the sentinels.
///
/// `Underscore` is the high-priority wildcard, `Star` the low-priority one,
/// `BotName` matches the bot's name as a single token, and `That`/`Topic`
/// separate the three segments of a stored `(pattern, that, topic)` triple.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeLabel {
    Underscore,
    Star,
    BotName,
    That,
    Topic,
    Word(String),
}

/// A trie node: child edges plus the template stored at this position, if
/// any. The template slot is only ever written at the end of a legal
/// `pattern[, that[, topic]]` walk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub(crate) children: HashMap<EdgeLabel, Node>,
    pub(crate) template: Option<Template>,
}

#[derive(Debug, Error)]
pub enum BrainError {
    #[error("brain file {} is unreadable: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode brain snapshot: {0}")]
    Encode(#[source] bincode::Error),
    #[error("failed to decode brain snapshot: {0}")]
    Decode(#[source] bincode::Error),
}

/// The pattern store: a trie over `(pattern, that, topic)` triples.
///
/// Implements the AIML pattern-matching structure described by Dr. Richard
/// Wallace at <http://www.alicebot.org/documentation/matching.html>.
#[derive(Clone, Debug)]
pub struct PatternBrain {
    pub(crate) root: Node,
    pub(crate) template_count: usize,
    pub(crate) bot_name: String,
}

impl Default for PatternBrain {
    fn default() -> Self {
        Self {
            root: Node::default(),
            template_count: 0,
            bot_name: "Nameless".to_string(),
        }
    }
}

impl PatternBrain {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of templates currently stored.
    pub fn template_count(&self) -> usize {
        self.template_count
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    /// Set the name the `BOT_NAME` pattern token matches against. The name
    /// must be a single word, so whitespace is collapsed out of the value.
    pub fn set_bot_name(&mut self, value: &str) {
        self.bot_name = value.split_whitespace().collect();
    }

    /// Add a `(pattern, that, topic)` triple and its template to the trie.
    ///
    /// Pattern words map to edges as `_` → `Underscore`, `*` → `Star`, and
    /// (in the main pattern only) `BOT_NAME` → `BotName`; everything else is
    /// stored uppercased. A later definition for the same triple overwrites
    /// the earlier one without growing the template count.
    pub fn add(&mut self, pattern: &str, that: &str, topic: &str, mut template: Template) {
        template.normalize_whitespace();

        let mut node = descend(&mut self.root, pattern, true);
        if !that.trim().is_empty() {
            let that_root = node.children.entry(EdgeLabel::That).or_default();
            node = descend(that_root, that, false);
        }
        if !topic.trim().is_empty() {
            let topic_root = node.children.entry(EdgeLabel::Topic).or_default();
            node = descend(topic_root, topic, false);
        }

        if node.template.is_none() {
            self.template_count += 1;
        }
        node.template = Some(template);
    }

    /// Dump the trie, the template count, and the bot name to `path`.
    /// Restore later with [`PatternBrain::restore`]. The format is opaque
    /// and version-locked; callers rebuild from AIML sources on failure.
    pub fn save(&self, path: &Path) -> Result<(), BrainError> {
        let file = File::create(path).map_err(|source| BrainError::Io {
            path: path.to_owned(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(
            &mut writer,
            &(self.template_count, &self.bot_name, &self.root),
        )
        .map_err(BrainError::Encode)
    }

    /// Replace the current contents with a previously saved brain.
    pub fn restore(&mut self, path: &Path) -> Result<(), BrainError> {
        let file = File::open(path).map_err(|source| BrainError::Io {
            path: path.to_owned(),
            source,
        })?;
        let reader = BufReader::new(file);
        let (template_count, bot_name, root): (usize, String, Node) =
            bincode::deserialize_from(reader).map_err(BrainError::Decode)?;
        self.template_count = template_count;
        self.bot_name = bot_name;
        self.root = root;
        Ok(())
    }
}

/// Walk `node` down the trie along the words of `segment`, inserting edges
/// as needed, and return the final node. `BOT_NAME` is only a sentinel in
/// the main pattern segment.
fn descend<'a>(mut node: &'a mut Node, segment: &str, main_segment: bool) -> &'a mut Node {
    for word in segment.split_whitespace() {
        let label = match word {
            "_" => EdgeLabel::Underscore,
            "*" => EdgeLabel::Star,
            "BOT_NAME" if main_segment => EdgeLabel::BotName,
            _ => EdgeLabel::Word(word.to_uppercase()),
        };
        node = node.children.entry(label).or_default();
    }
    node
}
