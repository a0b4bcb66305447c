//! The recursive best-match search over the pattern trie, and star
//! extraction over the matched path.

use crate::template::Template;
use crate::trie::{EdgeLabel, Node, PatternBrain};
use aiml_utils::normalize;

/// Placeholder token for an empty `that` context, so the segment still
/// carries one word through the search.
pub const DUMMY_THAT: &str = "ULTRABOGUSDUMMYTHAT";
/// Placeholder token for an empty `topic` context.
pub const DUMMY_TOPIC: &str = "ULTRABOGUSDUMMYTOPIC";

/// Which pattern segment a star lookup reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StarKind {
    /// A wildcard in the main pattern.
    Star,
    /// A wildcard in the that-pattern.
    ThatStar,
    /// A wildcard in the topic-pattern.
    TopicStar,
}

impl PatternBrain {
    /// Return the template whose pattern best matches `input` in the given
    /// `that`/`topic` context, or `None` when nothing matches.
    ///
    /// Inputs are normalized here (uppercased, punctuation stripped), so
    /// callers pass raw text.
    pub fn find_match(&self, input: &str, that: &str, topic: &str) -> Option<&Template> {
        if input.is_empty() {
            return None;
        }
        let words = segment_words(input);
        let that_words = segment_words_or(that, DUMMY_THAT);
        let topic_words = segment_words_or(topic, DUMMY_TOPIC);
        self.search(&words, &that_words, &topic_words, &self.root)
            .map(|(_, template)| template)
    }

    /// Return the portion of the original input captured by the `index`-th
    /// (1-based) wildcard of the segment selected by `kind`, or `""` when
    /// there is no match or the index is out of range.
    pub fn star(&self, kind: StarKind, input: &str, that: &str, topic: &str, index: usize) -> String {
        let words = segment_words(input);
        let that_words = segment_words_or(that, DUMMY_THAT);
        let topic_words = segment_words_or(topic, DUMMY_TOPIC);
        let Some((path, _)) = self.search(&words, &that_words, &topic_words, &self.root) else {
            return String::new();
        };

        // Slice the matched path down to the segment the star kind reads
        // from. A boundary sentinel that never appears delimits at the end.
        let that_pos = path
            .iter()
            .position(|label| *label == EdgeLabel::That)
            .unwrap_or(path.len());
        let topic_pos = path
            .iter()
            .position(|label| *label == EdgeLabel::Topic)
            .unwrap_or(path.len());
        let (segment, matched_words, raw): (&[EdgeLabel], &[String], &str) = match kind {
            StarKind::Star => (&path[..that_pos], words.as_slice(), input),
            StarKind::ThatStar => {
                let start = (that_pos + 1).min(path.len());
                let end = topic_pos.max(start);
                (&path[start..end], that_words.as_slice(), that)
            }
            StarKind::TopicStar => {
                let start = (topic_pos + 1).min(path.len());
                (&path[start..], topic_words.as_slice(), topic)
            }
        };

        // Walk the input against the matched segment word by word. When this
        // loop ends with `found` set, `start..=end` spans the words the
        // requested star captured.
        let mut found = false;
        let mut start = 0usize;
        let mut end = 0isize;
        let mut j = 0usize;
        let mut num_stars = 0usize;
        let mut k = 0usize;
        for i in 0..matched_words.len() {
            // Inside a star that is not the one we are looking for.
            if i < k {
                continue;
            }
            if j == segment.len() {
                break;
            }
            if !found {
                if matches!(segment[j], EdgeLabel::Star | EdgeLabel::Underscore) {
                    num_stars += 1;
                    if num_stars == index {
                        found = true;
                    }
                    start = i;
                    for scan in i..matched_words.len() {
                        k = scan;
                        // A star at the end of the segment ends with the
                        // input.
                        if j + 1 == segment.len() {
                            end = matched_words.len() as isize;
                            break;
                        }
                        // The words line up with the pattern again, so the
                        // star has ended.
                        if segment[j + 1] == EdgeLabel::Word(matched_words[scan].clone()) {
                            end = scan as isize - 1;
                            break;
                        }
                    }
                }
                if found {
                    break;
                }
            }
            j += 1;
        }

        if !found || end < start as isize {
            return String::new();
        }
        // Slice the unmutilated input, not the normalized word list.
        let raw_words: Vec<&str> = raw.split_whitespace().collect();
        let upper = ((end + 1) as usize).min(raw_words.len());
        if start >= upper {
            return String::new();
        }
        raw_words[start..upper].join(" ")
    }

    /// Depth-first search returning the edge path from `node` to the matched
    /// template. Precedence per segment: `Underscore`, then the literal
    /// word, then `BotName`, then `Star`; the first branch that reaches a
    /// template wins.
    fn search<'a>(
        &'a self,
        words: &[String],
        that_words: &[String],
        topic_words: &[String],
        node: &'a Node,
    ) -> Option<(Vec<EdgeLabel>, &'a Template)> {
        if words.is_empty() {
            // Out of main words: descend into the that-pattern, then the
            // topic-pattern, then take the template stored here.
            if !that_words.is_empty() {
                if let Some(child) = node.children.get(&EdgeLabel::That) {
                    if let Some((path, template)) =
                        self.search(that_words, &[], topic_words, child)
                    {
                        return Some((prepend(EdgeLabel::That, path), template));
                    }
                }
            } else if !topic_words.is_empty() {
                if let Some(child) = node.children.get(&EdgeLabel::Topic) {
                    if let Some((path, template)) = self.search(topic_words, &[], &[], child) {
                        return Some((prepend(EdgeLabel::Topic, path), template));
                    }
                }
            }
            return node
                .template
                .as_ref()
                .map(|template| (Vec::new(), template));
        }

        let first = &words[0];
        let suffix = &words[1..];

        // `_` outranks literal words. This matches the reference matcher,
        // although some AIML write-ups rank literals above it.
        if let Some(child) = node.children.get(&EdgeLabel::Underscore) {
            // j == suffix.len() covers a wildcard at the end of the pattern.
            for j in 0..=suffix.len() {
                if let Some((path, template)) =
                    self.search(&suffix[j..], that_words, topic_words, child)
                {
                    return Some((prepend(EdgeLabel::Underscore, path), template));
                }
            }
        }

        if let Some(child) = node.children.get(&EdgeLabel::Word(first.clone())) {
            if let Some((path, template)) = self.search(suffix, that_words, topic_words, child) {
                return Some((prepend(EdgeLabel::Word(first.clone()), path), template));
            }
        }

        if *first == self.bot_name.to_uppercase() {
            if let Some(child) = node.children.get(&EdgeLabel::BotName) {
                if let Some((path, template)) = self.search(suffix, that_words, topic_words, child)
                {
                    // The literal word goes on the path, not the sentinel,
                    // so star counting sees it as an ordinary word.
                    return Some((prepend(EdgeLabel::Word(first.clone()), path), template));
                }
            }
        }

        if let Some(child) = node.children.get(&EdgeLabel::Star) {
            for j in 0..=suffix.len() {
                if let Some((path, template)) =
                    self.search(&suffix[j..], that_words, topic_words, child)
                {
                    return Some((prepend(EdgeLabel::Star, path), template));
                }
            }
        }

        None
    }
}

fn prepend(label: EdgeLabel, mut path: Vec<EdgeLabel>) -> Vec<EdgeLabel> {
    path.insert(0, label);
    path
}

fn segment_words(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn segment_words_or(text: &str, placeholder: &str) -> Vec<String> {
    if text.trim().is_empty() {
        vec![placeholder.to_string()]
    } else {
        segment_words(text)
    }
}
