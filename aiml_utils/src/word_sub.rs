use regex::Regex;
use std::collections::HashMap;

/// A case-preserving multiple-word substitution table.
///
/// Every registered pair is stored under three casings of the key (all-lower,
/// capitalized first letter, all-upper), each mapping to the matching casing
/// of the value, so the replacement keeps the surface casing of the text:
///
/// ```
/// use aiml_utils::WordSub;
///
/// let mut subber = WordSub::new();
/// subber.insert("before", "after");
/// subber.insert("begin", "end");
/// assert_eq!(subber.sub("Before we BEGIN"), "After we END");
/// ```
///
/// Keys only match as complete words: `he` replaces `he` and `he'd` but
/// leaves `help` and `her` alone.
#[derive(Debug, Default, Clone)]
pub struct WordSub {
    entries: HashMap<String, String>,
    // None marks the alternation as dirty; rebuilt on the next sub() call.
    regex: Option<Regex>,
}

impl WordSub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(before, after)` pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut sub = Self::new();
        for (before, after) in pairs {
            sub.insert(before, after);
        }
        sub
    }

    /// Register a replacement under all three casings of `before`.
    pub fn insert(&mut self, before: &str, after: &str) {
        self.entries
            .insert(before.to_lowercase(), after.to_lowercase());
        self.entries
            .insert(capitalize_first(before), capitalize_first(after));
        self.entries
            .insert(before.to_uppercase(), after.to_uppercase());
        self.regex = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every non-overlapping whole-word match by the value registered
    /// for the exact matched surface form.
    pub fn sub(&mut self, text: &str) -> String {
        if self.entries.is_empty() {
            return text.to_string();
        }
        if self.regex.is_none() {
            self.rebuild_regex();
        }
        let regex = self.regex.as_ref().expect("regex rebuilt above");
        regex
            .replace_all(text, |caps: &regex::Captures| {
                self.entries
                    .get(&caps[0])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    fn rebuild_regex(&mut self) {
        // Longer keys first so a key that extends another (up to a word
        // boundary) wins the alternation.
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = keys
            .iter()
            .map(|key| format!(r"\b{}\b", regex::escape(key)))
            .collect::<Vec<_>>()
            .join("|");
        self.regex = Some(Regex::new(&alternation).expect("escaped word keys form a valid regex"));
    }
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_replacement() {
        let mut subber = WordSub::new();
        subber.insert("apple", "banana");
        subber.insert("orange", "pear");
        subber.insert("banana", "apple");

        assert_eq!(
            subber.sub("I'd like one apple, one Orange and one BANANA."),
            "I'd like one banana, one Pear and one APPLE."
        );
    }

    #[test]
    fn test_whole_words_only() {
        let mut subber = WordSub::new();
        subber.insert("he", "she");
        assert_eq!(
            subber.sub("he says he'd like to help her"),
            "she says she'd like to help her"
        );
    }

    #[test]
    fn test_rebuild_after_insert() {
        let mut subber = WordSub::new();
        subber.insert("cat", "dog");
        assert_eq!(subber.sub("cat"), "dog");
        subber.insert("dog", "cat");
        assert_eq!(subber.sub("dog cat"), "cat dog");
    }

    #[test]
    fn test_empty_table_is_identity() {
        let mut subber = WordSub::new();
        assert_eq!(subber.sub("untouched"), "untouched");
    }
}
