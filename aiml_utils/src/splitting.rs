/// Split `text` into sentences, cutting after the nearest of `.`, `?`, `!`.
///
/// Each emitted sentence keeps its terminating delimiter and is trimmed.
/// Slices that hold nothing but whitespace are dropped. When no sentence was
/// produced, the whole trimmed input is returned as a single sentence, so an
/// undelimited utterance still counts as one sentence; empty input yields an
/// empty vector.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(['.', '?', '!']) {
            Some(delimiter) => {
                // The delimiters are one byte, so delimiter + 1 stays on a
                // char boundary.
                if !rest[..delimiter].trim().is_empty() {
                    sentences.push(rest[..=delimiter].trim().to_string());
                }
                rest = &rest[delimiter + 1..];
            }
            None => {
                if !rest.trim().is_empty() {
                    sentences.push(rest.trim().to_string());
                }
                break;
            }
        }
    }
    if sentences.is_empty() && !text.trim().is_empty() {
        sentences.push(text.trim().to_string());
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let results = split_sentences("First.  Second, still?  Third and Final!  Well, not really");
        assert_eq!(
            results,
            vec![
                "First.".to_string(),
                "Second, still?".to_string(),
                "Third and Final!".to_string(),
                "Well, not really".to_string(),
            ]
        );
    }

    #[test]
    fn test_split_without_delimiters() {
        assert_eq!(split_sentences("no delimiters here"), vec!["no delimiters here"]);
        assert_eq!(split_sentences("  padded  "), vec!["padded"]);
    }

    #[test]
    fn test_split_empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_split_bare_delimiters() {
        assert_eq!(split_sentences("..."), vec!["..."]);
        assert_eq!(split_sentences("One.."), vec!["One."]);
    }
}
