//! The four default substitution tables the bot ships with.
//!
//! `gender` swaps third-person singular pronouns, `person` swaps first and
//! third person, `person2` swaps first and second person, and `normal`
//! expands contractions before matching. Additional tables can be registered
//! on the bot by name.

use crate::word_sub::WordSub;

/// Swap the gender of third-person singular pronouns.
pub fn default_gender() -> WordSub {
    WordSub::from_pairs([
        // masculine -> feminine
        ("he", "she"),
        ("him", "her"),
        ("his", "her"),
        ("himself", "herself"),
        // feminine -> masculine
        ("she", "he"),
        ("her", "him"),
        ("hers", "his"),
        ("herself", "himself"),
    ])
}

/// Swap first-person and third-person pronouns.
pub fn default_person() -> WordSub {
    WordSub::from_pairs([
        // 1st person -> 3rd person (masculine)
        ("I", "he"),
        ("me", "him"),
        ("my", "his"),
        ("mine", "his"),
        ("myself", "himself"),
        // 3rd person (masculine) -> 1st person
        ("he", "I"),
        ("him", "me"),
        ("his", "my"),
        ("himself", "myself"),
        // 3rd person (feminine) -> 1st person
        ("she", "I"),
        ("her", "me"),
        ("hers", "mine"),
        ("herself", "myself"),
    ])
}

/// Swap first-person and second-person pronouns.
pub fn default_person2() -> WordSub {
    WordSub::from_pairs([
        // 1st person -> 2nd person
        ("I", "you"),
        ("me", "you"),
        ("my", "your"),
        ("mine", "yours"),
        ("myself", "yourself"),
        // 2nd person -> 1st person
        ("you", "me"),
        ("your", "my"),
        ("yours", "mine"),
        ("yourself", "myself"),
    ])
}

/// Pre-match input normalization: contraction and colloquialism expansion.
pub fn default_normal() -> WordSub {
    WordSub::from_pairs([
        ("wanna", "want to"),
        ("gonna", "going to"),
        ("gotta", "got to"),
        ("I'm", "I am"),
        ("I'd", "I would"),
        ("I'll", "I will"),
        ("I've", "I have"),
        ("you'd", "you would"),
        ("you're", "you are"),
        ("you've", "you have"),
        ("you'll", "you will"),
        ("he's", "he is"),
        ("he'd", "he would"),
        ("he'll", "he will"),
        ("she's", "she is"),
        ("she'd", "she would"),
        ("she'll", "she will"),
        ("we're", "we are"),
        ("we'd", "we would"),
        ("we'll", "we will"),
        ("we've", "we have"),
        ("they're", "they are"),
        ("they'd", "they would"),
        ("they'll", "they will"),
        ("they've", "they have"),
        ("y'all", "you all"),
        ("can't", "can not"),
        ("cannot", "can not"),
        ("couldn't", "could not"),
        ("wouldn't", "would not"),
        ("shouldn't", "should not"),
        ("isn't", "is not"),
        ("ain't", "is not"),
        ("don't", "do not"),
        ("doesn't", "does not"),
        ("didn't", "did not"),
        ("aren't", "are not"),
        ("won't", "will not"),
        ("weren't", "were not"),
        ("wasn't", "was not"),
        ("hasn't", "has not"),
        ("hadn't", "had not"),
        ("haven't", "have not"),
        ("where's", "where is"),
        ("where'd", "where did"),
        ("where'll", "where will"),
        ("who's", "who is"),
        ("who'd", "who would"),
        ("who'll", "who will"),
        ("what's", "what is"),
        ("what'd", "what did"),
        ("what'll", "what will"),
        ("when's", "when is"),
        ("when'd", "when did"),
        ("when'll", "when will"),
        ("why's", "why is"),
        ("why'd", "why did"),
        ("why'll", "why will"),
        ("it's", "it is"),
        ("it'd", "it would"),
        ("it'll", "it will"),
        ("there's", "there is"),
        ("there'd", "there would"),
        ("there'll", "there will"),
        ("that's", "that is"),
        ("that'd", "that would"),
        ("that'll", "that will"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_swaps_both_directions() {
        let mut gender = default_gender();
        assert_eq!(
            gender.sub("She'd told him she heard that his hernia is history"),
            "He'd told her he heard that her hernia is history"
        );
    }

    #[test]
    fn test_person_first_to_third() {
        let mut person = default_person();
        assert_eq!(
            person.sub("I think he knows that his actions threaten me and mine."),
            "HE think i knows that my actions threaten him and his."
        );
    }

    #[test]
    fn test_person2_first_to_second() {
        let mut person2 = default_person2();
        assert_eq!(
            person2.sub("I think you know that your actions threaten me and mine."),
            "YOU think me know that my actions threaten you and yours."
        );
    }

    #[test]
    fn test_normal_expands_contractions() {
        let mut normal = default_normal();
        assert_eq!(normal.sub("I'm sure you're right"), "I am sure you are right");
        assert_eq!(normal.sub("DON'T PANIC"), "DO NOT PANIC");
    }
}
