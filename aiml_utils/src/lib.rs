//! # aiml_utils: Text Passes for the aiml-bot Engine
//!
//! The aiml_utils crate is a workspace member of the aiml-bot project.
//!
//! It holds the three text passes every AIML category and every user
//! utterance flows through before matching:
//!
//! - [`normalize`]: uppercasing, punctuation stripping, and whitespace
//!   collapsing applied to patterns and inputs.
//! - [`split_sentences`]: the `.?!` sentence cutter used on raw input and by
//!   the `<that index="i,j">` template tag.
//! - [`WordSub`]: the case-preserving whole-word replacer behind the
//!   `gender`, `person`, `person2`, and `normal` substitution tables.

pub mod normalize;
pub mod splitting;
pub mod substitutions;
pub mod word_sub;

pub use normalize::{collapse_whitespace, normalize};
pub use splitting::split_sentences;
pub use word_sub::WordSub;
