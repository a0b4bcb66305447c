//! # aiml_brain: Pattern Store and Matcher for the aiml-bot Engine
//!
//! The aiml_brain crate is a workspace member of the aiml-bot project.
//!
//! It implements the AIML pattern-matching algorithm described by
//! Dr. Richard Wallace: categories are stored in a trie keyed by normalized
//! words plus the wildcard sentinels, indexed on the
//! `(pattern, that, topic)` triple, and matched by a depth-first search that
//! ranks `_` above literal words, literal words above the bot name, and `*`
//! last.
//!
//! ## Use
//!
//! ```rust
//! use aiml_brain::{PatternBrain, StarKind, TagKind, Template};
//!
//! let mut brain = PatternBrain::new();
//! let template = Template::element(TagKind::Template)
//!     .with_child(Template::text("Hello yourself!"));
//! brain.add("HELLO *", "", "", template);
//!
//! assert!(brain.find_match("hello there", "", "").is_some());
//! assert_eq!(brain.star(StarKind::Star, "hello there", "", "", 1), "there");
//! ```
//!
//! The whole store round-trips through an opaque binary "brain" file via
//! [`PatternBrain::save`] and [`PatternBrain::restore`].

pub mod matcher;
pub mod template;
pub mod trie;

pub use matcher::{StarKind, DUMMY_THAT, DUMMY_TOPIC};
pub use template::{TagKind, Template, Whitespace};
pub use trie::{BrainError, EdgeLabel, PatternBrain};
