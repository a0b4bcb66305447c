//! # aiml_bot: An AIML 1.0.1 Chatbot Engine
//!
//! The aiml_bot crate is the facade of the aiml-bot workspace. It ties the
//! text passes of `aiml_utils` and the pattern store of `aiml_brain`
//! together into a thread-safe bot:
//!
//! - per-session predicates, bounded input/output histories, and the
//!   recursion-bounded input stack;
//! - the template evaluator with handlers for the full AIML tag set
//!   (`srai`, `star`, `that`, `condition`, `random`, `think`, `set`/`get`,
//!   case and person transforms, `learn`, `system`, ...);
//! - the [`Bot`] facade whose `respond` serializes concurrent callers on a
//!   single lock;
//! - the [`AimlLoader`] seam for an external AIML XML parser, plus
//!   compiled-in bootstrap and self-test rule sets.
//!
//! ## Use
//!
//! ```
//! use aiml_bot::{Bot, DEFAULT_SESSION_ID};
//!
//! let bot = Bot::new();
//! bot.learn_categories(aiml_bot::self_test_categories());
//! assert_eq!(
//!     bot.respond("test bot", DEFAULT_SESSION_ID),
//!     "My name is Nameless"
//! );
//! ```

pub mod bootstrap;
mod bot;
mod evaluator;
mod loader;
mod session;

pub use bootstrap::{bootstrap_categories, self_test_categories};
pub use bot::{Bot, BotBuilder, VERSION};
pub use loader::{AimlLoader, CategoryKey, CategoryMap, ParseError};
pub use session::{Session, DEFAULT_SESSION_ID, MAX_HISTORY, MAX_RECURSION};

pub use aiml_brain::{BrainError, PatternBrain, StarKind, TagKind, Template, Whitespace};
pub use aiml_utils::{normalize, split_sentences, WordSub};
