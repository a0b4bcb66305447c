use std::collections::{HashMap, VecDeque};

/// The session used when callers do not name one.
pub const DEFAULT_SESSION_ID: &str = "anonymous";

/// Maximum length of the input and output history queues.
pub const MAX_HISTORY: usize = 10;

/// Maximum depth of recursive `<srai>`/`<sr>` evaluation before a response
/// is aborted.
pub const MAX_RECURSION: usize = 100;

// Names the reserved session state answered to in the original predicate
// dictionary; the generic predicate accessors must reject them.
pub(crate) const RESERVED_KEYS: [&str; 3] =
    ["<INPUT HISTORY>", "<OUTPUT HISTORY>", "<INPUT STACK>"];

/// A single dialogue context: free-form predicates plus the bounded
/// input/output histories and the in-flight input stack.
///
/// The input stack is empty whenever no `respond` call is in progress; its
/// depth is bounded by [`MAX_RECURSION`].
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub predicates: HashMap<String, String>,
    pub input_history: VecDeque<String>,
    pub output_history: VecDeque<String>,
    pub input_stack: Vec<String>,
}

impl Session {
    pub(crate) fn record_input(&mut self, input: &str) {
        self.input_history.push_back(input.to_string());
        while self.input_history.len() > MAX_HISTORY {
            self.input_history.pop_front();
        }
    }

    pub(crate) fn record_output(&mut self, output: &str) {
        self.output_history.push_back(output.to_string());
        while self.output_history.len() > MAX_HISTORY {
            self.output_history.pop_front();
        }
    }
}
