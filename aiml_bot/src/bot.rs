use crate::bootstrap;
use crate::loader::{AimlLoader, CategoryMap};
use crate::session::{Session, DEFAULT_SESSION_ID, MAX_RECURSION, RESERVED_KEYS};
use aiml_brain::{BrainError, PatternBrain};
use aiml_utils::substitutions::{
    default_gender, default_normal, default_person, default_person2,
};
use aiml_utils::{split_sentences, WordSub};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// The version string the `<version>` template tag reports.
pub const VERSION: &str = concat!("AIML Bot ", env!("CARGO_PKG_VERSION"));

/// The AIML bot: a thread-safe facade over the pattern store, session
/// state, and template evaluator.
///
/// All public methods serialize on one internal lock, so a call into any
/// session blocks every other call; recursive `<srai>` evaluation runs
/// inside the already-held lock and never re-acquires it.
///
/// ```
/// use aiml_bot::{Bot, DEFAULT_SESSION_ID};
///
/// let bot = Bot::new();
/// let reply = bot.respond("What is your name?", DEFAULT_SESSION_ID);
/// assert_eq!(reply, "My name is Nameless.");
/// ```
pub struct Bot {
    core: Mutex<BotCore>,
}

impl Bot {
    /// A bot knowing only the built-in bootstrap rules.
    pub fn new() -> Self {
        BotBuilder::default()
            .build()
            .expect("building without a brain file is infallible")
    }

    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    fn lock(&self) -> MutexGuard<'_, BotCore> {
        self.core
            .lock()
            .unwrap_or_else(|e| panic!("Bot state lock poisoned: {e:?}"))
    }

    /// Return the bot's response to the input string.
    ///
    /// The input is split into sentences; each sentence is recorded in the
    /// session's input history, matched, evaluated, and recorded in the
    /// output history. The per-sentence responses are joined and trimmed.
    pub fn respond(&self, text: &str, session_id: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        self.lock().respond(text, session_id)
    }

    /// Load and learn the contents of the named AIML file via the
    /// configured loader. Wildcards expand; the name is resolved against
    /// both the literal path and the install root, in original and
    /// lowercased forms.
    pub fn learn(&self, filename: &str) {
        self.lock().learn(filename);
    }

    /// Add already-parsed categories straight into the brain.
    pub fn learn_categories(&self, categories: CategoryMap) {
        self.lock().learn_categories(categories);
    }

    /// Dump the brain to a file on disk.
    pub fn save_brain(&self, path: &Path) -> Result<(), BrainError> {
        self.lock().brain.save(path)
    }

    /// Replace the brain with a previously saved one. The current contents
    /// are discarded.
    pub fn load_brain(&self, path: &Path) -> Result<(), BrainError> {
        self.lock().brain.restore(path)
    }

    /// Reset the brain to its initial empty state.
    pub fn reset_brain(&self) {
        self.lock().brain = PatternBrain::new();
    }

    /// The number of categories the bot has learned.
    pub fn category_count(&self) -> usize {
        self.lock().brain.template_count()
    }

    /// The bot's name, as matched by the `BOT_NAME` pattern token.
    pub fn name(&self) -> String {
        self.lock().brain.bot_name().to_string()
    }

    pub fn version(&self) -> &'static str {
        VERSION
    }

    /// The value of `name` in the given session, or `""`. Reserved history
    /// keys are not predicates and are rejected.
    pub fn get_predicate(&self, name: &str, session_id: &str) -> String {
        self.lock().get_predicate_value(name, session_id)
    }

    /// Set a predicate in the given session, creating the session if
    /// needed.
    pub fn set_predicate(&self, name: &str, value: &str, session_id: &str) {
        self.lock().set_predicate_value(name, value, session_id);
    }

    /// The value of the global, template-read-only bot predicate `name`.
    pub fn get_bot_predicate(&self, name: &str) -> String {
        self.lock().get_bot_predicate_value(name)
    }

    /// Set a bot predicate. Setting `name` also renames the bot in the
    /// brain, collapsing the value to a single word for matching.
    pub fn set_bot_predicate(&self, name: &str, value: &str) {
        self.lock().set_bot_predicate_value(name, value);
    }

    /// Register (or replace) a substitution table under the given name.
    pub fn add_substitutions(&self, name: &str, subber: WordSub) {
        self.lock().subbers.insert(name.to_string(), subber);
    }

    /// Create the session if it does not already exist.
    pub fn add_session(&self, session_id: &str) {
        self.lock().add_session(session_id);
    }

    pub fn delete_session(&self, session_id: &str) {
        self.lock().sessions.remove(session_id);
    }

    /// A copy of the full session state.
    pub fn get_session_data(&self, session_id: &str) -> Session {
        self.lock().session_mut(session_id).clone()
    }

    /// Replace the full session state.
    pub fn set_session_data(&self, session_id: &str, data: Session) {
        self.lock().sessions.insert(session_id.to_string(), data);
    }

    pub fn get_input_history(&self, session_id: &str) -> Vec<String> {
        self.lock()
            .session_mut(session_id)
            .input_history
            .iter()
            .cloned()
            .collect()
    }

    pub fn set_input_history(&self, session_id: &str, history: Vec<String>) {
        self.lock().session_mut(session_id).input_history = history.into_iter().collect();
    }

    pub fn get_output_history(&self, session_id: &str) -> Vec<String> {
        self.lock()
            .session_mut(session_id)
            .output_history
            .iter()
            .cloned()
            .collect()
    }

    pub fn set_output_history(&self, session_id: &str, history: Vec<String>) {
        self.lock().session_mut(session_id).output_history = history.into_iter().collect();
    }

    pub fn get_input_stack(&self, session_id: &str) -> Vec<String> {
        self.lock().session_mut(session_id).input_stack.clone()
    }

    pub fn set_input_stack(&self, session_id: &str, stack: Vec<String>) {
        self.lock().session_mut(session_id).input_stack = stack;
    }
}

impl Default for Bot {
    fn default() -> Self {
        Self::new()
    }
}

/// Step-by-step construction of a [`Bot`]: an optional saved brain, AIML
/// files to learn, commands to run once loading finishes, the loader and
/// install root, and a fixed RNG seed for reproducible `<random>` picks.
#[derive(Default)]
pub struct BotBuilder {
    brain_file: Option<PathBuf>,
    learn_globs: Vec<String>,
    commands: Vec<String>,
    loader: Option<Box<dyn AimlLoader>>,
    install_root: Option<PathBuf>,
    rng_seed: Option<u64>,
}

impl BotBuilder {
    /// Load the brain from `path` instead of learning the bootstrap rules.
    /// [`BotBuilder::build`] fails if the file cannot be restored; callers
    /// fall back to a rebuild.
    pub fn brain_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.brain_file = Some(path.into());
        self
    }

    /// Learn an AIML file (or glob of files) after the brain is ready.
    pub fn learn_glob(mut self, pattern: impl Into<String>) -> Self {
        self.learn_globs.push(pattern.into());
        self
    }

    /// Run an input string through the bot once construction finishes.
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.commands.push(command.into());
        self
    }

    pub fn loader(mut self, loader: Box<dyn AimlLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Where `learn` resolves relative AIML file names. Defaults to
    /// `~/.aiml`.
    pub fn install_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.install_root = Some(path.into());
        self
    }

    /// Seed the RNG behind `<random>`, for reproducible tests.
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<Bot, BrainError> {
        let rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let install_root = self
            .install_root
            .or_else(|| dirs::home_dir().map(|home| home.join(".aiml")))
            .unwrap_or_else(|| PathBuf::from(".aiml"));
        let mut core = BotCore::new(self.loader, install_root, rng);

        if let Some(path) = &self.brain_file {
            core.brain.restore(path)?;
        } else {
            core.learn_categories(bootstrap::bootstrap_categories());
        }
        for pattern in &self.learn_globs {
            core.learn(pattern);
        }
        for command in &self.commands {
            let response = core.respond_internal(command, DEFAULT_SESSION_ID);
            tracing::debug!(
                command = command.as_str(),
                response = response.as_str(),
                "startup command"
            );
        }

        Ok(Bot {
            core: Mutex::new(core),
        })
    }
}

/// The state behind the facade lock. Everything that mutates sessions, the
/// brain, or the substitution tables goes through `&mut self` here, so a
/// single lock acquisition covers a whole `respond` turn including its
/// recursive `<srai>` re-entries.
pub(crate) struct BotCore {
    pub(crate) brain: PatternBrain,
    pub(crate) sessions: HashMap<String, Session>,
    pub(crate) bot_predicates: HashMap<String, String>,
    pub(crate) subbers: HashMap<String, WordSub>,
    pub(crate) rng: StdRng,
    pub(crate) loader: Option<Box<dyn AimlLoader>>,
    pub(crate) install_root: PathBuf,
}

impl BotCore {
    fn new(loader: Option<Box<dyn AimlLoader>>, install_root: PathBuf, rng: StdRng) -> Self {
        let mut core = Self {
            brain: PatternBrain::new(),
            sessions: HashMap::new(),
            bot_predicates: HashMap::new(),
            subbers: HashMap::from([
                ("gender".to_string(), default_gender()),
                ("person".to_string(), default_person()),
                ("person2".to_string(), default_person2()),
                ("normal".to_string(), default_normal()),
            ]),
            rng,
            loader,
            install_root,
        };
        core.add_session(DEFAULT_SESSION_ID);
        core.set_bot_predicate_value("name", "Nameless");
        core
    }

    pub(crate) fn add_session(&mut self, session_id: &str) {
        self.sessions.entry(session_id.to_string()).or_default();
    }

    pub(crate) fn session_mut(&mut self, session_id: &str) -> &mut Session {
        self.sessions.entry(session_id.to_string()).or_default()
    }

    pub(crate) fn get_predicate_value(&mut self, name: &str, session_id: &str) -> String {
        assert!(
            !RESERVED_KEYS.contains(&name),
            "{name:?} is reserved session state, not a predicate"
        );
        self.session_mut(session_id)
            .predicates
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn set_predicate_value(&mut self, name: &str, value: &str, session_id: &str) {
        assert!(
            !RESERVED_KEYS.contains(&name),
            "{name:?} is reserved session state, not a predicate"
        );
        self.session_mut(session_id)
            .predicates
            .insert(name.to_string(), value.to_string());
    }

    pub(crate) fn get_bot_predicate_value(&self, name: &str) -> String {
        self.bot_predicates.get(name).cloned().unwrap_or_default()
    }

    pub(crate) fn set_bot_predicate_value(&mut self, name: &str, value: &str) {
        self.bot_predicates
            .insert(name.to_string(), value.to_string());
        // The brain matches the BOT_NAME token against its own copy of the
        // name, so renames must reach it too.
        if name == "name" {
            self.brain.set_bot_name(value);
        }
    }

    pub(crate) fn sub_with(&mut self, table: &str, text: &str) -> String {
        match self.subbers.get_mut(table) {
            Some(subber) => subber.sub(text),
            None => {
                tracing::warn!(table, "unknown substitution table");
                text.to_string()
            }
        }
    }

    pub(crate) fn normal_sub(&mut self, text: &str) -> String {
        self.sub_with("normal", text)
    }

    pub(crate) fn respond(&mut self, text: &str, session_id: &str) -> String {
        self.add_session(session_id);

        let mut final_response = String::new();
        for sentence in split_sentences(text) {
            // Record the input before responding so <input/> sees it.
            self.session_mut(session_id).record_input(&sentence);
            let response = self.respond_internal(&sentence, session_id);
            self.session_mut(session_id).record_output(&response);
            final_response.push_str(&response);
            final_response.push_str("  ");
        }
        let final_response = final_response.trim().to_string();

        debug_assert!(
            self.session_mut(session_id).input_stack.is_empty(),
            "input stack must be empty between respond calls"
        );
        final_response
    }

    /// The internal entry point `<srai>`/`<sr>` re-enter: match one
    /// sentence and evaluate its template, without touching the histories.
    pub(crate) fn respond_internal(&mut self, text: &str, session_id: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        self.add_session(session_id);

        if self.session_mut(session_id).input_stack.len() > MAX_RECURSION {
            tracing::warn!(input = text, "maximum recursion depth exceeded");
            return String::new();
        }
        self.session_mut(session_id).input_stack.push(text.to_string());

        let subbed_input = self.normal_sub(text);
        let that = self
            .session_mut(session_id)
            .output_history
            .back()
            .cloned()
            .unwrap_or_default();
        let subbed_that = self.normal_sub(&that);
        let topic = self.get_predicate_value("topic", session_id);
        let subbed_topic = self.normal_sub(&topic);

        let response = match self
            .brain
            .find_match(&subbed_input, &subbed_that, &subbed_topic)
            .cloned()
        {
            None => {
                tracing::warn!(input = text, "no match found for input");
                String::new()
            }
            Some(template) => self.evaluate(&template, session_id).trim().to_string(),
        };

        self.session_mut(session_id).input_stack.pop();
        response
    }

    pub(crate) fn learn_categories(&mut self, categories: CategoryMap) {
        for (key, template) in categories {
            self.brain.add(&key.pattern, &key.that, &key.topic, template);
        }
    }

    pub(crate) fn learn(&mut self, filename: &str) {
        let mut candidates = vec![filename.to_string()];
        let in_root = self.install_root.join(filename).to_string_lossy().into_owned();
        if in_root != filename {
            candidates.push(in_root);
        }
        for lowered in candidates.clone() {
            let lowered = lowered.to_lowercase();
            if !candidates.contains(&lowered) {
                candidates.push(lowered);
            }
        }

        for candidate in candidates {
            let Ok(entries) = glob::glob(&candidate) else {
                continue;
            };
            for path in entries.flatten() {
                if !path.is_file() {
                    continue;
                }
                let Some(loader) = self.loader.as_deref() else {
                    tracing::warn!(
                        file = candidate.as_str(),
                        "no AIML loader configured; cannot learn from files"
                    );
                    return;
                };
                tracing::debug!(file = %path.display(), "loading AIML file");
                match loader.parse(&path) {
                    Ok(categories) => {
                        for (key, template) in categories {
                            self.brain.add(&key.pattern, &key.that, &key.topic, template);
                        }
                    }
                    // Fatal for this file only; keep loading the rest.
                    Err(error) => tracing::error!(%error, "skipping AIML file"),
                }
            }
        }
    }
}
