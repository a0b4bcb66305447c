//
mod respond;
mod state;

use aiml_bot::{self_test_categories, Bot};

/// A bot loaded with the self-test rules and a fixed RNG seed.
pub fn test_bot() -> Bot {
    let bot = Bot::builder()
        .rng_seed(7)
        .build()
        .expect("building without a brain file succeeds");
    bot.learn_categories(self_test_categories());
    bot
}
