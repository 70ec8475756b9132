use clap::Args;

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2000;
pub const MIN_QUESTIONS: usize = 1;
pub const MAX_QUESTIONS: usize = 10;

/// Request settings for quiz generation.
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Model used to write the quiz
    #[arg(long, env = "QUIZGEN_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,
    /// Upper bound on tokens the model may produce for one quiz
    #[arg(
        long = "max-tokens",
        env = "QUIZGEN_MAX_TOKENS",
        value_name = "COUNT",
        default_value_t = DEFAULT_MAX_OUTPUT_TOKENS,
        global = true
    )]
    pub max_output_tokens: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Loads a local `.env` file, letting it override variables already set.
#[cfg(feature = "env-file")]
pub fn load_env_file() {
    match dotenvy::dotenv_override() {
        Ok(path) => log::debug!("loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => log::warn!("ignoring unreadable .env file: {err}"),
    }
}
