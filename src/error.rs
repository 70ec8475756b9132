use std::io;

use thiserror::Error;

/// Everything that can end a quiz round early.
///
/// The session loop matches on this to decide between the retry prompt and
/// exiting; nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Transport, quota or authentication failure from the completion endpoint.
    #[error("completion request failed: {0:#}")]
    Completion(anyhow::Error),

    #[error("could not extract quiz content from the model response")]
    Extraction,

    #[error("model response was a JSON {0}, not a list of questions")]
    UnrecognizedShape(&'static str),

    #[error("quiz content did not match the question format: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("question {number} is invalid: {reason}")]
    InvalidQuestion { number: usize, reason: String },

    #[error("the model returned no questions")]
    EmptyQuiz,

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}
