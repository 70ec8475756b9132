pub mod client;
pub mod extract;
pub mod generate;
pub mod response;
pub mod secrets;

pub use client::{CompletionBackend, OpenAiCompletion, test_configured_api_key};
pub use extract::extract_quiz;
pub use generate::generate_quiz;
pub use response::CompletionRequest;
pub use secrets::{KeyCheck, clear_api_key, load_api_key, prompt_for_api_key, store_api_key};
