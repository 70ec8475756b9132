use crate::config::GeneratorSettings;
use crate::error::QuizError;
use crate::quiz::Quiz;

use super::client::CompletionBackend;
use super::extract::extract_quiz;
use super::response::CompletionRequest;

const SYSTEM_PROMPT: &str = "You are a quiz generator specializing in creating educational multiple-choice quizzes. Respond with valid JSON only.";

pub fn build_quiz_prompt(topic: &str, num_questions: usize) -> String {
    format!(
        r#"Generate a multiple-choice quiz with {num_questions} questions on the topic: {topic}.
Format the response as a JSON array of objects with the following structure:
[
    {{
        "question": "Question text?",
        "options": ["A. Option 1", "B. Option 2", "C. Option 3", "D. Option 4"],
        "correct_answer": "B"
    }}
]
Make sure the JSON is valid and each question has exactly 4 options (A, B, C, D).
The correct_answer field should only contain the letter (A, B, C, or D).
Return ONLY the JSON with no other text.
"#
    )
}

pub fn quiz_request(
    settings: &GeneratorSettings,
    topic: &str,
    num_questions: usize,
) -> CompletionRequest {
    CompletionRequest {
        model: settings.model.clone(),
        system_prompt: SYSTEM_PROMPT.to_string(),
        user_prompt: build_quiz_prompt(topic, num_questions),
        max_output_tokens: settings.max_output_tokens,
    }
}

/// Asks `backend` for a quiz and parses the reply. One request, no retries.
pub async fn generate_quiz<B: CompletionBackend>(
    backend: &B,
    settings: &GeneratorSettings,
    topic: &str,
    num_questions: usize,
) -> Result<Quiz, QuizError> {
    let request = quiz_request(settings, topic, num_questions);
    log::debug!(
        "requesting {num_questions} questions from {} (max {} tokens)",
        request.model,
        request.max_output_tokens
    );

    let body = backend
        .complete(&request)
        .await
        .map_err(QuizError::Completion)?;
    log::debug!("completion returned {} bytes", body.len());

    let quiz = extract_quiz(&body)?;
    if quiz.total() != num_questions {
        log::warn!(
            "asked for {num_questions} questions but the model returned {}",
            quiz.total()
        );
    }
    Ok(quiz)
}
