use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::QuizError;
use crate::quiz::{Question, Quiz};

// `[ { ... } ]`, stopping at the first `}` that closes the array.
static OBJECT_ARRAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[\s*\{.*?\}\s*\]").unwrap());
// First `[` to last `]`.
static LOOSE_ARRAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[.*\]").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractionStage {
    WholeBody,
    EmbeddedObjectArray,
    LooseArray,
}

/// What a parsed response turned out to be.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseShape {
    QuestionList(Value),
    /// `{"questions": ...}`
    WrappedQuestionList(Value),
    Unrecognized(&'static str),
}

impl ResponseShape {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(_) => ResponseShape::QuestionList(value),
            Value::Object(mut map) => match map.remove("questions") {
                Some(questions) => ResponseShape::WrappedQuestionList(questions),
                None => ResponseShape::Unrecognized("object without a \"questions\" key"),
            },
            Value::Null => ResponseShape::Unrecognized("null"),
            Value::Bool(_) => ResponseShape::Unrecognized("boolean"),
            Value::Number(_) => ResponseShape::Unrecognized("number"),
            Value::String(_) => ResponseShape::Unrecognized("string"),
        }
    }

    pub fn into_questions(self) -> Result<Vec<Question>, QuizError> {
        match self {
            ResponseShape::QuestionList(list) | ResponseShape::WrappedQuestionList(list) => {
                Ok(serde_json::from_value(list)?)
            }
            ResponseShape::Unrecognized(kind) => Err(QuizError::UnrecognizedShape(kind)),
        }
    }
}

/// Turns raw completion text into a validated quiz.
///
/// If the whole body is JSON, it decides the outcome. Otherwise every embedded
/// array of objects is tried in order, then the widest bracketed span; the
/// first one that decodes into questions wins.
pub fn extract_quiz(body: &str) -> Result<Quiz, QuizError> {
    let (stage, quiz) = decode_first_quiz(body)?;
    log::debug!("quiz JSON located via {stage:?}");
    Ok(quiz)
}

fn decode_first_quiz(body: &str) -> Result<(ExtractionStage, Quiz), QuizError> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return decode(value).map(|quiz| (ExtractionStage::WholeBody, quiz));
    }

    let embedded = OBJECT_ARRAY_RE
        .find_iter(body)
        .map(|candidate| (ExtractionStage::EmbeddedObjectArray, candidate.as_str()));
    let loose = LOOSE_ARRAY_RE
        .find(body)
        .map(|candidate| (ExtractionStage::LooseArray, candidate.as_str()));

    let mut first_error = None;
    for (stage, candidate) in embedded.chain(loose) {
        let Ok(value) = serde_json::from_str::<Value>(candidate) else {
            continue;
        };
        match decode(value) {
            Ok(quiz) => return Ok((stage, quiz)),
            Err(err) => {
                log::debug!("skipping {stage:?} candidate: {err}");
                first_error.get_or_insert(err);
            }
        }
    }

    Err(first_error.unwrap_or(QuizError::Extraction))
}

fn decode(value: Value) -> Result<Quiz, QuizError> {
    let questions = ResponseShape::classify(value).into_questions()?;
    Quiz::new(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Letter;
    use serde_json::json;

    fn question_json(n: usize, correct: &str) -> Value {
        json!({
            "question": format!("Question number {n}?"),
            "options": ["A. one", "B. two", "C. three", "D. four"],
            "correct_answer": correct,
        })
    }

    fn five_questions() -> Value {
        Value::Array(
            ["A", "B", "C", "D", "A"]
                .iter()
                .enumerate()
                .map(|(n, correct)| question_json(n + 1, correct))
                .collect(),
        )
    }

    #[test]
    fn whole_body_array_is_returned_unchanged() {
        let body = serde_json::to_string_pretty(&five_questions()).unwrap();

        let quiz = extract_quiz(&body).unwrap();

        assert_eq!(quiz.total(), 5);
        assert_eq!(serde_json::to_value(&quiz).unwrap(), five_questions());
        assert_eq!(
            decode_first_quiz(&body).ok().map(|(stage, _)| stage),
            Some(ExtractionStage::WholeBody)
        );
    }

    #[test]
    fn wrapped_question_list_is_unwrapped() {
        let body = json!({ "questions": five_questions() }).to_string();

        let quiz = extract_quiz(&body).unwrap();

        assert_eq!(quiz.total(), 5);
        assert_eq!(quiz.questions()[1].correct_answer, Letter::B);
    }

    #[test]
    fn embedded_array_is_extracted_from_prose() {
        let body = format!(
            "Sure! Here is your quiz:\n\n{}\n\nGood luck [and have fun]!",
            five_questions()
        );

        let quiz = extract_quiz(&body).unwrap();

        assert_eq!(serde_json::to_value(&quiz).unwrap(), five_questions());
        assert_eq!(
            decode_first_quiz(&body).ok().map(|(stage, _)| stage),
            Some(ExtractionStage::EmbeddedObjectArray)
        );
    }

    #[test]
    fn code_fenced_array_is_extracted() {
        let body = format!("```json\n{}\n```", json!([question_json(1, "C")]));

        let quiz = extract_quiz(&body).unwrap();

        assert_eq!(quiz.questions()[0].correct_answer, Letter::C);
    }

    #[test]
    fn loose_array_is_used_when_embedded_match_is_cut_short() {
        let list = json!([{
            "question": "What does {x}] print?",
            "options": ["A. x", "B. {x}", "C. nothing", "D. an error"],
            "correct_answer": "D",
        }]);
        let body = format!("Quiz: {list} done");

        let quiz = extract_quiz(&body).unwrap();

        assert_eq!(quiz.questions()[0].text, "What does {x}] print?");
        assert_eq!(
            decode_first_quiz(&body).ok().map(|(stage, _)| stage),
            Some(ExtractionStage::LooseArray)
        );
    }

    #[test]
    fn body_without_array_is_an_extraction_error() {
        let err = extract_quiz("I'm sorry, I can't help with that.").unwrap_err();
        assert!(matches!(err, QuizError::Extraction));

        let err = extract_quiz("Here you go: [{\"question\": \"unterminated").unwrap_err();
        assert!(matches!(err, QuizError::Extraction));
    }

    #[test]
    fn unrecognized_shapes_fail_fast() {
        let err = extract_quiz(r#"{"quiz": []}"#).unwrap_err();
        assert!(matches!(err, QuizError::UnrecognizedShape(_)));

        let err = extract_quiz("42").unwrap_err();
        assert!(matches!(err, QuizError::UnrecognizedShape("number")));
    }

    #[test]
    fn wrong_question_format_is_malformed() {
        let err = extract_quiz(r#"{"questions": "none"}"#).unwrap_err();
        assert!(matches!(err, QuizError::Malformed(_)));

        let err = extract_quiz(r#"[{"prompt": "missing fields"}]"#).unwrap_err();
        assert!(matches!(err, QuizError::Malformed(_)));
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(matches!(extract_quiz("[]"), Err(QuizError::EmptyQuiz)));
    }

    #[test]
    fn later_embedded_array_is_used_when_earlier_one_is_not_a_quiz() {
        let body = format!(
            "Example [{{\"x\": 1}}] and then the real quiz {}",
            json!([question_json(1, "B")])
        );

        let quiz = extract_quiz(&body).unwrap();

        assert_eq!(quiz.questions()[0].correct_answer, Letter::B);
        assert_eq!(
            decode_first_quiz(&body).ok().map(|(stage, _)| stage),
            Some(ExtractionStage::EmbeddedObjectArray)
        );
    }

    #[test]
    fn embedded_decode_error_is_reported_when_nothing_else_fits() {
        let err = extract_quiz("Here: [{\"prompt\": \"no question field\"}] sorry").unwrap_err();
        assert!(matches!(err, QuizError::Malformed(_)));
    }
}
