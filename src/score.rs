use std::fmt;

use crate::quiz::{AnswerSet, Letter, Quiz};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submitted {
    Answered(Letter),
    NoAnswer,
}

impl fmt::Display for Submitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Submitted::Answered(letter) => write!(f, "{letter}"),
            Submitted::NoAnswer => f.write_str("No answer"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultDetail {
    pub number: usize,
    pub question: String,
    pub options: Vec<String>,
    pub submitted: Submitted,
    pub correct_answer: Letter,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultSummary {
    pub correct: usize,
    pub total: usize,
    pub percentage: f64,
    pub details: Vec<ResultDetail>,
}

/// Scores `answers` against `quiz`. Missing answers count as wrong.
pub fn calculate_results(quiz: &Quiz, answers: &AnswerSet) -> ResultSummary {
    let details: Vec<ResultDetail> = quiz
        .questions()
        .iter()
        .enumerate()
        .map(|(idx, question)| {
            let submitted = answers
                .get(idx)
                .map_or(Submitted::NoAnswer, Submitted::Answered);
            ResultDetail {
                number: idx + 1,
                question: question.text.clone(),
                options: question.options.clone(),
                submitted,
                correct_answer: question.correct_answer,
                is_correct: submitted == Submitted::Answered(question.correct_answer),
            }
        })
        .collect();

    let correct = details.iter().filter(|detail| detail.is_correct).count();
    // Quiz is non-empty by construction.
    let total = quiz.total();
    let percentage = correct as f64 / total as f64 * 100.0;

    ResultSummary {
        correct,
        total,
        percentage,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::tests::question;
    use proptest::prelude::*;

    fn letter_strategy() -> impl Strategy<Value = Letter> {
        prop::sample::select(Letter::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn score_counts_matching_answers(
            pairs in prop::collection::vec((letter_strategy(), letter_strategy()), 1..12)
        ) {
            let quiz = Quiz::new(
                pairs.iter().map(|(correct, _)| question("q", *correct)).collect(),
            ).unwrap();
            let answers: AnswerSet = pairs
                .iter()
                .enumerate()
                .map(|(idx, (_, given))| (idx, *given))
                .collect();

            let summary = calculate_results(&quiz, &answers);
            let expected = pairs.iter().filter(|(correct, given)| correct == given).count();

            prop_assert_eq!(summary.correct, expected);
            prop_assert_eq!(summary.total, pairs.len());
            prop_assert!((summary.percentage - 100.0 * expected as f64 / pairs.len() as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn missing_answers_are_scored_as_no_answer() {
        let quiz = Quiz::new(vec![
            question("one", Letter::A),
            question("two", Letter::B),
            question("three", Letter::C),
            question("four", Letter::D),
        ])
        .unwrap();
        let answers: AnswerSet = [(0, Letter::A), (1, Letter::C)].into_iter().collect();

        let summary = calculate_results(&quiz, &answers);

        assert_eq!(summary.correct, 1);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.percentage, 25.0);
        assert!(summary.details[0].is_correct);
        assert!(!summary.details[1].is_correct);
        assert_eq!(summary.details[2].submitted, Submitted::NoAnswer);
        assert_eq!(summary.details[3].number, 4);
        assert_eq!(summary.details[3].submitted.to_string(), "No answer");
    }

    #[test]
    fn one_of_three_rounds_to_one_decimal_on_display() {
        let quiz = Quiz::new(vec![
            question("one", Letter::A),
            question("two", Letter::A),
            question("three", Letter::A),
        ])
        .unwrap();
        let answers: AnswerSet = [(0, Letter::A), (1, Letter::B), (2, Letter::B)]
            .into_iter()
            .collect();

        let summary = calculate_results(&quiz, &answers);

        assert_eq!(format!("{:.1}", summary.percentage), "33.3");
    }
}
