use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

pub const OPTIONS_PER_QUESTION: usize = 4;

/// One of the four option labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Letter {
    A,
    B,
    C,
    D,
}

impl Letter {
    pub const ALL: [Letter; OPTIONS_PER_QUESTION] = [Letter::A, Letter::B, Letter::C, Letter::D];

    pub fn as_char(self) -> char {
        match self {
            Letter::A => 'A',
            Letter::B => 'B',
            Letter::C => 'C',
            Letter::D => 'D',
        }
    }

    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            _ => None,
        }
    }

    /// Parses a typed answer: exactly one letter, any case, surrounding
    /// whitespace ignored.
    pub fn parse_choice(input: &str) -> Option<Letter> {
        let mut chars = input.trim().chars();
        let letter = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Letter::from_char(letter)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<String> for Letter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Letter::parse_choice(&value)
            .ok_or_else(|| format!("expected one of A, B, C or D, got {value:?}"))
    }
}

impl From<Letter> for String {
    fn from(letter: Letter) -> Self {
        letter.to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    /// Option strings with their label embedded, e.g. `"B. Paris"`.
    pub options: Vec<String>,
    /// Decoded leniently from the model (`" b "` becomes `B`); scoring then
    /// compares letters exactly.
    pub correct_answer: Letter,
}

impl Question {
    pub fn validate(&self) -> Result<(), String> {
        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(format!(
                "expected {OPTIONS_PER_QUESTION} options, found {}",
                self.options.len()
            ));
        }
        if !self.option_labels().any(|label| label == self.correct_answer) {
            return Err(format!(
                "correct answer {} is not one of the option labels",
                self.correct_answer
            ));
        }
        Ok(())
    }

    pub fn option_labels(&self) -> impl Iterator<Item = Letter> + '_ {
        self.options.iter().filter_map(|option| option_label(option))
    }
}

fn option_label(option: &str) -> Option<Letter> {
    let mut chars = option.trim_start().chars();
    let letter = Letter::from_char(chars.next()?)?;
    matches!(chars.next(), Some('.') | Some(')')).then_some(letter)
}

/// Questions for one round, in presentation order. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuiz);
        }
        for (idx, question) in questions.iter().enumerate() {
            question
                .validate()
                .map_err(|reason| QuizError::InvalidQuestion {
                    number: idx + 1,
                    reason,
                })?;
        }
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }
}

/// Submitted letters keyed by 0-based question index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerSet {
    answers: BTreeMap<usize, Letter>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, index: usize, answer: Letter) {
        self.answers.insert(index, answer);
    }

    pub fn get(&self, index: usize) -> Option<Letter> {
        self.answers.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl FromIterator<(usize, Letter)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (usize, Letter)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}
