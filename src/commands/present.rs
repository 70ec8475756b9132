use std::io::{self, BufRead, Write};

use crate::console::{Console, RetryLimit};
use crate::palette::Palette;
use crate::quiz::{AnswerSet, Letter, Quiz};
use crate::utils::pluralize_with;

const ANSWER_PROMPT: &str = "\nYour answer (A, B, C, or D): ";
const ANSWER_HINT: &str = "Please enter A, B, C, or D.";

/// Asks every question in order and collects one letter per question.
///
/// Invalid replies are re-prompted without limit. If input ends early the
/// answers gathered so far are returned.
pub fn present_quiz<R: BufRead, W: Write>(
    quiz: &Quiz,
    console: &mut Console<R, W>,
) -> io::Result<AnswerSet> {
    let total = quiz.total();
    writeln!(
        console.out(),
        "\n--- Quiz with {} ---",
        pluralize_with("question", total, |n| Palette::paint(Palette::INFO, n))
    )?;

    let mut answers = AnswerSet::new();
    for (idx, question) in quiz.questions().iter().enumerate() {
        let out = console.out();
        writeln!(
            out,
            "\n{}",
            Palette::bold(format!("Question {}/{}:", idx + 1, total))
        )?;
        writeln!(out, "{}", question.text)?;
        for option in &question.options {
            writeln!(out, "{option}")?;
        }

        let reply = console.prompt_until(ANSWER_PROMPT, RetryLimit::Unbounded, |line| {
            Letter::parse_choice(line).ok_or_else(|| ANSWER_HINT.to_string())
        })?;
        let Some(answer) = reply else {
            log::debug!("input closed after {} of {total} answers", answers.len());
            break;
        };
        answers.record(idx, answer);
        writeln!(console.out())?;
    }

    Ok(answers)
}
