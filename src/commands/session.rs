use std::io::{self, BufRead, Write};

use crate::commands::present::present_quiz;
use crate::commands::review::display_results;
use crate::config::{GeneratorSettings, MAX_QUESTIONS, MIN_QUESTIONS};
use crate::console::{Console, RetryLimit};
use crate::error::QuizError;
use crate::llm::{CompletionBackend, generate_quiz};
use crate::palette::Palette;
use crate::score::{ResultSummary, calculate_results};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundParams {
    pub topic: String,
    pub num_questions: usize,
}

#[derive(Debug)]
enum SessionState {
    CollectParams,
    GenerateAndRun(RoundParams),
    ShowResults(ResultSummary),
    AskRepeat,
    Recover(QuizError),
    Exit,
}

/// Runs quiz rounds until the user opts out or input ends.
///
/// Round failures never escape; only console errors outside a round do.
pub async fn run<B, R, W>(
    backend: &B,
    settings: &GeneratorSettings,
    console: &mut Console<R, W>,
) -> io::Result<()>
where
    B: CompletionBackend,
    R: BufRead,
    W: Write,
{
    let mut state = SessionState::CollectParams;
    loop {
        state = match state {
            SessionState::CollectParams => match collect_params(console)? {
                Some(params) => SessionState::GenerateAndRun(params),
                None => SessionState::Exit,
            },
            SessionState::GenerateAndRun(params) => {
                writeln!(
                    console.out(),
                    "\nGenerating a {}-question quiz on {}...",
                    params.num_questions,
                    Palette::paint(Palette::ACCENT, &params.topic)
                )?;
                match run_round(backend, settings, &params, console).await {
                    Ok(summary) => SessionState::ShowResults(summary),
                    Err(err) => SessionState::Recover(err),
                }
            }
            SessionState::ShowResults(summary) => {
                display_results(&summary, console.out())?;
                SessionState::AskRepeat
            }
            SessionState::AskRepeat => {
                if console.ask_yn("Would you like to take another quiz?")? {
                    SessionState::CollectParams
                } else {
                    writeln!(
                        console.out(),
                        "\nThank you for using the quiz generator! Goodbye!"
                    )?;
                    SessionState::Exit
                }
            }
            SessionState::Recover(err) => {
                log::debug!("round failed: {err:?}");
                writeln!(
                    console.out(),
                    "{}",
                    Palette::paint(Palette::DANGER, format!("An error occurred: {err}"))
                )?;
                if console.ask_yn("Would you like to try again?")? {
                    SessionState::CollectParams
                } else {
                    writeln!(console.out(), "\nExiting quiz generator. Goodbye!")?;
                    SessionState::Exit
                }
            }
            SessionState::Exit => return Ok(()),
        };
    }
}

/// Generate, present and score one quiz.
pub async fn run_round<B, R, W>(
    backend: &B,
    settings: &GeneratorSettings,
    params: &RoundParams,
    console: &mut Console<R, W>,
) -> Result<ResultSummary, QuizError>
where
    B: CompletionBackend,
    R: BufRead,
    W: Write,
{
    let quiz = generate_quiz(backend, settings, &params.topic, params.num_questions).await?;
    let answers = present_quiz(&quiz, console)?;
    Ok(calculate_results(&quiz, &answers))
}

/// Reads the topic and a question count in range. `None` when input ends.
pub fn collect_params<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Option<RoundParams>> {
    let Some(topic) = console.read_line("\nEnter the topic for your quiz: ")? else {
        return Ok(None);
    };

    let prompt = format!("How many questions would you like ({MIN_QUESTIONS}-{MAX_QUESTIONS})? ");
    let count = console.prompt_until(&prompt, RetryLimit::Unbounded, parse_question_count)?;

    Ok(count.map(|num_questions| RoundParams {
        topic,
        num_questions,
    }))
}

fn parse_question_count(line: &str) -> Result<usize, String> {
    let count: i64 = line
        .trim()
        .parse()
        .map_err(|_| "Please enter a valid number.".to_string())?;

    usize::try_from(count)
        .ok()
        .filter(|count| (MIN_QUESTIONS..=MAX_QUESTIONS).contains(count))
        .ok_or_else(|| {
            format!("Please enter a number between {MIN_QUESTIONS} and {MAX_QUESTIONS}.")
        })
}
