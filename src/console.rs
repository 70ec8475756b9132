use std::io::{self, BufRead, Stdout, Write};

use crate::palette::Palette;
use crate::utils::is_affirmative;

/// How many invalid replies a prompt tolerates before giving up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryLimit {
    Unbounded,
    Attempts(usize),
}

impl RetryLimit {
    fn allows(self, attempts: usize) -> bool {
        match self {
            RetryLimit::Unbounded => true,
            RetryLimit::Attempts(max) => attempts < max,
        }
    }
}

/// Line-based prompt/answer channel. Production code wraps stdin/stdout,
/// tests wrap in-memory buffers.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `prompt` and reads one line. `None` once input is exhausted.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Re-prompts until `parse` accepts a line. Each rejection prints the
    /// returned message. `None` when input ends or the retry limit runs out.
    pub fn prompt_until<T, F>(
        &mut self,
        prompt: &str,
        limit: RetryLimit,
        mut parse: F,
    ) -> io::Result<Option<T>>
    where
        F: FnMut(&str) -> Result<T, String>,
    {
        let mut attempts = 0;
        while limit.allows(attempts) {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(message) => {
                    writeln!(self.output, "{}", Palette::paint(Palette::WARNING, message))?;
                    attempts += 1;
                }
            }
        }
        log::debug!("giving up on prompt after {attempts} invalid replies");
        Ok(None)
    }

    /// Asks a yes/no question. Anything but `yes`/`y`, including end of
    /// input, is a no.
    pub fn ask_yn(&mut self, question: &str) -> io::Result<bool> {
        let reply = self.read_line(&format!("\n{question} (yes/no): "))?;
        Ok(reply.as_deref().is_some_and(is_affirmative))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::utils::strip_controls_and_escapes;

    pub(crate) fn scripted(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    pub(crate) fn transcript(console: Console<&[u8], Vec<u8>>) -> String {
        let raw = String::from_utf8(console.into_output()).expect("console output is utf-8");
        raw.lines()
            .map(strip_controls_and_escapes)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn parse_even(line: &str) -> Result<u32, String> {
        match line.trim().parse::<u32>() {
            Ok(n) if n % 2 == 0 => Ok(n),
            _ => Err("Even numbers only.".to_string()),
        }
    }

    #[test]
    fn read_line_strips_line_ending_only() {
        let mut console = scripted("  spaced  \r\nnext\n");
        assert_eq!(console.read_line("> ").unwrap().as_deref(), Some("  spaced  "));
        assert_eq!(console.read_line("> ").unwrap().as_deref(), Some("next"));
        assert_eq!(console.read_line("> ").unwrap(), None);
    }

    #[test]
    fn unbounded_prompt_retries_until_valid() {
        let mut console = scripted("1\nx\n3\n4\n");
        let value = console
            .prompt_until("n: ", RetryLimit::Unbounded, parse_even)
            .unwrap();
        assert_eq!(value, Some(4));
        assert_eq!(transcript(console).matches("Even numbers only.").count(), 3);
    }

    #[test]
    fn bounded_prompt_gives_up() {
        let mut console = scripted("1\n3\n4\n");
        let value = console
            .prompt_until("n: ", RetryLimit::Attempts(2), parse_even)
            .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn prompt_ends_with_input() {
        let mut console = scripted("1\n");
        let value = console
            .prompt_until("n: ", RetryLimit::Unbounded, parse_even)
            .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn ask_yn_accepts_only_yes_or_y() {
        let mut console = scripted("Y\nyes\nnope\n");
        assert!(console.ask_yn("Again?").unwrap());
        assert!(console.ask_yn("Again?").unwrap());
        assert!(!console.ask_yn("Again?").unwrap());
        assert!(!console.ask_yn("Again?").unwrap());
    }
}
