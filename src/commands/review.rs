use std::io::{self, Write};

use crate::palette::Palette;
use crate::score::ResultSummary;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Banner {
    Excellent,
    Good,
    Fair,
    KeepStudying,
}

impl Banner {
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Banner::Excellent
        } else if percentage >= 70.0 {
            Banner::Good
        } else if percentage >= 50.0 {
            Banner::Fair
        } else {
            Banner::KeepStudying
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Banner::Excellent => "Excellent job! 🌟",
            Banner::Good => "Good work! 👍",
            Banner::Fair => "Not bad. Keep learning! 📚",
            Banner::KeepStudying => "You might need to study this topic more. Don't give up! 💪",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Banner::Excellent | Banner::Good => Palette::SUCCESS,
            Banner::Fair => Palette::WARNING,
            Banner::KeepStudying => Palette::DANGER,
        }
    }
}

pub fn format_score(summary: &ResultSummary) -> String {
    format!(
        "{}/{} ({:.1}%)",
        summary.correct, summary.total, summary.percentage
    )
}

pub fn display_results(summary: &ResultSummary, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n--- Quiz Results ---")?;
    writeln!(out, "Score: {}", Palette::bold(format_score(summary)))?;

    let banner = Banner::for_percentage(summary.percentage);
    writeln!(out, "{}", Palette::paint(banner.color(), banner.message()))?;

    writeln!(out, "\n--- Question Review ---")?;
    for detail in &summary.details {
        writeln!(out, "\nQuestion {}: {}", detail.number, detail.question)?;
        for option in &detail.options {
            writeln!(out, "{option}")?;
        }
        writeln!(out, "Your answer: {}", detail.submitted)?;
        writeln!(out, "Correct answer: {}", detail.correct_answer)?;

        if detail.is_correct {
            writeln!(out, "{}", Palette::paint(Palette::SUCCESS, "✓ Correct!"))?;
        } else {
            writeln!(out, "{}", Palette::paint(Palette::DANGER, "✗ Incorrect"))?;
        }
    }

    Ok(())
}
