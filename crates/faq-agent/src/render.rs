use std::io::IsTerminal;

use faq_core::MatchResult;
use serde::Serialize;

use crate::error::AppError;

pub const NOT_FOUND: &str = "Sorry, I couldn't find anything about that.";
pub const NO_ANSWER: &str = "I don't have information about that yet.";
pub const ANSWER_PREFIX: &str = "Here's what I found:";
const SEPARATOR_WIDTH: usize = 40;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per query.
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Colors are used only when stdout is a terminal and `NO_COLOR` is unset.
pub fn stdout_supports_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Strips backticks and prefixes the answer with a friendly intro line.
pub fn polish_answer(answer: &str) -> String {
    let cleaned = answer.replace('`', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return NO_ANSWER.to_string();
    }
    format!("{ANSWER_PREFIX}\n\n{cleaned}")
}

#[derive(Serialize)]
struct JsonAnswer<'a> {
    query: &'a str,
    matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: OutputFormat,
    color: bool,
}

impl Renderer {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        // JSON output is for pipes; never decorate it.
        let color = color && format == OutputFormat::Text;
        Self { format, color }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    /// Banner printed once before the first prompt. Empty for JSON output.
    pub fn banner(&self, questions: usize) -> String {
        match self.format {
            OutputFormat::Text => self.paint(
                ansi::GREEN,
                &format!("FAQ Agent ready! {questions} questions loaded. Type 'exit' to quit.\n"),
            ),
            OutputFormat::Json => String::new(),
        }
    }

    pub fn prompt(&self) -> String {
        match self.format {
            OutputFormat::Text => self.paint(ansi::YELLOW, "Ask a question: "),
            OutputFormat::Json => String::new(),
        }
    }

    pub fn goodbye(&self) -> String {
        match self.format {
            OutputFormat::Text => self.paint(ansi::MAGENTA, "Goodbye!\n"),
            OutputFormat::Json => String::new(),
        }
    }

    pub fn render(&self, query: &str, result: &MatchResult) -> Result<String, AppError> {
        match self.format {
            OutputFormat::Text => Ok(self.render_text(result)),
            OutputFormat::Json => render_json(query, result),
        }
    }

    fn render_text(&self, result: &MatchResult) -> String {
        let body = match result {
            MatchResult::Matched {
                question, answer, ..
            } => format!(
                "{}\n{}\n",
                self.paint(ansi::GREEN, &format!("Matched FAQ question: {question}")),
                self.paint(ansi::CYAN, &polish_answer(answer)),
            ),
            MatchResult::NoMatch => format!("{}\n", self.paint(ansi::RED, NOT_FOUND)),
        };
        format!("{body}\n{}\n\n", "-".repeat(SEPARATOR_WIDTH))
    }
}

fn render_json(query: &str, result: &MatchResult) -> Result<String, AppError> {
    let record = match result {
        MatchResult::Matched {
            question,
            answer,
            score,
        } => JsonAnswer {
            query,
            matched: true,
            question: Some(question.as_str()),
            answer: Some(answer.replace('`', "")),
            score: Some(*score),
        },
        MatchResult::NoMatch => JsonAnswer {
            query,
            matched: false,
            question: None,
            answer: None,
            score: None,
        },
    };
    Ok(format!("{}\n", serde_json::to_string(&record)?))
}
