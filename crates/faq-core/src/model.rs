use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::fuzzy::normalize;

/// A single question/answer pair as it appears in a source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    /// Heading text with markup removed, e.g. "How do I reset my password?"
    pub question: String,
    /// Body text following the heading, trimmed, backticks removed. May be empty.
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Heading convention used when parsing a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// `## Question` headings.
    Markdown,
    /// Any non-blank line ending in `?` is a question.
    PlainText,
}

impl DocumentFormat {
    /// Maps a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::PlainText => "plaintext",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Record {
    answer: String,
    normalized: String,
}

/// Questions mapped to answers, aggregated across every loaded document.
///
/// Iteration order is lexicographic by question, which is also the tie-break
/// order used by the matcher. Inserting an existing question replaces its
/// answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqTable {
    records: BTreeMap<String, Record>,
}

impl FaqTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the answer it replaced if the question was
    /// already present.
    pub fn insert(&mut self, entry: FaqEntry) -> Option<String> {
        let normalized = normalize(&entry.question);
        self.records
            .insert(
                entry.question,
                Record {
                    answer: entry.answer,
                    normalized,
                },
            )
            .map(|previous| previous.answer)
    }

    pub fn get(&self, question: &str) -> Option<&str> {
        self.records.get(question).map(|r| r.answer.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// `(question, normalized question, answer)` triples in table order.
    pub(crate) fn candidates(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.records
            .iter()
            .map(|(q, r)| (q.as_str(), r.normalized.as_str(), r.answer.as_str()))
    }
}

impl Extend<FaqEntry> for FaqTable {
    fn extend<I: IntoIterator<Item = FaqEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl FromIterator<FaqEntry> for FaqTable {
    fn from_iter<I: IntoIterator<Item = FaqEntry>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

/// Outcome of matching one query against a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MatchResult {
    NoMatch,
    Matched {
        question: String,
        answer: String,
        /// Similarity in `0.0..=100.0`.
        score: f64,
    },
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Matched { score, .. } => Some(*score),
            Self::NoMatch => None,
        }
    }
}
