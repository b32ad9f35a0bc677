use std::str::Lines;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{DocumentFormat, FaqEntry, FaqTable};

// Level-2 ATX heading. An optional closing run of `#` must be preceded by
// whitespace, so "## What is C#?" keeps its hash.
static MARKDOWN_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}##[ \t]+(.*?)(?:[ \t]+#+)?[ \t]*$").expect("valid regex")
});

/// Parses one document into its question/answer pairs.
///
/// Markdown documents use `## Question` headings; plain-text documents treat
/// every non-blank line ending in `?` as a question. Everything between one
/// question and the next is that question's answer. Text before the first
/// question is ignored, and a document without questions yields nothing.
pub fn parse(text: &str, format: DocumentFormat) -> FaqEntries<'_> {
    FaqEntries {
        lines: text.lines(),
        format,
        current: None,
        body: Vec::new(),
    }
}

/// Parses documents in order into one table. A question seen again in a later
/// document replaces the earlier answer.
pub fn parse_documents<I, S>(documents: I) -> FaqTable
where
    I: IntoIterator<Item = (S, DocumentFormat)>,
    S: AsRef<str>,
{
    let mut table = FaqTable::new();
    for (text, format) in documents {
        table.extend(parse(text.as_ref(), format));
    }
    table
}

/// Lazy, single-pass iterator over the entries of one document.
#[derive(Debug)]
pub struct FaqEntries<'a> {
    lines: Lines<'a>,
    format: DocumentFormat,
    current: Option<String>,
    body: Vec<&'a str>,
}

impl FaqEntries<'_> {
    fn heading(&self, line: &str) -> Option<String> {
        match self.format {
            DocumentFormat::Markdown => MARKDOWN_HEADING
                .captures(line)
                .map(|caps| strip_markers(&caps[1])),
            DocumentFormat::PlainText => {
                let trimmed = line.trim();
                trimmed.ends_with('?').then(|| strip_markers(trimmed))
            }
        }
    }

    fn finish(&mut self, question: String) -> Option<FaqEntry> {
        let body = std::mem::take(&mut self.body);
        // A heading with no text still closes the previous section but
        // produces no entry of its own.
        if question.is_empty() {
            return None;
        }
        Some(FaqEntry {
            question,
            answer: strip_markers(&body.join("\n")),
        })
    }
}

impl Iterator for FaqEntries<'_> {
    type Item = FaqEntry;

    fn next(&mut self) -> Option<FaqEntry> {
        loop {
            let Some(line) = self.lines.next() else {
                let question = self.current.take()?;
                return self.finish(question);
            };

            match self.heading(line) {
                Some(question) => {
                    if let Some(previous) = self.current.replace(question) {
                        if let Some(entry) = self.finish(previous) {
                            return Some(entry);
                        }
                    } else {
                        self.body.clear();
                    }
                }
                None if self.current.is_some() => self.body.push(line),
                None => {}
            }
        }
    }
}

fn strip_markers(s: &str) -> String {
    s.replace('`', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(text: &str, format: DocumentFormat) -> Vec<(String, String)> {
        parse(text, format).map(|e| (e.question, e.answer)).collect()
    }

    #[test]
    fn parse_markdown_faq() {
        let content = r#"## How do I reset my password?
Go to Settings > Security > Reset Password.

## Where are logs stored?
Logs are stored in `C:\ProgramData\MyApp\logs`.
"#;

        let parsed = entries(content, DocumentFormat::Markdown);
        assert_eq!(
            parsed,
            vec![
                (
                    "How do I reset my password?".to_string(),
                    "Go to Settings > Security > Reset Password.".to_string()
                ),
                (
                    "Where are logs stored?".to_string(),
                    r"Logs are stored in C:\ProgramData\MyApp\logs.".to_string()
                ),
            ]
        );
    }

    #[test]
    fn multiline_answers_keep_inner_newlines() {
        let content = "# Support\n\nIntro text.\n\n## How do I install?\n\nRun `install.exe`.\n\nThen follow the prompts.\n\n### Notes\nAdmin rights needed.\n";
        let parsed = entries(content, DocumentFormat::Markdown);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].0, "How do I install?");
        assert_eq!(
            parsed[0].1,
            "Run install.exe.\n\nThen follow the prompts.\n\n### Notes\nAdmin rights needed."
        );
    }

    #[test]
    fn heading_without_body_has_empty_answer() {
        let content = "## First?\n## Second?\nAnswer two.";
        let parsed = entries(content, DocumentFormat::Markdown);
        assert_eq!(
            parsed,
            vec![
                ("First?".to_string(), String::new()),
                ("Second?".to_string(), "Answer two.".to_string()),
            ]
        );
    }

    #[test]
    fn closing_hashes_and_crlf() {
        let content = "## What is `C#`? ##\r\nA language.\r\n## Pricing\r\nFree.\r\n";
        let parsed = entries(content, DocumentFormat::Markdown);
        assert_eq!(parsed[0], ("What is C#?".to_string(), "A language.".to_string()));
        assert_eq!(parsed[1], ("Pricing".to_string(), "Free.".to_string()));
    }

    #[test]
    fn empty_heading_is_a_boundary_only() {
        let content = "## Kept?\nyes\n##  \norphaned text\n";
        let parsed = entries(content, DocumentFormat::Markdown);
        assert_eq!(parsed, vec![("Kept?".to_string(), "yes".to_string())]);
    }

    #[test]
    fn no_headings_yields_nothing() {
        assert!(entries("just some notes\n# Title\n### deeper", DocumentFormat::Markdown).is_empty());
        assert!(entries("", DocumentFormat::Markdown).is_empty());
        assert!(entries("no questions here.\nnone at all", DocumentFormat::PlainText).is_empty());
    }

    #[test]
    fn parse_plaintext_questions() {
        let content = "Pricing info\n\nHow much does it cost?\n$10 per month.\nBilled yearly.\n\nIs there a free trial?\nYes, 14 days.\n";
        let parsed = entries(content, DocumentFormat::PlainText);
        assert_eq!(
            parsed,
            vec![
                (
                    "How much does it cost?".to_string(),
                    "$10 per month.\nBilled yearly.".to_string()
                ),
                ("Is there a free trial?".to_string(), "Yes, 14 days.".to_string()),
            ]
        );
    }

    #[test]
    fn markdown_heading_marker_ignored_in_plaintext() {
        let content = "## Not a heading here\nWhy?\nBecause.";
        let parsed = entries(content, DocumentFormat::PlainText);
        assert_eq!(parsed, vec![("Why?".to_string(), "Because.".to_string())]);
    }

    #[test]
    fn iterator_is_lazy() {
        let content = "## A?\none\n## B?\ntwo\n## C?\nthree";
        let mut it = parse(content, DocumentFormat::Markdown);
        assert_eq!(it.next().map(|e| e.question), Some("A?".to_string()));
        assert_eq!(it.next().map(|e| e.question), Some("B?".to_string()));
        assert_eq!(it.next().map(|e| e.answer), Some("three".to_string()));
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn later_documents_overwrite_duplicates() {
        let first = "## Pricing?\nFree during beta.";
        let second = "Pricing?\n$10 per month.";
        let table = parse_documents([
            (first, DocumentFormat::Markdown),
            (second, DocumentFormat::PlainText),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Pricing?"), Some("$10 per month."));

        let reversed = parse_documents([
            (second, DocumentFormat::PlainText),
            (first, DocumentFormat::Markdown),
        ]);
        assert_eq!(reversed.get("Pricing?"), Some("Free during beta."));
    }
}
