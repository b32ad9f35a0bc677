use std::path::{Path, PathBuf};
use std::str::FromStr;

use faq_core::fuzzy::Scorer;
use faq_core::{LengthUnit, MatchConfig};

use crate::error::AppError;
use crate::render::OutputFormat;

const DEFAULT_DOCS_DIR: &str = "docs";

/// Application configuration loaded from environment variables.
///
/// Every variable is optional; unset values fall back to the defaults the
/// matcher documents.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned (non-recursively) for `.txt` and `.md` documents.
    pub docs_dir: PathBuf,
    pub matching: MatchConfig,
    pub scorer: Scorer,
    pub output: OutputFormat,
}

impl Config {
    /// Optional:
    /// - `FAQ_DOCS_DIR` (default: "docs")
    /// - `FAQ_SHORT_QUERY_MAX_LEN` (default: 4)
    /// - `FAQ_SHORT_QUERY_THRESHOLD` (default: 80)
    /// - `FAQ_LONG_QUERY_THRESHOLD` (default: 60)
    /// - `FAQ_SCORE_FLOOR` (default: 0)
    /// - `FAQ_LENGTH_UNIT`: `chars` or `words` (default: chars)
    /// - `FAQ_SCORER`: `token_set`, `partial` or `ratio` (default: token_set)
    /// - `FAQ_OUTPUT`: `text` or `json` (default: text)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = MatchConfig::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let docs_dir = var("FAQ_DOCS_DIR").unwrap_or_else(|| DEFAULT_DOCS_DIR.to_string());

        let matching = MatchConfig {
            short_query_max_len: parse_var(&var, "FAQ_SHORT_QUERY_MAX_LEN")?
                .unwrap_or(defaults.short_query_max_len),
            short_query_threshold: parse_var(&var, "FAQ_SHORT_QUERY_THRESHOLD")?
                .unwrap_or(defaults.short_query_threshold),
            long_query_threshold: parse_var(&var, "FAQ_LONG_QUERY_THRESHOLD")?
                .unwrap_or(defaults.long_query_threshold),
            score_floor: parse_var(&var, "FAQ_SCORE_FLOOR")?.unwrap_or(defaults.score_floor),
            length_unit: match var("FAQ_LENGTH_UNIT") {
                Some(v) => LengthUnit::from_name(&v).ok_or_else(|| {
                    AppError::Config(format!("FAQ_LENGTH_UNIT must be chars or words, got {v:?}"))
                })?,
                None => defaults.length_unit,
            },
        };
        matching.validate().map_err(AppError::Config)?;

        let scorer = match var("FAQ_SCORER") {
            Some(v) => Scorer::from_name(&v).ok_or_else(|| {
                AppError::Config(format!(
                    "FAQ_SCORER must be token_set, partial or ratio, got {v:?}"
                ))
            })?,
            None => Scorer::default(),
        };

        let output = match var("FAQ_OUTPUT") {
            Some(v) => OutputFormat::from_name(&v).ok_or_else(|| {
                AppError::Config(format!("FAQ_OUTPUT must be text or json, got {v:?}"))
            })?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            docs_dir: PathBuf::from(docs_dir),
            matching,
            scorer,
            output,
        })
    }

    /// Replaces the docs directory, e.g. with a command-line argument.
    pub fn with_docs_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.docs_dir = dir.as_ref().to_path_buf();
        self
    }
}

fn parse_var<T, F>(var: &F, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| AppError::Config(format!("{key} has an invalid value: {raw:?}")))
        })
        .transpose()
}
