use std::path::{Path, PathBuf};

use faq_core::{parse, DocumentFormat, FaqTable};
use tracing::{debug, info, warn};

use crate::error::AppError;

/// A FAQ document read from disk.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub format: DocumentFormat,
    pub text: String,
}

impl Document {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Reads every `.txt`/`.md` file directly inside `dir`, sorted by file name.
///
/// Files that cannot be read as UTF-8 are skipped with a warning. A missing
/// directory, or one that yields no readable documents, is an error.
pub fn load_documents(dir: &Path) -> Result<Vec<Document>, AppError> {
    if !dir.is_dir() {
        let message = if dir.exists() {
            "not a directory"
        } else {
            "not found"
        };
        return Err(AppError::DocsDir {
            path: dir.to_path_buf(),
            message: message.to_string(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| AppError::DocsDir {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut candidates: Vec<(PathBuf, DocumentFormat)> = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                warn!(error = %e, dir = %dir.display(), "failed to read directory entry");
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        if let Some(format) = DocumentFormat::from_path(&path) {
            candidates.push((path, format));
        }
    }
    // Later files win on duplicate questions, so the order must be stable.
    candidates.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name()));

    let mut documents = Vec::with_capacity(candidates.len());
    for (path, format) in candidates {
        match std::fs::read_to_string(&path) {
            Ok(text) => documents.push(Document { path, format, text }),
            Err(e) => warn!(error = %e, file = %path.display(), "skipping unreadable document"),
        }
    }

    if documents.is_empty() {
        return Err(AppError::NoDocuments(dir.to_path_buf()));
    }
    Ok(documents)
}

/// Merges every document into one table in the given order.
pub fn build_table(documents: &[Document]) -> FaqTable {
    let mut table = FaqTable::new();
    for doc in documents {
        let file = doc.file_name();
        let mut entries = 0usize;
        for entry in parse(&doc.text, doc.format) {
            entries += 1;
            let question = entry.question.clone();
            if table.insert(entry).is_some() {
                debug!(file = %file, question = %question, "duplicate question, keeping later answer");
            }
        }
        if entries == 0 {
            warn!(file = %file, format = doc.format.as_str(), "document contains no questions");
        } else {
            info!(file = %file, format = doc.format.as_str(), entries, "parsed document");
        }
    }
    table
}
