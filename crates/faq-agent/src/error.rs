use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("docs directory {}: {message}", path.display())]
    DocsDir { path: PathBuf, message: String },

    #[error("no .txt or .md FAQ documents found in {}", .0.display())]
    NoDocuments(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
