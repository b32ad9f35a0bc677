mod config;
mod console;
mod error;
mod loader;
mod render;

use faq_core::Matcher;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use render::Renderer;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let mut config = Config::from_env()?;
    if let Some(dir) = std::env::args_os().nth(1) {
        config = config.with_docs_dir(dir);
    }
    info!(
        docs_dir = %config.docs_dir.display(),
        scorer = config.scorer.name(),
        short_query_max_len = config.matching.short_query_max_len,
        short_query_threshold = config.matching.short_query_threshold,
        long_query_threshold = config.matching.long_query_threshold,
        score_floor = config.matching.score_floor,
        "configuration loaded"
    );

    let documents = loader::load_documents(&config.docs_dir)?;
    let table = loader::build_table(&documents);
    info!(
        documents = documents.len(),
        questions = table.len(),
        "faq table ready"
    );

    let matcher = Matcher::with_scorer(config.matching.clone(), config.scorer);
    let renderer = Renderer::new(config.output, render::stdout_supports_color());
    info!(output = ?renderer.format(), "starting interactive session");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let answered = console::run(stdin.lock(), stdout.lock(), &table, &matcher, &renderer)?;
    info!(answered, "session ended");
    Ok(())
}
