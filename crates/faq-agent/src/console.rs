use std::io::{BufRead, Write};

use faq_core::fuzzy::Similarity;
use faq_core::{FaqTable, Matcher};
use tracing::debug;

use crate::error::AppError;
use crate::render::Renderer;

/// `exit` and `quit`, in any case, end the session instead of being matched.
pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}

/// Reads queries from `input` until EOF or an exit command, writing one
/// rendered answer per query. Returns how many queries were answered.
pub fn run<R, W, S>(
    mut input: R,
    mut output: W,
    table: &FaqTable,
    matcher: &Matcher<S>,
    renderer: &Renderer,
) -> Result<usize, AppError>
where
    R: BufRead,
    W: Write,
    S: Similarity,
{
    write!(output, "{}", renderer.banner(table.len()))?;

    let mut answered = 0usize;
    let mut line = String::new();
    loop {
        write!(output, "{}", renderer.prompt())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let query = line.trim();
        if is_exit_command(query) {
            write!(output, "{}", renderer.goodbye())?;
            break;
        }
        if query.is_empty() {
            continue;
        }

        let evaluation = matcher.evaluate(table, query);
        debug!(
            query,
            normalized = %evaluation.normalized_query,
            best_score = evaluation.best.as_ref().map(|c| c.score),
            threshold = evaluation.threshold,
            accepted = evaluation.accepted(),
            "query evaluated"
        );
        let result = evaluation.into_result();
        write!(output, "{}", renderer.render(query, &result)?)?;
        answered += 1;
    }

    output.flush()?;
    Ok(answered)
}
